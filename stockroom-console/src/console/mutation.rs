//! Mutation handlers
//!
//! Each write runs in three steps: patch the published page, send the
//! request, then refetch. A failed request takes the patch back before the
//! refetch and tells the user.

use super::*;
use shared::Product;
use std::future::Future;
use stockroom_client::ClientResult;

use crate::state::Patch;

/// How a mutation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Server accepted the write
    Committed,
    /// Server rejected the write; local change reverted
    RolledBack,
    /// User declined the confirmation, nothing was sent
    Declined,
}

impl Console {
    /// Copy of a row on the current page to edit and pass to
    /// [`Console::update_product`]
    pub async fn edit(&self, id: i64) -> ConsoleResult<Product> {
        self.state
            .read()
            .await
            .page
            .find(id)
            .cloned()
            .ok_or(ConsoleError::NotFound(id))
    }

    pub async fn mark_out_of_stock(&self, id: i64) -> ConsoleResult<MutationOutcome> {
        let patch = Patch::SetStock { id, quantity: 0 };
        self.mutate("mark out of stock", patch, self.service.mark_out_of_stock(id))
            .await
    }

    /// Restock a product; `None` uses the configured default quantity
    pub async fn mark_in_stock(
        &self,
        id: i64,
        quantity: Option<i64>,
    ) -> ConsoleResult<MutationOutcome> {
        let quantity = quantity.unwrap_or(self.restock_quantity);
        if quantity < 0 {
            return Err(shared::ValidationError::NegativeStock(quantity).into());
        }
        let patch = Patch::SetStock { id, quantity };
        self.mutate("mark in stock", patch, self.service.mark_in_stock(id, quantity))
            .await
    }

    pub async fn create_product(&self, product: Product) -> ConsoleResult<MutationOutcome> {
        product.validate()?;
        let patch = Patch::Append {
            product: product.clone(),
        };
        self.mutate("create product", patch, self.service.create_product(&product))
            .await
    }

    /// Save an edited copy of row `id`. Fields the edit did not touch are
    /// sent back as they were received. An edit without an id takes `id`;
    /// one carrying a different id is rejected.
    pub async fn update_product(
        &self,
        id: i64,
        mut edited: Product,
    ) -> ConsoleResult<MutationOutcome> {
        match edited.id {
            Some(found) if found != id => {
                return Err(shared::ValidationError::IdMismatch { expected: id, found }.into());
            }
            _ => edited.id = Some(id),
        }
        edited.validate()?;
        let patch = Patch::Replace {
            id,
            product: edited.clone(),
        };
        self.mutate("update product", patch, self.service.update_product(id, &edited))
            .await
    }

    /// Delete after the user confirms
    pub async fn delete_product(&self, id: i64) -> ConsoleResult<MutationOutcome> {
        let product = self.edit(id).await?;
        let question = format!("Delete \"{}\" ({})?", product.name, product.category);
        if !self.prompt.confirm(&question).await {
            tracing::info!(id, "Delete declined");
            self.prompt.notify(Notice::info("Delete cancelled"));
            return Ok(MutationOutcome::Declined);
        }
        self.mutate("delete product", Patch::Remove { id }, self.service.delete_product(id))
            .await
    }

    async fn mutate<F>(&self, action: &str, patch: Patch, commit: F) -> ConsoleResult<MutationOutcome>
    where
        F: Future<Output = ClientResult<()>>,
    {
        let target = match &patch {
            Patch::SetStock { id, .. } | Patch::Replace { id, .. } | Patch::Remove { id } => Some(*id),
            Patch::Append { .. } => None,
        };
        let undo = self
            .transition(|state| state.apply(patch))
            .await
            .ok_or(ConsoleError::NotFound(target.unwrap_or_default()))?;

        match commit.await {
            Ok(()) => {
                tracing::info!(action, id = ?target, "Mutation committed");
                self.refresh().await;
                Ok(MutationOutcome::Committed)
            }
            Err(e) => {
                tracing::warn!(action, id = ?target, error = %e, "Mutation failed, rolling back");
                self.transition(|state| (state.rollback(undo), ())).await;
                self.notify_failure(&format!("Failed to {action}"), &e.into());
                self.refresh().await;
                Ok(MutationOutcome::RolledBack)
            }
        }
    }
}
