//! Product service trait

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{PageResponse, Product, ProductQuery};

use crate::ClientResult;

/// Remote product service
///
/// One method per backend endpoint. Write operations return `()`: their
/// response bodies are not used, the caller refetches instead.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// GET /api/products
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<PageResponse<Product>>;

    /// GET /api/products/categoryTotalStock/{category}
    async fn category_total_stock(&self, category: &str) -> ClientResult<i64>;

    /// GET /api/products/categoryTotalValue/{category}
    async fn category_total_value(&self, category: &str) -> ClientResult<Decimal>;

    /// GET /api/products/categoryAverageValue/{category}
    async fn category_average_value(&self, category: &str) -> ClientResult<Decimal>;

    /// GET /api/products/averageValue
    async fn average_value(&self) -> ClientResult<Decimal>;

    /// POST /api/products/{id}/outofstock
    async fn mark_out_of_stock(&self, id: i64) -> ClientResult<()>;

    /// PUT /api/products/{id}/instock?quantity=
    async fn mark_in_stock(&self, id: i64, quantity: i64) -> ClientResult<()>;

    /// POST /api/products
    async fn create_product(&self, product: &Product) -> ClientResult<()>;

    /// PUT /api/products/{id}
    async fn update_product(&self, id: i64, product: &Product) -> ClientResult<()>;

    /// DELETE /api/products/{id}
    async fn delete_product(&self, id: i64) -> ClientResult<()>;
}
