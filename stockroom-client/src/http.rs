//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use shared::{PageResponse, Product, ProductQuery};
use std::str::FromStr;
use std::time::Duration;

use crate::{ClientConfig, ClientError, ClientResult, ProductService};

const PRODUCTS_PATH: [&str; 2] = ["api", "products"];

/// HTTP client for the product service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self { client, base_url })
    }

    /// URL of `/api/products/<segments...>`, each segment percent-encoded
    pub fn products_url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(PRODUCTS_PATH);
            path.extend(segments);
        }
        Ok(url)
    }

    /// URL of the list request for `query`
    pub fn list_url(&self, query: &ProductQuery) -> ClientResult<Url> {
        let mut url = self.products_url(&[])?;
        url.query_pairs_mut().extend_pairs(query.to_pairs());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        let text = self.send(self.client.get(url.clone()), &url).await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// GET an endpoint that answers with a bare JSON number
    async fn get_decimal(&self, url: Url) -> ClientResult<Decimal> {
        let text = self.send(self.client.get(url.clone()), &url).await?;
        parse_decimal(&text)
    }

    /// Send the request, fail on non-success status, return the body text
    async fn send(&self, request: RequestBuilder, url: &Url) -> ClientResult<String> {
        tracing::debug!(url = %url, "Sending request");
        let response = request.send().await.inspect_err(|e| {
            tracing::error!(url = %url, error = %e, "Request failed");
        })?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::error!(url = %url, status = status.as_u16(), "Request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

/// Parse a numeric response body.
///
/// Decimal text is taken exactly; an empty or `null` body counts as zero.
fn parse_decimal(body: &str) -> ClientResult<Decimal> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(body)
        .or_else(|_| Decimal::from_scientific(body))
        .map_err(|e| ClientError::InvalidResponse(format!("expected a number, got {body:?}: {e}")))
}

#[async_trait]
impl ProductService for HttpClient {
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<PageResponse<Product>> {
        let url = self.list_url(query)?;
        self.get_json(url).await
    }

    async fn category_total_stock(&self, category: &str) -> ClientResult<i64> {
        let url = self.products_url(&["categoryTotalStock", category])?;
        let total = self.get_decimal(url).await?;
        total
            .trunc()
            .to_i64()
            .ok_or_else(|| ClientError::InvalidResponse(format!("stock total out of range: {total}")))
    }

    async fn category_total_value(&self, category: &str) -> ClientResult<Decimal> {
        let url = self.products_url(&["categoryTotalValue", category])?;
        self.get_decimal(url).await
    }

    async fn category_average_value(&self, category: &str) -> ClientResult<Decimal> {
        let url = self.products_url(&["categoryAverageValue", category])?;
        self.get_decimal(url).await
    }

    async fn average_value(&self) -> ClientResult<Decimal> {
        let url = self.products_url(&["averageValue"])?;
        self.get_decimal(url).await
    }

    async fn mark_out_of_stock(&self, id: i64) -> ClientResult<()> {
        let url = self.products_url(&[&id.to_string(), "outofstock"])?;
        self.send(self.client.post(url.clone()), &url).await?;
        Ok(())
    }

    async fn mark_in_stock(&self, id: i64, quantity: i64) -> ClientResult<()> {
        let mut url = self.products_url(&[&id.to_string(), "instock"])?;
        url.query_pairs_mut()
            .append_pair("quantity", &quantity.to_string());
        self.send(self.client.put(url.clone()), &url).await?;
        Ok(())
    }

    async fn create_product(&self, product: &Product) -> ClientResult<()> {
        let url = self.products_url(&[])?;
        self.send(self.client.post(url.clone()).json(product), &url)
            .await?;
        Ok(())
    }

    async fn update_product(&self, id: i64, product: &Product) -> ClientResult<()> {
        let url = self.products_url(&[&id.to_string()])?;
        self.send(self.client.put(url.clone()).json(product), &url)
            .await?;
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        let url = self.products_url(&[&id.to_string()])?;
        self.send(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }
}
