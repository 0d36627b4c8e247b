//! In-memory product service and prompt for tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use shared::{Decimal, PageResponse, Product, ProductQuery};
use stockroom_client::{ClientError, ClientResult, ProductService};

use crate::prompt::{Notice, UserPrompt};

/// One recorded service call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ProductQuery),
    TotalStock(String),
    TotalValue(String),
    CategoryAverage(String),
    AverageValue,
    OutOfStock(i64),
    InStock { id: i64, quantity: i64 },
    Create(Product),
    Update(i64, Product),
    Delete(i64),
}

impl Call {
    fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Call::TotalStock(_) | Call::TotalValue(_) | Call::CategoryAverage(_) | Call::AverageValue
        )
    }

    fn is_write(&self) -> bool {
        matches!(
            self,
            Call::OutOfStock(_)
                | Call::InStock { .. }
                | Call::Create(_)
                | Call::Update(..)
                | Call::Delete(_)
        )
    }
}

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    total: u64,
    calls: Vec<Call>,
    fail_list: bool,
    fail_next_list: bool,
    list_delays: VecDeque<Duration>,
    fail_writes: bool,
    fail_aggregates: bool,
    aggregate_delays: VecDeque<Duration>,
}

/// Recording [`ProductService`] with failure injection and delays.
///
/// Aggregates are computed from the page it serves: stock and value are
/// summed per category, the overall average is fixed at 125.75.
#[derive(Default)]
pub struct MockService {
    inner: Mutex<Inner>,
}

pub fn overall_average() -> Decimal {
    Decimal::new(12575, 2)
}

pub fn product(id: i64, category: &str, stock: i64) -> Product {
    Product::new(format!("item-{id}"), category, Decimal::new(250, 2), stock).with_id(id)
}

fn failure() -> ClientError {
    ClientError::Status {
        status: 500,
        body: "injected failure".to_string(),
    }
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(products: Vec<Product>, total: u64) -> Self {
        let service = Self::new();
        service.set_page(products, total);
        service
    }

    pub fn set_page(&self, products: Vec<Product>, total: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.products = products;
        inner.total = total;
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn fail_next_list(&self) {
        self.inner.lock().unwrap().fail_next_list = true;
    }

    pub fn delay_next_list(&self, delay: Duration) {
        self.inner.lock().unwrap().list_delays.push_back(delay);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    pub fn fail_aggregates(&self, fail: bool) {
        self.inner.lock().unwrap().fail_aggregates = fail;
    }

    /// Delay every aggregate request of the next metrics cycle
    pub fn delay_next_aggregates(&self, delay: Duration, requests: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.aggregate_delays.extend(std::iter::repeat_n(delay, requests));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn list_queries(&self) -> Vec<ProductQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn aggregate_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.is_aggregate()).count()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.is_write()).collect()
    }

    async fn aggregate<T>(&self, call: Call, f: impl FnOnce(&[Product]) -> T) -> ClientResult<T> {
        let (delay, fail, value) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(call);
            let delay = inner.aggregate_delays.pop_front();
            (delay, inner.fail_aggregates, f(&inner.products))
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail { Err(failure()) } else { Ok(value) }
    }

    fn write(&self, call: Call) -> ClientResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.fail_writes { Err(failure()) } else { Ok(()) }
    }
}

fn in_category<'a>(products: &'a [Product], category: &'a str) -> impl Iterator<Item = &'a Product> {
    products.iter().filter(move |p| p.category == category)
}

fn category_value(products: &[Product], category: &str) -> Decimal {
    in_category(products, category)
        .map(|p| p.unit_price * Decimal::from(p.stock_quantity))
        .sum()
}

#[async_trait]
impl ProductService for MockService {
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<PageResponse<Product>> {
        let (delay, fail, content, total) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(Call::List(query.clone()));
            let fail = inner.fail_list || std::mem::take(&mut inner.fail_next_list);
            let delay = inner.list_delays.pop_front();
            (delay, fail, inner.products.clone(), inner.total)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(failure());
        }
        Ok(PageResponse {
            content,
            total_elements: total,
            total_pages: 0,
            number: query.page,
            size: query.size,
        })
    }

    async fn category_total_stock(&self, category: &str) -> ClientResult<i64> {
        self.aggregate(Call::TotalStock(category.to_string()), |products| {
            in_category(products, category).map(|p| p.stock_quantity).sum()
        })
        .await
    }

    async fn category_total_value(&self, category: &str) -> ClientResult<Decimal> {
        self.aggregate(Call::TotalValue(category.to_string()), |products| {
            category_value(products, category)
        })
        .await
    }

    async fn category_average_value(&self, category: &str) -> ClientResult<Decimal> {
        self.aggregate(Call::CategoryAverage(category.to_string()), |products| {
            let stock: i64 = in_category(products, category).map(|p| p.stock_quantity).sum();
            if stock == 0 {
                Decimal::ZERO
            } else {
                category_value(products, category) / Decimal::from(stock)
            }
        })
        .await
    }

    async fn average_value(&self) -> ClientResult<Decimal> {
        self.aggregate(Call::AverageValue, |_| overall_average()).await
    }

    async fn mark_out_of_stock(&self, id: i64) -> ClientResult<()> {
        self.write(Call::OutOfStock(id))
    }

    async fn mark_in_stock(&self, id: i64, quantity: i64) -> ClientResult<()> {
        self.write(Call::InStock { id, quantity })
    }

    async fn create_product(&self, product: &Product) -> ClientResult<()> {
        self.write(Call::Create(product.clone()))
    }

    async fn update_product(&self, id: i64, product: &Product) -> ClientResult<()> {
        self.write(Call::Update(id, product.clone()))
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.write(Call::Delete(id))
    }
}

/// Prompt that records notices and answers confirmations with a fixed reply
#[derive(Default)]
pub struct MockPrompt {
    answer: bool,
    notices: Mutex<Vec<Notice>>,
    questions: Mutex<Vec<String>>,
}

impl MockPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserPrompt for MockPrompt {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    async fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.answer
    }
}
