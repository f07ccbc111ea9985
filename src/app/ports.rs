use crate::error::Result;
use crate::screener::ScreenerQuery;
use crate::types::RecordSet;
use async_trait::async_trait;

/// Supplies records already filtered, sorted and limited per the query.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, query: &ScreenerQuery) -> Result<RecordSet>;
}

// Price tracking ports
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

pub trait PriceStore: Send + Sync {
    fn previous_price(&self, product_id: &str) -> Result<Option<f64>>;
    fn record_price(&self, product_id: &str, price: f64, timestamp: i64) -> Result<()>;
    /// Stores `price` and returns the one it replaced, as a single atomic step.
    fn swap_price(&self, product_id: &str, price: f64, timestamp: i64) -> Result<Option<f64>>;
}
