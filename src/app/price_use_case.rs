use crate::app::ports::{PageFetcher, PriceStore};
use crate::error::ScreenerError;
use crate::metrics::PipelineMetrics;
use crate::price::{extract_product, PriceMovement};
use crate::types::PriceReport;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// One pass: fetch page, extract price, compare with history, store.
pub struct PriceUseCase {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn PriceStore>,
}

impl PriceUseCase {
    pub fn new(fetcher: Arc<dyn PageFetcher>, store: Arc<dyn PriceStore>) -> Self {
        Self { fetcher, store }
    }

    /// Never fails: errors end up in the report's message and status code.
    #[instrument(skip(self))]
    pub async fn check(&self, url: &str) -> PriceReport {
        let mut report = PriceReport::default();

        info!("Fetching product page");
        let html = match self.fetcher.fetch_page(url).await {
            Ok(html) => html,
            Err(e) if e.is_timeout() => {
                return fail(report, "Timeout error while fetching the page", e, 504)
            }
            Err(e) => return fail(report, "Error fetching the page", e, 500),
        };
        if html.is_empty() {
            warn!("No page content received, skipping the check");
            return report;
        }

        let product = match extract_product(&html) {
            Ok(product) => product,
            Err(e) => return fail(report, "Error parsing adobeProductData", e, 500),
        };
        info!(price = product.price, sku = %product.product_id, "Extracted product data");
        report.price = Some(product.price);
        report.product_id = Some(product.product_id.clone());

        let timestamp = chrono::Utc::now().timestamp();
        let movement = match self.compare_and_store(&product.product_id, product.price, timestamp) {
            Ok(movement) => movement,
            Err(e) => {
                return fail(report, "Error comparing/updating prices in database", e, 500)
            }
        };

        PipelineMetrics::record_price_check(movement.as_str());
        report.message = movement.message().to_string();
        info!(movement = movement.as_str(), "Price check completed");
        report
    }

    fn compare_and_store(
        &self,
        product_id: &str,
        price: f64,
        timestamp: i64,
    ) -> crate::error::Result<PriceMovement> {
        let previous = self.store.swap_price(product_id, price, timestamp)?;
        if let Some(prev) = previous {
            info!("Previous price for product {} is {}", product_id, prev);
        }
        Ok(PriceMovement::compare(previous, price))
    }
}

fn fail(mut report: PriceReport, context: &str, err: ScreenerError, status: u16) -> PriceReport {
    let message = format!("{context}: {err}");
    error!("{}", message);
    PipelineMetrics::record_price_check("error");
    report.status_code = status;
    report.message = message;
    report
}
