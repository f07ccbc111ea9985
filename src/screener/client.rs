use crate::app::ports::RecordSource;
use crate::error::{Result, ScreenerError};
use crate::metrics::PipelineMetrics;
use crate::screener::query::ScreenerQuery;
use crate::types::{Record, RecordSet};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(rename = "totalCount", default)]
    total_count: u64,
    #[serde(default)]
    data: Option<Vec<ScanRow>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScanRow {
    s: String,
    d: Vec<Value>,
}

/// Turns a raw scanner response into records keyed by the requested columns.
pub fn parse_scan_response(columns: &[String], body: &[u8]) -> Result<RecordSet> {
    let response: ScanResponse = serde_json::from_slice(body)?;
    if let Some(message) = response.error {
        return Err(ScreenerError::Api { message });
    }

    let rows = response.data.unwrap_or_default();
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if row.d.len() != columns.len() {
            return Err(ScreenerError::Api {
                message: format!(
                    "row {} has {} values for {} columns",
                    row.s,
                    row.d.len(),
                    columns.len()
                ),
            });
        }
        let record: Record = columns.iter().cloned().zip(row.d).collect();
        records.push(record);
    }

    debug!(
        total_count = response.total_count,
        returned = records.len(),
        "Decoded scanner response"
    );
    Ok(RecordSet::new(columns.to_vec(), records))
}

/// HTTP client for the scanner's `/{market}/scan` endpoint.
pub struct ScannerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScannerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn scan_url(&self, market: &str) -> String {
        format!("{}/{}/scan", self.base_url, market)
    }

    #[instrument(skip(self, query), fields(market = %query.market(), limit = query.row_limit()))]
    pub async fn scan(&self, query: &ScreenerQuery) -> Result<RecordSet> {
        let url = self.scan_url(query.market());
        info!("Querying scanner");
        let resp = self
            .client
            .post(&url)
            .json(&query.request_body())
            .send()
            .await?
            .error_for_status()?;
        let bytes = resp.bytes().await?;
        let set = parse_scan_response(query.columns(), &bytes)?;
        PipelineMetrics::record_screen(set.len());
        info!(rows = set.len(), "Scanner returned rows");
        Ok(set)
    }
}

#[async_trait]
impl RecordSource for ScannerClient {
    async fn fetch(&self, query: &ScreenerQuery) -> Result<RecordSet> {
        self.scan(query).await
    }
}
