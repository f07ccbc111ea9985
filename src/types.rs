use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One screened row: field name to scalar value, in column order.
pub type Record = Map<String, Value>;

/// An ordered, already filtered and bounded sequence of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Field order as requested from the source.
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
        Self { columns, rows }
    }

    /// Builds a set from bare records, taking the column order from the first one.
    pub fn from_records(rows: Vec<Record>) -> Self {
        let columns = rows
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Which normalization the service applies to a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMode {
    /// Legacy line-window excision over the rendered frame.
    #[default]
    Positional,
    /// Returns the rows directly, no text surgery.
    Structural,
}

impl NormalizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizeMode::Positional => "positional",
            NormalizeMode::Structural => "structural",
        }
    }
}

/// Outcome of one price check, shaped like the JSON the route returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    #[serde(skip)]
    pub status_code: u16,
    pub message: String,
    pub price: Option<f64>,
    pub product_id: Option<String>,
}

impl Default for PriceReport {
    fn default() -> Self {
        Self {
            status_code: 200,
            message: String::new(),
            price: None,
            product_id: None,
        }
    }
}
