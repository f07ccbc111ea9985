use crate::constants::{
    DEFAULT_MARKET, DEFAULT_MAX_MARKET_CAP, DEFAULT_MIN_PERF_YTD, DEFAULT_MIN_VOLUME,
    DEFAULT_SORT_COLUMN, EXPORT_LIMIT, EXPORT_MIN_PERF_YTD, SCREEN_COLUMNS, SCREEN_LIMIT,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators understood by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    #[serde(rename = "greater")]
    Greater,
    #[serde(rename = "less")]
    Less,
    #[serde(rename = "egreater")]
    GreaterOrEqual,
    #[serde(rename = "eless")]
    LessOrEqual,
    #[serde(rename = "equal")]
    Equal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub left: String,
    pub operation: Operation,
    pub right: Value,
}

impl Filter {
    fn new(column: &str, operation: Operation, right: impl Into<Value>) -> Self {
        Self {
            left: column.to_string(),
            operation,
            right: right.into(),
        }
    }

    pub fn gt(column: &str, right: impl Into<Value>) -> Self {
        Self::new(column, Operation::Greater, right)
    }

    pub fn lt(column: &str, right: impl Into<Value>) -> Self {
        Self::new(column, Operation::Less, right)
    }

    pub fn ge(column: &str, right: impl Into<Value>) -> Self {
        Self::new(column, Operation::GreaterOrEqual, right)
    }

    pub fn le(column: &str, right: impl Into<Value>) -> Self {
        Self::new(column, Operation::LessOrEqual, right)
    }

    pub fn eq(column: &str, right: impl Into<Value>) -> Self {
        Self::new(column, Operation::Equal, right)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Sort<'a> {
    #[serde(rename = "sortBy")]
    sort_by: &'a str,
    #[serde(rename = "sortOrder")]
    sort_order: &'static str,
}

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    columns: &'a [String],
    filter: &'a [Filter],
    options: Value,
    range: [usize; 2],
    markets: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<Sort<'a>>,
}

/// Builder for one scanner request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerQuery {
    columns: Vec<String>,
    filters: Vec<Filter>,
    sort: Option<(String, bool)>,
    limit: usize,
    market: String,
}

impl Default for ScreenerQuery {
    fn default() -> Self {
        Self {
            columns: vec!["name".to_string()],
            filters: Vec::new(),
            sort: None,
            limit: 50,
            market: DEFAULT_MARKET.to_string(),
        }
    }
}

impl ScreenerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn where_<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.filters.extend(filters);
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.sort = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn set_market(mut self, market: &str) -> Self {
        self.market = market.to_string();
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn row_limit(&self) -> usize {
        self.limit
    }

    /// JSON body for `POST /{market}/scan`.
    pub fn request_body(&self) -> Value {
        let request = ScanRequest {
            columns: &self.columns,
            filter: &self.filters,
            options: serde_json::json!({ "lang": "en" }),
            range: [0, self.limit],
            markets: [self.market.as_str()],
            sort: self.sort.as_ref().map(|(column, ascending)| Sort {
                sort_by: column.as_str(),
                sort_order: if *ascending { "asc" } else { "desc" },
            }),
        };
        serde_json::to_value(request).unwrap_or(Value::Null)
    }
}

/// Caller-tunable thresholds; anything missing falls back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreenParams {
    pub min_volume: Option<f64>,
    pub max_market_cap: Option<f64>,
    pub min_perf_ytd: Option<f64>,
    pub limit: Option<usize>,
}

impl ScreenParams {
    fn query(&self, default_perf_ytd: f64, default_limit: usize) -> ScreenerQuery {
        ScreenerQuery::new()
            .select(SCREEN_COLUMNS)
            .where_([
                Filter::gt("volume", self.min_volume.unwrap_or(DEFAULT_MIN_VOLUME)),
                Filter::lt(
                    "market_cap_calc",
                    self.max_market_cap.unwrap_or(DEFAULT_MAX_MARKET_CAP),
                ),
                Filter::gt("Perf.YTD", self.min_perf_ytd.unwrap_or(default_perf_ytd)),
            ])
            .order_by(DEFAULT_SORT_COLUMN, false)
            .limit(self.limit.unwrap_or(default_limit))
            .set_market(DEFAULT_MARKET)
    }

    /// The query served over HTTP.
    pub fn screen_query(&self) -> ScreenerQuery {
        self.query(DEFAULT_MIN_PERF_YTD, SCREEN_LIMIT)
    }

    /// The wider query written by the file export.
    pub fn export_query(&self) -> ScreenerQuery {
        self.query(EXPORT_MIN_PERF_YTD, EXPORT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_screen_request_body() {
        let body = ScreenParams::default().screen_query().request_body();
        assert_eq!(body["columns"].as_array().unwrap().len(), 12);
        assert_eq!(body["columns"][2], "market_cap_calc");
        assert_eq!(
            body["filter"],
            json!([
                {"left": "volume", "operation": "greater", "right": 500000.0},
                {"left": "market_cap_calc", "operation": "less", "right": 100000000.0},
                {"left": "Perf.YTD", "operation": "greater", "right": 30.0}
            ])
        );
        assert_eq!(body["sort"], json!({"sortBy": "volume", "sortOrder": "desc"}));
        assert_eq!(body["range"], json!([0, 100]));
        assert_eq!(body["markets"], json!(["crypto"]));
    }

    #[test]
    fn export_query_is_wider() {
        let query = ScreenParams::default().export_query();
        assert_eq!(query.row_limit(), 250);
        assert_eq!(query.request_body()["filter"][2]["right"], json!(25.0));
    }

    #[test]
    fn params_override_defaults() {
        let params: ScreenParams =
            serde_json::from_value(json!({"min_volume": 1000, "limit": 5})).unwrap();
        let body = params.screen_query().request_body();
        assert_eq!(body["filter"][0]["right"], json!(1000.0));
        assert_eq!(body["filter"][1]["right"], json!(100000000.0));
        assert_eq!(body["range"], json!([0, 5]));
    }

    #[test]
    fn unsorted_query_omits_sort() {
        let body = ScreenerQuery::new()
            .select(["name", "close"])
            .where_([Filter::le("close", 10), Filter::eq("type", "spot")])
            .set_market("america")
            .request_body();
        assert!(body.get("sort").is_none());
        assert_eq!(body["filter"][0]["operation"], "eless");
        assert_eq!(body["filter"][1]["right"], "spot");
        assert_eq!(body["markets"], json!(["america"]));
    }
}
