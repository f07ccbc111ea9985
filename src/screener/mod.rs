pub mod client;
pub mod query;

pub use client::{parse_scan_response, ScannerClient};
pub use query::{Filter, Operation, ScreenParams, ScreenerQuery};
