pub mod constants;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod price;
pub mod screener;
pub mod server;
pub mod types;

// Application use cases and the ports they depend on
pub mod app;
// Adapters for the ports
pub mod infra;
