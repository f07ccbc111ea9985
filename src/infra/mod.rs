pub mod http_client;
pub mod price_store;

pub use http_client::ReqwestPageFetcher;
pub use price_store::SqlitePriceStore;
