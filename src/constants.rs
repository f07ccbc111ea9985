/// Scanner column ids requested by every screen, in output order.
/// The positional excision in `normalize` is tuned for exactly this schema.
pub const SCREEN_COLUMNS: [&str; 12] = [
    "name",
    "volume",
    "market_cap_calc",
    "Perf.YTD",
    "Perf.W",
    "Perf.1M",
    "Perf.3M",
    "Perf.6M",
    "Perf.Y",
    "Perf.All",
    "change",
    "Value.Traded",
];

pub const DEFAULT_MARKET: &str = "crypto";
pub const DEFAULT_SORT_COLUMN: &str = "volume";
pub const DEFAULT_SCANNER_URL: &str = "https://scanner.tradingview.com";

// Filter defaults for the HTTP screen
pub const DEFAULT_MIN_VOLUME: f64 = 500_000.0;
pub const DEFAULT_MAX_MARKET_CAP: f64 = 100_000_000.0;
pub const DEFAULT_MIN_PERF_YTD: f64 = 30.0;
pub const SCREEN_LIMIT: usize = 100;

// The file export pulls a wider, looser set
pub const EXPORT_MIN_PERF_YTD: f64 = 25.0;
pub const EXPORT_LIMIT: usize = 250;
pub const DEFAULT_EXPORT_PATH: &str = "tradingview_data.json";

pub const DEFAULT_PRODUCT_URL: &str =
    "https://www.costco.ca/northfork-meats-elk-ground-meat-454-g-1-lb-x-10-pack.product.100571433.html";
pub const DEFAULT_PRICE_DB: &str = "prices.db";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Marker of the inline script carrying product analytics data.
pub const PRODUCT_DATA_MARKER: &str = "var adobeProductData =";
