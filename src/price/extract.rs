use crate::constants::PRODUCT_DATA_MARKER;
use crate::error::{Result, ScreenerError};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("static selector"));
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"priceTotal:\s*initialize\(([^)]+)\)").expect("static regex"));
static SKU_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SKU:\s*initialize\(([^)]+)\)").expect("static regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub price: f64,
    pub product_id: String,
}

/// Text of the first inline script carrying the product data block.
pub fn find_product_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT_SELECTOR)
        .map(|script| script.text().collect::<String>())
        .find(|text| text.contains(PRODUCT_DATA_MARKER))
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '\'' || c == '"')
}

fn capture<'a>(re: &Regex, script: &'a str, what: &str) -> Result<&'a str> {
    re.captures(script)
        .and_then(|c| c.get(1))
        .map(|m| strip_quotes(m.as_str()))
        .ok_or_else(|| ScreenerError::Extraction(format!("Could not extract {what}.")))
}

pub fn extract_price(script: &str) -> Result<f64> {
    let raw = capture(&PRICE_RE, script, "priceTotal")?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| ScreenerError::Extraction(format!("priceTotal '{raw}' is not a number: {e}")))
}

pub fn extract_sku(script: &str) -> Result<String> {
    Ok(capture(&SKU_RE, script, "SKU")?.trim().to_string())
}

/// Price and SKU from a product page.
pub fn extract_product(html: &str) -> Result<ProductData> {
    let script = find_product_script(html).ok_or_else(|| {
        ScreenerError::Extraction("Could not find the adobeProductData script.".to_string())
    })?;
    debug!("Found the adobeProductData script");
    let price = extract_price(&script)?;
    let product_id = extract_sku(&script)?;
    Ok(ProductData { price, product_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <script>window.dataLayer = [];</script>
        <script>
          var adobeProductData = {
            SKU: initialize('100571433'),
            priceTotal: initialize("189.99"),
            currency: 'CAD'
          };
        </script>
        </head><body><h1>Elk</h1></body></html>"#;

    #[test]
    fn extracts_price_and_sku() {
        let product = extract_product(PAGE).unwrap();
        assert_eq!(product.price, 189.99);
        assert_eq!(product.product_id, "100571433");
    }

    #[test]
    fn unquoted_values_parse() {
        let script = "var adobeProductData = { SKU: initialize(42), priceTotal: initialize( 7.5 ) }";
        assert_eq!(extract_price(script).unwrap(), 7.5);
        assert_eq!(extract_sku(script).unwrap(), "42");
    }

    #[test]
    fn missing_script_is_an_extraction_error() {
        let err = extract_product("<html><script>var other = 1;</script></html>").unwrap_err();
        assert!(err.to_string().contains("adobeProductData"));
    }

    #[test]
    fn missing_price_is_an_extraction_error() {
        let script = "var adobeProductData = { SKU: initialize('1') }";
        assert!(matches!(extract_price(script), Err(ScreenerError::Extraction(_))));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let script = "var adobeProductData = { priceTotal: initialize('n/a') }";
        assert!(extract_price(script).is_err());
    }
}
