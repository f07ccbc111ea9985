pub mod extract;

pub use extract::{extract_product, ProductData};

/// How the current price compares with the last stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMovement {
    Dropped,
    Unchanged,
    Increased,
    NoHistory,
}

impl PriceMovement {
    pub fn compare(previous: Option<f64>, current: f64) -> Self {
        match previous {
            None => PriceMovement::NoHistory,
            Some(prev) if current < prev => PriceMovement::Dropped,
            Some(prev) if current == prev => PriceMovement::Unchanged,
            Some(_) => PriceMovement::Increased,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PriceMovement::Dropped => "The product is on sale!",
            PriceMovement::Unchanged => "The price has not changed.",
            PriceMovement::Increased => "The price has increased.",
            PriceMovement::NoHistory => "No previous price data to compare.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceMovement::Dropped => "dropped",
            PriceMovement::Unchanged => "unchanged",
            PriceMovement::Increased => "increased",
            PriceMovement::NoHistory => "no_history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_against_previous() {
        assert_eq!(PriceMovement::compare(None, 10.0), PriceMovement::NoHistory);
        assert_eq!(PriceMovement::compare(Some(12.0), 10.0), PriceMovement::Dropped);
        assert_eq!(PriceMovement::compare(Some(10.0), 10.0), PriceMovement::Unchanged);
        assert_eq!(PriceMovement::compare(Some(8.0), 10.0), PriceMovement::Increased);
        assert_eq!(PriceMovement::Dropped.message(), "The product is on sale!");
    }
}
