pub mod normalize;
pub mod query;
pub mod session;

pub use normalize::{RedactionPolicy, normalize_order};
pub use session::{OrderSession, SessionPhase, SessionSnapshot};

use serde::Serialize;

/// One normalized order. Built exactly once from a raw page record and never
/// mutated afterward; identity is `id`, unique across the accumulated set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub name: String,
    pub email: String,
    /// Decimal amounts kept as upstream strings so cent precision survives
    /// display; `amount` parses them for summation.
    pub sub_total: String,
    pub grand_total: String,
    pub refunded: bool,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub item_name: String,
    pub item_variant: Option<String>,
    pub price: String,
    pub quantity: u32,
}

impl Order {
    pub fn grand_total_amount(&self) -> f64 {
        amount(&self.grand_total)
    }
}

/// Parse a decimal amount string for arithmetic. Summation deliberately uses
/// standard floating math, consistent with the source system's own rounding.
pub fn amount(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_parses_decimal_strings() {
        assert_eq!(amount("50.00"), 50.0);
        assert_eq!(amount("0.01"), 0.01);
        assert_eq!(amount(" 12.50 "), 12.5);
    }

    #[test]
    fn test_amount_unparseable_is_zero() {
        assert_eq!(amount(""), 0.0);
        assert_eq!(amount("n/a"), 0.0);
    }
}
