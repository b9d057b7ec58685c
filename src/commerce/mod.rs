pub mod client;

pub use client::CommerceClient;

use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// One page of the upstream orders endpoint:
/// `{ "result": [...], "pagination": { "nextPageCursor": ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPage {
    pub result: Vec<RawOrder>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub next_page_cursor: Option<String>,
}

impl OrdersPage {
    /// Opaque cursor for the next page, or `None` when this was the last one.
    /// The upstream sends both `null` and `""` for "no more pages".
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination
            .next_page_cursor
            .as_deref()
            .filter(|c| !c.is_empty())
    }
}

/// Wire schema of a single upstream order. `id`, `orderNumber`, the monetary
/// fields, and `lineItems` are required; decoding fails on their absence
/// (an incompatible upstream schema, not a recoverable condition). The
/// proxied deployment strips `billingAddress` and `customerEmail`, so those
/// stay optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: String,
    #[serde(deserialize_with = "de_order_number")]
    pub order_number: String,
    pub billing_address: Option<RawAddress>,
    pub customer_email: Option<String>,
    pub subtotal: RawMoney,
    pub grand_total: RawMoney,
    pub refunded_total: Option<RawMoney>,
    pub line_items: Vec<RawLineItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Decimal currency amount as the upstream serializes it (e.g. `"50.00"`).
/// The string is carried through verbatim so cent precision survives display.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMoney {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    pub product_name: String,
    pub unit_price_paid: RawMoney,
    pub quantity: u32,
    #[serde(default)]
    pub variant_options: Vec<RawVariantOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVariantOption {
    pub value: String,
}

// Depending on deployment, order numbers arrive as integers or as
// numeric strings. Both normalize to a string.
fn de_order_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OrderNumber {
        Text(String),
        Numeric(u64),
    }

    Ok(match OrderNumber::deserialize(deserializer)? {
        OrderNumber::Text(s) => s,
        OrderNumber::Numeric(n) => n.to_string(),
    })
}

/// Source of raw order pages. `CommerceClient` is the real implementation;
/// tests drive the pagination loop with scripted pages.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page. `None` requests the first page. Performs no retry;
    /// that decision belongs to the caller.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<OrdersPage, AppError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialize_with_cursor() {
        let page: OrdersPage = serde_json::from_str(
            r#"{
                "result": [{
                    "id": "ord-1",
                    "orderNumber": "1001",
                    "billingAddress": {"firstName": "Alice", "lastName": "Smith"},
                    "customerEmail": "alice@example.com",
                    "subtotal": {"value": "100.00"},
                    "grandTotal": {"value": "105.00"},
                    "refundedTotal": {"value": "0.00"},
                    "lineItems": [{
                        "productName": "Weekend Pass",
                        "unitPricePaid": {"value": "50.00"},
                        "quantity": 2,
                        "variantOptions": [{"value": "Seated"}]
                    }]
                }],
                "pagination": {"nextPageCursor": "abc123"}
            }"#,
        )
        .unwrap();

        assert_eq!(page.result.len(), 1);
        assert_eq!(page.next_cursor(), Some("abc123"));

        let order = &page.result[0];
        assert_eq!(order.id, "ord-1");
        assert_eq!(order.order_number, "1001");
        assert_eq!(order.grand_total.value, "105.00");
        assert_eq!(order.line_items[0].variant_options[0].value, "Seated");
    }

    #[test]
    fn test_page_deserialize_numeric_order_number() {
        let order: RawOrder = serde_json::from_str(
            r#"{
                "id": "ord-2",
                "orderNumber": 1002,
                "subtotal": {"value": "30.00"},
                "grandTotal": {"value": "30.00"},
                "lineItems": []
            }"#,
        )
        .unwrap();

        assert_eq!(order.order_number, "1002");
        assert!(order.billing_address.is_none());
        assert!(order.refunded_total.is_none());
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_page_deserialize_null_cursor_is_last_page() {
        let page: OrdersPage =
            serde_json::from_str(r#"{"result": [], "pagination": {"nextPageCursor": null}}"#)
                .unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_page_deserialize_empty_cursor_is_last_page() {
        let page: OrdersPage =
            serde_json::from_str(r#"{"result": [], "pagination": {"nextPageCursor": ""}}"#)
                .unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_missing_required_field_fails_decode() {
        // No orderNumber: incompatible upstream schema.
        let result: Result<RawOrder, _> = serde_json::from_str(
            r#"{
                "id": "ord-3",
                "subtotal": {"value": "1.00"},
                "grandTotal": {"value": "1.00"},
                "lineItems": []
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_line_item_without_variant_options() {
        let item: RawLineItem = serde_json::from_str(
            r#"{"productName": "Day Ticket", "unitPricePaid": {"value": "20.00"}, "quantity": 1}"#,
        )
        .unwrap();
        assert!(item.variant_options.is_empty());
    }
}
