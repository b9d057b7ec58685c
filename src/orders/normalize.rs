use super::{Order, OrderItem};
use crate::commerce::RawOrder;

/// Placeholder written into `name` and `email` when redaction is on.
pub const REDACTED_PLACEHOLDER: &str = "<Redacted>";

/// Whether customer PII is carried through or replaced with the fixed
/// placeholder. Selected once per session from configuration, never
/// per-record; `name` and `email` are always treated the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedactionPolicy {
    Plain,
    Redacted,
}

/// Map one raw page record into the domain model. Pure; required fields are
/// guaranteed by the wire decode, so this cannot fail.
pub fn normalize_order(raw: &RawOrder, policy: RedactionPolicy) -> Order {
    let (name, email) = match policy {
        RedactionPolicy::Redacted => {
            (REDACTED_PLACEHOLDER.to_string(), REDACTED_PLACEHOLDER.to_string())
        }
        RedactionPolicy::Plain => {
            let name = raw
                .billing_address
                .as_ref()
                .map(|a| format!("{} {}", a.first_name, a.last_name).trim().to_string())
                .unwrap_or_default();
            let email = raw.customer_email.clone().unwrap_or_default();
            (name, email)
        }
    };

    let refunded = raw
        .refunded_total
        .as_ref()
        .is_some_and(|total| !is_zero_amount(&total.value));

    let items = raw
        .line_items
        .iter()
        .map(|item| OrderItem {
            item_name: item.product_name.clone(),
            item_variant: item.variant_options.first().map(|v| v.value.clone()),
            price: item.unit_price_paid.value.clone(),
            quantity: item.quantity,
        })
        .collect();

    Order {
        id: raw.id.clone(),
        order_number: raw.order_number.clone(),
        name,
        email,
        sub_total: raw.subtotal.value.clone(),
        grand_total: raw.grand_total.value.clone(),
        refunded,
        items,
    }
}

fn is_zero_amount(value: &str) -> bool {
    matches!(value.trim().parse::<f64>(), Ok(v) if v == 0.0)
}
