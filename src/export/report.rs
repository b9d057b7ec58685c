use chrono::{DateTime, Utc};

use crate::orders::Order;

/// Render the filtered view as a self-contained printable HTML document:
/// generated timestamp, active filter/search description, per-order item
/// breakdown, and a total-revenue footer summed over the view.
pub fn render_print_report(
    view: &[Order],
    filter_label: &str,
    term: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut description = format!("Filter: {}", escape_html(filter_label));
    if !term.trim().is_empty() {
        description.push_str(&format!(" &middot; Search: &quot;{}&quot;", escape_html(term)));
    }

    let total_revenue: f64 = view.iter().map(Order::grand_total_amount).sum();

    let mut body_rows = String::new();
    for order in view {
        let mut items = String::new();
        for item in &order.items {
            let variant = item
                .item_variant
                .as_deref()
                .map(|v| format!(" ({})", escape_html(v)))
                .unwrap_or_default();
            items.push_str(&format!(
                "<li>{}{} &times; {} @ &euro;{}</li>",
                escape_html(&item.item_name),
                variant,
                item.quantity,
                escape_html(&item.price),
            ));
        }

        body_rows.push_str(&format!(
            "<tr>\
             <td>#{}</td>\
             <td>{}<br/><small>{}</small></td>\
             <td><ul>{}</ul></td>\
             <td>&euro;{}</td>\
             <td>{}</td>\
             </tr>",
            escape_html(&order.order_number),
            escape_html(&order.name),
            escape_html(&order.email),
            items,
            escape_html(&order.grand_total),
            if order.refunded { "refunded" } else { "" },
        ));
    }

    format!(
        "<!DOCTYPE html>\
         <html>\
         <head>\
         <meta charset=\"utf-8\"/>\
         <title>Order Report</title>\
         <style>\
         body {{ font-family: sans-serif; margin: 2rem; }}\
         table {{ border-collapse: collapse; width: 100%; }}\
         th, td {{ border: 1px solid #ccc; padding: 0.5rem; text-align: left; vertical-align: top; }}\
         th {{ background: #f3f3f3; }}\
         ul {{ margin: 0; padding-left: 1.2rem; }}\
         tfoot td {{ font-weight: bold; }}\
         </style>\
         </head>\
         <body onload=\"window.print()\">\
         <h1>Order Report</h1>\
         <p>Generated: {generated}</p>\
         <p>{description}</p>\
         <p>{count} orders</p>\
         <table>\
         <thead><tr><th>Order</th><th>Customer</th><th>Items</th><th>Total</th><th>Status</th></tr></thead>\
         <tbody>{body_rows}</tbody>\
         <tfoot><tr><td colspan=\"3\">Total revenue</td><td colspan=\"2\">&euro;{total_revenue:.2}</td></tr></tfoot>\
         </table>\
         </body>\
         </html>",
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        count = view.len(),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::orders::OrderItem;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 26, 12, 30, 0).unwrap()
    }

    fn order(number: &str, name: &str, grand_total: &str) -> Order {
        Order {
            id: format!("ord-{number}"),
            order_number: number.to_string(),
            name: name.to_string(),
            email: "buyer@example.com".to_string(),
            sub_total: grand_total.to_string(),
            grand_total: grand_total.to_string(),
            refunded: false,
            items: vec![OrderItem {
                item_name: "Weekend Pass".to_string(),
                item_variant: Some("Seated".to_string()),
                price: "25.00".to_string(),
                quantity: 2,
            }],
        }
    }

    #[test]
    fn test_report_includes_timestamp_and_description() {
        let html = render_print_report(&[], "All orders", "alice", generated_at());

        assert!(html.contains("Generated: 2026-08-26 12:30:00 UTC"));
        assert!(html.contains("Filter: All orders"));
        assert!(html.contains("Search: &quot;alice&quot;"));
        assert!(html.contains("window.print()"));
    }

    #[test]
    fn test_total_revenue_sums_grand_totals() {
        let view = vec![order("1001", "Alice Smith", "50.00"), order("1002", "Bob Jones", "30.50")];
        let html = render_print_report(&view, "All orders", "", generated_at());

        assert!(html.contains("&euro;80.50"));
        assert!(html.contains("2 orders"));
    }

    #[test]
    fn test_empty_view_still_renders_document() {
        let html = render_print_report(&[], "All orders", "", generated_at());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("&euro;0.00"));
        assert!(html.contains("0 orders"));
    }

    #[test]
    fn test_customer_fields_are_escaped() {
        let view = vec![order("1001", "<script>alert(1)</script>", "10.00")];
        let html = render_print_report(&view, "All orders", "", generated_at());

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
