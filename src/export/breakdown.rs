use crate::orders::Order;

/// Named tally bucket. An item counts toward a bucket when its name or
/// variant label contains one of the patterns, case-insensitively.
struct Bucket {
    label: &'static str,
    patterns: &'static [&'static str],
}

const BUCKETS: &[Bucket] = &[
    Bucket {
        label: "Seated tickets",
        patterns: &["seated"],
    },
    Bucket {
        label: "Standing tickets",
        patterns: &["standing"],
    },
    Bucket {
        label: "Upgrades",
        patterns: &["upgrade"],
    },
    Bucket {
        label: "Weekend passes",
        patterns: &["weekend pass"],
    },
    Bucket {
        label: "Coaches passes",
        patterns: &["coaches pass"],
    },
];

/// Tally item quantities into the configured buckets over the full
/// accumulated set, skipping refunded orders.
pub fn ticket_breakdown(orders: &[Order]) -> Vec<(&'static str, u32)> {
    BUCKETS
        .iter()
        .map(|bucket| {
            let count = orders
                .iter()
                .filter(|order| !order.refunded)
                .flat_map(|order| order.items.iter())
                .filter(|item| {
                    let name = item.item_name.to_lowercase();
                    let variant = item
                        .item_variant
                        .as_deref()
                        .map(str::to_lowercase)
                        .unwrap_or_default();
                    bucket
                        .patterns
                        .iter()
                        .any(|p| name.contains(p) || variant.contains(p))
                })
                .map(|item| item.quantity)
                .sum();
            (bucket.label, count)
        })
        .collect()
}

/// Plain-text summary, one bucket per line.
pub fn format_breakdown(orders: &[Order]) -> String {
    let mut out = String::from("Ticket breakdown (refunded orders excluded)\n");
    for (label, count) in ticket_breakdown(orders) {
        out.push_str(&format!("{label}: {count}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderItem;

    fn order(refunded: bool, items: Vec<OrderItem>) -> Order {
        Order {
            id: "ord-1".to_string(),
            order_number: "1001".to_string(),
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            sub_total: "0.00".to_string(),
            grand_total: "0.00".to_string(),
            refunded,
            items,
        }
    }

    fn item(name: &str, variant: Option<&str>, quantity: u32) -> OrderItem {
        OrderItem {
            item_name: name.to_string(),
            item_variant: variant.map(str::to_string),
            price: "10.00".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_tallies_by_name_and_variant() {
        let orders = vec![
            order(
                false,
                vec![
                    item("Day Ticket", Some("Seated"), 2),
                    item("Day Ticket", Some("Standing"), 3),
                ],
            ),
            order(false, vec![item("Seated Ticket", None, 1), item("Weekend Pass", None, 2)]),
        ];

        let counts = ticket_breakdown(&orders);
        assert!(counts.contains(&("Seated tickets", 3)));
        assert!(counts.contains(&("Standing tickets", 3)));
        assert!(counts.contains(&("Weekend passes", 2)));
        assert!(counts.contains(&("Upgrades", 0)));
    }

    #[test]
    fn test_refunded_orders_are_excluded() {
        let orders = vec![
            order(false, vec![item("Day Ticket", Some("Seated"), 2)]),
            order(true, vec![item("Day Ticket", Some("Seated"), 5)]),
        ];

        let counts = ticket_breakdown(&orders);
        assert!(counts.contains(&("Seated tickets", 2)));
    }

    #[test]
    fn test_format_breakdown_one_line_per_bucket() {
        let text = format_breakdown(&[]);

        assert!(text.starts_with("Ticket breakdown"));
        assert_eq!(text.lines().count(), 1 + BUCKETS.len());
        assert!(text.contains("Coaches passes: 0"));
    }
}
