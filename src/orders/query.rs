use serde::Deserialize;

use super::Order;

/// Which field(s) gate inclusion when a search term is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchScope {
    #[default]
    All,
    Name,
    OrderNumber,
    Items,
}

/// A named, predefined predicate over `Order`, selectable alongside free-text
/// search. Registry entries are looked up by identifier.
#[derive(Debug)]
pub struct QuickFilter {
    pub id: &'static str,
    pub label: &'static str,
    predicate: fn(&Order) -> bool,
}

impl QuickFilter {
    pub fn matches(&self, order: &Order) -> bool {
        (self.predicate)(order)
    }
}

pub const QUICK_FILTERS: &[QuickFilter] = &[
    QuickFilter {
        id: "all",
        label: "All orders",
        predicate: any_order,
    },
    QuickFilter {
        id: "tickets",
        label: "Tickets",
        predicate: has_ticket_item,
    },
    QuickFilter {
        id: "weekend-pass",
        label: "Weekend passes",
        predicate: has_weekend_pass_item,
    },
    QuickFilter {
        id: "coaches-pass",
        label: "Coaches passes",
        predicate: has_coaches_pass_item,
    },
    QuickFilter {
        id: "refunded",
        label: "Refunded",
        predicate: is_refunded,
    },
];

pub fn quick_filter(id: &str) -> Option<&'static QuickFilter> {
    QUICK_FILTERS.iter().find(|f| f.id == id)
}

fn any_order(_: &Order) -> bool {
    true
}

fn is_refunded(order: &Order) -> bool {
    order.refunded
}

// An order with zero items simply never matches an item filter.
fn has_item_named(order: &Order, needle: &str) -> bool {
    order
        .items
        .iter()
        .any(|item| item.item_name.to_lowercase().contains(needle))
}

fn has_ticket_item(order: &Order) -> bool {
    has_item_named(order, "ticket")
}

fn has_weekend_pass_item(order: &Order) -> bool {
    has_item_named(order, "weekend pass")
}

fn has_coaches_pass_item(order: &Order) -> bool {
    has_item_named(order, "coaches pass")
}

/// Compute the filtered view: quick-filter first, then the search term gated
/// by `scope`. Stable — the relative order of the input is preserved, and an
/// empty input yields an empty view, never an error. Display-time sorting is
/// the caller's concern.
pub fn query(orders: &[Order], filter: &QuickFilter, term: &str, scope: SearchScope) -> Vec<Order> {
    let base = orders.iter().filter(|order| filter.matches(order));

    if term.trim().is_empty() {
        return base.cloned().collect();
    }

    let term_lower = term.to_lowercase();

    base.filter(|order| {
        let name_hit = order.name.to_lowercase().contains(&term_lower);
        // Order numbers match the raw term, case-sensitively.
        let number_hit = order.order_number.contains(term);
        let items_hit = order.items.iter().any(|item| {
            item.item_name.to_lowercase().contains(&term_lower)
                || item
                    .item_variant
                    .as_deref()
                    .is_some_and(|v| v.to_lowercase().contains(&term_lower))
        });

        match scope {
            SearchScope::Name => name_hit,
            SearchScope::OrderNumber => number_hit,
            SearchScope::Items => items_hit,
            SearchScope::All => name_hit || number_hit || items_hit,
        }
    })
    .cloned()
    .collect()
}
