use chrono::NaiveDate;
use serde::Deserialize;

use crate::orders::Order;

/// Named CSV reports, each with its own row projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    #[default]
    Summary,
    Tickets,
    CoachesPass,
}

impl ReportKind {
    fn file_stem(self) -> &'static str {
        match self {
            ReportKind::Summary => "orders",
            ReportKind::Tickets => "ticket-report",
            ReportKind::CoachesPass => "coaches-pass-report",
        }
    }

    fn headers(self) -> &'static [&'static str] {
        match self {
            ReportKind::Summary => &[
                "Order Number",
                "Name",
                "Email",
                "Sub Total",
                "Grand Total",
                "Refunded",
            ],
            ReportKind::Tickets => &["Order Number", "Name", "Item", "Variant", "Quantity", "Price"],
            ReportKind::CoachesPass => &["Order Number", "Name", "Email", "Quantity"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Build a CSV artifact for the given view. The header row is always
/// emitted, so an empty view still yields a valid artifact. Only the
/// customer name is quote-wrapped; commas or quotes inside other fields are
/// not escaped. Downstream consumers depend on this exact shape.
pub fn generate_csv(
    kind: ReportKind,
    view: &[Order],
    filter_id: &str,
    term: &str,
    date: NaiveDate,
) -> CsvExport {
    let mut rows: Vec<String> = vec![kind.headers().join(",")];

    for order in view {
        match kind {
            ReportKind::Summary => {
                rows.push(format!(
                    "{},\"{}\",{},{},{},{}",
                    order.order_number,
                    order.name,
                    order.email,
                    order.sub_total,
                    order.grand_total,
                    order.refunded,
                ));
            }
            ReportKind::Tickets => {
                for item in item_rows(order, "ticket") {
                    rows.push(format!(
                        "{},\"{}\",{},{},{},{}",
                        order.order_number,
                        order.name,
                        item.item_name,
                        item.item_variant.as_deref().unwrap_or(""),
                        item.quantity,
                        item.price,
                    ));
                }
            }
            ReportKind::CoachesPass => {
                for item in item_rows(order, "coaches pass") {
                    rows.push(format!(
                        "{},\"{}\",{},{}",
                        order.order_number, order.name, order.email, item.quantity,
                    ));
                }
            }
        }
    }

    CsvExport {
        filename: export_filename(kind, filter_id, term, date),
        content: rows.join("\n"),
    }
}

fn item_rows<'a>(
    order: &'a Order,
    needle: &'a str,
) -> impl Iterator<Item = &'a crate::orders::OrderItem> {
    order
        .items
        .iter()
        .filter(move |item| item.item_name.to_lowercase().contains(needle))
}

/// `<report>-<YYYY-MM-DD>[-<filter>][-<sanitized term>].csv`
fn export_filename(kind: ReportKind, filter_id: &str, term: &str, date: NaiveDate) -> String {
    let mut name = format!("{}-{}", kind.file_stem(), date.format("%Y-%m-%d"));

    if !filter_id.is_empty() && filter_id != "all" {
        name.push('-');
        name.push_str(filter_id);
    }

    let sanitized: String = term.chars().filter(char::is_ascii_alphanumeric).collect();
    if !sanitized.is_empty() {
        name.push('-');
        name.push_str(&sanitized);
    }

    name.push_str(".csv");
    name
}
