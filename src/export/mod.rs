pub mod breakdown;
pub mod csv;
pub mod report;

pub use breakdown::format_breakdown;
pub use csv::{CsvExport, ReportKind, generate_csv};
pub use report::render_print_report;
