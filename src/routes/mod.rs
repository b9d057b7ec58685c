pub mod exports;
pub mod health;
pub mod orders;

use crate::error::{AppError, AppResult};
use crate::orders::query::{QuickFilter, quick_filter};

pub(crate) fn resolve_filter(id: Option<&str>) -> AppResult<&'static QuickFilter> {
    let id = id.unwrap_or("all");
    quick_filter(id).ok_or_else(|| AppError::Validation(format!("unknown quick filter: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_filter_defaults_to_all() {
        assert_eq!(resolve_filter(None).unwrap().id, "all");
    }

    #[test]
    fn test_resolve_filter_unknown_is_validation_error() {
        let err = resolve_filter(Some("vip")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
