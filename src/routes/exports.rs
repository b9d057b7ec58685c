use axum::{
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::export::{ReportKind, format_breakdown, generate_csv, render_print_report};
use crate::orders::query::{SearchScope, query};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub report: Option<ReportKind>,
    pub filter: Option<String>,
    pub q: Option<String>,
    pub scope: Option<SearchScope>,
}

/// CSV download of the current filtered view; an empty view still produces a
/// header-only file.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
) -> AppResult<Response> {
    let filter = super::resolve_filter(params.filter.as_deref())?;
    let term = params.q.unwrap_or_default();
    let scope = params.scope.unwrap_or_default();

    let snapshot = state.session.snapshot();
    let view = query(&snapshot.orders, filter, &term, scope);

    let export = generate_csv(
        params.report.unwrap_or_default(),
        &view,
        filter.id,
        &term,
        Utc::now().date_naive(),
    );

    tracing::info!(
        filename = %export.filename,
        rows = view.len(),
        "CSV export generated"
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.filename
    ))
    .map_err(|e| AppError::Internal(format!("invalid export filename: {e}")))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

/// Self-contained printable HTML report of the current filtered view.
pub async fn print_report(
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
) -> AppResult<Html<String>> {
    let filter = super::resolve_filter(params.filter.as_deref())?;
    let term = params.q.unwrap_or_default();
    let scope = params.scope.unwrap_or_default();

    let snapshot = state.session.snapshot();
    let view = query(&snapshot.orders, filter, &term, scope);

    Ok(Html(render_print_report(
        &view,
        filter.label,
        &term,
        Utc::now(),
    )))
}

/// Plain-text ticket breakdown over the full accumulated set.
pub async fn breakdown(State(state): State<AppState>) -> String {
    let snapshot = state.session.snapshot();
    format_breakdown(&snapshot.orders)
}
