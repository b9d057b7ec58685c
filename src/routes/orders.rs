use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::AppState;
use crate::error::AppResult;
use crate::orders::query::{QUICK_FILTERS, SearchScope, query};
use crate::orders::{Order, SessionPhase};

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub filter: Option<String>,
    pub q: Option<String>,
    pub scope: Option<SearchScope>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
    pub filtered_count: usize,
    pub total_loaded: usize,
    pub loading: bool,
    pub has_more: bool,
    pub phase: SessionPhase,
    pub error: Option<String>,
}

pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<OrdersQuery>,
) -> AppResult<Json<OrdersResponse>> {
    let filter = super::resolve_filter(params.filter.as_deref())?;
    let term = params.q.unwrap_or_default();
    let scope = params.scope.unwrap_or_default();

    let snapshot = state.session.snapshot();
    let mut view = query(&snapshot.orders, filter, &term, scope);
    sort_for_display(&mut view);

    Ok(Json(OrdersResponse {
        filtered_count: view.len(),
        orders: view,
        total_loaded: snapshot.total_loaded,
        loading: snapshot.loading(),
        has_more: snapshot.has_more,
        phase: snapshot.phase,
        error: snapshot.error,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub phase: SessionPhase,
    pub loading: bool,
    pub has_more: bool,
    pub total_loaded: usize,
    pub error: Option<String>,
}

pub async fn session_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.session.snapshot();

    Json(StatusResponse {
        phase: snapshot.phase,
        loading: snapshot.loading(),
        has_more: snapshot.has_more,
        total_loaded: snapshot.total_loaded,
        error: snapshot.error,
    })
}

/// Idempotent: reports whether this call actually started the session.
pub async fn start_session(State(state): State<AppState>) -> Json<Value> {
    let started = state.session.start();
    Json(json!({ "started": started }))
}

pub async fn list_filters() -> Json<Value> {
    let filters: Vec<Value> = QUICK_FILTERS
        .iter()
        .map(|f| json!({ "id": f.id, "label": f.label }))
        .collect();
    Json(json!({ "filters": filters }))
}

// Display order is numeric order-number descending; non-numeric order
// numbers sink to the bottom. A presentation concern, not a query guarantee.
fn sort_for_display(view: &mut [Order]) {
    view.sort_by_key(|order| {
        std::cmp::Reverse(order.order_number.parse::<i64>().unwrap_or(i64::MIN))
    });
}
