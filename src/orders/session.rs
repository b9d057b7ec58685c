use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use super::{Order, RedactionPolicy, normalize_order};
use crate::commerce::PageSource;
use crate::telemetry::metrics::{ORDER_PAGES_FETCHED, ORDERS_LOADED, SESSION_FAILURES};

/// Lifecycle of one acquisition session. `Completed` and `Failed` are
/// terminal; no further fetch happens without a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    FetchingPage,
    Accumulating,
    Completed,
    Failed,
}

/// Immutable view of the session published after every transition. Readers
/// always observe orders, counter, and flags from the same step.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub orders: Arc<Vec<Order>>,
    pub total_loaded: usize,
    pub has_more: bool,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::FetchingPage | SessionPhase::Accumulating
        )
    }
}

/// Pagination driver: the single writer of the accumulated order set.
/// Walks the upstream cursor chain once, normalizing and appending each page
/// and publishing a snapshot per step. Fetch failures stop the loop but keep
/// whatever was accumulated. Pages are not retried.
pub struct OrderSession {
    source: Arc<dyn PageSource>,
    policy: RedactionPolicy,
    page_delay: Duration,
    started: AtomicBool,
    tx: watch::Sender<SessionSnapshot>,
}

impl OrderSession {
    pub fn new(source: Arc<dyn PageSource>, policy: RedactionPolicy, page_delay: Duration) -> Self {
        let (tx, _) = watch::channel(SessionSnapshot {
            phase: SessionPhase::Idle,
            orders: Arc::new(Vec::new()),
            total_loaded: 0,
            has_more: true,
            error: None,
        });

        Self {
            source,
            policy,
            page_delay,
            started: AtomicBool::new(false),
            tx,
        }
    }

    /// Spawn the fetch loop. Returns `false` (and does nothing) if the
    /// session was already started; the loop must never run twice.
    pub fn start(self: &Arc<Self>) -> bool {
        if self.started.swap(true, Ordering::SeqCst) {
            return false;
        }

        let session = Arc::clone(self);
        tokio::spawn(async move { session.run().await });
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    async fn run(&self) {
        let mut cursor: Option<String> = None;

        loop {
            self.tx
                .send_modify(|snap| snap.phase = SessionPhase::FetchingPage);

            match self.source.fetch_page(cursor.as_deref()).await {
                Ok(page) => {
                    let next = page.next_cursor().map(str::to_string);
                    let normalized: Vec<Order> = page
                        .result
                        .iter()
                        .map(|raw| normalize_order(raw, self.policy))
                        .collect();
                    let page_count = normalized.len();

                    self.tx.send_modify(|snap| {
                        Arc::make_mut(&mut snap.orders).extend(normalized);
                        snap.total_loaded += page_count;
                        snap.phase = SessionPhase::Accumulating;
                        snap.has_more = next.is_some();
                    });

                    ORDER_PAGES_FETCHED.add(1, &[]);
                    ORDERS_LOADED.add(page_count as u64, &[]);

                    tracing::info!(
                        page_orders = page_count,
                        total_loaded = self.tx.borrow().total_loaded,
                        has_more = next.is_some(),
                        "Accumulated order page"
                    );

                    match next {
                        Some(next_cursor) => {
                            cursor = Some(next_cursor);
                            // Throttle between pages so the upstream service
                            // is not hammered.
                            tokio::time::sleep(self.page_delay).await;
                        }
                        None => {
                            self.tx
                                .send_modify(|snap| snap.phase = SessionPhase::Completed);
                            tracing::info!(
                                total_loaded = self.tx.borrow().total_loaded,
                                "Order session completed"
                            );
                            break;
                        }
                    }
                }
                Err(err) => {
                    SESSION_FAILURES.add(1, &[]);
                    tracing::error!(error = %err, "Order session failed");

                    self.tx.send_modify(|snap| {
                        snap.phase = SessionPhase::Failed;
                        snap.error = Some(err.to_string());
                    });
                    break;
                }
            }
        }
    }
}
