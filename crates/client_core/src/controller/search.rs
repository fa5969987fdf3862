use std::sync::atomic::Ordering;

use shared::protocol::SearchResponse;
use tracing::{debug, warn};

use super::RecipeListController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The result replaced the list; `count` records are now shown.
    Applied { count: usize },
    /// A newer query was applied first, so this result was discarded.
    Superseded,
    /// The request failed; the list is unchanged.
    Failed,
}

impl RecipeListController {
    /// Runs the query for the current search text. An empty term resets to the
    /// full list. Queries are not cancelled; a response older than the one
    /// already applied is dropped.
    pub async fn on_query_changed(&self, term: &str) -> QueryOutcome {
        let seq = self.query_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let result = if term.is_empty() {
            self.gateway.list_all().await
        } else {
            self.gateway
                .search_by_term(term)
                .await
                .map(|response| {
                    if let SearchResponse::NotFound { message } = &response {
                        debug!(term, %message, "search matched nothing");
                    }
                    response.into_records()
                })
        };

        let records = match result {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    term,
                    seq,
                    network = err.is_network(),
                    error = %err,
                    "recipe query failed"
                );
                return QueryOutcome::Failed;
            }
        };

        let mut guard = self.inner.lock().await;
        if seq < guard.applied_seq {
            debug!(term, seq, applied = guard.applied_seq, "dropping stale query result");
            return QueryOutcome::Superseded;
        }
        guard.applied_seq = seq;
        guard.list.replace_all(records);
        QueryOutcome::Applied {
            count: guard.list.len(),
        }
    }
}
