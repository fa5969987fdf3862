//! Recipe list controller: owns the list view state and coordinates queries
//! and mutations against the backend.

mod mutation;
mod search;

use std::sync::{atomic::AtomicU64, Arc};

use shared::domain::{Recipe, RecipeId};
use tokio::sync::Mutex;

use crate::{
    gateway::RecipeGateway,
    notify::{Confirm, Notifier},
    store::{ListState, RecipeCard},
};

pub use search::QueryOutcome;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this recipe?";
pub const DELETE_SUCCESS: &str = "Recipe deleted successfully";
pub const DELETE_FAILURE: &str = "Failed to delete recipe";
pub const FAVORITE_SUCCESS: &str = "Recipe added to favorites successfully";
pub const FAVORITE_DUPLICATE: &str = "Recipe already in favorites";
pub const FAVORITE_FAILURE: &str = "Failed to add recipe to favorites";

/// How a single user action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    Completed,
    /// The backend already had the requested state.
    AlreadyDone,
    /// Local validation rejected the input; nothing was sent.
    Invalid,
    Failed,
}

pub struct RecipeListController {
    gateway: Arc<dyn RecipeGateway>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    inner: Mutex<ListControllerState>,
    query_seq: AtomicU64,
}

#[derive(Default)]
struct ListControllerState {
    list: ListState,
    loading: bool,
    /// Sequence number of the newest query whose result is on screen.
    applied_seq: u64,
}

impl RecipeListController {
    pub fn new(
        gateway: Arc<dyn RecipeGateway>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            confirm,
            inner: Mutex::new(ListControllerState::default()),
            query_seq: AtomicU64::new(0),
        }
    }

    /// Initial population of the list. `is_loading` is true while it runs.
    pub async fn mount(&self) -> QueryOutcome {
        self.inner.lock().await.loading = true;
        let outcome = self.on_query_changed("").await;
        self.inner.lock().await.loading = false;
        outcome
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.loading
    }

    pub async fn records(&self) -> Vec<Recipe> {
        self.inner.lock().await.list.records().to_vec()
    }

    pub async fn cards(&self) -> Vec<RecipeCard> {
        self.inner.lock().await.list.cards()
    }

    pub async fn toggle_expansion(&self, id: &RecipeId) -> bool {
        self.inner.lock().await.list.toggle_expansion(id)
    }

    pub async fn is_expanded(&self, id: &RecipeId) -> bool {
        self.inner.lock().await.list.is_expanded(id)
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
