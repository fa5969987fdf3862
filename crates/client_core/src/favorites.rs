use std::sync::Arc;

use shared::domain::{Recipe, RecipeId};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    controller::ActionOutcome,
    gateway::FavoritesGateway,
    notify::{Confirm, Notification, Notifier},
    store::{ListState, RecipeCard},
};

pub const REMOVE_PROMPT: &str = "Are you sure you want to remove this recipe from favorites?";
pub const REMOVE_SUCCESS: &str = "Item removed successfully";
pub const REMOVE_FAILURE: &str = "Failed to remove item";
pub const LOAD_FAILURE: &str = "Failed to fetch favorite products";

/// The user's favorites, fetched from their own endpoint and pruned locally
/// on removal.
pub struct FavoritesController {
    gateway: Arc<dyn FavoritesGateway>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    inner: Mutex<FavoritesState>,
}

#[derive(Default)]
struct FavoritesState {
    list: ListState,
    loading: bool,
}

impl FavoritesController {
    pub fn new(
        gateway: Arc<dyn FavoritesGateway>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            confirm,
            inner: Mutex::new(FavoritesState::default()),
        }
    }

    /// Fetches the favorites. Returns false when the fetch failed; the previous
    /// list is then kept.
    pub async fn load(&self) -> bool {
        self.inner.lock().await.loading = true;
        let result = self.gateway.list_favorites().await;

        let mut guard = self.inner.lock().await;
        guard.loading = false;
        match result {
            Ok(records) => {
                guard.list.replace_all(records);
                true
            }
            Err(err) => {
                drop(guard);
                warn!(error = %err, "loading favorites failed");
                self.notifier.notify(Notification::error(LOAD_FAILURE));
                false
            }
        }
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

    pub async fn request_remove(&self, id: &RecipeId) -> ActionOutcome {
        if !self.confirm.confirm(REMOVE_PROMPT).await {
            info!(recipe_id = %id, "favorite removal cancelled");
            return ActionOutcome::Cancelled;
        }

        match self.gateway.remove_favorite(id).await {
            Ok(()) => {
                self.inner.lock().await.list.remove_by_id(id);
                self.notifier.notify(Notification::success(REMOVE_SUCCESS));
                ActionOutcome::Completed
            }
            Err(err) => {
                warn!(recipe_id = %id, error = %err, "favorite removal failed");
                self.notifier.notify(Notification::failure(&err, REMOVE_FAILURE));
                ActionOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/favorites_tests.rs"]
mod tests;
