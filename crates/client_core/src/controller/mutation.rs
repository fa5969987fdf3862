use shared::domain::RecipeId;
use tracing::{info, warn};

use super::{
    ActionOutcome, RecipeListController, DELETE_FAILURE, DELETE_PROMPT, DELETE_SUCCESS,
    FAVORITE_DUPLICATE, FAVORITE_FAILURE, FAVORITE_SUCCESS,
};
use crate::{gateway::FavoriteOutcome, notify::Notification};

impl RecipeListController {
    /// Deletes after the user confirms. The record leaves the list only once
    /// the backend accepted the delete.
    pub async fn request_delete(&self, id: &RecipeId) -> ActionOutcome {
        if !self.confirm.confirm(DELETE_PROMPT).await {
            info!(recipe_id = %id, "delete cancelled");
            return ActionOutcome::Cancelled;
        }

        match self.gateway.delete_by_id(id).await {
            Ok(()) => {
                self.inner.lock().await.list.remove_by_id(id);
                self.notifier.notify(Notification::success(DELETE_SUCCESS));
                ActionOutcome::Completed
            }
            Err(err) => {
                warn!(recipe_id = %id, error = %err, "delete failed");
                self.notifier.notify(Notification::failure(&err, DELETE_FAILURE));
                ActionOutcome::Failed
            }
        }
    }

    /// Favorites live server-side only; the list is not touched.
    pub async fn request_favorite(&self, id: &RecipeId) -> ActionOutcome {
        match self.gateway.add_to_favorites(id).await {
            Ok(FavoriteOutcome::Added) => {
                self.notifier.notify(Notification::success(FAVORITE_SUCCESS));
                ActionOutcome::Completed
            }
            Ok(FavoriteOutcome::AlreadyFavorited) => {
                self.notifier.notify(Notification::warning(FAVORITE_DUPLICATE));
                ActionOutcome::AlreadyDone
            }
            Err(err) => {
                warn!(recipe_id = %id, error = %err, "favorite failed");
                self.notifier.notify(Notification::failure(&err, FAVORITE_FAILURE));
                ActionOutcome::Failed
            }
        }
    }
}
