pub mod auth;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod favorites;
pub mod gateway;
pub mod notify;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;

pub use auth::AuthController;
pub use config::{load_settings, ClientSettings};
pub use controller::{ActionOutcome, QueryOutcome, RecipeListController};
pub use editor::{RecipeDraft, RecipeEditor};
pub use error::{GatewayError, GatewayResult};
pub use favorites::FavoritesController;
pub use gateway::{
    AuthGateway, FavoriteOutcome, FavoritesGateway, HttpGateway, RecipeEditorGateway,
    RecipeGateway,
};
pub use notify::{
    BroadcastNotifier, Confirm, FixedAnswer, Notification, NotificationLevel, Notifier,
};
pub use session::{FileSession, MemorySession, SessionContext};
pub use store::{ListState, RecipeCard, ToggleLabel};
