use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message the backend returns when a recipe is favorited twice.
pub const ALREADY_FAVORITED: &str = "Recipe already exists in your favorites";

/// Error payload returned by the backend. Depending on the route it carries
/// either `error` or `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            message: None,
        }
    }

    /// Best human-readable text in the payload, `error` first.
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    pub fn is_already_favorited(&self) -> bool {
        self.error.as_deref() == Some(ALREADY_FAVORITED)
    }
}

/// Client-side form validation failure, raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all the fields")]
    MissingRegistrationFields,
    #[error("Please fill in all the fields")]
    MissingLoginFields,
    #[error("Please provide at least one non-empty ingredient.")]
    NoIngredients,
}
