use serde::{Deserialize, Serialize};

use crate::domain::Recipe;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub password: String,
}

/// Login and registration reply. The backend answers with either a token or an
/// `error`, sometimes under a 2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Search reply: a recipe collection, or a `{message}` object when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Records(Vec<Recipe>),
    NotFound { message: String },
}

impl SearchResponse {
    pub fn into_records(self) -> Vec<Recipe> {
        match self {
            Self::Records(records) => records,
            Self::NotFound { .. } => Vec::new(),
        }
    }
}
