use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned recipe identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    /// Instruction steps, one per line. An empty text still yields one (empty) step.
    pub fn steps(&self) -> Vec<&str> {
        self.instructions.split('\n').collect()
    }

    /// Image URL, treating a blank string as absent.
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Body for creating or replacing a recipe. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBody {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(default)]
    pub image_url: String,
}

impl From<Recipe> for RecipeBody {
    fn from(value: Recipe) -> Self {
        Self {
            title: value.title,
            ingredients: value.ingredients,
            instructions: value.instructions,
            image_url: value.image_url.unwrap_or_default(),
        }
    }
}
