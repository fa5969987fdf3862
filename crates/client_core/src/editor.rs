//! Add and edit recipe forms.

use std::sync::Arc;

use shared::{
    domain::{Recipe, RecipeBody, RecipeId},
    error::ValidationError,
};
use tracing::{info, warn};

use crate::{
    controller::ActionOutcome,
    gateway::RecipeEditorGateway,
    notify::{Notification, Notifier},
};

pub const CREATE_SUCCESS: &str = "Recipe added successfully";
pub const CREATE_FAILURE: &str = "Failed to add recipe";
pub const LOAD_FAILURE: &str = "Failed to fetch recipe data";
pub const UPDATE_SUCCESS: &str = "Recipe updated successfully";
pub const UPDATE_FAILURE: &str = "Failed to update recipe";

/// Form state for a recipe being written. A fresh draft has one empty
/// ingredient slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image_url: String,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            ingredients: vec![String::new()],
            instructions: String::new(),
            image_url: String::new(),
        }
    }
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty slot, but only once the last slot has been filled in.
    pub fn add_ingredient_slot(&mut self) -> bool {
        let last_filled = self
            .ingredients
            .last()
            .map_or(true, |last| !last.is_empty());
        if last_filled {
            self.ingredients.push(String::new());
        }
        last_filled
    }

    pub fn set_ingredient(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.ingredients.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Comma-separated form used by the edit screen.
    pub fn ingredients_csv(&self) -> String {
        self.ingredients.join(", ")
    }

    pub fn set_ingredients_csv(&mut self, raw: &str) {
        self.ingredients = raw.split(',').map(|item| item.trim().to_string()).collect();
    }

    fn filled_ingredients(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .filter(|item| !item.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Request body with blank ingredient slots dropped.
    pub fn body(&self) -> RecipeBody {
        RecipeBody {
            title: self.title.clone(),
            ingredients: self.filled_ingredients(),
            instructions: self.instructions.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// Like [`Self::body`], but a new recipe needs at least one real ingredient.
    pub fn validated_body(&self) -> Result<RecipeBody, ValidationError> {
        let body = self.body();
        if body.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        Ok(body)
    }
}

impl From<Recipe> for RecipeDraft {
    fn from(value: Recipe) -> Self {
        Self {
            title: value.title,
            ingredients: value.ingredients,
            instructions: value.instructions,
            image_url: value.image_url.unwrap_or_default(),
        }
    }
}

pub struct RecipeEditor {
    gateway: Arc<dyn RecipeEditorGateway>,
    notifier: Arc<dyn Notifier>,
}

impl RecipeEditor {
    pub fn new(gateway: Arc<dyn RecipeEditorGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self { gateway, notifier }
    }

    pub async fn create(&self, draft: &RecipeDraft) -> ActionOutcome {
        let body = match draft.validated_body() {
            Ok(body) => body,
            Err(err) => {
                self.notifier.notify(Notification::warning(err.to_string()));
                return ActionOutcome::Invalid;
            }
        };

        match self.gateway.create(&body).await {
            Ok(()) => {
                info!(title = %body.title, "recipe created");
                self.notifier.notify(Notification::success(CREATE_SUCCESS));
                ActionOutcome::Completed
            }
            Err(err) => {
                warn!(error = %err, "creating recipe failed");
                self.notifier.notify(Notification::error(CREATE_FAILURE));
                ActionOutcome::Failed
            }
        }
    }

    /// Loads an existing recipe into a draft for editing.
    pub async fn load(&self, id: &RecipeId) -> Option<RecipeDraft> {
        match self.gateway.fetch_by_id(id).await {
            Ok(recipe) => Some(recipe.into()),
            Err(err) => {
                warn!(recipe_id = %id, error = %err, "loading recipe failed");
                self.notifier.notify(Notification::error(LOAD_FAILURE));
                None
            }
        }
    }

    pub async fn update(&self, id: &RecipeId, draft: &RecipeDraft) -> ActionOutcome {
        match self.gateway.update(id, &draft.body()).await {
            Ok(()) => {
                info!(recipe_id = %id, "recipe updated");
                self.notifier.notify(Notification::success(UPDATE_SUCCESS));
                ActionOutcome::Completed
            }
            Err(err) => {
                warn!(recipe_id = %id, error = %err, "updating recipe failed");
                self.notifier.notify(Notification::error(UPDATE_FAILURE));
                ActionOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
