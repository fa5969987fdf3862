//! Local view state for a list of recipes: the records as last received from
//! the backend plus per-record expansion flags.

use std::collections::{HashMap, HashSet};

use shared::domain::{Recipe, RecipeId};
use tracing::debug;

/// Instruction steps visible while a card is collapsed.
pub const COLLAPSED_STEP_COUNT: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct ListState {
    records: Vec<Recipe>,
    // Entries for records that are gone are allowed to linger.
    expansion: HashMap<RecipeId, bool>,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Recipe] {
        &self.records
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.records.iter().find(|recipe| &recipe.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces every record, keeping the backend's order. Expansion flags are
    /// untouched. Duplicate ids keep their first occurrence.
    pub fn replace_all(&mut self, records: Vec<Recipe>) {
        let incoming = records.len();
        let mut seen = HashSet::with_capacity(incoming);
        self.records = records
            .into_iter()
            .filter(|recipe| seen.insert(recipe.id.clone()))
            .collect();
        if self.records.len() != incoming {
            debug!(
                incoming,
                kept = self.records.len(),
                "dropped duplicate recipe ids"
            );
        }
    }

    /// Removes the record with `id`. Returns false when it was not present.
    pub fn remove_by_id(&mut self, id: &RecipeId) -> bool {
        let before = self.records.len();
        self.records.retain(|recipe| &recipe.id != id);
        self.records.len() != before
    }

    /// Flips the flag for `id` and returns the new value. Unknown ids start collapsed.
    pub fn toggle_expansion(&mut self, id: &RecipeId) -> bool {
        let flag = self.expansion.entry(id.clone()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_expanded(&self, id: &RecipeId) -> bool {
        self.expansion.get(id).copied().unwrap_or(false)
    }

    pub fn cards(&self) -> Vec<RecipeCard> {
        self.records
            .iter()
            .map(|recipe| RecipeCard::render(recipe, self.is_expanded(&recipe.id)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    ReadMore,
    ReadLess,
}

impl ToggleLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadMore => "Read More",
            Self::ReadLess => "Read Less",
        }
    }
}

/// Display-ready projection of one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub id: RecipeId,
    pub title: String,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub expanded: bool,
    /// Present whenever the recipe has more steps than a collapsed card shows.
    pub toggle: Option<ToggleLabel>,
}

impl RecipeCard {
    pub fn render(recipe: &Recipe, expanded: bool) -> Self {
        let all_steps = recipe.steps();
        let total = all_steps.len();
        let visible = if expanded {
            total
        } else {
            total.min(COLLAPSED_STEP_COUNT)
        };
        let toggle = (total > COLLAPSED_STEP_COUNT).then_some(if expanded {
            ToggleLabel::ReadLess
        } else {
            ToggleLabel::ReadMore
        });

        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            image_url: recipe.image().map(str::to_string),
            ingredients: recipe.ingredients.clone(),
            steps: all_steps[..visible].iter().map(|s| s.to_string()).collect(),
            expanded,
            toggle,
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
