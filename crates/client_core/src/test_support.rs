//! Test doubles shared by the controller tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use shared::{
    domain::{Recipe, RecipeBody, RecipeId},
    protocol::{
        AuthResponse, LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest,
        SearchResponse,
    },
};
use tokio::sync::Notify;

use crate::{
    error::{GatewayError, GatewayResult},
    gateway::{AuthGateway, FavoriteOutcome, FavoritesGateway, RecipeEditorGateway, RecipeGateway},
    notify::{Confirm, Notification, NotificationLevel, Notifier},
};

pub fn recipe(id: &str, title: &str, instructions: &str) -> Recipe {
    Recipe {
        id: RecipeId::new(id),
        title: title.to_string(),
        ingredients: vec!["water".to_string()],
        instructions: instructions.to_string(),
        image_url: None,
    }
}

#[derive(Debug, Clone)]
pub enum Failure {
    Network,
    Api(u16, Option<&'static str>),
}

impl Failure {
    pub fn to_error(&self) -> GatewayError {
        match self {
            Self::Network => GatewayError::Network(
                reqwest::Client::new()
                    .get("http://")
                    .build()
                    .expect_err("url without host must not build"),
            ),
            Self::Api(status, message) => GatewayError::Api {
                status: *status,
                message: message.map(str::to_string),
            },
        }
    }
}

fn scripted<T>(failure: &Option<Failure>, value: impl FnOnce() -> T) -> GatewayResult<T> {
    match failure {
        Some(failure) => Err(failure.to_error()),
        None => Ok(value()),
    }
}

#[derive(Default)]
pub struct Script {
    pub recipes: Vec<Recipe>,
    pub list_failure: Option<Failure>,
    pub search: HashMap<String, SearchResponse>,
    pub search_failure: Option<Failure>,
    pub delete_failure: Option<Failure>,
    pub favorite: Option<FavoriteOutcome>,
    pub favorite_failure: Option<Failure>,
    pub stored: HashMap<String, Recipe>,
    pub editor_failure: Option<Failure>,
    pub saved: Vec<(Option<RecipeId>, RecipeBody)>,
    pub favorites: Vec<Recipe>,
    pub favorites_failure: Option<Failure>,
    pub remove_failure: Option<Failure>,
    pub auth: AuthResponse,
    pub auth_failure: Option<Failure>,
    pub reset_message: String,
    pub last_login: Option<LoginRequest>,
    pub last_register: Option<RegisterRequest>,
}

#[derive(Default)]
pub struct FakeGateway {
    script: Mutex<Script>,
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().expect("script lock")
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Holds the search for `term` until the returned handle is notified.
    pub fn gate_search(&self, term: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .expect("gates lock")
            .insert(term.to_string(), gate.clone());
        gate
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl RecipeGateway for FakeGateway {
    async fn list_all(&self) -> GatewayResult<Vec<Recipe>> {
        self.record("list".into());
        let script = self.script();
        scripted(&script.list_failure, || script.recipes.clone())
    }

    async fn search_by_term(&self, term: &str) -> GatewayResult<SearchResponse> {
        self.record(format!("search:{term}"));
        let gate = self.gates.lock().expect("gates lock").get(term).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let script = self.script();
        scripted(&script.search_failure, || {
            script
                .search
                .get(term)
                .cloned()
                .unwrap_or(SearchResponse::Records(Vec::new()))
        })
    }

    async fn delete_by_id(&self, id: &RecipeId) -> GatewayResult<()> {
        self.record(format!("delete:{id}"));
        scripted(&self.script().delete_failure, || ())
    }

    async fn add_to_favorites(&self, id: &RecipeId) -> GatewayResult<FavoriteOutcome> {
        self.record(format!("favorite:{id}"));
        let script = self.script();
        scripted(&script.favorite_failure, || {
            script.favorite.unwrap_or(FavoriteOutcome::Added)
        })
    }
}

#[async_trait]
impl RecipeEditorGateway for FakeGateway {
    async fn fetch_by_id(&self, id: &RecipeId) -> GatewayResult<Recipe> {
        self.record(format!("fetch:{id}"));
        let script = self.script();
        if let Some(failure) = &script.editor_failure {
            return Err(failure.to_error());
        }
        script
            .stored
            .get(id.as_str())
            .cloned()
            .ok_or(GatewayError::Api {
                status: 404,
                message: None,
            })
    }

    async fn create(&self, body: &RecipeBody) -> GatewayResult<()> {
        self.record("create".into());
        let mut script = self.script();
        scripted(&script.editor_failure.clone(), || {
            script.saved.push((None, body.clone()));
        })
    }

    async fn update(&self, id: &RecipeId, body: &RecipeBody) -> GatewayResult<()> {
        self.record(format!("update:{id}"));
        let mut script = self.script();
        scripted(&script.editor_failure.clone(), || {
            script.saved.push((Some(id.clone()), body.clone()));
        })
    }
}

#[async_trait]
impl FavoritesGateway for FakeGateway {
    async fn list_favorites(&self) -> GatewayResult<Vec<Recipe>> {
        self.record("favorites".into());
        let script = self.script();
        scripted(&script.favorites_failure, || script.favorites.clone())
    }

    async fn remove_favorite(&self, id: &RecipeId) -> GatewayResult<()> {
        self.record(format!("unfavorite:{id}"));
        scripted(&self.script().remove_failure, || ())
    }
}

#[async_trait]
impl AuthGateway for FakeGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthResponse> {
        self.record("login".into());
        let mut script = self.script();
        script.last_login = Some(request.clone());
        scripted(&script.auth_failure, || script.auth.clone())
    }

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthResponse> {
        self.record("register".into());
        let mut script = self.script();
        script.last_register = Some(request.clone());
        scripted(&script.auth_failure, || script.auth.clone())
    }

    async fn reset_password(
        &self,
        _request: &ResetPasswordRequest,
    ) -> GatewayResult<MessageResponse> {
        self.record("reset".into());
        let script = self.script();
        scripted(&script.auth_failure, || MessageResponse {
            message: script.reset_message.clone(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock").clone()
    }

    pub fn levels(&self) -> Vec<NotificationLevel> {
        self.seen().into_iter().map(|n| n.level).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().expect("notifier lock").push(notification);
    }
}

/// Confirmation double that records every prompt it was shown.
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(message.to_string());
        self.answer
    }
}
