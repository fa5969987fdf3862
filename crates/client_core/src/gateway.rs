//! Outbound calls to the recipe backend.
//!
//! The traits split the backend surface by the component that consumes it, so
//! each controller can be driven by a small test double. [`HttpGateway`]
//! implements all of them over `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Recipe, RecipeBody, RecipeId},
    error::ApiErrorBody,
    protocol::{
        AuthResponse, LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest,
        SearchResponse,
    },
};
use tracing::debug;
use url::Url;

use crate::{
    error::{GatewayError, GatewayResult},
    session::SessionContext,
};

/// Result of asking the backend to favorite a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    AlreadyFavorited,
}

/// Calls backing the recipe list view.
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    async fn list_all(&self) -> GatewayResult<Vec<Recipe>>;
    /// `term` must not be empty; an empty query is a reset to [`Self::list_all`].
    async fn search_by_term(&self, term: &str) -> GatewayResult<SearchResponse>;
    async fn delete_by_id(&self, id: &RecipeId) -> GatewayResult<()>;
    async fn add_to_favorites(&self, id: &RecipeId) -> GatewayResult<FavoriteOutcome>;
}

/// Calls backing the add/edit recipe forms.
#[async_trait]
pub trait RecipeEditorGateway: Send + Sync {
    async fn fetch_by_id(&self, id: &RecipeId) -> GatewayResult<Recipe>;
    async fn create(&self, body: &RecipeBody) -> GatewayResult<()>;
    async fn update(&self, id: &RecipeId, body: &RecipeBody) -> GatewayResult<()>;
}

#[async_trait]
pub trait FavoritesGateway: Send + Sync {
    async fn list_favorites(&self) -> GatewayResult<Vec<Recipe>>;
    async fn remove_favorite(&self, id: &RecipeId) -> GatewayResult<()>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthResponse>;
    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthResponse>;
    async fn reset_password(&self, request: &ResetPasswordRequest)
        -> GatewayResult<MessageResponse>;
}

pub struct HttpGateway {
    http: Client,
    base_url: Url,
    session: Arc<dyn SessionContext>,
}

impl HttpGateway {
    pub fn new(base_url: &str, session: Arc<dyn SessionContext>) -> GatewayResult<Self> {
        Self::with_client(Client::new(), base_url, session)
    }

    pub fn with_client(
        http: Client,
        base_url: &str,
        session: Arc<dyn SessionContext>,
    ) -> GatewayResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| GatewayError::InvalidUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base url.
    pub fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, segments: &[&str]) -> GatewayResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "backend request");
        let builder = self.http.request(method, url);
        Ok(match self.session.token().await {
            Some(token) => builder.header(AUTHORIZATION, token),
            None => builder,
        })
    }

    /// Sends the request and turns non-success statuses into [`GatewayError::Api`].
    async fn send(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<ApiErrorBody>(&bytes).ok();
        debug!(status = status.as_u16(), ?body, "backend rejected request");
        Err(GatewayError::api(status.as_u16(), body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> GatewayResult<T> {
        let response = self.send(builder).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
}

#[async_trait]
impl RecipeGateway for HttpGateway {
    async fn list_all(&self) -> GatewayResult<Vec<Recipe>> {
        let request = self.request(Method::GET, &["auth", "recipe"]).await?;
        self.send_json(request).await
    }

    async fn search_by_term(&self, term: &str) -> GatewayResult<SearchResponse> {
        let request = self
            .request(Method::GET, &["auth", "searchRecipes", term])
            .await?;
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // A `{message}` reply means no match, whatever the status.
        match (status.is_success(), serde_json::from_slice::<SearchResponse>(&bytes)) {
            (true, Ok(reply)) => Ok(reply),
            (true, Err(err)) => Err(GatewayError::Decode(err.to_string())),
            (false, Ok(reply @ SearchResponse::NotFound { .. })) => {
                debug!(status = status.as_u16(), term, "search miss sent with error status");
                Ok(reply)
            }
            (false, _) => {
                let body = serde_json::from_slice::<ApiErrorBody>(&bytes).ok();
                Err(GatewayError::api(status.as_u16(), body))
            }
        }
    }

    async fn delete_by_id(&self, id: &RecipeId) -> GatewayResult<()> {
        let request = self
            .request(Method::DELETE, &["auth", "recipe", id.as_str()])
            .await?;
        self.send(request).await?;
        Ok(())
    }

    async fn add_to_favorites(&self, id: &RecipeId) -> GatewayResult<FavoriteOutcome> {
        let request = self
            .request(Method::POST, &["auth", "likedRecipes", id.as_str()])
            .await?;
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<ApiErrorBody>(&bytes).ok();

        // The duplicate is reported through the error text, whatever the status.
        if body.as_ref().is_some_and(ApiErrorBody::is_already_favorited) {
            return Ok(FavoriteOutcome::AlreadyFavorited);
        }
        if status.is_success() {
            return Ok(FavoriteOutcome::Added);
        }
        Err(GatewayError::api(status.as_u16(), body))
    }
}

#[async_trait]
impl RecipeEditorGateway for HttpGateway {
    async fn fetch_by_id(&self, id: &RecipeId) -> GatewayResult<Recipe> {
        let request = self
            .request(Method::GET, &["auth", "recipe", id.as_str()])
            .await?;
        self.send_json(request).await
    }

    async fn create(&self, body: &RecipeBody) -> GatewayResult<()> {
        let request = self.request(Method::POST, &["auth", "recipe"]).await?;
        self.send(request.json(body)).await?;
        Ok(())
    }

    async fn update(&self, id: &RecipeId, body: &RecipeBody) -> GatewayResult<()> {
        let request = self
            .request(Method::PUT, &["auth", "recipe", id.as_str()])
            .await?;
        self.send(request.json(body)).await?;
        Ok(())
    }
}

#[async_trait]
impl FavoritesGateway for HttpGateway {
    async fn list_favorites(&self) -> GatewayResult<Vec<Recipe>> {
        let request = self.request(Method::GET, &["auth", "likedRecipes"]).await?;
        self.send_json(request).await
    }

    async fn remove_favorite(&self, id: &RecipeId) -> GatewayResult<()> {
        let request = self
            .request(Method::DELETE, &["auth", "removeLiked", id.as_str()])
            .await?;
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<AuthResponse> {
        let builder = self.request(Method::POST, &["auth", "login"]).await?;
        self.send_json(builder.json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<AuthResponse> {
        let builder = self.request(Method::POST, &["auth", "register"]).await?;
        self.send_json(builder.json(request)).await
    }

    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> GatewayResult<MessageResponse> {
        let builder = self
            .request(Method::PUT, &["auth", "forgotpassword"])
            .await?;
        self.send_json(builder.json(request)).await
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
