//! Registration, login, password reset and logout.

use std::sync::Arc;

use shared::{
    error::ValidationError,
    protocol::{LoginRequest, RegisterRequest, ResetPasswordRequest},
};
use tracing::{info, warn};

use crate::{
    controller::ActionOutcome,
    gateway::AuthGateway,
    notify::{Confirm, Notification, Notifier},
    session::SessionContext,
};

pub const LOGIN_SUCCESS: &str = "Login Successful";
pub const LOGIN_FAILURE: &str = "Login failed";
pub const REGISTER_SUCCESS: &str = "Registration successful.";
pub const REGISTER_DUPLICATE: &str = "User already exists. Try with a different email";
pub const REGISTER_FAILURE: &str = "An error occurred while registering user";
pub const RESET_SUCCESS: &str = "Password updated successfully";
pub const RESET_FAILURE: &str = "Error updating password";
pub const LOGOUT_PROMPT: &str = "Want to Logout from this Session?";

pub struct AuthController {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<dyn SessionContext>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
}

impl AuthController {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        session: Arc<dyn SessionContext>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            gateway,
            session,
            notifier,
            confirm,
        }
    }

    fn reject(&self, err: ValidationError) -> ActionOutcome {
        self.notifier.notify(Notification::error(err.to_string()));
        ActionOutcome::Invalid
    }

    async fn remember(&self, token: &str) -> bool {
        match self.session.store_token(token).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to persist session token");
                self.notifier.notify(Notification::error(err.to_string()));
                false
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ActionOutcome {
        if email.is_empty() || password.is_empty() {
            return self.reject(ValidationError::MissingLoginFields);
        }
        let request = LoginRequest {
            email: email.to_lowercase(),
            password: password.to_string(),
        };

        let response = match self.gateway.login(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "login request failed");
                self.notifier.notify(Notification::failure(&err, LOGIN_FAILURE));
                return ActionOutcome::Failed;
            }
        };

        match (response.error, response.token) {
            (Some(error), _) => {
                self.notifier.notify(Notification::error(error));
                ActionOutcome::Failed
            }
            (None, Some(token)) => {
                if !self.remember(&token).await {
                    return ActionOutcome::Failed;
                }
                info!(email = %request.email, "logged in");
                self.notifier.notify(Notification::success(LOGIN_SUCCESS));
                ActionOutcome::Completed
            }
            (None, None) => {
                warn!("login reply carried neither token nor error");
                self.notifier.notify(Notification::error(LOGIN_FAILURE));
                ActionOutcome::Failed
            }
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ActionOutcome {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return self.reject(ValidationError::MissingRegistrationFields);
        }
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_lowercase(),
            password: password.to_string(),
        };

        let response = match self.gateway.register(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "registration request failed");
                self.notifier.notify(Notification::failure(&err, REGISTER_FAILURE));
                return ActionOutcome::Failed;
            }
        };

        if response.error.is_some() {
            self.notifier.notify(Notification::warning(REGISTER_DUPLICATE));
            return ActionOutcome::AlreadyDone;
        }
        let Some(token) = response.token else {
            warn!("registration reply carried no token");
            self.notifier.notify(Notification::error(REGISTER_FAILURE));
            return ActionOutcome::Failed;
        };
        if !self.remember(&token).await {
            return ActionOutcome::Failed;
        }
        info!(email = %request.email, "registered");
        self.notifier.notify(Notification::success(REGISTER_SUCCESS));
        ActionOutcome::Completed
    }

    /// Sets a new password for `email`. Returns the backend's message on success.
    pub async fn reset_password(&self, email: &str, password: &str) -> Option<String> {
        let request = ResetPasswordRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.gateway.reset_password(&request).await {
            Ok(response) => {
                self.notifier.notify(Notification::success(RESET_SUCCESS));
                Some(response.message)
            }
            Err(err) => {
                warn!(error = %err, "password reset failed");
                self.notifier.notify(Notification::error(RESET_FAILURE));
                None
            }
        }
    }

    pub async fn logout(&self) -> ActionOutcome {
        if !self.confirm.confirm(LOGOUT_PROMPT).await {
            return ActionOutcome::Cancelled;
        }
        match self.session.clear().await {
            Ok(()) => {
                info!("logged out");
                ActionOutcome::Completed
            }
            Err(err) => {
                warn!(error = %err, "failed to clear session");
                self.notifier.notify(Notification::error(err.to_string()));
                ActionOutcome::Failed
            }
        }
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.token().await.is_some()
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
