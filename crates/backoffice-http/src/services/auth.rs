//! Authentication and the stored session.

use std::fmt;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument, warn};

use backoffice_core::error::AuthError;
use backoffice_core::models::{AuthSession, ProfileUpdate, User};
use backoffice_core::{
    ApiRequest, Credentials, Registration, Result, SessionStore, StorageKey, validation,
};

use super::ServiceContext;
use crate::endpoints::{
    AUTH_CHANGE_PASSWORD, AUTH_FORGOT_PASSWORD, AUTH_LOGIN, AUTH_LOGOUT, AUTH_ME, AUTH_PROFILE,
    AUTH_REFRESH, AUTH_REGISTER, AUTH_RESEND_VERIFICATION, AUTH_RESET_PASSWORD, AUTH_VERIFY_EMAIL,
};
use crate::fallback;

/// Login, logout and account self-service.
///
/// The only component that writes to the session store: tokens are saved on
/// login, registration and refresh, and removed on logout or when the server
/// rejects them.
#[derive(Clone)]
pub struct AuthService {
    ctx: ServiceContext,
    store: Arc<dyn SessionStore>,
}

impl AuthService {
    pub(crate) fn new(ctx: ServiceContext, store: Arc<dyn SessionStore>) -> Self {
        Self { ctx, store }
    }

    /// Authenticate and persist the returned tokens.
    ///
    /// # Errors
    ///
    /// Malformed credentials are rejected before anything is sent. Other
    /// failures propagate unless synthetic fallback is enabled, in which case
    /// a development session with dummy tokens is stored instead.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        validation::check(credentials)?;
        info!("Logging in");

        let request = ApiRequest::post(AUTH_LOGIN).with_json(credentials)?;
        let result = self.ctx.fetch::<AuthSession>(request).await;
        let session = self
            .ctx
            .fallback()
            .recover_read("login", result, || fallback::auth_session(fallback::user()))?;

        self.persist(&session)?;
        debug!(user = %session.user.id, "Session stored");
        Ok(session)
    }

    /// Create an account and persist the returned tokens.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession> {
        validation::check(registration)?;
        info!("Registering account");

        let request = ApiRequest::post(AUTH_REGISTER).with_json(registration)?;
        let result = self.ctx.fetch::<AuthSession>(request).await;
        let session = self
            .ctx
            .fallback()
            .recover_read("register", result, || fallback::auth_session(fallback::user()))?;

        self.persist(&session)?;
        Ok(session)
    }

    /// End the session.
    ///
    /// Both stored tokens are removed whether or not the server acknowledged
    /// the logout; a failed remote call is only logged.
    ///
    /// # Errors
    ///
    /// Fails only if the session store cannot be cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");

        if let Err(e) = self.ctx.send(ApiRequest::post(AUTH_LOGOUT)).await {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }

        self.store.clear()
    }

    /// The user the stored token belongs to.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        let result = self.ctx.fetch::<User>(ApiRequest::get(AUTH_ME)).await;
        let result = self.forget_rejected_session(result)?;
        self.ctx
            .fallback()
            .recover_read("current_user", result, fallback::user)
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] when nothing is stored. If
    /// the server rejects the refresh token the stored session is cleared.
    #[instrument(skip(self))]
    pub async fn refresh_token(&self) -> Result<AuthSession> {
        info!("Refreshing session");

        let result = self.request_refresh().await;
        let result = self.forget_rejected_session(result)?;
        let session = self
            .ctx
            .fallback()
            .recover_read("refresh_token", result, || {
                fallback::auth_session(fallback::user())
            })?;

        self.persist(&session)?;
        Ok(session)
    }

    async fn request_refresh(&self) -> Result<AuthSession> {
        let refresh_token = self
            .store
            .get(StorageKey::RefreshToken)?
            .ok_or(AuthError::MissingRefreshToken)?;

        let request =
            ApiRequest::post(AUTH_REFRESH).with_json(&json!({ "refreshToken": refresh_token }))?;
        self.ctx.fetch(request).await
    }

    /// Ask for a password reset link.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        validation::require_email(email)?;
        let request = ApiRequest::post(AUTH_FORGOT_PASSWORD).with_json(&json!({ "email": email }))?;
        self.ctx.send(request).await.map(drop)
    }

    /// Set a new password using the token from a reset link.
    #[instrument(skip(self, token, new_password))]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        validation::require("token", token)?;
        validation::require("new password", new_password)?;
        let request = ApiRequest::post(AUTH_RESET_PASSWORD)
            .with_json(&json!({ "token": token, "newPassword": new_password }))?;
        self.ctx.send(request).await.map(drop)
    }

    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> Result<()> {
        validation::require("token", token)?;
        let request = ApiRequest::post(AUTH_VERIFY_EMAIL).with_json(&json!({ "token": token }))?;
        self.ctx.send(request).await.map(drop)
    }

    #[instrument(skip(self))]
    pub async fn resend_verification(&self, email: &str) -> Result<()> {
        validation::require_email(email)?;
        let request =
            ApiRequest::post(AUTH_RESEND_VERIFICATION).with_json(&json!({ "email": email }))?;
        self.ctx.send(request).await.map(drop)
    }

    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        validation::require("current password", current_password)?;
        validation::require("new password", new_password)?;
        let request = ApiRequest::post(AUTH_CHANGE_PASSWORD).with_json(&json!({
            "currentPassword": current_password,
            "newPassword": new_password,
        }))?;
        self.ctx.send(request).await.map(drop)
    }

    /// Edit the signed-in user's own profile.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        validation::check(update)?;
        let request = ApiRequest::put(AUTH_PROFILE).with_json(update)?;
        let result = self.ctx.fetch::<User>(request).await;
        self.ctx
            .fallback()
            .recover_write("update_profile", result, || fallback::updated_profile(update))
    }

    /// The stored access token, if any.
    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(StorageKey::AuthToken)
    }

    /// Whether an access token is stored. Says nothing about its validity.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    fn persist(&self, session: &AuthSession) -> Result<()> {
        self.store.set(StorageKey::AuthToken, session.token.as_str())?;
        match &session.refresh_token {
            Some(refresh) => self.store.set(StorageKey::RefreshToken, refresh.as_str()),
            None => Ok(()),
        }
    }

    /// Clear the stored session when the server rejected it, unless the
    /// synthetic fallback is going to paper over the failure anyway.
    fn forget_rejected_session<T>(&self, result: Result<T>) -> Result<Result<T>> {
        if self.ctx.fallback().allows_synthetic() {
            return Ok(result);
        }
        if let Err(e) = &result {
            if e.is_auth_error() {
                warn!(error = %e, "Session rejected by server, clearing stored tokens");
                self.store.clear()?;
            }
        }
        Ok(result)
    }
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
