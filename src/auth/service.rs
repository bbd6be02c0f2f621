//! Login, logout and current-user lookups

use tracing::{info, warn};

use super::models::{LoginForm, TokenResponse};
use super::navigation::Route;
use crate::common::validation::require_non_blank;
use crate::common::{AppContext, ClientError, Notification, ValidationResult};
use crate::users::models::User;

const LOGIN_FALLBACK: &str = "Invalid credentials";

/// Exchange credentials for a token, store it and go to the dashboard.
/// Failures are surfaced as a "Login failed" notification.
pub async fn login(ctx: &AppContext, username: &str, password: &str) -> Result<(), ClientError> {
    let mut check = ValidationResult::new();
    require_non_blank(&mut check, "username", username);
    require_non_blank(&mut check, "password", password);
    if let Err(e) = check.into_result() {
        ctx.surface(&e, LOGIN_FALLBACK);
        return Err(e);
    }

    let form = LoginForm { username, password };
    let response: TokenResponse = match ctx.api.post_form("/auth/token", &form).await {
        Ok(r) => r,
        Err(e) => {
            warn!(username = %username, error = %e, "Login failed");
            let detail = match &e {
                ClientError::RequestFailed {
                    detail: Some(d), ..
                } => d.clone(),
                _ => LOGIN_FALLBACK.to_string(),
            };
            ctx.notifier.notify(Notification::error("Login failed", detail));
            return Err(e);
        }
    };

    ctx.session.issue(&response.access_token)?;
    info!(username = %username, "Logged in");
    ctx.navigator.push(Route::Dashboard);
    Ok(())
}

/// Drop the session and return to the login view
pub fn logout(ctx: &AppContext) -> Result<(), ClientError> {
    ctx.session.clear()?;
    ctx.navigator.push(Route::Login);
    Ok(())
}

/// `GET /auth/me`
pub async fn current_user(ctx: &AppContext) -> Result<User, ClientError> {
    ctx.api.get("/auth/me").await
}
