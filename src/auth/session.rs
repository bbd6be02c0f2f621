//! Session context and the guard every page runs before fetching data

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, info, warn};

use super::models::{Claims, Identity};
use super::navigation::{Navigator, Route};
use super::token_store::TokenStore;
use crate::common::{safe_token_log, AuthFailure, ClientError};

/// Explicit session state: issued at login, cleared at logout or expiry
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Result<Option<String>, ClientError> {
        self.store.load()
    }

    pub fn issue(&self, token: &str) -> Result<(), ClientError> {
        self.store.save(token)?;
        info!(token = %safe_token_log(token), "Session issued");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.store.clear()?;
        info!("Session cleared");
        Ok(())
    }
}

/// Decode the token payload without verifying the signature. The client
/// never holds the signing secret; the server re-validates every request.
pub fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims = HashSet::new();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).map(|data| data.claims)
}

/// Token is live iff `exp` (seconds) is strictly after `now_ms` (milliseconds)
pub fn is_live(claims: &Claims, now_ms: i64) -> bool {
    claims.exp.saturating_mul(1000) > now_ms
}

pub struct SessionGuard {
    session: SessionContext,
    navigator: Navigator,
}

impl SessionGuard {
    pub fn new(session: SessionContext, navigator: Navigator) -> Self {
        Self { session, navigator }
    }

    pub fn activate(&self) -> Result<Identity, ClientError> {
        self.activate_at(Utc::now().timestamp_millis())
    }

    /// Validate the stored token against `now_ms`. Any failure redirects to
    /// login; malformed and expired tokens are also removed from storage.
    pub fn activate_at(&self, now_ms: i64) -> Result<Identity, ClientError> {
        let token = match self.session.token() {
            Ok(Some(t)) => t,
            Ok(None) => {
                debug!("No session token, redirecting to login");
                self.navigator.push(Route::Login);
                return Err(ClientError::AuthInvalid(AuthFailure::Missing));
            }
            Err(e) => {
                warn!(error = %e, "Session storage unreadable");
                return Err(self.reject(AuthFailure::Malformed));
            }
        };

        let claims = match decode_claims(&token) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, token = %safe_token_log(&token), "Session token could not be decoded");
                return Err(self.reject(AuthFailure::Malformed));
            }
        };

        if !is_live(&claims, now_ms) {
            info!(subject = %claims.sub, exp = claims.exp, "Session token expired");
            return Err(self.reject(AuthFailure::Expired));
        }

        debug!(subject = %claims.sub, "Session accepted");
        Ok(Identity::from_claims(&claims))
    }

    fn reject(&self, failure: AuthFailure) -> ClientError {
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear rejected session");
        }
        self.navigator.push(Route::Login);
        ClientError::AuthInvalid(failure)
    }
}
