// Client context shared by every page

use std::sync::Arc;

use tokio::sync::mpsc;

use super::config::ClientConfig;
use super::error::ClientError;
use super::notify::{Notification, Notifier};
use crate::api::ApiClient;
use crate::auth::{Navigator, Route, SessionContext, SessionGuard, TokenStore};

/// Configuration, session, API client, navigation and notifications
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionContext,
    pub api: ApiClient,
    pub navigator: Navigator,
    pub notifier: Notifier,
}

impl AppContext {
    /// Build the context; the returned receiver yields every notification
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Notification>), ClientError> {
        let session = SessionContext::new(store);
        let api = ApiClient::new(&config, session.clone())?;
        let (notifier, notifications) = Notifier::channel();

        let ctx = Self {
            config,
            session,
            api,
            navigator: Navigator::new(Route::Login),
            notifier,
        };
        Ok((ctx, notifications))
    }

    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.session.clone(), self.navigator.clone())
    }

    /// Show the notification for `err` unless it is a session failure
    pub fn surface(&self, err: &ClientError, fallback: &str) {
        if let Some(notification) = err.notification(fallback) {
            self.notifier.notify(notification);
        }
    }
}
