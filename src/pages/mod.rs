//! # Pages Module
//!
//! Page lifecycle shared by every resource view:
//! mount behind the session guard, hydrate, optionally go live on the
//! realtime channel, reload on invalidation, unmount.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::auth::{Identity, Route};
use crate::common::id_generator::generate_page_id;
use crate::common::{AppContext, ClientError};
use crate::realtime::{RealtimeChannel, RealtimeEvent, Resource};


/// A view over one backend resource
#[async_trait]
pub trait PageView: Send {
    fn route(&self) -> Route;

    /// Resource this page caches, if realtime events can invalidate it
    fn resource(&self) -> Option<Resource> {
        None
    }

    /// Fetch the page's data. Failures are surfaced to the user by the page
    /// before being returned.
    async fn load(&mut self) -> Result<(), ClientError>;
}

/// Run the session guard, then hydrate the page.
///
/// Returns `AuthInvalid` without fetching anything when there is no valid
/// session; the guard has already redirected to login in that case.
pub async fn mount<P: PageView>(ctx: &AppContext, mut page: P) -> Result<MountedPage<P>, ClientError> {
    let identity = ctx.guard().activate()?;
    let page_id = generate_page_id();

    ctx.navigator.push(page.route());
    info!(page_id = %page_id, route = %page.route(), subject = %identity.subject, "Page mounted");

    if let Err(e) = page.load().await {
        warn!(page_id = %page_id, error = %e, "Initial page load failed");
    }

    Ok(MountedPage {
        page_id,
        identity,
        page,
        channel: None,
        ctx: ctx.clone(),
    })
}

pub struct MountedPage<P: PageView> {
    page_id: String,
    identity: Identity,
    page: P,
    channel: Option<RealtimeChannel>,
    ctx: AppContext,
}

impl<P: PageView> MountedPage<P> {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn view(&self) -> &P {
        &self.page
    }

    pub fn view_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn is_live(&self) -> bool {
        self.channel.is_some()
    }

    /// Events this page reloads on
    pub fn subscriptions(&self) -> Vec<RealtimeEvent> {
        self.page
            .resource()
            .map(|r| r.invalidated_by())
            .unwrap_or_default()
    }

    /// Open the page's realtime connection. At most one per mounted page;
    /// pages without subscriptions never connect.
    pub async fn go_live(&mut self) -> Result<(), ClientError> {
        let subscriptions = self.subscriptions();
        if self.channel.is_some() || subscriptions.is_empty() {
            return Ok(());
        }

        let channel = RealtimeChannel::open(&self.ctx.config.realtime, &subscriptions).await?;
        debug!(
            page_id = %self.page_id,
            connection_id = %channel.connection_id(),
            "Page is live"
        );
        self.channel = Some(channel);
        Ok(())
    }

    /// Wait for the next realtime event and reconcile it. `None` when the
    /// page is not live or the connection has ended.
    pub async fn pump(&mut self) -> Option<RealtimeEvent> {
        let event = self.channel.as_mut()?.next().await?;
        self.handle_event(event).await;
        Some(event)
    }

    /// Reconcile one invalidation: notify and re-fetch once if it concerns
    /// this page. Returns whether a reload happened.
    pub async fn handle_event(&mut self, event: RealtimeEvent) -> bool {
        let Some(resource) = self.page.resource() else {
            return false;
        };
        if !event.invalidates().contains(&resource) {
            return false;
        }

        debug!(page_id = %self.page_id, event = %event, "Reloading after invalidation");
        self.ctx.notifier.notify(event.notice());
        if let Err(e) = self.page.load().await {
            warn!(page_id = %self.page_id, event = %event, error = %e, "Reload failed");
        }
        true
    }

    /// Tear down the realtime connection and hand the view back
    pub async fn unmount(mut self) -> P {
        if let Some(channel) = self.channel.take() {
            channel.close().await;
        }
        info!(page_id = %self.page_id, "Page unmounted");
        self.page
    }
}
