//! Transient user-facing notifications (toasts)

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            variant: Variant::Default,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: Variant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            variant: Variant::Destructive,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.variant {
            Variant::Default => "✅",
            Variant::Destructive => "❌",
        };
        match &self.description {
            Some(desc) => write!(f, "{} {}: {}", tag, self.title, desc),
            None => write!(f, "{} {}", tag, self.title),
        }
    }
}

/// Sending half of the notification queue. Cheap to clone; every page holds one.
#[derive(Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Default => info!(title = %notification.title, "Notification"),
            Variant::Destructive => warn!(
                title = %notification.title,
                description = ?notification.description,
                "Error notification"
            ),
        }

        if self.sender.send(notification).is_err() {
            debug!("Notification dropped: receiver closed");
        }
    }
}
