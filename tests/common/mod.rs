//! Shared fixtures: an in-process mock backend and session helpers.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;

use shopdesk::auth::{Claims, MemoryTokenStore};
use shopdesk::{AppContext, ClientConfig, Notification};

/// Serve `router` on an ephemeral port and return its `http://` origin
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock backend crashed");
    });
    format!("http://{}", addr)
}

pub fn token_for(subject: &str, exp: i64) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        exp,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"backend-secret"))
        .expect("Failed to mint token")
}

pub fn live_token() -> String {
    token_for("manager", chrono::Utc::now().timestamp() + 3600)
}

pub struct Harness {
    pub ctx: AppContext,
    pub store: Arc<MemoryTokenStore>,
    pub notifications: UnboundedReceiver<Notification>,
}

impl Harness {
    /// Context against `origin` with an optional stored token
    pub fn new(origin: &str, token: Option<String>) -> Self {
        let store = Arc::new(match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        });
        let config = ClientConfig::for_origin(origin, PathBuf::from("unused-storage.json"));
        let (ctx, notifications) =
            AppContext::new(config, store.clone()).expect("Failed to build context");
        Self {
            ctx,
            store,
            notifications,
        }
    }

    pub fn signed_in(origin: &str) -> Self {
        Self::new(origin, Some(live_token()))
    }

    /// Every notification raised so far
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(n) = self.notifications.try_recv() {
            out.push(n);
        }
        out
    }
}

#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn hit(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn espresso() -> serde_json::Value {
    json!({"id": 9, "name": "Espresso", "price": 2.5, "stock": 40})
}

pub fn order_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": 1,
        "status": status,
        "created_at": "2024-05-01T10:00:00",
        "items": [{"id": 1, "product_id": 9, "quantity": 2, "product": espresso()}]
    })
}
