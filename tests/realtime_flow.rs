//! Realtime channel against an in-process Engine.IO websocket.

mod common;

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use common::{espresso, serve, Counter, Harness};
use shopdesk::inventory::InventoryPage;
use shopdesk::realtime::{RealtimeChannel, RealtimeEvent};
use shopdesk::mount;

const OPEN: &str = r#"0{"sid":"s1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

async fn recv_text(socket: &mut WebSocket) -> Option<String> {
    loop {
        match socket.recv().await? {
            Ok(Message::Text(text)) => return Some(text),
            Ok(Message::Close(_)) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

/// Handshake, one heartbeat, then the scripted frames
async fn engine_session(mut socket: WebSocket, script: Vec<String>) {
    let _ = socket.send(Message::Text(OPEN.to_string())).await;
    if recv_text(&mut socket).await.as_deref() != Some("40") {
        return;
    }
    let _ = socket.send(Message::Text(r#"40{"sid":"n1"}"#.to_string())).await;

    let _ = socket.send(Message::Text("2".to_string())).await;
    if recv_text(&mut socket).await.as_deref() != Some("3") {
        return;
    }

    for frame in script {
        let _ = socket.send(Message::Text(frame)).await;
    }
    // hold the connection until the client leaves
    while recv_text(&mut socket).await.is_some() {}
}

fn socket_route(script: Vec<String>) -> axum::routing::MethodRouter {
    get(move |ws: WebSocketUpgrade| {
        let script = script.clone();
        async move {
            let response: Response = ws.on_upgrade(move |socket| engine_session(socket, script));
            response
        }
    })
}

#[tokio::test]
async fn test_channel_forwards_only_subscribed_events() {
    let script = vec![
        r#"42["new_order",{"order_id":3}]"#.to_string(),
        r#"42["something_else",{}]"#.to_string(),
        r#"42/admin,["stock_update",{}]"#.to_string(),
        r#"42["stock_update",{"product_id":9}]"#.to_string(),
        "1".to_string(),
    ];
    let origin = serve(Router::new().route("/ws/", socket_route(script))).await;
    let h = Harness::signed_in(&origin);

    let mut channel = RealtimeChannel::open(&h.ctx.config.realtime, &[RealtimeEvent::StockUpdate])
        .await
        .unwrap();

    let first = tokio::time::timeout(Duration::from_secs(5), channel.next())
        .await
        .unwrap();
    assert_eq!(first, Some(RealtimeEvent::StockUpdate));

    // engine close ends the stream
    let end = tokio::time::timeout(Duration::from_secs(5), channel.next())
        .await
        .unwrap();
    assert_eq!(end, None);
}

#[tokio::test]
async fn test_live_page_reloads_on_event() {
    let fetches = Counter::default();
    let counted = fetches.clone();
    let script = vec![
        r#"42["order_cancelled",{"order_id":1}]"#.to_string(),
        r#"42["stock_update",{"product_id":9}]"#.to_string(),
    ];
    let router = Router::new()
        .route(
            "/inventory",
            get(move || {
                counted.hit();
                async { Json(json!([espresso()])) }
            }),
        )
        .route("/ws/", socket_route(script));
    let origin = serve(router).await;
    let mut h = Harness::signed_in(&origin);

    let mut page = mount(&h.ctx, InventoryPage::new(&h.ctx)).await.unwrap();
    page.go_live().await.unwrap();
    page.go_live().await.unwrap();
    assert!(page.is_live());

    let event = tokio::time::timeout(Duration::from_secs(5), page.pump())
        .await
        .unwrap();

    assert_eq!(event, Some(RealtimeEvent::StockUpdate));
    assert_eq!(fetches.get(), 2);
    let notes = h.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Inventory Changed");

    page.unmount().await;
}
