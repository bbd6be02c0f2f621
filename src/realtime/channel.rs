//! Realtime connection owned by a live page
//!
//! Connects to the Engine.IO websocket endpoint, joins the configured
//! namespace and forwards subscribed invalidation events to the page.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::events::RealtimeEvent;
use super::protocol::{self, EnginePacket, SocketPacketKind};
use crate::common::id_generator::generate_connection_id;
use crate::common::{ClientError, RealtimeConfig};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// One socket connection owned by a mounted page.
///
/// A reader task speaks the Engine.IO/Socket.IO framing and forwards the
/// subscribed events, in arrival order, to [`RealtimeChannel::next`].
/// Dropping the channel aborts the reader task.
pub struct RealtimeChannel {
    connection_id: String,
    events: mpsc::UnboundedReceiver<RealtimeEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RealtimeChannel {
    pub async fn open(
        config: &RealtimeConfig,
        interests: &[RealtimeEvent],
    ) -> Result<Self, ClientError> {
        let connection_id = generate_connection_id();
        let endpoint = config.endpoint();

        let (socket, _response) = connect_async(endpoint.as_str()).await.map_err(|e| {
            warn!(connection_id = %connection_id, endpoint = %endpoint, error = %e, "Realtime connect failed");
            ClientError::Realtime(format!("failed to connect to {}: {}", endpoint, e))
        })?;

        info!(
            connection_id = %connection_id,
            endpoint = %endpoint,
            interests = ?interests,
            "Realtime connection established"
        );

        let (events_tx, events) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let reader = Reader {
            connection_id: connection_id.clone(),
            namespace: config.namespace.clone(),
            interests: interests.to_vec(),
            events: events_tx,
        };
        let task = tokio::spawn(reader.run(socket, shutdown_rx));

        Ok(Self {
            connection_id,
            events,
            shutdown: Some(shutdown_tx),
            task,
        })
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Next subscribed event; `None` once the connection has ended
    pub async fn next(&mut self) -> Option<RealtimeEvent> {
        self.events.recv().await
    }

    /// Leave the namespace and close the socket
    pub async fn close(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if tokio::time::timeout(CLOSE_GRACE, &mut self.task).await.is_err() {
            warn!(connection_id = %self.connection_id, "Realtime reader did not stop in time");
        }
    }
}

impl Drop for RealtimeChannel {
    fn drop(&mut self) {
        self.task.abort();
    }
}

enum Outcome {
    Reply(String),
    Continue,
    Stop,
}

struct Reader {
    connection_id: String,
    namespace: String,
    interests: Vec<RealtimeEvent>,
    events: mpsc::UnboundedSender<RealtimeEvent>,
}

impl Reader {
    async fn run(self, socket: Socket, mut shutdown: oneshot::Receiver<()>) {
        let (mut sink, mut source) = socket.split();

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    let _ = sink
                        .send(Message::Text(protocol::encode_disconnect(&self.namespace)))
                        .await;
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
                frame = source.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => match self.handle_frame(&text) {
                            Outcome::Reply(reply) => {
                                if let Err(e) = sink.send(Message::Text(reply)).await {
                                    warn!(connection_id = %self.connection_id, error = %e, "Realtime write failed");
                                    break;
                                }
                            }
                            Outcome::Continue => {}
                            Outcome::Stop => break,
                        },
                        Some(Ok(Message::Close(_))) | None => {
                            debug!(connection_id = %self.connection_id, "Realtime socket closed by server");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(connection_id = %self.connection_id, error = %e, "Realtime read failed");
                            break;
                        }
                    }
                }
            }
        }

        info!(connection_id = %self.connection_id, "Realtime connection closed");
    }

    fn handle_frame(&self, frame: &str) -> Outcome {
        let packet = match protocol::parse(frame) {
            Ok(p) => p,
            Err(e) => {
                warn!(connection_id = %self.connection_id, error = %e, "Unparseable realtime frame");
                return Outcome::Continue;
            }
        };

        match packet {
            EnginePacket::Open(handshake) => {
                debug!(
                    connection_id = %self.connection_id,
                    sid = %handshake.sid,
                    ping_interval = handshake.ping_interval,
                    "Engine.IO session opened"
                );
                Outcome::Reply(protocol::encode_connect(&self.namespace))
            }
            EnginePacket::Ping(payload) => Outcome::Reply(protocol::encode_pong(&payload)),
            EnginePacket::Close => Outcome::Stop,
            EnginePacket::Message(packet) => {
                if packet.namespace != self.namespace {
                    debug!(namespace = %packet.namespace, "Ignoring packet for another namespace");
                    return Outcome::Continue;
                }
                match packet.kind {
                    SocketPacketKind::Connect => {
                        info!(connection_id = %self.connection_id, namespace = %self.namespace, "Joined namespace");
                        Outcome::Continue
                    }
                    SocketPacketKind::ConnectError => {
                        warn!(connection_id = %self.connection_id, data = ?packet.data, "Namespace connection refused");
                        Outcome::Stop
                    }
                    SocketPacketKind::Disconnect => Outcome::Stop,
                    SocketPacketKind::Event | SocketPacketKind::BinaryEvent => {
                        self.dispatch(packet.event_name())
                    }
                    SocketPacketKind::Ack | SocketPacketKind::BinaryAck => Outcome::Continue,
                }
            }
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Outcome::Continue,
        }
    }

    fn dispatch(&self, name: Option<&str>) -> Outcome {
        let Some(event) = name.and_then(RealtimeEvent::from_name) else {
            debug!(connection_id = %self.connection_id, name = ?name, "Ignoring unknown realtime event");
            return Outcome::Continue;
        };

        if !self.interests.contains(&event) {
            return Outcome::Continue;
        }

        debug!(connection_id = %self.connection_id, event = %event, "Realtime event received");
        if self.events.send(event).is_err() {
            // page is gone
            return Outcome::Stop;
        }
        Outcome::Continue
    }
}
