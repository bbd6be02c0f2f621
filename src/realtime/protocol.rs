//! Engine.IO v4 / Socket.IO v5 text framing, the subset a listening client needs
//!
//! Frame layout: one Engine.IO type digit, then for `4` (message) a Socket.IO
//! packet `<type>[<attachments>-][<namespace>,][<ack id>][<json>]`.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProtocolError {
    #[error("empty frame")]
    Empty,

    #[error("unknown engine.io packet type {0:?}")]
    UnknownEngineType(char),

    #[error("unknown socket.io packet type {0:?}")]
    UnknownSocketType(char),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Payload of the Engine.IO open packet
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Handshake {
    pub sid: String,
    #[serde(rename = "pingInterval", default)]
    pub ping_interval: u64,
    #[serde(rename = "pingTimeout", default)]
    pub ping_timeout: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketPacketKind {
    Connect,
    Disconnect,
    Event,
    Ack,
    ConnectError,
    BinaryEvent,
    BinaryAck,
}

impl SocketPacketKind {
    fn from_char(c: char) -> Result<Self, ProtocolError> {
        Ok(match c {
            '0' => SocketPacketKind::Connect,
            '1' => SocketPacketKind::Disconnect,
            '2' => SocketPacketKind::Event,
            '3' => SocketPacketKind::Ack,
            '4' => SocketPacketKind::ConnectError,
            '5' => SocketPacketKind::BinaryEvent,
            '6' => SocketPacketKind::BinaryAck,
            other => return Err(ProtocolError::UnknownSocketType(other)),
        })
    }

    fn is_binary(&self) -> bool {
        matches!(self, SocketPacketKind::BinaryEvent | SocketPacketKind::BinaryAck)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocketPacket {
    pub kind: SocketPacketKind,
    pub namespace: String,
    pub ack_id: Option<u64>,
    pub data: Option<Value>,
}

impl SocketPacket {
    /// Event name of an event packet (`["name", ...args]`)
    pub fn event_name(&self) -> Option<&str> {
        if !matches!(
            self.kind,
            SocketPacketKind::Event | SocketPacketKind::BinaryEvent
        ) {
            return None;
        }
        self.data
            .as_ref()
            .and_then(|d| d.as_array())
            .and_then(|args| args.first())
            .and_then(|name| name.as_str())
    }
}

pub fn parse(frame: &str) -> Result<EnginePacket, ProtocolError> {
    let mut chars = frame.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let body = chars.as_str();

    match kind {
        '0' => serde_json::from_str::<Handshake>(body)
            .map(EnginePacket::Open)
            .map_err(|e| ProtocolError::InvalidPayload(e.to_string())),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping(body.to_string())),
        '3' => Ok(EnginePacket::Pong(body.to_string())),
        '4' => parse_socket(body).map(EnginePacket::Message),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(ProtocolError::UnknownEngineType(other)),
    }
}

fn parse_socket(body: &str) -> Result<SocketPacket, ProtocolError> {
    let mut chars = body.chars();
    let kind = SocketPacketKind::from_char(chars.next().ok_or(ProtocolError::Empty)?)?;
    let mut rest = chars.as_str();

    if kind.is_binary() {
        if let Some(idx) = rest.find('-') {
            rest = &rest[idx + 1..];
        }
    }

    let namespace = if rest.starts_with('/') {
        match rest.find(',') {
            Some(idx) => {
                let ns = &rest[..idx];
                rest = &rest[idx + 1..];
                ns
            }
            None => {
                let ns = rest;
                rest = "";
                ns
            }
        }
    } else {
        "/"
    };

    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    let ack_id = if digits > 0 {
        rest[..digits].parse::<u64>().ok()
    } else {
        None
    };
    rest = &rest[digits..];

    let data = if rest.is_empty() {
        None
    } else {
        Some(
            serde_json::from_str::<Value>(rest)
                .map_err(|e| ProtocolError::InvalidPayload(e.to_string()))?,
        )
    };

    Ok(SocketPacket {
        kind,
        namespace: namespace.to_string(),
        ack_id,
        data,
    })
}

fn namespace_prefix(namespace: &str) -> String {
    if namespace.is_empty() || namespace == "/" {
        String::new()
    } else {
        format!("{},", namespace)
    }
}

/// Socket.IO connect request for `namespace`
pub fn encode_connect(namespace: &str) -> String {
    format!("40{}", namespace_prefix(namespace))
}

/// Socket.IO disconnect for `namespace`
pub fn encode_disconnect(namespace: &str) -> String {
    format!("41{}", namespace_prefix(namespace))
}

/// Engine.IO pong echoing the ping payload
pub fn encode_pong(payload: &str) -> String {
    format!("3{}", payload)
}
