//! Wire envelopes for the Live API WebSocket.
//!
//! Client frames are single-key JSON objects (`{"setup": ...}`,
//! `{"clientContent": ...}`, `{"realtimeInput": ...}`); server frames carry
//! whichever of their optional fields applies. Delivery ordering and
//! retries are the transport's concern, not modeled here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Content, LiveConfig};

/// Default host for the Live API endpoint.
pub const LIVE_API_HOST: &str = "generativelanguage.googleapis.com";

const BIDI_PATH: &str = "ws/google.ai.generativelanguage.v1alpha.GenerativeService.BidiGenerateContent";

/// Build the `BidiGenerateContent` WebSocket URL for an API key.
pub fn live_ws_url(api_key: &str) -> String {
    format!("wss://{LIVE_API_HOST}/{BIDI_PATH}?key={api_key}")
}

/// Connection-layer errors surfaced to the UI as log entries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LiveError {
    #[error("socket error: {0}")]
    Socket(String),
    #[error("serialization error: {0}")]
    Serialize(String),
    #[error("not connected")]
    NotConnected,
}

/// Frames sent by the client. The externally tagged representation matches
/// the single-key envelope the service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientMessage {
    Setup(LiveConfig),
    ClientContent(ClientContent),
    RealtimeInput(RealtimeInput),
}

impl ClientMessage {
    /// A single user text turn, marked complete.
    pub fn user_text(text: impl Into<String>) -> Self {
        ClientMessage::ClientContent(ClientContent {
            turns: vec![Content::user_text(text)],
            turn_complete: true,
        })
    }

    /// Log tag for this frame.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::Setup(_) => "client.setup",
            ClientMessage::ClientContent(_) => "client.send",
            ClientMessage::RealtimeInput(_) => "client.realtimeInput",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContent {
    pub turns: Vec<Content>,
    pub turn_complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeInput {
    pub media_chunks: Vec<MediaBlob>,
}

/// Base64 payload with its mime type, as the realtime input channel wants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaBlob {
    pub mime_type: String,
    pub data: String,
}

/// A frame received from the service. Exactly one of the optional fields
/// is populated per frame; anything unrecognized is dropped by serde.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_complete: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_content: Option<ServerContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_turn: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<bool>,
}

impl ServerMessage {
    /// Log tag for this frame.
    pub fn kind(&self) -> &'static str {
        if self.setup_complete.is_some() {
            "server.setupComplete"
        } else if self.server_content.is_some() {
            "server.content"
        } else if self.tool_call.is_some() {
            "server.toolCall"
        } else {
            "server.unknown"
        }
    }

    /// Short human-readable line for the transcript pane.
    pub fn summary(&self) -> String {
        if self.setup_complete.is_some() {
            return "setup complete".to_string();
        }
        if let Some(content) = &self.server_content {
            if content.interrupted == Some(true) {
                return "interrupted".to_string();
            }
            if let Some(turn) = &content.model_turn {
                let text = turn.joined_text();
                if !text.is_empty() {
                    return text;
                }
            }
            if content.turn_complete == Some(true) {
                return "turn complete".to_string();
            }
            return "content".to_string();
        }
        if self.tool_call.is_some() {
            return "tool call".to_string();
        }
        "unknown frame".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Part;

    #[test]
    fn test_setup_envelope_shape() {
        let json = serde_json::to_value(ClientMessage::Setup(LiveConfig::default())).unwrap();
        assert_eq!(
            json["setup"]["model"].as_str(),
            Some("models/gemini-2.0-flash-exp")
        );
    }

    #[test]
    fn test_user_text_envelope_shape() {
        let json = serde_json::to_value(ClientMessage::user_text("hello")).unwrap();
        let content = &json["clientContent"];
        assert_eq!(content["turnComplete"].as_bool(), Some(true));
        assert_eq!(content["turns"][0]["role"].as_str(), Some("user"));
        assert_eq!(content["turns"][0]["parts"][0]["text"].as_str(), Some("hello"));
    }

    #[test]
    fn test_realtime_input_envelope_shape() {
        let msg = ClientMessage::RealtimeInput(RealtimeInput {
            media_chunks: vec![MediaBlob {
                mime_type: "image/jpeg".to_string(),
                data: "aGk=".to_string(),
            }],
        });
        let json = serde_json::to_value(msg).unwrap();
        assert_eq!(
            json["realtimeInput"]["mediaChunks"][0]["mimeType"].as_str(),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_server_frame_parse_and_kind() {
        let frame = r#"{"serverContent":{"modelTurn":{"parts":[{"text":"ahoy"}]}}}"#;
        let msg: ServerMessage = serde_json::from_str(frame).unwrap();
        assert_eq!(msg.kind(), "server.content");
        assert_eq!(msg.summary(), "ahoy");

        let done: ServerMessage = serde_json::from_str(r#"{"setupComplete":{}}"#).unwrap();
        assert_eq!(done.kind(), "server.setupComplete");
    }

    #[test]
    fn test_turn_complete_summary() {
        let msg = ServerMessage {
            server_content: Some(ServerContent {
                turn_complete: Some(true),
                ..ServerContent::default()
            }),
            ..ServerMessage::default()
        };
        assert_eq!(msg.summary(), "turn complete");
    }

    #[test]
    fn test_unknown_server_fields_are_ignored() {
        let frame = r#"{"usageMetadata":{"totalTokenCount":7}}"#;
        let msg: ServerMessage = serde_json::from_str(frame).unwrap();
        assert_eq!(msg.kind(), "server.unknown");
    }

    #[test]
    fn test_joined_text_concatenates_parts() {
        let content = Content {
            role: None,
            parts: vec![Part::text("a"), Part::default(), Part::text("b")],
        };
        assert_eq!(content.joined_text(), "ab");
    }

    #[test]
    fn test_live_error_display() {
        assert_eq!(
            LiveError::Socket("refused".to_string()).to_string(),
            "socket error: refused"
        );
        assert_eq!(
            LiveError::Serialize("bad frame".to_string()).to_string(),
            "serialization error: bad frame"
        );
        assert_eq!(LiveError::NotConnected.to_string(), "not connected");
    }

    #[test]
    fn test_live_ws_url_carries_key() {
        let url = live_ws_url("abc123");
        assert!(url.starts_with("wss://generativelanguage.googleapis.com/"));
        assert!(url.ends_with("?key=abc123"));
    }
}
