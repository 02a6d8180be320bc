//! Types shared by the Gemini Live console frontend.
//!
//! Everything in this crate is WASM-safe: plain serde types for the Live
//! API wire protocol, the session settings the UI persists, and the pure
//! functions that derive a session configuration from those settings.

pub mod config;
pub mod log;
pub mod protocol;
pub mod settings;

pub use config::{
    apply_settings, Content, GenerationConfig, LiveConfig, Part, PrebuiltVoiceConfig, SpeechConfig,
    VoiceConfig,
};
pub use log::{push_log, StreamingLog};
pub use protocol::{
    live_ws_url, ClientContent, ClientMessage, LiveError, MediaBlob, RealtimeInput, ServerContent,
    ServerMessage,
};
pub use settings::{
    ResponseModality, SessionSettings, ToolsState, DEFAULT_MODEL, DEFAULT_VOICE, MODELS, VOICES,
};
