//! Session settings persisted by the UI.

use serde::{Deserialize, Serialize};

/// Model offered in the run-settings panel, as `(id, display label)`.
pub const MODELS: [(&str, &str); 1] = [("gemini-2.0-flash-exp", "Gemini 2.0 Flash Experimental")];

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Prebuilt voices the Live API accepts for audio output.
pub const VOICES: [&str; 5] = ["Puck", "Charon", "Kore", "Fenrir", "Aoede"];

pub const DEFAULT_VOICE: &str = "Puck";

/// Output modality requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseModality {
    #[default]
    Audio,
    Text,
}

impl ResponseModality {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseModality::Audio => "audio",
            ResponseModality::Text => "text",
        }
    }

    /// Parse a select-control value, falling back to the default.
    pub fn parse(value: &str) -> Self {
        match value {
            "text" => ResponseModality::Text,
            _ => ResponseModality::Audio,
        }
    }
}

/// The four independent tool capability switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolsState {
    pub code_execution: bool,
    pub function_calling: bool,
    pub automatic_function_response: bool,
    pub grounding: bool,
}

/// The preference set that shapes a live session.
///
/// Each field maps to one durable storage slot; defaults apply when a slot
/// has never been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub prompt: String,
    pub model: String,
    pub output: ResponseModality,
    pub voice: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            model: DEFAULT_MODEL.to_string(),
            output: ResponseModality::Audio,
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = SessionSettings::default();
        assert_eq!(settings.model, "gemini-2.0-flash-exp");
        assert_eq!(settings.voice, "Puck");
        assert_eq!(settings.output, ResponseModality::Audio);
        assert!(settings.prompt.is_empty());
    }

    #[test]
    fn test_tools_default_all_off() {
        let tools = ToolsState::default();
        assert!(!tools.code_execution);
        assert!(!tools.function_calling);
        assert!(!tools.automatic_function_response);
        assert!(!tools.grounding);
    }

    #[test]
    fn test_toggling_one_tool_leaves_the_others() {
        let tools = ToolsState {
            grounding: true,
            ..ToolsState::default()
        };
        let updated = ToolsState {
            function_calling: true,
            ..tools
        };
        assert!(updated.function_calling);
        assert!(updated.grounding);
        assert!(!updated.code_execution);
        assert!(!updated.automatic_function_response);
    }

    #[test]
    fn test_modality_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ResponseModality::Audio).unwrap(),
            "\"audio\""
        );
        assert_eq!(
            serde_json::to_string(&ResponseModality::Text).unwrap(),
            "\"text\""
        );
    }

    #[test]
    fn test_modality_parse_falls_back_to_audio() {
        assert_eq!(ResponseModality::parse("text"), ResponseModality::Text);
        assert_eq!(ResponseModality::parse("garbage"), ResponseModality::Audio);
    }

    #[test]
    fn test_tools_roundtrip_camel_case() {
        let tools = ToolsState {
            code_execution: true,
            automatic_function_response: true,
            ..ToolsState::default()
        };
        let json = serde_json::to_string(&tools).unwrap();
        assert!(json.contains("codeExecution"));
        assert!(json.contains("automaticFunctionResponse"));
        let back: ToolsState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tools);
    }
}
