//! Live session configuration and its derivation from UI settings.

use serde::{Deserialize, Serialize};

use crate::settings::{ResponseModality, SessionSettings, DEFAULT_MODEL};

/// One content part. The console only ever produces text parts, but the
/// server may return others; unknown fields are ignored on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Concatenated text of all parts, for display.
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

impl SpeechConfig {
    pub fn prebuilt(voice_name: impl Into<String>) -> Self {
        Self {
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: voice_name.into(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<ResponseModality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// The whole-session configuration handed to the connection as the
/// `setup` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            model: qualified_model(DEFAULT_MODEL),
            generation_config: None,
            system_instruction: None,
            tools: None,
        }
    }
}

/// The Live API wants fully qualified model resource names; the UI stores
/// bare ids.
pub fn qualified_model(id: &str) -> String {
    if id.starts_with("models/") {
        id.to_string()
    } else {
        format!("models/{id}")
    }
}

/// Derive the next session configuration from the current one and the UI
/// settings.
///
/// Non-destructive merge: the model, speech config, response modalities and
/// system instruction come from the settings; every other field of the
/// current configuration (temperature, tools) is carried over unchanged.
/// An empty prompt clears the system instruction rather than sending an
/// empty part.
pub fn apply_settings(current: &LiveConfig, settings: &SessionSettings) -> LiveConfig {
    let generation_config = GenerationConfig {
        response_modalities: Some(settings.output),
        speech_config: Some(SpeechConfig::prebuilt(settings.voice.clone())),
        ..current.generation_config.clone().unwrap_or_default()
    };
    let system_instruction = if settings.prompt.is_empty() {
        None
    } else {
        Some(Content {
            role: None,
            parts: vec![Part::text(settings.prompt.clone())],
        })
    };
    LiveConfig {
        model: qualified_model(&settings.model),
        generation_config: Some(generation_config),
        system_instruction,
        tools: current.tools.clone(),
    }
}
