use crate::error::{validation_error, AppResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed nudge interval in seconds
pub const NUDGE_INTERVAL_RANGE: RangeInclusive<u32> = 5..=60;
/// Allowed number of nudges per call
pub const MAX_NUDGES_RANGE: RangeInclusive<u32> = 1..=10;
/// Allowed maximum call duration in seconds
pub const MAX_CALL_DURATION_RANGE: RangeInclusive<u32> = 0..=600;
/// Allowed typing sound volume
pub const TYPING_VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Text-to-speech provider settings.
///
/// Serialized the way the agent backend expects:
/// `{"provider": "openai", "openai": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum TtsConfig {
    #[serde(rename = "openai")]
    OpenAi { openai: OpenAiTts },
    #[serde(rename = "elevenlabs")]
    ElevenLabs { elevenlabs: ElevenLabsTts },
    /// The backend spells this provider `cartesian`
    #[serde(rename = "cartesian")]
    Cartesia { cartesian: CartesiaTts },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiTts {
    pub api_key: String,
    #[serde(default)]
    pub model: Option<String>,
    pub voice: String,
    #[serde(default = "default_response_format")]
    pub response_format: String,
    #[serde(default)]
    pub language: Option<String>,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevenLabsTts {
    pub api_key: String,
    pub voice_id: String,
    #[serde(default = "default_elevenlabs_model")]
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesiaTts {
    pub voice_id: String,
    pub tts_api_key: String,
    pub model: String,
    pub speed: f32,
    pub language: String,
}

/// Speech-to-text provider settings, tagged like [`TtsConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum SttConfig {
    #[serde(rename = "deepgram")]
    Deepgram { deepgram: DeepgramStt },
    #[serde(rename = "openai")]
    OpenAi { openai: OpenAiStt },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepgramStt {
    pub api_key: String,
    pub model: String,
    pub language: String,
    #[serde(default)]
    pub punctuate: bool,
    #[serde(default)]
    pub smart_format: bool,
    #[serde(default)]
    pub interim_results: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiStt {
    pub api_key: String,
    pub model: String,
    /// `None` means automatic language detection
    pub language: Option<String>,
}

fn default_response_format() -> String {
    "mp3".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_monolingual_v1".to_string()
}

impl TtsConfig {
    pub fn provider(&self) -> &'static str {
        match self {
            TtsConfig::OpenAi { .. } => "openai",
            TtsConfig::ElevenLabs { .. } => "elevenlabs",
            TtsConfig::Cartesia { .. } => "cartesian",
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            TtsConfig::OpenAi { openai } => &openai.api_key,
            TtsConfig::ElevenLabs { elevenlabs } => &elevenlabs.api_key,
            TtsConfig::Cartesia { cartesian } => &cartesian.tts_api_key,
        }
    }

    /// Copy with the API key masked, for display and logs
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            TtsConfig::OpenAi { openai } => openai.api_key = mask_api_key(&openai.api_key),
            TtsConfig::ElevenLabs { elevenlabs } => {
                elevenlabs.api_key = mask_api_key(&elevenlabs.api_key)
            }
            TtsConfig::Cartesia { cartesian } => {
                cartesian.tts_api_key = mask_api_key(&cartesian.tts_api_key)
            }
        }
        copy
    }
}

impl SttConfig {
    pub fn provider(&self) -> &'static str {
        match self {
            SttConfig::Deepgram { .. } => "deepgram",
            SttConfig::OpenAi { .. } => "openai",
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            SttConfig::Deepgram { deepgram } => &deepgram.api_key,
            SttConfig::OpenAi { openai } => &openai.api_key,
        }
    }

    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            SttConfig::Deepgram { deepgram } => deepgram.api_key = mask_api_key(&deepgram.api_key),
            SttConfig::OpenAi { openai } => openai.api_key = mask_api_key(&openai.api_key),
        }
        copy
    }
}

/// Voice agent configuration sent to the agent backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub organization_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatbot_api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatbot_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub initial_message: String,
    pub nudge_text: String,
    pub nudge_interval: u32,
    pub max_nudges: u32,
    pub typing_volume: f32,
    pub max_call_duration: u32,
    pub tts_config: TtsConfig,
    pub stt_config: SttConfig,
}

impl AgentConfig {
    /// Check ranges and required fields
    pub fn validate(&self) -> AppResult<()> {
        if self.organization_id.trim().is_empty() {
            return Err(validation_error("organization_id is required"));
        }
        if !NUDGE_INTERVAL_RANGE.contains(&self.nudge_interval) {
            return Err(validation_error(&format!(
                "nudge_interval must be between {} and {} seconds",
                NUDGE_INTERVAL_RANGE.start(),
                NUDGE_INTERVAL_RANGE.end()
            )));
        }
        if !MAX_NUDGES_RANGE.contains(&self.max_nudges) {
            return Err(validation_error(&format!(
                "max_nudges must be between {} and {}",
                MAX_NUDGES_RANGE.start(),
                MAX_NUDGES_RANGE.end()
            )));
        }
        if !TYPING_VOLUME_RANGE.contains(&self.typing_volume) {
            return Err(validation_error("typing_volume must be between 0 and 1"));
        }
        if !MAX_CALL_DURATION_RANGE.contains(&self.max_call_duration) {
            return Err(validation_error(&format!(
                "max_call_duration must be at most {} seconds",
                MAX_CALL_DURATION_RANGE.end()
            )));
        }
        if self.tts_config.api_key().trim().is_empty() {
            return Err(validation_error(&format!(
                "{} TTS API key is required",
                self.tts_config.provider()
            )));
        }
        if self.stt_config.api_key().trim().is_empty() {
            return Err(validation_error(&format!(
                "{} STT API key is required",
                self.stt_config.provider()
            )));
        }
        Ok(())
    }

    /// Copy with every secret masked
    pub fn masked(&self) -> Self {
        Self {
            chatbot_key: self.chatbot_key.as_deref().map(mask_api_key),
            tts_config: self.tts_config.masked(),
            stt_config: self.stt_config.masked(),
            ..self.clone()
        }
    }
}

/// Agent record as returned by the agent backend listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Everything else the backend sent, e.g. the full voice config
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AgentSummary {
    /// One table row: `name [status] model (provider) description`
    pub fn row(&self) -> String {
        let mut row = format!(
            "{} [{}]",
            self.name,
            self.status.as_deref().unwrap_or("unknown")
        );
        if let Some(model) = &self.model {
            row.push_str(&format!(" {}", model));
        }
        if let Some(provider) = &self.provider {
            row.push_str(&format!(" ({})", provider));
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            row.push_str(&format!(" {}", description));
        }
        row
    }
}

/// Mask every string stored under an `api_key` or `*_key` field, at any depth
pub fn mask_secrets(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                let is_secret = key == "api_key" || key.ends_with("_key");
                match field {
                    serde_json::Value::String(secret) if is_secret && !secret.is_empty() => {
                        *secret = mask_api_key(secret);
                    }
                    other => mask_secrets(other),
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(mask_secrets),
        _ => {}
    }
}

/// Mask an API key, keeping only the last four characters
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() < 4 {
        return "••••••••".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    if chars.len() <= 8 {
        format!("••••{}", tail)
    } else {
        format!("{}{}", "•".repeat(32), tail)
    }
}
