use std::{env, path::PathBuf};

use crate::{generation::Voice, StudioError, StudioResult};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_FAST_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_IMAGE_EDIT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_LIVE_MODEL: &str = "gemini-2.5-flash-native-audio-preview-09-2025";
pub const DEFAULT_STORAGE_FILE: &str = "marketgenius.json";

/// Runtime settings for the studio: credentials, model ids and where local
/// state is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub api_key: String,
    /// Overrides the REST endpoint, e.g. for a proxy.
    pub base_url: Option<String>,
    /// Overrides the Live WebSocket endpoint.
    pub live_url: Option<String>,
    pub text_model: String,
    /// Model for the chat assistant and marketing tips.
    pub fast_text_model: String,
    pub image_model: String,
    pub image_edit_model: String,
    pub speech_model: String,
    pub live_model: String,
    pub speech_voice: Voice,
    pub live_voice: Voice,
    pub storage_path: PathBuf,
}

impl StudioConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            live_url: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            fast_text_model: DEFAULT_FAST_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_edit_model: DEFAULT_IMAGE_EDIT_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            live_model: DEFAULT_LIVE_MODEL.to_string(),
            speech_voice: Voice::Kore,
            live_voice: Voice::Zephyr,
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
        }
    }

    /// Reads `GEMINI_API_KEY` (or `API_KEY`) and the optional
    /// `MARKETGENIUS_*` overrides from the process environment.
    pub fn from_env() -> StudioResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`StudioConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> StudioResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("GEMINI_API_KEY")
            .or_else(|| get("API_KEY"))
            .ok_or_else(|| {
                StudioError::Config("GEMINI_API_KEY or API_KEY must be set".to_string())
            })?;

        let mut config = Self::new(api_key);
        config.base_url = get("MARKETGENIUS_BASE_URL");
        config.live_url = get("MARKETGENIUS_LIVE_URL");

        let overrides = [
            ("MARKETGENIUS_TEXT_MODEL", &mut config.text_model),
            ("MARKETGENIUS_FAST_TEXT_MODEL", &mut config.fast_text_model),
            ("MARKETGENIUS_IMAGE_MODEL", &mut config.image_model),
            ("MARKETGENIUS_IMAGE_EDIT_MODEL", &mut config.image_edit_model),
            ("MARKETGENIUS_SPEECH_MODEL", &mut config.speech_model),
            ("MARKETGENIUS_LIVE_MODEL", &mut config.live_model),
        ];
        for (key, slot) in overrides {
            if let Some(value) = get(key) {
                *slot = value;
            }
        }

        if let Some(voice) = get("MARKETGENIUS_SPEECH_VOICE") {
            config.speech_voice = voice.parse()?;
        }
        if let Some(voice) = get("MARKETGENIUS_LIVE_VOICE") {
            config.live_voice = voice.parse()?;
        }
        if let Some(path) = get("MARKETGENIUS_STORAGE_PATH") {
            config.storage_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn falls_back_to_api_key_and_defaults() {
        let config = StudioConfig::from_lookup(lookup(&[("API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.live_model, DEFAULT_LIVE_MODEL);
        assert_eq!(config.speech_voice, Voice::Kore);
        assert_eq!(config.live_voice, Voice::Zephyr);
    }

    #[test]
    fn gemini_key_wins_and_overrides_apply() {
        let config = StudioConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "primary"),
            ("API_KEY", "secondary"),
            ("MARKETGENIUS_TEXT_MODEL", "gemini-exp"),
            ("MARKETGENIUS_SPEECH_VOICE", "Puck"),
            ("MARKETGENIUS_STORAGE_PATH", "/tmp/mg.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "primary");
        assert_eq!(config.text_model, "gemini-exp");
        assert_eq!(config.speech_voice, Voice::Puck);
        assert_eq!(config.storage_path, PathBuf::from("/tmp/mg.json"));
    }

    #[test]
    fn missing_key_is_config_error() {
        let result = StudioConfig::from_lookup(lookup(&[("API_KEY", "  ")]));
        assert!(matches!(result, Err(StudioError::Config(_))));
    }
}
