use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use super::http::DEFAULT_TIMEOUT_SECS;
use crate::persistence::{
    get_data_file_path,
    load_json_or_default,
    save_json,
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_API_BASE: &str = "https://www.wanikani.com/api/user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// JSON map of glyph -> SVG stroke paths.
    pub glyph_file: PathBuf,
    /// JSON map of vocabulary -> playable audio URL or path.
    pub audio_file: PathBuf,
    /// Key-value slot file holding the remembered key and saved sessions.
    pub storage_file: PathBuf,
    /// Optional CJK font; egui's bundled fonts have no kanji coverage.
    pub font_file: Option<PathBuf>,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            glyph_file: get_data_file_path("strokes.json"),
            audio_file: get_data_file_path("audio.json"),
            storage_file: get_data_file_path("storage.json"),
            font_file: None,
            dark_mode: true,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        load_json_or_default::<Settings>(SETTINGS_FILE)
    }

    pub fn save(&self) -> Result<(), crate::core::KakitoriError> {
        save_json(self, SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "request_timeout_secs": 5, "dark_mode": false }"#).unwrap();
        assert_eq!(settings.request_timeout_secs, 5);
        assert!(!settings.dark_mode);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE);
        assert!(settings.font_file.is_none());
    }
}
