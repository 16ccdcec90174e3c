use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use crate::core::{
    ItemKind,
    KakitoriError,
    StudyItem,
};

/// Playable audio per vocabulary word.
pub trait AudioLookup: Send + Sync {
    fn audio_for(&self, character: &str) -> Option<&str>;

    /// Only vocabulary has recordings; anything else has the control disabled.
    fn audio_for_item(&self, item: &StudyItem) -> Option<&str> {
        match item.kind {
            ItemKind::Vocabulary => self.audio_for(&item.character),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct AudioIndex {
    entries: HashMap<String, String>,
}

impl AudioIndex {
    pub fn from_json(json: &str) -> Result<Self, KakitoriError> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// A missing index just means no audio is available.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path).map_err(KakitoriError::from).and_then(|s| Self::from_json(&s))
        {
            Ok(index) => {
                tracing::info!("Loaded {} audio entries", index.entries.len());
                index
            }
            Err(e) => {
                tracing::warn!("Failed to load audio index {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

impl AudioLookup for AudioIndex {
    fn audio_for(&self, character: &str) -> Option<&str> {
        self.entries.get(character).map(String::as_str).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Reading;

    fn item(character: &str, kind: ItemKind) -> StudyItem {
        StudyItem {
            character: character.to_string(),
            kind,
            level: 1,
            meaning: String::new(),
            reading: Reading::None,
        }
    }

    #[test]
    fn test_only_vocabulary_has_audio() {
        let index =
            AudioIndex::from_json(r#"{ "大人": "https://example.com/otona.mp3", "人": "x.mp3", "一つ": "" }"#)
                .unwrap();

        assert_eq!(
            index.audio_for_item(&item("大人", ItemKind::Vocabulary)),
            Some("https://example.com/otona.mp3")
        );
        assert_eq!(index.audio_for_item(&item("人", ItemKind::Kanji)), None);
        assert_eq!(index.audio_for_item(&item("一つ", ItemKind::Vocabulary)), None);
        assert_eq!(index.audio_for_item(&item("二つ", ItemKind::Vocabulary)), None);
    }

    #[test]
    fn test_missing_file_is_empty_index() {
        let index = AudioIndex::load_or_empty(Path::new("/definitely/not/here.json"));
        assert_eq!(index.audio_for("大人"), None);
    }
}
