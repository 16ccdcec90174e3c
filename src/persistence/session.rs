use serde_json::Value;

use super::KeyValueStore;
use crate::{
    core::KakitoriError,
    study::navigator::SessionState,
};

const SESSION_SLOT_PREFIX: &str = "study-session/";
const REQUIRED_FIELDS: [&str; 3] = ["deck", "current", "history"];

/// Handle to a written session slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSession {
    slot: String,
}

impl SavedSession {
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

/// Checkpoints navigator state into one key-value slot per user key.
pub struct SessionPersistence<'a> {
    store: &'a mut dyn KeyValueStore,
}

impl<'a> SessionPersistence<'a> {
    pub fn new(store: &'a mut dyn KeyValueStore) -> Self {
        Self { store }
    }

    fn slot(user_key: &str) -> String {
        format!("{SESSION_SLOT_PREFIX}{user_key}")
    }

    pub fn save(
        &mut self,
        user_key: &str,
        state: &SessionState,
    ) -> Result<SavedSession, KakitoriError> {
        let slot = Self::slot(user_key);
        let json = serde_json::to_string(state)?;
        self.store.set(&slot, json)?;
        tracing::info!(
            "Saved study session ({} left in deck, {} in history)",
            state.deck.len(),
            state.history.len()
        );
        Ok(SavedSession { slot })
    }

    /// Reads the saved state back. Anything short of a complete, well-formed state
    /// is reported as no saved session.
    pub fn load(&self, user_key: &str) -> Option<SessionState> {
        let raw = match self.store.get(&Self::slot(user_key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!("Saved session unreadable: {}", e);
                return None;
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Saved session is not JSON: {}", e);
                return None;
            }
        };

        let complete = value
            .as_object()
            .is_some_and(|fields| REQUIRED_FIELDS.iter().all(|f| fields.contains_key(*f)));
        if !complete {
            tracing::debug!("Saved session is missing fields");
            return None;
        }

        match serde_json::from_value::<SessionState>(value) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::debug!("Saved session does not match the session shape: {}", e);
                None
            }
        }
    }

    pub fn clear(&mut self, user_key: &str) -> Result<(), KakitoriError> {
        self.store.remove(&Self::slot(user_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            ItemKind,
            Reading,
            ReadingKind,
            StudyItem,
        },
        persistence::MemoryStore,
    };

    fn item(character: &str, kind: ItemKind, reading: Reading) -> StudyItem {
        StudyItem {
            character: character.to_string(),
            kind,
            level: 4,
            meaning: "m".to_string(),
            reading,
        }
    }

    fn state() -> SessionState {
        SessionState {
            deck: vec![
                item("犬", ItemKind::Kanji, Reading::Kanji {
                    kind: ReadingKind::Kunyomi,
                    value: "いぬ".to_string(),
                }),
                item("大", ItemKind::Radical, Reading::None),
            ],
            current: Some(item("子犬", ItemKind::Vocabulary, Reading::Kana {
                kana: "こいぬ".to_string(),
            })),
            history: vec![
                item("大", ItemKind::Kanji, Reading::None),
                item("子犬", ItemKind::Vocabulary, Reading::Kana { kana: "こいぬ".to_string() }),
            ],
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let mut persistence = SessionPersistence::new(&mut store);

        let saved = persistence.save("key-1", &state()).unwrap();
        assert_eq!(saved.slot(), "study-session/key-1");
        assert_eq!(persistence.load("key-1"), Some(state()));
        assert_eq!(persistence.load("key-2"), None);
    }

    #[test]
    fn test_missing_fields_load_as_absent() {
        let mut store = MemoryStore::new();
        let full = serde_json::to_value(state()).unwrap();

        for field in REQUIRED_FIELDS {
            let mut partial = full.clone();
            partial.as_object_mut().unwrap().remove(field);
            store.set("study-session/k", partial.to_string()).unwrap();
            assert_eq!(SessionPersistence::new(&mut store).load("k"), None, "without {field}");
        }
    }

    #[test]
    fn test_null_current_is_allowed() {
        let mut store = MemoryStore::new();
        store
            .set("study-session/k", r#"{ "deck": [], "current": null, "history": [] }"#.to_string())
            .unwrap();
        assert_eq!(SessionPersistence::new(&mut store).load("k"), Some(SessionState::default()));
    }

    #[test]
    fn test_malformed_loads_as_absent() {
        let mut store = MemoryStore::new();
        store.set("study-session/k", "{ not json".to_string()).unwrap();
        assert_eq!(SessionPersistence::new(&mut store).load("k"), None);

        store
            .set("study-session/k", r#"{ "deck": 3, "current": null, "history": [] }"#.to_string())
            .unwrap();
        assert_eq!(SessionPersistence::new(&mut store).load("k"), None);
    }

    #[test]
    fn test_clear_removes_slot() {
        let mut store = MemoryStore::new();
        let mut persistence = SessionPersistence::new(&mut store);
        persistence.save("k", &state()).unwrap();
        persistence.clear("k").unwrap();
        assert_eq!(persistence.load("k"), None);
    }
}
