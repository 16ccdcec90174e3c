use rand::Rng;

use super::{
    builder::build_deck,
    navigator::{
        NavigatorPhase,
        SessionNavigator,
        Step,
    },
    store::ItemStore,
};
use crate::{
    core::{
        KakitoriError,
        LevelSummary,
        StudyItem,
        StudySelection,
    },
    glyph::GlyphLibrary,
    persistence::{
        remember_api_key,
        KeyValueStore,
        SavedSession,
        SessionPersistence,
    },
    wanikani::{
        load_items,
        ItemSource,
        LoginData,
        UserInformation,
    },
};

/// What the study view shows for the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub item: StudyItem,
    pub prompt: String,
    /// Character and reading, only once revealed.
    pub answer: Option<String>,
    pub remaining: usize,
    pub can_go_back: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyProgress {
    Showing,
    /// The deck ran out; the level selector should come back with a congratulation.
    Finished,
}

/// One authenticated user's study session: created by a successful login and
/// dropped on logout.
#[derive(Debug)]
pub struct UserSession {
    api_key: String,
    user: UserInformation,
    store: ItemStore,
    navigator: SessionNavigator,
    revealed: bool,
}

impl UserSession {
    pub fn new(api_key: impl Into<String>, data: LoginData) -> Self {
        Self {
            api_key: api_key.into(),
            user: data.user,
            store: data.store,
            navigator: SessionNavigator::new(),
            revealed: false,
        }
    }

    /// Fetches everything for `api_key` and, only if all of it succeeded,
    /// remembers the key for next time.
    pub async fn login(
        source: &dyn ItemSource,
        glyphs: &dyn GlyphLibrary,
        api_key: &str,
    ) -> Result<Self, KakitoriError> {
        let data = load_items(source, glyphs, api_key).await?;
        Ok(Self::new(api_key.trim(), data))
    }

    pub fn remember_key(&self, storage: &mut dyn KeyValueStore) {
        if let Err(e) = remember_api_key(storage, &self.api_key) {
            tracing::warn!("Could not remember API key: {}", e);
        }
    }

    pub fn user(&self) -> &UserInformation {
        &self.user
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn navigator(&self) -> &SessionNavigator {
        &self.navigator
    }

    pub fn level_summaries(&self) -> Vec<LevelSummary> {
        self.store.level_summaries(self.user.level)
    }

    pub fn items_to_study(&self, selection: &StudySelection) -> usize {
        self.store.count_for(selection)
    }

    pub fn can_start(&self, selection: &StudySelection) -> bool {
        !selection.is_empty()
    }

    pub fn start_studying<R: Rng>(
        &mut self,
        selection: &StudySelection,
        rng: &mut R,
    ) -> StudyProgress {
        let deck = build_deck(&self.store, selection, rng);
        tracing::info!("Starting study session with {} items", deck.len());
        self.navigator.start(deck);
        self.next()
    }

    pub fn next(&mut self) -> StudyProgress {
        self.revealed = false;
        match self.navigator.advance() {
            Step::Presented(_) => StudyProgress::Showing,
            Step::Complete => {
                tracing::info!("Study session complete");
                StudyProgress::Finished
            }
        }
    }

    pub fn back(&mut self) {
        if self.navigator.retreat().is_some() {
            self.revealed = false;
        }
    }

    /// Returns whether anything changed; revealing twice or with nothing shown is ignored.
    pub fn reveal(&mut self) -> bool {
        if self.revealed || self.navigator.current().is_none() {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_studying(&self) -> bool {
        self.navigator.phase() == NavigatorPhase::Active && self.navigator.current().is_some()
    }

    pub fn card(&self) -> Option<CardView> {
        let item = self.navigator.current()?;
        Some(CardView {
            item: item.clone(),
            prompt: item.prompt(),
            answer: self.revealed.then(|| item.reveal_text()),
            remaining: self.navigator.remaining(),
            can_go_back: self.navigator.can_retreat(),
        })
    }

    pub fn save_progress(
        &self,
        storage: &mut dyn KeyValueStore,
    ) -> Result<SavedSession, KakitoriError> {
        SessionPersistence::new(storage).save(&self.api_key, self.navigator.state())
    }

    /// Picks up a saved session for this key, if one exists, and consumes the slot.
    pub fn resume(&mut self, storage: &mut dyn KeyValueStore) -> bool {
        let mut persistence = SessionPersistence::new(storage);
        let Some(state) = persistence.load(&self.api_key) else {
            return false;
        };

        if let Err(e) = persistence.clear(&self.api_key) {
            tracing::warn!("Could not clear saved session: {}", e);
        }

        self.revealed = false;
        self.navigator.resume(state);
        tracing::info!("Resumed study session with {} items left", self.navigator.remaining());
        self.is_studying()
    }

    pub fn discard_progress(&self, storage: &mut dyn KeyValueStore) -> Result<(), KakitoriError> {
        SessionPersistence::new(storage).clear(&self.api_key)
    }
}
