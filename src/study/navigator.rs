//! Forward/backward walk through a deck.
//!
//! The deck is consumed from its tail. Every presented item is also pushed onto
//! `history`, so right after an advance the last history entry duplicates
//! `current`. Going back therefore unwinds two history entries: the displayed
//! item and the one before it are returned to the deck (displayed item first)
//! and the preceding item is drawn again.

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::StudyItem;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub deck: Vec<StudyItem>,
    pub current: Option<StudyItem>,
    pub history: Vec<StudyItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorPhase {
    /// No deck has been started.
    Empty,
    Active,
    /// The deck ran out; only `start` leaves this phase.
    Exhausted,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Step<'a> {
    Presented(&'a StudyItem),
    Complete,
}

#[derive(Debug, Clone)]
pub struct SessionNavigator {
    state: SessionState,
    phase: NavigatorPhase,
}

impl Default for SessionNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionNavigator {
    pub fn new() -> Self {
        Self { state: SessionState::default(), phase: NavigatorPhase::Empty }
    }

    pub fn start(&mut self, deck: Vec<StudyItem>) {
        self.phase =
            if deck.is_empty() { NavigatorPhase::Exhausted } else { NavigatorPhase::Active };
        self.state = SessionState { deck, current: None, history: Vec::new() };
    }

    /// Restores a persisted state as-is.
    pub fn resume(&mut self, state: SessionState) {
        let needs_draw = state.current.is_none() && !state.deck.is_empty();
        self.phase = if state.current.is_some() || needs_draw {
            NavigatorPhase::Active
        } else {
            NavigatorPhase::Exhausted
        };
        self.state = state;

        if needs_draw {
            self.advance();
        }
    }

    pub fn advance(&mut self) -> Step<'_> {
        if self.phase != NavigatorPhase::Active {
            return Step::Complete;
        }

        match self.state.deck.pop() {
            Some(item) => {
                self.state.history.push(item.clone());
                Step::Presented(self.state.current.insert(item))
            }
            None => {
                self.phase = NavigatorPhase::Exhausted;
                self.state = SessionState::default();
                Step::Complete
            }
        }
    }

    /// Re-presents the previously shown item; silently ignored when there is none.
    pub fn retreat(&mut self) -> Option<&StudyItem> {
        if !self.can_retreat() {
            return None;
        }

        if let (Some(shown), Some(previous)) = (self.state.history.pop(), self.state.history.pop())
        {
            self.state.deck.push(shown);
            self.state.deck.push(previous);
        }

        match self.advance() {
            Step::Presented(item) => Some(item),
            Step::Complete => None,
        }
    }

    pub fn can_retreat(&self) -> bool {
        self.phase == NavigatorPhase::Active && self.state.history.len() > 1
    }

    pub fn current(&self) -> Option<&StudyItem> {
        self.state.current.as_ref()
    }

    pub fn remaining(&self) -> usize {
        self.state.deck.len()
    }

    pub fn phase(&self) -> NavigatorPhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        ItemKind,
        Reading,
    };

    fn item(character: &str) -> StudyItem {
        StudyItem {
            character: character.to_string(),
            kind: ItemKind::Kanji,
            level: 1,
            meaning: character.to_lowercase(),
            reading: Reading::None,
        }
    }

    fn current_char(nav: &SessionNavigator) -> Option<&str> {
        nav.current().map(|i| i.character.as_str())
    }

    #[test]
    fn test_advance_consumes_from_tail() {
        let mut nav = SessionNavigator::new();
        assert_eq!(nav.phase(), NavigatorPhase::Empty);

        nav.start(vec![item("A"), item("B"), item("C")]);
        assert_eq!(nav.phase(), NavigatorPhase::Active);
        assert_eq!(nav.current(), None);

        let mut seen = Vec::new();
        for _ in 0..3 {
            match nav.advance() {
                Step::Presented(item) => seen.push(item.character.clone()),
                Step::Complete => panic!("deck ran out early"),
            }
        }
        assert_eq!(seen, vec!["C", "B", "A"]);
        assert_eq!(nav.phase(), NavigatorPhase::Active);
        assert_eq!(nav.remaining(), 0);

        assert_eq!(nav.advance(), Step::Complete);
        assert_eq!(nav.phase(), NavigatorPhase::Exhausted);
        assert_eq!(nav.state(), &SessionState::default());
    }

    #[test]
    fn test_retreat_returns_to_previous_item() {
        let mut nav = SessionNavigator::new();
        nav.start(vec![item("A"), item("B"), item("C")]);
        nav.advance();
        nav.advance();
        assert_eq!(current_char(&nav), Some("B"));

        let back = nav.retreat().map(|i| i.character.clone());
        assert_eq!(back.as_deref(), Some("C"));
        assert_eq!(current_char(&nav), Some("C"));
        assert_eq!(nav.state().history.len(), 1);
        assert_eq!(nav.state().history.last().map(|i| i.character.as_str()), Some("C"));

        // B went back onto the deck and comes up next.
        nav.advance();
        assert_eq!(current_char(&nav), Some("B"));
        nav.advance();
        assert_eq!(current_char(&nav), Some("A"));
    }

    #[test]
    fn test_history_duplicates_current_item() {
        let mut nav = SessionNavigator::new();
        nav.start(vec![item("A"), item("B")]);
        nav.advance();
        assert_eq!(nav.state().history.last(), nav.current());
        nav.advance();
        assert_eq!(nav.state().history.last(), nav.current());
        assert_eq!(nav.state().history.len(), 2);
    }

    #[test]
    fn test_presented_item_is_the_new_current() {
        let mut nav = SessionNavigator::new();
        nav.start(vec![item("A"), item("B")]);

        let presented = match nav.advance() {
            Step::Presented(item) => item.clone(),
            Step::Complete => panic!("a non-empty deck must present an item"),
        };
        assert_eq!(nav.current(), Some(&presented));
        assert_eq!(nav.state().history, vec![presented]);
    }

    #[test]
    fn test_retreat_without_history_is_noop() {
        let mut nav = SessionNavigator::new();
        assert!(nav.retreat().is_none());

        nav.start(vec![item("A"), item("B")]);
        nav.advance();
        assert!(!nav.can_retreat());
        assert!(nav.retreat().is_none());
        assert_eq!(current_char(&nav), Some("B"));
        assert_eq!(nav.remaining(), 1);
    }

    #[test]
    fn test_exhausted_is_terminal_until_start() {
        let mut nav = SessionNavigator::new();
        nav.start(Vec::new());
        assert_eq!(nav.phase(), NavigatorPhase::Exhausted);
        assert_eq!(nav.advance(), Step::Complete);
        assert!(nav.retreat().is_none());

        nav.start(vec![item("A")]);
        assert_eq!(nav.phase(), NavigatorPhase::Active);
        assert!(matches!(nav.advance(), Step::Presented(_)));
    }

    #[test]
    fn test_start_clears_history() {
        let mut nav = SessionNavigator::new();
        nav.start(vec![item("A"), item("B"), item("C")]);
        nav.advance();
        nav.advance();

        nav.start(vec![item("D")]);
        assert!(nav.state().history.is_empty());
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn test_resume_restores_state() {
        let state = SessionState {
            deck: vec![item("A")],
            current: Some(item("B")),
            history: vec![item("C"), item("B")],
        };

        let mut nav = SessionNavigator::new();
        nav.resume(state.clone());
        assert_eq!(nav.phase(), NavigatorPhase::Active);
        assert_eq!(nav.state(), &state);
        assert!(nav.can_retreat());
    }

    #[test]
    fn test_resume_without_current_draws_next() {
        let mut nav = SessionNavigator::new();
        nav.resume(SessionState { deck: vec![item("A")], current: None, history: Vec::new() });
        assert_eq!(current_char(&nav), Some("A"));

        nav.resume(SessionState::default());
        assert_eq!(nav.phase(), NavigatorPhase::Exhausted);
    }
}
