//! Deck building and the study loop.
//!
//! - `store`: the pool of learned items and its per-level distribution
//! - `builder`: filtering and shuffling a deck for a selection
//! - `navigator`: next/back through a deck, with resumable state
//! - `session`: the logged-in user's session tying the above together

pub mod builder;
pub mod navigator;
pub mod session;
pub mod store;

pub use builder::build_deck;
pub use navigator::{
    NavigatorPhase,
    SessionNavigator,
    SessionState,
    Step,
};
pub use session::{
    CardView,
    StudyProgress,
    UserSession,
};
pub use store::{
    DistributionTable,
    ItemStore,
};
