//! Kakitori: writing practice for the kanji, radicals and vocabulary a
//! WaniKani user has already learned.

pub mod audio;
pub mod core;
pub mod glyph;
pub mod gui;
pub mod persistence;
pub mod study;
pub mod wanikani;
