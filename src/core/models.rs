use std::{
    collections::BTreeSet,
    fmt,
};

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Radical,
    Kanji,
    Vocabulary,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Vocabulary, ItemKind::Kanji, ItemKind::Radical];

    /// Path segment of the user API resource holding items of this kind.
    pub fn resource(&self) -> &'static str {
        match self {
            ItemKind::Radical => "radicals",
            ItemKind::Kanji => "kanji",
            ItemKind::Vocabulary => "vocabulary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Radical => "radical",
            ItemKind::Kanji => "kanji",
            ItemKind::Vocabulary => "vocabulary",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    Onyomi,
    Kunyomi,
    Nanori,
}

impl ReadingKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReadingKind::Onyomi => "Onyomi",
            ReadingKind::Kunyomi => "Kunyomi",
            ReadingKind::Nanori => "Nanori",
        }
    }
}

/// What gets shown next to the character once an item is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Reading {
    None,
    Kana { kana: String },
    Kanji { kind: ReadingKind, value: String },
}

impl Default for Reading {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIdentity {
    pub character: String,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyItem {
    pub character: String,
    pub kind: ItemKind,
    pub level: u32,
    pub meaning: String,
    #[serde(default)]
    pub reading: Reading,
}

impl StudyItem {
    pub fn identity(&self) -> ItemIdentity {
        ItemIdentity { character: self.character.clone(), kind: self.kind }
    }

    /// The prompt shown before the answer is revealed.
    pub fn prompt(&self) -> String {
        format!("{}: {}", self.kind, self.meaning)
    }

    pub fn reveal_text(&self) -> String {
        match (&self.kind, &self.reading) {
            (ItemKind::Vocabulary, Reading::Kana { kana }) => format!(
                "Character(s): {} Kana: {} Level: {}",
                self.character, kana, self.level
            ),
            (ItemKind::Vocabulary, _) => {
                format!("Character(s): {} Level: {}", self.character, self.level)
            }
            (ItemKind::Kanji, Reading::Kanji { kind, value }) => format!(
                "Character: {} {}: {} Level: {}",
                self.character,
                kind.title(),
                value,
                self.level
            ),
            _ => format!("Character: {} Level: {}", self.character, self.level),
        }
    }
}

/// The user's choice of what to study; an empty set on either side selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudySelection {
    pub levels: BTreeSet<u32>,
    pub kinds: BTreeSet<ItemKind>,
}

impl StudySelection {
    pub fn new(
        levels: impl IntoIterator<Item = u32>,
        kinds: impl IntoIterator<Item = ItemKind>,
    ) -> Self {
        Self { levels: levels.into_iter().collect(), kinds: kinds.into_iter().collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty() || self.kinds.is_empty()
    }

    pub fn matches(&self, item: &StudyItem) -> bool {
        self.levels.contains(&item.level) && self.kinds.contains(&item.kind)
    }
}

/// Per-level counts backing one row of the level selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: u32,
    pub radicals: usize,
    pub kanji: usize,
    pub vocabulary: usize,
}

impl LevelSummary {
    pub fn label(&self) -> String {
        format!(
            "Level {} (radicals: {} kanji: {} vocab: {})",
            self.level, self.radicals, self.kanji, self.vocabulary
        )
    }
}
