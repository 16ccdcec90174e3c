use std::collections::BTreeMap;

use rayon::iter::{
    IntoParallelIterator,
    ParallelIterator,
};

use crate::{
    core::{
        ItemKind,
        LevelSummary,
        StudyItem,
        StudySelection,
    },
    glyph::GlyphLibrary,
    wanikani::types::RawItem,
};

/// Count of pooled items per (level, kind). Only ever rebuilt wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionTable {
    counts: BTreeMap<(u32, ItemKind), usize>,
}

impl DistributionTable {
    pub fn from_items(items: &[StudyItem]) -> Self {
        let mut counts = BTreeMap::new();
        for item in items {
            *counts.entry((item.level, item.kind)).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, level: u32, kind: ItemKind) -> usize {
        self.counts.get(&(level, kind)).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// The pool of studied, renderable items for one logged-in user.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<StudyItem>,
    distribution: DistributionTable,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the records that have a character, have been studied and can be drawn,
    /// tags them with `kind` and appends them. Records are not deduplicated across
    /// calls, so the same raw set must only be ingested once.
    pub fn ingest(&mut self, raw_items: Vec<RawItem>, kind: ItemKind, glyphs: &dyn GlyphLibrary) {
        let total = raw_items.len();

        let accepted: Vec<StudyItem> = raw_items
            .into_par_iter()
            .filter(|raw| raw.is_studied())
            .filter(|raw| raw.character().is_some_and(|c| glyphs.is_renderable(c)))
            .filter_map(|raw| raw.to_study_item(kind))
            .collect();

        tracing::debug!(
            "Ingested {}/{} {} records ({} discarded)",
            accepted.len(),
            total,
            kind,
            total - accepted.len()
        );

        self.items.extend(accepted);
    }

    pub fn rebuild_distribution(&mut self) {
        self.distribution = DistributionTable::from_items(&self.items);
    }

    pub fn distribution(&self, level: u32, kind: ItemKind) -> usize {
        self.distribution.get(level, kind)
    }

    pub fn distribution_table(&self) -> &DistributionTable {
        &self.distribution
    }

    /// How many items a deck built from `selection` will hold.
    pub fn count_for(&self, selection: &StudySelection) -> usize {
        if selection.is_empty() {
            return 0;
        }

        selection
            .levels
            .iter()
            .flat_map(|level| selection.kinds.iter().map(move |kind| (*level, *kind)))
            .map(|(level, kind)| self.distribution(level, kind))
            .sum()
    }

    pub fn level_summaries(&self, max_level: u32) -> Vec<LevelSummary> {
        (1..=max_level)
            .map(|level| LevelSummary {
                level,
                radicals: self.distribution(level, ItemKind::Radical),
                kanji: self.distribution(level, ItemKind::Kanji),
                vocabulary: self.distribution(level, ItemKind::Vocabulary),
            })
            .collect()
    }

    pub fn items(&self) -> &[StudyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::glyph::StrokeDictionary;

    pub fn glyphs(chars: &str) -> StrokeDictionary {
        StrokeDictionary::from_entries(chars.chars().map(|c| (c, vec!["M0,0 L1,1".to_string()])))
    }

    pub fn raw(character: &str, level: u32, studied: bool) -> RawItem {
        RawItem {
            character: Some(character.to_string()),
            meaning: Some(format!("meaning of {character}")),
            level: Some(level),
            stats: if studied { Some(serde_json::json!({ "srs": "guru" })) } else { None },
            ..Default::default()
        }
    }

    #[test]
    fn test_ingest_excludes_unstudied_and_unrenderable() {
        let glyphs = glyphs("一二三人");

        for kind in ItemKind::ALL {
            let mut store = ItemStore::new();
            store.ingest(
                vec![
                    raw("一", 1, true),
                    raw("二", 1, false),
                    raw("三人", 2, true),
                    raw("四", 2, true),
                    raw("", 1, true),
                    RawItem { character: None, ..raw("x", 1, true) },
                ],
                kind,
                &glyphs,
            );

            let characters: Vec<&str> = store.items().iter().map(|i| i.character.as_str()).collect();
            assert_eq!(characters, vec!["一", "三人"]);
            assert!(store.items().iter().all(|i| i.kind == kind));
        }
    }

    #[test]
    fn test_reingest_duplicates_entries() {
        let glyphs = glyphs("一");
        let mut store = ItemStore::new();
        store.ingest(vec![raw("一", 1, true)], ItemKind::Kanji, &glyphs);
        store.ingest(vec![raw("一", 1, true)], ItemKind::Kanji, &glyphs);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_distribution_matches_pool() {
        let glyphs = glyphs("一二三人大");
        let mut store = ItemStore::new();
        store.ingest(vec![raw("一", 1, true), raw("二", 1, true)], ItemKind::Kanji, &glyphs);
        store.ingest(vec![raw("大", 2, true), raw("人", 1, true)], ItemKind::Radical, &glyphs);
        store.ingest(vec![raw("一二", 2, true), raw("三", 3, false)], ItemKind::Vocabulary, &glyphs);
        store.rebuild_distribution();

        assert_eq!(store.distribution(1, ItemKind::Kanji), 2);
        assert_eq!(store.distribution(2, ItemKind::Radical), 1);
        assert_eq!(store.distribution(2, ItemKind::Vocabulary), 1);
        assert_eq!(store.distribution(3, ItemKind::Vocabulary), 0);
        assert_eq!(store.distribution(60, ItemKind::Kanji), 0);
        assert_eq!(store.distribution_table().total(), store.len());

        let summaries = store.level_summaries(3);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0], LevelSummary { level: 1, radicals: 1, kanji: 2, vocabulary: 0 });
        assert_eq!(summaries[2], LevelSummary { level: 3, radicals: 0, kanji: 0, vocabulary: 0 });
    }

    #[test]
    fn test_count_for_selection() {
        let glyphs = glyphs("一二大");
        let mut store = ItemStore::new();
        store.ingest(vec![raw("一", 1, true), raw("二", 2, true)], ItemKind::Kanji, &glyphs);
        store.ingest(vec![raw("大", 1, true)], ItemKind::Radical, &glyphs);
        store.rebuild_distribution();

        let both = StudySelection::new([1, 2], [ItemKind::Kanji, ItemKind::Radical]);
        assert_eq!(store.count_for(&both), 3);
        assert_eq!(store.count_for(&StudySelection::new([1], [ItemKind::Kanji])), 1);
        assert_eq!(store.count_for(&StudySelection::new([], [ItemKind::Kanji])), 0);
        assert_eq!(store.count_for(&StudySelection::new([1, 2], [])), 0);
    }
}
