use std::collections::BTreeSet;

use eframe::egui;

use super::theme::Theme;
use crate::{
    core::{
        ItemKind,
        StudySelection,
    },
    study::UserSession,
};

const FINISHED_MESSAGE: &str = "Congratulations! You finished all your words!";

/// Which levels and kinds the next deck is built from. Kinds start all ticked.
#[derive(Debug, Clone)]
pub struct LevelSelector {
    levels: BTreeSet<u32>,
    kinds: BTreeSet<ItemKind>,
}

impl Default for LevelSelector {
    fn default() -> Self {
        Self { levels: BTreeSet::new(), kinds: ItemKind::ALL.into_iter().collect() }
    }
}

impl From<&StudySelection> for LevelSelector {
    fn from(selection: &StudySelection) -> Self {
        Self { levels: selection.levels.clone(), kinds: selection.kinds.clone() }
    }
}

impl LevelSelector {
    /// Every level the user has reached ticked, as on a fresh login.
    pub fn up_to_level(max_level: u32) -> Self {
        Self { levels: (1..=max_level).collect(), ..Self::default() }
    }

    pub fn selection(&self) -> StudySelection {
        StudySelection::new(self.levels.iter().copied(), self.kinds.iter().copied())
    }

    pub fn set_level(&mut self, level: u32, checked: bool) {
        if checked {
            self.levels.insert(level);
        } else {
            self.levels.remove(&level);
        }
    }

    pub fn set_kind(&mut self, kind: ItemKind, checked: bool) {
        if checked {
            self.kinds.insert(kind);
        } else {
            self.kinds.remove(&kind);
        }
    }

    /// Returns true when the start button was pressed.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        session: &UserSession,
        finished: bool,
    ) -> bool {
        let ctx = ui.ctx().clone();

        if finished {
            ui.label(egui::RichText::new(FINISHED_MESSAGE).size(18.0).color(theme.green(&ctx)));
            ui.add_space(8.0);
        }

        ui.label(theme.heading(&ctx, "Item types"));
        ui.horizontal(|ui| {
            for kind in ItemKind::ALL {
                let mut checked = self.kinds.contains(&kind);
                if ui.checkbox(&mut checked, kind.to_string()).changed() {
                    self.set_kind(kind, checked);
                }
            }
        });

        ui.add_space(8.0);
        let summaries = session.level_summaries();
        ui.horizontal(|ui| {
            ui.label(theme.heading(&ctx, "Levels"));
            if ui.small_button("All").clicked() {
                self.levels = summaries.iter().map(|s| s.level).collect();
            }
            if ui.small_button("None").clicked() {
                self.levels.clear();
            }
        });

        egui::ScrollArea::vertical().max_height(ui.available_height() - 80.0).show(ui, |ui| {
            for summary in &summaries {
                let mut checked = self.levels.contains(&summary.level);
                if ui.checkbox(&mut checked, summary.label()).changed() {
                    self.set_level(summary.level, checked);
                }
            }
        });

        ui.add_space(8.0);
        let selection = self.selection();
        ui.label(format!("Items to study: {}", session.items_to_study(&selection)));

        session.can_start(&selection) && ui.button("Start studying").clicked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_every_kind_and_no_level() {
        let selector = LevelSelector::default();
        let selection = selector.selection();
        assert!(selection.is_empty());
        assert_eq!(selection.kinds.len(), 3);
    }

    #[test]
    fn test_fresh_login_ticks_every_reached_level() {
        let selection = LevelSelector::up_to_level(3).selection();
        assert_eq!(selection.levels.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(selection.kinds.len(), 3);

        assert!(LevelSelector::up_to_level(0).selection().is_empty());
    }

    #[test]
    fn test_toggling_updates_selection() {
        let mut selector = LevelSelector::default();
        selector.set_level(2, true);
        selector.set_level(5, true);
        selector.set_level(2, false);
        selector.set_kind(ItemKind::Radical, false);

        let selection = selector.selection();
        assert_eq!(selection, StudySelection::new([5], [ItemKind::Kanji, ItemKind::Vocabulary]));
        assert_eq!(LevelSelector::from(&selection).selection(), selection);
    }
}
