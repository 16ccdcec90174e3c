use eframe::egui::{
    self,
    Event,
    InputState,
    Key,
    Modifiers,
};

use super::{
    canvas::{
        PracticeCanvas,
        PAPER_WIDTH,
    },
    theme::Theme,
};
use crate::{
    glyph::{
        layout,
        GlyphLibrary,
    },
    study::CardView,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyAction {
    Next,
    Back,
    Reveal,
    Clear,
    PlayAudio(String),
}

/// N, B, R and C mirror the buttons.
pub fn action_for_key(key: Key, modifiers: Modifiers) -> Option<StudyAction> {
    if modifiers.any() {
        return None;
    }

    match key {
        Key::N => Some(StudyAction::Next),
        Key::B => Some(StudyAction::Back),
        Key::R => Some(StudyAction::Reveal),
        Key::C => Some(StudyAction::Clear),
        _ => None,
    }
}

pub fn shortcut_action(input: &InputState) -> Option<StudyAction> {
    input.events.iter().find_map(|event| match event {
        Event::Key { key, pressed: true, modifiers, .. } => action_for_key(*key, *modifiers),
        _ => None,
    })
}

pub fn study_view(
    ui: &mut egui::Ui,
    theme: &Theme,
    card: &CardView,
    canvas: &mut PracticeCanvas,
    glyphs: &dyn GlyphLibrary,
    audio: Option<&str>,
) -> Option<StudyAction> {
    let ctx = ui.ctx().clone();
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(theme.heading(&ctx, &card.prompt).size(22.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("Remaining: {}", card.remaining))
                    .color(theme.comment(&ctx)),
            );
        });
    });

    ui.add_space(6.0);
    match &card.answer {
        Some(answer) => {
            ui.label(egui::RichText::new(answer).size(16.0).color(theme.orange(&ctx)));
        }
        None => {
            let hint = egui::RichText::new("Write it, then reveal to check.");
            ui.label(hint.color(theme.comment(&ctx)));
        }
    }
    ui.add_space(6.0);

    let reference = match card.answer {
        Some(_) => layout(&card.item.character, glyphs, PAPER_WIDTH),
        None => Vec::new(),
    };
    canvas.show(ui, theme, &reference);

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let back = ui.add_enabled(card.can_go_back, egui::Button::new("Back"));
        if back.on_hover_text("B").clicked() {
            action = Some(StudyAction::Back);
        }
        let reveal = ui.add_enabled(card.answer.is_none(), egui::Button::new("Reveal"));
        if reveal.on_hover_text("R").clicked() {
            action = Some(StudyAction::Reveal);
        }
        if ui.button("Clear").on_hover_text("C").clicked() {
            action = Some(StudyAction::Clear);
        }
        let audio_button = ui.add_enabled(audio.is_some(), egui::Button::new("🔊 Audio"));
        if let (true, Some(url)) = (audio_button.clicked(), audio) {
            action = Some(StudyAction::PlayAudio(url.to_string()));
        }
        if ui.button("Next").on_hover_text("N").clicked() {
            action = Some(StudyAction::Next);
        }
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_shortcuts() {
        let none = Modifiers::NONE;
        assert_eq!(action_for_key(Key::N, none), Some(StudyAction::Next));
        assert_eq!(action_for_key(Key::B, none), Some(StudyAction::Back));
        assert_eq!(action_for_key(Key::R, none), Some(StudyAction::Reveal));
        assert_eq!(action_for_key(Key::C, none), Some(StudyAction::Clear));
        assert_eq!(action_for_key(Key::X, none), None);
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        assert_eq!(action_for_key(Key::C, Modifiers::COMMAND), None);
        assert_eq!(action_for_key(Key::N, Modifiers::SHIFT), None);
    }
}
