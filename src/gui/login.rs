use eframe::egui;

use super::theme::Theme;

pub struct LoginForm {
    api_key: String,
}

impl LoginForm {
    pub fn new(remembered_key: Option<String>) -> Self {
        Self { api_key: remembered_key.unwrap_or_default() }
    }

    /// Returns the key to log in with once the user submits.
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<String> {
        let mut submitted = false;

        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(theme.heading(ui.ctx(), "Log in with your WaniKani API key").size(20.0));
            ui.add_space(10.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.api_key)
                    .hint_text("API key")
                    .desired_width(320.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }

            ui.add_space(6.0);
            ui.small(
                egui::RichText::new("The key is listed under Settings → Account on WaniKani.")
                    .color(theme.comment(ui.ctx())),
            );
            ui.add_space(10.0);

            if ui.button("Log in").clicked() {
                submitted = true;
            }
        });

        submitted.then(|| self.api_key.trim().to_string())
    }
}
