use eframe::egui::{
    self,
    containers,
};

use super::theme::Theme;

pub enum TopBarAction {
    Logout,
    SaveAndLogout,
    ThemeChanged { dark: bool },
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        username: Option<&str>,
        can_save: bool,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                let before = ctx.options(|o| o.theme_preference);
                egui::widgets::global_theme_preference_switch(ui);
                let after = ctx.options(|o| o.theme_preference);
                if before != after {
                    action = Some(TopBarAction::ThemeChanged {
                        dark: after == egui::ThemePreference::Dark,
                    });
                }

                let Some(username) = username else {
                    return;
                };

                ui.label(egui::RichText::new(format!("Welcome {username}")).color(theme.green(ctx)));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Logout").clicked() {
                        action = Some(TopBarAction::Logout);
                    }
                    if can_save && ui.button("Save & Logout").clicked() {
                        action = Some(TopBarAction::SaveAndLogout);
                    }
                });
            });
        });

        action
    }
}
