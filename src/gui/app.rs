use std::{
    fs,
    path::Path,
    sync::{
        Arc,
        Mutex,
    },
};

use eframe::egui;

use super::{
    canvas::PracticeCanvas,
    error_modal::ErrorModal,
    level_selector::LevelSelector,
    login::LoginForm,
    message_overlay::MessageOverlay,
    study_view::{
        shortcut_action,
        study_view,
        StudyAction,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    audio::{
        AudioIndex,
        AudioLookup,
    },
    core::{
        tasks::{
            SharedStore,
            TaskManager,
            TaskResult,
        },
        KakitoriError,
        Settings,
        StudySelection,
    },
    glyph::{
        GlyphLibrary,
        StrokeDictionary,
    },
    persistence::{
        remembered_api_key,
        JsonFileStore,
    },
    study::{
        StudyProgress,
        UserSession,
    },
    wanikani::{
        ItemSource,
        WaniKaniClient,
    },
};

/// The collaborators a login needs, shared with the task thread.
#[derive(Clone)]
pub struct AppServices {
    pub source: Arc<dyn ItemSource>,
    pub glyphs: Arc<dyn GlyphLibrary>,
    pub audio: Arc<dyn AudioLookup>,
    pub storage: SharedStore,
}

impl AppServices {
    pub fn from_settings(settings: &Settings) -> Result<Self, KakitoriError> {
        let glyphs = StrokeDictionary::load(&settings.glyph_file).inspect_err(|e| {
            tracing::error!("Stroke data missing at {}: {}", settings.glyph_file.display(), e);
        })?;

        Ok(Self {
            source: Arc::new(WaniKaniClient::from_settings(settings)?),
            glyphs: Arc::new(glyphs),
            audio: Arc::new(AudioIndex::load_or_empty(&settings.audio_file)),
            storage: Arc::new(Mutex::new(JsonFileStore::open(&settings.storage_file)?)),
        })
    }

    fn remembered_key(&self) -> Option<String> {
        let storage = self.storage.lock().ok()?;
        remembered_api_key(&*storage)
    }
}

enum View {
    Login(LoginForm),
    Selecting { selector: LevelSelector, finished: bool },
    Studying,
}

enum AppAction {
    Login(String),
    Start(StudySelection),
    Study(StudyAction),
}

pub struct KakitoriApp {
    settings: Settings,
    services: AppServices,
    task_manager: TaskManager,

    session: Option<UserSession>,
    last_selection: StudySelection,
    view: View,
    canvas: PracticeCanvas,

    theme: Theme,
    message_overlay: MessageOverlay,
    error_modal: ErrorModal,
}

impl KakitoriApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        services: AppServices,
        task_manager: TaskManager,
    ) -> Self {
        let theme = Theme::dracula();
        setup_fonts(&cc.egui_ctx, settings.font_file.as_deref());
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = if settings.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });

        let view = View::Login(LoginForm::new(services.remembered_key()));

        Self {
            settings,
            services,
            task_manager,
            session: None,
            last_selection: StudySelection::default(),
            view,
            canvas: PracticeCanvas::default(),
            theme,
            message_overlay: MessageOverlay::default(),
            error_modal: ErrorModal::default(),
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::LoadingMessage(message) => self.message_overlay.set_message(message),

            TaskResult::LoggedIn(Ok(outcome)) => {
                self.message_overlay.clear_message();
                self.canvas.clear();
                self.view = if outcome.resumed {
                    View::Studying
                } else {
                    let selector = LevelSelector::up_to_level(outcome.session.user().level);
                    View::Selecting { selector, finished: false }
                };
                self.session = Some(outcome.session);
            }
            TaskResult::LoggedIn(Err(message)) => {
                self.message_overlay.clear_message();
                self.error_modal.show_error("Login failed", message);
            }

            TaskResult::ProgressSaved(Ok(())) => {
                self.message_overlay.clear_message();
                self.logout();
            }
            TaskResult::ProgressSaved(Err(message)) => {
                self.message_overlay.clear_message();
                self.error_modal.show_error("Could not save progress", message);
            }
        }
    }

    fn apply(&mut self, action: AppAction, ctx: &egui::Context) {
        match action {
            AppAction::Login(api_key) => {
                self.message_overlay.set_message("Logging in...");
                let services = self.services.clone();
                self.task_manager.login(api_key, services.source, services.glyphs, services.storage);
            }
            AppAction::Start(selection) => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                self.canvas.clear();
                let progress = session.start_studying(&selection, &mut rand::rng());
                self.last_selection = selection;
                match progress {
                    StudyProgress::Showing => self.view = View::Studying,
                    StudyProgress::Finished => self.finish(),
                }
            }
            AppAction::Study(action) => self.apply_study(action, ctx),
        }
    }

    fn apply_study(&mut self, action: StudyAction, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match action {
            StudyAction::Next => {
                self.canvas.clear();
                if session.next() == StudyProgress::Finished {
                    self.finish();
                }
            }
            StudyAction::Back => {
                self.canvas.clear();
                session.back();
            }
            StudyAction::Reveal => {
                session.reveal();
            }
            StudyAction::Clear => self.canvas.clear(),
            StudyAction::PlayAudio(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
        }
    }

    /// Back to the selector with the last choice still ticked.
    fn finish(&mut self) {
        let selector = LevelSelector::from(&self.last_selection);
        self.view = View::Selecting { selector, finished: true };
    }

    fn apply_top_bar(&mut self, action: TopBarAction) {
        match action {
            TopBarAction::Logout => {
                self.discard_progress();
                self.logout();
            }
            TopBarAction::SaveAndLogout => {
                let Some(session) = &self.session else {
                    return;
                };
                self.message_overlay.set_message("Saving progress...");
                self.task_manager.save_progress(
                    session.api_key().to_string(),
                    session.navigator().state().clone(),
                    self.services.storage.clone(),
                );
            }
            TopBarAction::ThemeChanged { dark } => {
                self.settings.dark_mode = dark;
                if let Err(e) = self.settings.save() {
                    tracing::warn!("Failed to save settings: {}", e);
                }
            }
        }
    }

    /// Leaving without saving drops any checkpoint left for this key.
    fn discard_progress(&self) {
        let Some(session) = &self.session else {
            return;
        };

        let result = match self.services.storage.lock() {
            Ok(mut storage) => session.discard_progress(&mut *storage),
            Err(e) => Err(KakitoriError::Custom(format!("Storage lock poisoned: {e}"))),
        };
        if let Err(e) = result {
            tracing::warn!("Could not discard saved session: {}", e);
        }
    }

    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!("{} logged out", session.user().username);
        }
        self.canvas.clear();
        self.view = View::Login(LoginForm::new(self.services.remembered_key()));
    }

    fn busy(&self) -> bool {
        self.message_overlay.is_active() || self.error_modal.is_open()
    }
}

impl eframe::App for KakitoriApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        let username = self.session.as_ref().map(|s| s.user().username.clone());
        let can_save = self.session.as_ref().is_some_and(|s| s.is_studying());
        if let Some(action) = TopBar::show(ctx, &self.theme, username.as_deref(), can_save) {
            if !self.busy() {
                self.apply_top_bar(action);
            }
        }

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| match &mut self.view {
            View::Login(form) => action = form.show(ui, &self.theme).map(AppAction::Login),
            View::Selecting { selector, finished } => {
                if let Some(session) = &self.session {
                    if selector.show(ui, &self.theme, session, *finished) {
                        action = Some(AppAction::Start(selector.selection()));
                    }
                }
            }
            View::Studying => {
                let Some(card) = self.session.as_ref().and_then(|s| s.card()) else {
                    return;
                };
                let audio = self.services.audio.audio_for_item(&card.item);
                action = study_view(
                    ui,
                    &self.theme,
                    &card,
                    &mut self.canvas,
                    self.services.glyphs.as_ref(),
                    audio,
                )
                .map(AppAction::Study);
            }
        });

        if action.is_none() && matches!(self.view, View::Studying) && !self.busy() {
            let typing = ctx.memory(|m| m.focused().is_some());
            if !typing {
                action = ctx.input(shortcut_action).map(AppAction::Study);
            }
        }

        if let Some(action) = action {
            if !self.busy() {
                self.apply(action, ctx);
            }
        }

        self.message_overlay.show(ctx, &self.theme);
        self.error_modal.show(ctx, &self.theme);
    }
}

/// egui ships without kanji coverage, so a CJK font file is loaded when configured.
fn setup_fonts(ctx: &egui::Context, font_file: Option<&Path>) {
    let Some(path) = font_file else {
        tracing::warn!("No font_file configured; Japanese text may not render");
        return;
    };

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read font {}: {}", path.display(), e);
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("japanese".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("japanese".to_owned());
    }
    ctx.set_fonts(fonts);
}
