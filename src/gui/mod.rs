pub mod app;
mod canvas;
mod error_modal;
mod level_selector;
mod login;
mod message_overlay;
mod study_view;
pub mod theme;
mod top_bar;

pub use app::{
    AppServices,
    KakitoriApp,
};
