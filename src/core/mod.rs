pub mod errors;
pub mod http;
pub mod models;
pub mod settings;
pub mod tasks;

pub use errors::KakitoriError;
pub use models::{
    ItemIdentity,
    ItemKind,
    LevelSummary,
    Reading,
    ReadingKind,
    StudyItem,
    StudySelection,
};
pub use settings::Settings;
