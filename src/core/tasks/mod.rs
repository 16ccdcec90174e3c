mod manager;
mod types;

pub use manager::{
    SharedStore,
    TaskManager,
};
pub use types::{
    LoginOutcome,
    TaskResult,
};
