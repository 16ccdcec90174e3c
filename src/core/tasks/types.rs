use crate::study::UserSession;

/// A finished login, with whether a saved session was picked up.
#[derive(Debug)]
pub struct LoginOutcome {
    pub session: UserSession,
    pub resumed: bool,
}

#[derive(Debug)]
pub enum TaskResult {
    LoadingMessage(String),
    LoggedIn(Result<LoginOutcome, String>),
    ProgressSaved(Result<(), String>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::LoadingMessage(_) => "loading_message",
            TaskResult::LoggedIn(_) => "login",
            TaskResult::ProgressSaved(_) => "save_progress",
        }
    }
}
