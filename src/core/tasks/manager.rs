use std::{
    sync::{
        mpsc,
        Arc,
        Mutex,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::{
    LoginOutcome,
    TaskResult,
};
use crate::{
    core::KakitoriError,
    glyph::GlyphLibrary,
    persistence::{
        KeyValueStore,
        SessionPersistence,
    },
    study::{
        SessionState,
        UserSession,
    },
    wanikani::ItemSource,
};

pub type SharedStore = Arc<Mutex<dyn KeyValueStore>>;

/// Runs network and storage work off the UI thread; results are picked up with
/// [`TaskManager::poll_results`] once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Result<Self, KakitoriError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Logs in, remembers the key and resumes any saved session for it.
    pub fn login(
        &self,
        api_key: String,
        source: Arc<dyn ItemSource>,
        glyphs: Arc<dyn GlyphLibrary>,
        storage: SharedStore,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let _ = sender.send(TaskResult::LoadingMessage("Getting items from server...".into()));

            let result = runtime
                .block_on(UserSession::login(source.as_ref(), glyphs.as_ref(), &api_key))
                .map_err(|e| e.to_string())
                .and_then(|mut session| {
                    let mut storage = storage.lock().map_err(|e| e.to_string())?;
                    session.remember_key(&mut *storage);
                    let resumed = session.resume(&mut *storage);
                    Ok(LoginOutcome { session, resumed })
                });

            if let Err(e) = &result {
                tracing::warn!("Login failed: {}", e);
            }
            let _ = sender.send(TaskResult::LoggedIn(result));
        });
    }

    /// Writes a navigator snapshot under `api_key`.
    pub fn save_progress(&self, api_key: String, state: SessionState, storage: SharedStore) {
        let (sender, _) = self.task_context();

        thread::spawn(move || {
            let result = storage
                .lock()
                .map_err(|e| e.to_string())
                .and_then(|mut storage| {
                    SessionPersistence::new(&mut *storage)
                        .save(&api_key, &state)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                });

            let _ = sender.send(TaskResult::ProgressSaved(result));
        });
    }
}
