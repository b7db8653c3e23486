//! Editor/execution state store - the single source of truth for a session.
//!
//! All reads are snapshot reads and all writes go through the named actions
//! below. Every action emits a [`StoreEvent`] so renderers know to re-read.
//!
//! Runs follow `Idle -> Running -> (Succeeded | Failed) -> Idle`, with at most
//! one run in flight. Failures never escape [`EditorStore::run`]; they end up
//! in the `error` field like any other failed run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::broadcast;

use codepad_api::{
    DEFAULT_FONT_SIZE, ExecutionResult, RunOutcome, RunSnapshot, SessionSnapshot, StoreEvent,
    clamp_font_size,
};
use codepad_executor::{CodeRunner, ExecutionError};
use codepad_registry::{LanguageRegistry, ThemeRegistry};

use crate::EditorHandle;
use crate::preferences::{FONT_SIZE_KEY, PreferenceStore};

/// Receives every completed run (history logging and the like).
///
/// Observer failures are logged and otherwise ignored; they never change the
/// outcome of the run that triggered them.
#[async_trait]
pub trait RunObserver: Send + Sync {
    async fn on_run_finished(&self, run: &RunSnapshot) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
}

/// What a call to [`EditorStore::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDisposition {
    /// The run executed and the state now reflects its outcome.
    Completed(RunOutcome),
    /// Another run was in flight; nothing happened.
    AlreadyRunning,
}

struct SessionState {
    language: &'static str,
    theme: &'static str,
    font_size: u32,
    editor: Option<Arc<dyn EditorHandle>>,
    output: Option<String>,
    error: Option<String>,
    phase: RunPhase,
    last_run: Option<RunSnapshot>,
}

struct Inner {
    languages: Arc<LanguageRegistry>,
    themes: Arc<ThemeRegistry>,
    runner: Arc<dyn CodeRunner>,
    state: Mutex<SessionState>,
    observers: Mutex<Vec<Arc<dyn RunObserver>>>,
    events: broadcast::Sender<StoreEvent>,
}

/// Shared handle to the session store. Clones refer to the same session.
#[derive(Clone)]
pub struct EditorStore {
    inner: Arc<Inner>,
}

impl EditorStore {
    /// Create a store with registry defaults: first language, first theme,
    /// default font size, no editor attached.
    pub fn new(
        languages: Arc<LanguageRegistry>,
        themes: Arc<ThemeRegistry>,
        runner: Arc<dyn CodeRunner>,
    ) -> Self {
        let (events, _) = broadcast::channel(256);
        let state = SessionState {
            language: languages.default_entry().id,
            theme: themes.default_entry().id,
            font_size: DEFAULT_FONT_SIZE,
            editor: None,
            output: None,
            error: None,
            phase: RunPhase::Idle,
            last_run: None,
        };

        Self {
            inner: Arc::new(Inner {
                languages,
                themes,
                runner,
                state: Mutex::new(state),
                observers: Mutex::new(Vec::new()),
                events,
            }),
        }
    }

    /// Restore persisted preferences (currently the font size). Unreadable or
    /// malformed values are ignored; out-of-range values are clamped.
    pub fn restore_preferences(&self, prefs: &dyn PreferenceStore) {
        match prefs.get(FONT_SIZE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<i64>() {
                Ok(size) => {
                    self.set_font_size(size);
                }
                Err(_) => tracing::warn!("Ignoring malformed {} value {:?}", FONT_SIZE_KEY, raw),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read {}: {}", FONT_SIZE_KEY, e),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // State stays consistent across a panicking reader, so keep going.
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    pub fn languages(&self) -> &LanguageRegistry {
        &self.inner.languages
    }

    pub fn themes(&self) -> &ThemeRegistry {
        &self.inner.themes
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    /// Register a collaborator to be told about completed runs.
    pub fn add_observer(&self, observer: Arc<dyn RunObserver>) {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            language: state.language.to_string(),
            theme: state.theme.to_string(),
            font_size: state.font_size,
            output: state.output.clone(),
            error: state.error.clone(),
            is_running: state.phase == RunPhase::Running,
            has_editor: state.editor.is_some(),
        }
    }

    pub fn language(&self) -> &'static str {
        self.state().language
    }

    pub fn theme(&self) -> &'static str {
        self.state().theme
    }

    pub fn font_size(&self) -> u32 {
        self.state().font_size
    }

    pub fn is_running(&self) -> bool {
        self.state().phase == RunPhase::Running
    }

    pub fn phase(&self) -> RunPhase {
        self.state().phase
    }

    /// The attached editor, if any.
    pub fn editor(&self) -> Option<Arc<dyn EditorHandle>> {
        self.state().editor.clone()
    }

    /// Current text of the attached editor, untransformed.
    pub fn current_text(&self) -> Option<String> {
        self.editor().map(|editor| editor.text())
    }

    /// The most recent completed run, or `None` before the first one.
    pub fn last_result(&self) -> Option<RunSnapshot> {
        self.state().last_run.clone()
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Switch language. Unknown ids leave the selection unchanged and return
    /// `false`. Loading saved source into the editor is the caller's job.
    pub fn set_language(&self, id: &str) -> bool {
        let Some(language) = self.inner.languages.find(id) else {
            tracing::warn!("Ignoring unknown language {:?}", id);
            return false;
        };
        self.state().language = language.id;
        tracing::debug!("Language set to {}", language.id);
        self.emit(StoreEvent::LanguageChanged { language: language.id.to_string() });
        true
    }

    /// Switch theme. Unknown ids leave the selection unchanged and return `false`.
    pub fn set_theme(&self, id: &str) -> bool {
        let Some(theme) = self.inner.themes.find(id) else {
            tracing::warn!("Ignoring unknown theme {:?}", id);
            return false;
        };
        self.state().theme = theme.id;
        tracing::debug!("Theme set to {}", theme.id);
        self.emit(StoreEvent::ThemeChanged { theme: theme.id.to_string() });
        true
    }

    /// Set the font size, clamped into range. Returns the stored value.
    pub fn set_font_size(&self, requested: i64) -> u32 {
        let size = clamp_font_size(requested);
        self.state().font_size = size;
        self.emit(StoreEvent::FontSizeChanged { font_size: size });
        size
    }

    /// Attach the live editor, replacing any previous one.
    pub fn attach_editor_handle(&self, handle: Arc<dyn EditorHandle>) {
        let replaced = self.state().editor.replace(handle).is_some();
        if replaced {
            tracing::debug!("Replaced attached editor handle");
        }
        self.emit(StoreEvent::EditorAttached);
    }

    /// Forget the live editor (on widget unmount).
    pub fn detach_editor_handle(&self) {
        if self.state().editor.take().is_some() {
            self.emit(StoreEvent::EditorDetached);
        }
    }

    /// Run the editor's current text in the current language.
    ///
    /// A no-op while another run is in flight. Otherwise always resolves with
    /// `is_running == false` and exactly one of output/error set. Dropping the
    /// future mid-run leaves the store idle with a "cancelled" error.
    pub async fn run(&self) -> RunDisposition {
        let (editor, language) = {
            let mut state = self.state();
            if state.phase == RunPhase::Running {
                tracing::debug!("Run requested while another is in flight; ignoring");
                return RunDisposition::AlreadyRunning;
            }
            state.phase = RunPhase::Running;
            (state.editor.clone(), state.language)
        };
        let guard = RunGuard { store: self, armed: true };
        self.emit(StoreEvent::RunStarted { language: language.to_string() });

        let Some(editor) = editor else {
            let err = ExecutionError::Configuration("editor is not ready".to_string());
            tracing::warn!("Run failed: {}", err);
            guard.disarm();
            self.finish_failed(err.to_string());
            return RunDisposition::Completed(RunOutcome::Failed);
        };

        let code = editor.text();
        tracing::info!("Running {} bytes of {}", code.len(), language);
        let result = self.inner.runner.run(&code, language).await;

        guard.disarm();
        let snapshot = self.finish(code, language, result);
        let outcome = if snapshot.error.is_some() {
            RunOutcome::Failed
        } else {
            RunOutcome::Succeeded
        };
        tracing::info!("Run finished: {:?}", outcome);

        self.notify_observers(&snapshot).await;
        RunDisposition::Completed(outcome)
    }

    /// Fold a runner result into state and return the recorded snapshot.
    fn finish(
        &self,
        code: String,
        language: &'static str,
        result: Result<ExecutionResult, ExecutionError>,
    ) -> RunSnapshot {
        let (output, error) = match result {
            Ok(result) => match result.error_text() {
                Some(text) => (None, Some(text.to_string())),
                None => (Some(result.stdout.unwrap_or_default()), None),
            },
            Err(e) => {
                tracing::warn!("Run failed: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let snapshot = RunSnapshot {
            code,
            language: language.to_string(),
            output: output.clone(),
            error: error.clone(),
        };
        let outcome = if error.is_some() { RunOutcome::Failed } else { RunOutcome::Succeeded };

        {
            let mut state = self.state();
            state.output = output;
            state.error = error;
            state.phase = RunPhase::Idle;
            state.last_run = Some(snapshot.clone());
        }
        self.emit(StoreEvent::RunFinished { outcome });
        snapshot
    }

    /// A run that never reached the runner: report the error, keep the last result.
    fn finish_failed(&self, message: String) {
        {
            let mut state = self.state();
            state.output = None;
            state.error = Some(message);
            state.phase = RunPhase::Idle;
        }
        self.emit(StoreEvent::RunFinished { outcome: RunOutcome::Failed });
    }

    async fn notify_observers(&self, run: &RunSnapshot) {
        let observers: Vec<_> = self
            .inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for observer in observers {
            if let Err(e) = observer.on_run_finished(run).await {
                tracing::warn!("Run observer failed: {:#}", e);
            }
        }
    }
}

/// Returns the store to `Idle` if a run is abandoned before it finishes
/// (future dropped, runner or editor panicked).
struct RunGuard<'a> {
    store: &'a EditorStore,
    armed: bool,
}

impl RunGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!("Run abandoned before completion");
        self.store.finish_failed("run was cancelled".to_string());
    }
}
