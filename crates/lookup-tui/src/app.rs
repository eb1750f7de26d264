//! Application state management for the lookup TUI.
//!
//! `App` owns the loaded dataset, the lookup form and all selection state.
//! The dataset fetch runs on a background task and reports back through an
//! MPSC channel drained once per event-loop tick.

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use lookup_core::analysis::{extract_competencies, participant_names};
use lookup_core::api::{fetch_error_message, ParticipantProvider};
use lookup_core::form::LookupForm;
use lookup_core::models::{Dataset, ParticipantRecord, SelectionMode, SummaryMode};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// Only one load is ever outstanding.
const CHANNEL_BUFFER_SIZE: usize = 4;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Which selector list receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Competencies,
    /// Participant names or summary methods, depending on the mode
    Secondary,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Competencies => Focus::Secondary,
            Focus::Secondary => Focus::Competencies,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ShowingError,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Result of a background dataset load.
#[derive(Debug)]
pub enum LoadResult {
    Participants(Vec<ParticipantRecord>),
    /// User-facing failure message
    Error(String),
}

pub struct App {
    provider: ParticipantProvider,

    // UI State
    pub state: AppState,
    pub focus: Focus,
    pub competency_selection: usize,
    pub secondary_selection: usize,

    // Data
    pub form: LookupForm,
    pub dataset: Dataset,
    /// Derived once per loaded dataset
    pub competencies: Vec<String>,
    pub participants: Vec<String>,

    pub loading: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,

    // Background task channel
    load_rx: mpsc::Receiver<LoadResult>,
    load_tx: mpsc::Sender<LoadResult>,
}

impl App {
    pub fn new(provider: ParticipantProvider) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            provider,

            state: AppState::Normal,
            focus: Focus::Competencies,
            competency_selection: 0,
            secondary_selection: 0,

            form: LookupForm::new(),
            dataset: Dataset::default(),
            competencies: Vec::new(),
            participants: Vec::new(),

            loading: false,
            error_message: None,
            status_message: None,

            load_rx: rx,
            load_tx: tx,
        }
    }

    pub fn source_description(&self) -> String {
        self.provider.source().describe()
    }

    // =========================================================================
    // Background Loading
    // =========================================================================

    /// Start fetching the dataset in the background. Ignored while a load is
    /// already running.
    pub fn start_load(&mut self) {
        if self.loading {
            debug!("Load already in progress");
            self.status_message = Some("Already loading...".to_string());
            return;
        }

        info!(source = %self.provider.source().describe(), "Starting dataset load");
        self.loading = true;
        self.status_message = Some("Loading...".to_string());

        let provider = self.provider.clone();
        let tx = self.load_tx.clone();

        tokio::spawn(async move {
            let result = match provider.fetch().await {
                Ok(records) => LoadResult::Participants(records),
                Err(e) => {
                    warn!(error = %format!("{:#}", e), "Dataset load failed");
                    LoadResult::Error(fetch_error_message(&e))
                }
            };
            if let Err(e) = tx.send(result).await {
                error!(error = %e, "Failed to send load result - channel closed");
            }
        });
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.load_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_load_result(result);
        }
    }

    pub fn process_load_result(&mut self, result: LoadResult) {
        self.loading = false;
        self.form.clear();
        self.competency_selection = 0;
        self.secondary_selection = 0;

        match result {
            LoadResult::Participants(records) => {
                self.dataset = Dataset::new(records);
                self.competencies = extract_competencies(&self.dataset.records);
                self.participants = participant_names(&self.dataset.records);
                info!(
                    count = self.dataset.len(),
                    competencies = self.competencies.len(),
                    "Dataset loaded"
                );
                self.status_message = None;
            }
            LoadResult::Error(message) => {
                self.dataset = Dataset::default();
                self.competencies.clear();
                self.participants.clear();
                self.status_message = None;
                self.error_message = Some(message);
                self.state = AppState::ShowingError;
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Items shown in the second selector for the current mode.
    pub fn secondary_items(&self) -> Vec<String> {
        match self.form.mode() {
            SelectionMode::Participant => self.participants.clone(),
            SelectionMode::Summary => SummaryMode::ALL
                .iter()
                .map(|m| m.label().to_string())
                .collect(),
        }
    }

    fn secondary_len(&self) -> usize {
        match self.form.mode() {
            SelectionMode::Participant => self.participants.len(),
            SelectionMode::Summary => SummaryMode::ALL.len(),
        }
    }

    fn focused_selection(&mut self) -> (&mut usize, usize) {
        match self.focus {
            Focus::Competencies => (&mut self.competency_selection, self.competencies.len()),
            Focus::Secondary => {
                let len = self.secondary_len();
                (&mut self.secondary_selection, len)
            }
        }
    }

    pub fn select_next(&mut self, step: usize) {
        let (selection, len) = self.focused_selection();
        *selection = (*selection + step).min(len.saturating_sub(1));
    }

    pub fn select_prev(&mut self, step: usize) {
        let (selection, _) = self.focused_selection();
        *selection = selection.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        let (selection, _) = self.focused_selection();
        *selection = 0;
    }

    pub fn select_last(&mut self) {
        let (selection, len) = self.focused_selection();
        *selection = len.saturating_sub(1);
    }

    /// Record the highlighted item of the focused list in the form.
    pub fn choose_highlighted(&mut self) {
        match self.focus {
            Focus::Competencies => {
                if let Some(competency) = self.competencies.get(self.competency_selection) {
                    self.form.select_competency(competency.clone());
                    // Move on to the second choice
                    self.focus = Focus::Secondary;
                }
            }
            Focus::Secondary => match self.form.mode() {
                SelectionMode::Participant => {
                    if let Some(name) = self.participants.get(self.secondary_selection) {
                        self.form.select_participant(name.clone());
                    }
                }
                SelectionMode::Summary => {
                    if let Some(mode) = SummaryMode::ALL.get(self.secondary_selection) {
                        self.form.select_summary_mode(*mode);
                    }
                }
            },
        }
    }

    pub fn submit(&mut self) {
        match self.form.submit(&self.dataset.records) {
            Ok(_) => self.status_message = None,
            Err(e) => {
                debug!(error = %e, "Submit rejected");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Switch selection mode. Changing mode resets the form and the lists.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.form.mode() == mode {
            return;
        }
        self.form.set_mode(mode);
        self.focus = Focus::Competencies;
        self.competency_selection = 0;
        self.secondary_selection = 0;
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use lookup_core::api::DataSource;

    fn test_app() -> App {
        let provider = ParticipantProvider::new(
            DataSource::File(PathBuf::from("/nonexistent/participants.json")),
            vec!["id".to_string()],
        );
        App::new(provider)
    }

    fn fixture() -> Vec<ParticipantRecord> {
        vec![
            ParticipantRecord::new("Alice")
                .with_score("Communication", 4.0)
                .with_score("Leadership", 3.0),
            ParticipantRecord::new("Bob")
                .with_score("Communication", 5.0)
                .with_score("Leadership", 2.0),
        ]
    }

    fn loaded_app() -> App {
        let mut app = test_app();
        app.process_load_result(LoadResult::Participants(fixture()));
        app
    }

    // -------------------------------------------------------------------------
    // Load Result Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_process_participants() {
        let app = loaded_app();
        assert!(!app.loading);
        assert_eq!(app.dataset.len(), 2);
        assert_eq!(app.competencies, vec!["Communication", "Leadership"]);
        assert_eq!(app.participants, vec!["Alice", "Bob"]);
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_process_error_resets_everything() {
        let mut app = loaded_app();
        app.form.select_competency("Communication");

        app.process_load_result(LoadResult::Error("Problem fetching the data: boom".to_string()));

        assert!(app.dataset.is_empty());
        assert!(app.competencies.is_empty());
        assert!(app.participants.is_empty());
        assert_eq!(app.form.competency(), None);
        assert_eq!(app.state, AppState::ShowingError);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Problem fetching the data: boom")
        );

        app.dismiss_error();
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.error_message, None);
    }

    #[tokio::test]
    async fn test_background_load_failure() {
        let mut app = test_app();
        app.start_load();
        assert!(app.loading);

        // A second request while loading is ignored
        app.start_load();
        assert_eq!(app.status_message.as_deref(), Some("Already loading..."));

        for _ in 0..100 {
            app.check_background_tasks();
            if !app.loading {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert!(!app.loading);
        assert_eq!(app.state, AppState::ShowingError);
        assert!(app
            .error_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Problem fetching the data:")));
    }

    // -------------------------------------------------------------------------
    // Selection Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_selection_movement_clamps() {
        let mut app = loaded_app();
        app.select_prev(1);
        assert_eq!(app.competency_selection, 0);

        app.select_next(1);
        app.select_next(1);
        assert_eq!(app.competency_selection, 1);

        app.select_first();
        assert_eq!(app.competency_selection, 0);
        app.select_last();
        assert_eq!(app.competency_selection, 1);
    }

    #[test]
    fn test_focus_moves_secondary_selection() {
        let mut app = loaded_app();
        app.set_mode(SelectionMode::Summary);
        app.focus = Focus::Secondary;
        app.select_last();
        assert_eq!(app.secondary_selection, SummaryMode::ALL.len() - 1);
        assert_eq!(app.competency_selection, 0);
    }

    #[test]
    fn test_empty_lists_stay_at_zero() {
        let mut app = test_app();
        app.select_next(PAGE_SCROLL_SIZE);
        app.select_last();
        assert_eq!(app.competency_selection, 0);
        app.choose_highlighted();
        assert_eq!(app.form.competency(), None);
    }

    #[test]
    fn test_participant_flow() {
        let mut app = loaded_app();
        app.choose_highlighted();
        assert_eq!(app.form.competency(), Some("Communication"));
        assert_eq!(app.focus, Focus::Secondary);

        app.choose_highlighted();
        assert_eq!(app.form.participant(), Some("Alice"));

        app.submit();
        let output = app.form.output().expect("output should be set");
        assert_eq!(output.text, "Alice scored 4 on Communication");
        assert!(output.found);
    }

    #[test]
    fn test_summary_flow() {
        let mut app = loaded_app();
        app.set_mode(SelectionMode::Summary);
        assert_eq!(app.secondary_items(), vec!["Lowest", "Highest", "Average", "Type"]);

        app.choose_highlighted();
        app.select_next(2);
        app.choose_highlighted();
        assert_eq!(app.form.summary_mode(), Some(SummaryMode::Average));

        app.submit();
        let output = app.form.output().expect("output should be set");
        assert_eq!(output.text, "The average score for Communication is 4.5");
    }

    #[test]
    fn test_incomplete_submit_sets_status() {
        let mut app = loaded_app();
        app.submit();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Select a competency and a participant first")
        );
        assert_eq!(app.form.output(), None);
    }

    #[test]
    fn test_mode_switch_resets() {
        let mut app = loaded_app();
        app.choose_highlighted();
        app.select_next(1);
        assert_eq!(app.focus, Focus::Secondary);

        app.set_mode(SelectionMode::Summary);
        assert_eq!(app.form.mode(), SelectionMode::Summary);
        assert_eq!(app.form.competency(), None);
        assert_eq!(app.focus, Focus::Competencies);
        assert_eq!(app.secondary_selection, 0);
    }
}
