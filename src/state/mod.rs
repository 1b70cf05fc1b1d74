// src/state/mod.rs
use crate::upload::BackendClient;

pub mod analysis_state;
pub mod notes_state;

pub use analysis_state::{AnalysisCard, AnalysisState, FileRow};
pub use notes_state::{NotesCard, NotesState};

/// Which of the two forms is visible. Mutually exclusive, default Analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Analysis,
    DealNotes,
}

impl Mode {
    pub fn subtitle(&self) -> &'static str {
        match self {
            Mode::Analysis => "Upload one or more pitch decks (.txt or .pdf) to begin analysis",
            Mode::DealNotes => {
                "Upload pitch decks, transcripts, emails, etc. to generate deal notes"
            }
        }
    }
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    pub analysis: AnalysisState,
    pub notes: NotesState,
    pub client: BackendClient,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Analysis,
            analysis: AnalysisState::default(),
            notes: NotesState::default(),
            client: BackendClient::from_env(),
            error_message: None,
        }
    }

    /// True while either form has a worker in flight; drives repaints.
    pub fn any_run_live(&self) -> bool {
        self.analysis.running || self.notes.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_mode_is_analysis() {
        let state = AppState::new();
        assert_eq!(state.mode, Mode::Analysis);
        assert_eq!(
            state.mode.subtitle(),
            "Upload one or more pitch decks (.txt or .pdf) to begin analysis"
        );
    }

    #[test]
    fn toggling_twice_restores_the_original_form_and_subtitle() {
        let mut state = AppState::new();
        let original_subtitle = state.mode.subtitle();

        state.mode = Mode::DealNotes;
        assert_ne!(state.mode.subtitle(), original_subtitle);

        state.mode = Mode::Analysis;
        assert_eq!(state.mode, Mode::Analysis);
        assert_eq!(state.mode.subtitle(), original_subtitle);
    }
}
