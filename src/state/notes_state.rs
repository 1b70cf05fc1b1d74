// src/state/notes_state.rs
use std::sync::mpsc::Receiver;

use crate::report::DealNotesReport;
use crate::upload::{SelectedFile, UploadEvent};

pub const GENERATE_LABEL: &str = "Generate Deal Notes";
pub const GENERATING_LABEL: &str = "Generating...";

/// The single consolidated result block of a deal-notes run.
#[derive(Debug)]
pub enum NotesCard {
    Report(DealNotesReport),
    Error { title: String, message: String },
}

/// State of the deal-notes form: the tracked file selection (picker or
/// drag-and-drop) plus the lifecycle of one batched upload.
#[derive(Debug, Default)]
pub struct NotesState {
    pub files: Vec<SelectedFile>,
    /// Drop-zone highlight, written from last frame's drag-hover input.
    pub drag_active: bool,
    pub running: bool,
    pub results_open: bool,
    pub card: Option<NotesCard>,
    events: Option<Receiver<UploadEvent>>,
}

impl NotesState {
    /// Replaces the selection, as a drop or a fresh pick does.
    pub fn set_files(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
    }

    /// Submit is allowed iff the selection is non-empty.
    pub fn can_submit(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn begin_run(&mut self, events: Receiver<UploadEvent>) {
        self.running = true;
        self.results_open = true;
        self.card = None;
        self.events = Some(events);
    }

    /// Drains pending worker events. Call once per frame.
    pub fn poll_events(&mut self) {
        let Some(events) = &self.events else {
            return;
        };
        let mut finished = false;
        while let Ok(event) = events.try_recv() {
            match event {
                UploadEvent::Notes(result) => {
                    self.card = Some(match result {
                        Ok(report) => NotesCard::Report(report),
                        Err(message) => NotesCard::Error {
                            title: "Deal Notes Generation".to_string(),
                            message,
                        },
                    });
                }
                UploadEvent::Finished => finished = true,
                UploadEvent::Analysis { .. } => {}
            }
        }
        if finished {
            self.running = false;
            self.events = None;
        }
    }

    pub fn finished(&self) -> bool {
        self.results_open && !self.running
    }

    /// "Generate Another": back to the empty form.
    pub fn reset(&mut self) {
        self.files.clear();
        self.card = None;
        self.results_open = false;
        self.running = false;
        self.events = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::mpsc;

    fn picked(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            size: 512,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn submit_enabled_iff_selection_non_empty() {
        let mut state = NotesState::default();
        assert!(!state.can_submit());

        state.set_files(vec![picked("call-transcript.txt")]);
        assert!(state.can_submit());

        state.clear_files();
        assert!(!state.can_submit(), "clearing must re-disable immediately");
    }

    #[test]
    fn a_drop_replaces_the_previous_selection() {
        let mut state = NotesState::default();
        state.set_files(vec![picked("old.pdf"), picked("older.pdf")]);
        state.set_files(vec![picked("new.txt")]);
        let names: Vec<&str> = state.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["new.txt"]);
    }

    #[test]
    fn success_event_yields_one_consolidated_card() {
        let mut state = NotesState::default();
        let (tx, rx) = mpsc::channel();
        state.begin_run(rx);
        assert!(state.running);

        tx.send(UploadEvent::Notes(Ok(DealNotesReport::default()))).unwrap();
        tx.send(UploadEvent::Finished).unwrap();
        state.poll_events();

        assert!(matches!(state.card, Some(NotesCard::Report(_))));
        assert!(state.finished());
    }

    #[test]
    fn failure_event_replaces_results_with_an_error_card() {
        let mut state = NotesState::default();
        let (tx, rx) = mpsc::channel();
        state.begin_run(rx);

        tx.send(UploadEvent::Notes(Err("HTTP error! status: 500".to_string()))).unwrap();
        tx.send(UploadEvent::Finished).unwrap();
        state.poll_events();

        match &state.card {
            Some(NotesCard::Error { title, message }) => {
                assert_eq!(title, "Deal Notes Generation");
                assert_eq!(message, "HTTP error! status: 500");
            }
            other => panic!("expected error card, got {:?}", other),
        }
        assert!(!state.running);
    }

    #[test]
    fn reset_clears_selection_and_results() {
        let mut state = NotesState::default();
        state.set_files(vec![picked("deck.pdf")]);
        let (tx, rx) = mpsc::channel();
        state.begin_run(rx);
        tx.send(UploadEvent::Notes(Ok(DealNotesReport::default()))).unwrap();
        tx.send(UploadEvent::Finished).unwrap();
        state.poll_events();

        state.reset();
        assert!(state.files.is_empty());
        assert!(state.card.is_none());
        assert!(!state.results_open);
        assert!(!state.can_submit());
    }
}
