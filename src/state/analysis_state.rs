// src/state/analysis_state.rs
use std::sync::mpsc::Receiver;

use crate::report::AnalysisReport;
use crate::upload::{SelectedFile, UploadEvent};

pub const ADD_FILE_LABEL: &str = "Add File";
pub const ADD_ANOTHER_FILE_LABEL: &str = "Add Another File";
pub const ANALYZE_LABEL: &str = "Analyze Pitch Decks";
pub const ANALYZING_LABEL: &str = "Analyzing...";

/// One dynamic row of the analysis form, holding at most one picked file.
#[derive(Debug, Default)]
pub struct FileRow {
    pub file: Option<SelectedFile>,
}

/// One rendered result block, appended in submission order.
#[derive(Debug)]
pub enum AnalysisCard {
    Report {
        filename: String,
        report: AnalysisReport,
    },
    Error {
        title: String,
        message: String,
    },
}

/// State of the investment-analysis form: the dynamic file rows plus the
/// lifecycle of one upload run.
#[derive(Debug, Default)]
pub struct AnalysisState {
    pub rows: Vec<FileRow>,
    pub running: bool,
    /// The results panel stays visible after a run until reset.
    pub results_open: bool,
    pub cards: Vec<AnalysisCard>,
    events: Option<Receiver<UploadEvent>>,
}

impl AnalysisState {
    pub fn add_row(&mut self) {
        self.rows.push(FileRow::default());
    }

    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    /// Label reverts to the initial text once the row count hits zero.
    pub fn add_button_label(&self) -> &'static str {
        if self.rows.is_empty() {
            ADD_FILE_LABEL
        } else {
            ADD_ANOTHER_FILE_LABEL
        }
    }

    /// Submit is allowed iff at least one present row holds a file.
    pub fn can_submit(&self) -> bool {
        self.rows.iter().any(|row| row.file.is_some())
    }

    /// Files to upload, one per populated row, preserving row order.
    /// Empty rows are skipped.
    pub fn staged_files(&self) -> Vec<SelectedFile> {
        self.rows
            .iter()
            .filter_map(|row| row.file.clone())
            .collect()
    }

    /// Enters the loading state: previous cards are cleared and the
    /// results panel is revealed.
    pub fn begin_run(&mut self, events: Receiver<UploadEvent>) {
        self.running = true;
        self.results_open = true;
        self.cards.clear();
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
                UploadEvent::Analysis { filename, result } => {
                    let card = match result {
                        Ok(report) => AnalysisCard::Report { filename, report },
                        Err(message) => AnalysisCard::Error { title: filename, message },
                    };
                    self.cards.push(card);
                }
                UploadEvent::Finished => finished = true,
                UploadEvent::Notes(_) => {}
            }
        }
        if finished {
            self.running = false;
            self.events = None;
        }
    }

    /// True once a run has completed and its results are still on screen.
    pub fn finished(&self) -> bool {
        self.results_open && !self.running
    }

    /// "Analyze Another": back to the empty form.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.cards.clear();
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
            size: 2048,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn submit_gated_on_at_least_one_populated_row() {
        let mut state = AnalysisState::default();
        assert!(!state.can_submit());

        state.add_row();
        state.add_row();
        assert!(!state.can_submit(), "empty rows alone must not enable submit");

        state.rows[1].file = Some(picked("deck.pdf"));
        assert!(state.can_submit());

        state.remove_row(1);
        assert!(!state.can_submit(), "removal must re-run the gate");
    }

    #[test]
    fn staged_files_skip_empty_rows_and_keep_order() {
        let mut state = AnalysisState::default();
        state.add_row();
        state.add_row();
        state.add_row();
        state.rows[0].file = Some(picked("a.txt"));
        state.rows[2].file = Some(picked("b.pdf"));

        let names: Vec<String> = state.staged_files().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a.txt".to_string(), "b.pdf".to_string()]);
    }

    #[test]
    fn zero_staged_files_means_no_submission() {
        let mut state = AnalysisState::default();
        state.add_row();
        assert!(state.staged_files().is_empty());
        assert!(!state.can_submit());
    }

    #[test]
    fn add_button_label_reverts_when_all_rows_are_removed() {
        let mut state = AnalysisState::default();
        assert_eq!(state.add_button_label(), "Add File");

        state.add_row();
        assert_eq!(state.add_button_label(), "Add Another File");
        state.add_row();
        assert_eq!(state.add_button_label(), "Add Another File");

        state.remove_row(1);
        state.remove_row(0);
        assert_eq!(state.add_button_label(), "Add File");
    }

    #[test]
    fn mixed_outcomes_append_one_card_per_file_in_order() {
        let mut state = AnalysisState::default();
        let (tx, rx) = mpsc::channel();
        state.begin_run(rx);
        assert!(state.running);
        assert!(state.results_open);

        tx.send(UploadEvent::Analysis {
            filename: "a.txt".to_string(),
            result: Ok(AnalysisReport::default()),
        })
        .unwrap();
        tx.send(UploadEvent::Analysis {
            filename: "b.pdf".to_string(),
            result: Err("HTTP error! status: 500".to_string()),
        })
        .unwrap();
        tx.send(UploadEvent::Analysis {
            filename: "c.pdf".to_string(),
            result: Ok(AnalysisReport::default()),
        })
        .unwrap();
        tx.send(UploadEvent::Finished).unwrap();

        state.poll_events();
        assert_eq!(state.cards.len(), 3);
        assert!(matches!(&state.cards[0], AnalysisCard::Report { filename, .. } if filename == "a.txt"));
        assert!(matches!(&state.cards[1], AnalysisCard::Error { title, message }
            if title == "b.pdf" && message == "HTTP error! status: 500"));
        assert!(matches!(&state.cards[2], AnalysisCard::Report { filename, .. } if filename == "c.pdf"));
        assert!(!state.running, "Finished must exit the loading state");
        assert!(state.finished());
    }

    #[test]
    fn a_new_run_clears_previous_cards() {
        let mut state = AnalysisState::default();
        let (tx, rx) = mpsc::channel();
        state.begin_run(rx);
        tx.send(UploadEvent::Analysis {
            filename: "old.txt".to_string(),
            result: Ok(AnalysisReport::default()),
        })
        .unwrap();
        tx.send(UploadEvent::Finished).unwrap();
        state.poll_events();
        assert_eq!(state.cards.len(), 1);

        let (_tx2, rx2) = mpsc::channel();
        state.begin_run(rx2);
        assert!(state.cards.is_empty());
        assert!(state.running);
    }

    #[test]
    fn reset_returns_the_form_to_its_initial_state() {
        let mut state = AnalysisState::default();
        state.add_row();
        state.rows[0].file = Some(picked("deck.pdf"));
        let (tx, rx) = mpsc::channel();
        state.begin_run(rx);
        tx.send(UploadEvent::Finished).unwrap();
        state.poll_events();

        state.reset();
        assert!(state.rows.is_empty());
        assert!(state.cards.is_empty());
        assert!(!state.results_open);
        assert_eq!(state.add_button_label(), "Add File");
        assert!(!state.can_submit());
    }
}
