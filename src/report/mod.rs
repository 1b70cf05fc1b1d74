// src/report/mod.rs
pub mod analysis;
pub mod notes;

// Re-export commonly used types
pub use analysis::{AnalysisReport, BubblePoint};
pub use notes::DealNotesReport;

/// Missing report fields render as this literal, matching the backend's
/// loose contract where every field is optional.
pub const NOT_AVAILABLE: &str = "N/A";

pub(crate) fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}
