// src/report/notes.rs
use serde::Deserialize;

use crate::report::or_na;

/// Consolidated deal notes as returned by `POST /deal-notes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealNotesReport {
    #[serde(default)]
    pub company_summary: Option<String>,
    #[serde(default)]
    pub recent_updates: Option<String>,
    #[serde(default)]
    pub key_discussion_points: Option<String>,
    #[serde(default)]
    pub action_items: Option<String>,
    #[serde(default)]
    pub red_flags: Option<String>,
}

impl DealNotesReport {
    /// (heading, body) pairs in display order, "N/A" when absent.
    pub fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("Company Summary", or_na(&self.company_summary)),
            ("Recent Updates", or_na(&self.recent_updates)),
            ("Key Discussion Points", or_na(&self.key_discussion_points)),
            ("Action Items", or_na(&self.action_items)),
            ("Red Flags", or_na(&self.red_flags)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sections_default_to_na() {
        let notes: DealNotesReport = serde_json::from_value(serde_json::json!({
            "company_summary": "Acme builds robots",
            "red_flags": "High burn rate"
        }))
        .unwrap();
        let sections = notes.sections();
        assert_eq!(sections[0], ("Company Summary", "Acme builds robots"));
        assert_eq!(sections[1], ("Recent Updates", "N/A"));
        assert_eq!(sections[2], ("Key Discussion Points", "N/A"));
        assert_eq!(sections[3], ("Action Items", "N/A"));
        assert_eq!(sections[4], ("Red Flags", "High burn rate"));
    }
}
