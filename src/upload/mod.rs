// src/upload/mod.rs
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::report::{AnalysisReport, DealNotesReport};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// A file staged for upload. Bytes are read by the worker thread at
/// request time, not at pick time.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("{} has no file name", path.display()))?;
        let size = std::fs::metadata(&path)
            .with_context(|| format!("failed to read metadata for {}", path.display()))?
            .len();
        Ok(Self { name, size, path })
    }

    /// Size in kilobytes, two decimals, for the preview list.
    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

/// Progress messages from a worker thread, drained by the UI each frame.
#[derive(Debug)]
pub enum UploadEvent {
    /// Outcome of one analysis upload, in submission order.
    Analysis {
        filename: String,
        result: Result<AnalysisReport, String>,
    },
    /// Outcome of the single deal-notes request.
    Notes(Result<DealNotesReport, String>),
    /// The run is over; the form leaves its loading state.
    Finished,
}

/// Blocking HTTP client for the two analysis endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Base URL from `DEALDESK_BASE_URL`, falling back to localhost.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("DEALDESK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Uploads one file to `/analyze` as a single-part multipart body.
    pub fn analyze(&self, file: &SelectedFile) -> Result<AnalysisReport> {
        let bytes = std::fs::read(&file.path)
            .with_context(|| format!("failed to read {}", file.path.display()))?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file.name.clone()));
        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        decode_response(status, &body)
    }

    /// Uploads the whole selection to `/deal-notes` in one request, all
    /// files as repeated parts under the `files` field.
    pub fn deal_notes(&self, files: &[SelectedFile]) -> Result<DealNotesReport> {
        let mut form = Form::new();
        for file in files {
            let bytes = std::fs::read(&file.path)
                .with_context(|| format!("failed to read {}", file.path.display()))?;
            form = form.part("files", Part::bytes(bytes).file_name(file.name.clone()));
        }
        let response = self
            .http
            .post(format!("{}/deal-notes", self.base_url))
            .multipart(form)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        decode_response(status, &body)
    }
}

/// Maps an HTTP status and body to a typed report or an error message.
///
/// A non-2xx status fails with the server's `error` string when the body
/// carries one, otherwise with a generic status message. A 2xx body that
/// contains an `error` field is also a failure.
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    let value: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let server_error = value
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.as_str())
        .map(str::to_owned);

    if !(200..300).contains(&status) {
        let message =
            server_error.unwrap_or_else(|| format!("HTTP error! status: {}", status));
        return Err(anyhow!(message));
    }
    if let Some(message) = server_error {
        return Err(anyhow!(message));
    }
    let value = value.ok_or_else(|| anyhow!("response body is not valid JSON"))?;
    serde_json::from_value(value).map_err(|e| anyhow!("unexpected response shape: {}", e))
}

/// Runs one analysis upload per file, strictly sequentially, reporting
/// each outcome as it lands. One file's failure never stops the rest.
pub fn spawn_analysis_run(
    client: BackendClient,
    files: Vec<SelectedFile>,
) -> Receiver<UploadEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        info!(files = files.len(), "starting analysis run");
        for file in &files {
            let result = client.analyze(file).map_err(|e| e.to_string());
            match &result {
                Ok(_) => info!(file = %file.name, "analysis succeeded"),
                Err(message) => warn!(file = %file.name, %message, "analysis failed"),
            }
            let event = UploadEvent::Analysis { filename: file.name.clone(), result };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(UploadEvent::Finished);
    });
    rx
}

/// Runs the single batched deal-notes request.
pub fn spawn_deal_notes_run(
    client: BackendClient,
    files: Vec<SelectedFile>,
) -> Receiver<UploadEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        info!(files = files.len(), "generating deal notes");
        let result = client.deal_notes(&files).map_err(|e| e.to_string());
        if let Err(message) = &result {
            warn!(%message, "deal notes generation failed");
        }
        if tx.send(UploadEvent::Notes(result)).is_ok() {
            let _ = tx.send(UploadEvent::Finished);
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_success_status_uses_server_error_message() {
        let err = decode_response::<AnalysisReport>(500, r#"{"error":"parser exploded"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "parser exploded");
    }

    #[test]
    fn non_success_status_without_body_falls_back_to_generic_message() {
        let err = decode_response::<AnalysisReport>(502, "bad gateway").unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn success_body_with_error_field_is_a_failure() {
        let err = decode_response::<DealNotesReport>(200, r#"{"error":"no text extracted"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "no text extracted");
    }

    #[test]
    fn success_body_decodes_with_missing_fields() {
        let notes: DealNotesReport =
            decode_response(200, r#"{"company_summary":"Acme"}"#).unwrap();
        assert_eq!(notes.company_summary.as_deref(), Some("Acme"));
        assert_eq!(notes.recent_updates, None);
    }

    #[test]
    fn malformed_success_body_is_an_explicit_failure() {
        let err = decode_response::<AnalysisReport>(200, "<html>oops</html>").unwrap_err();
        assert_eq!(err.to_string(), "response body is not valid JSON");
    }

    #[test]
    fn size_kb_rounds_to_two_decimals() {
        let file = SelectedFile {
            name: "deck.pdf".to_string(),
            size: 1536,
            path: PathBuf::from("deck.pdf"),
        };
        assert_eq!(file.size_kb(), "1.50 KB");

        let odd = SelectedFile { size: 1000, ..file };
        assert_eq!(odd.size_kb(), "0.98 KB");
    }
}
