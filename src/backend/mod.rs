// src/backend/mod.rs
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DashboardError;
use crate::report::AnalysisResult;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn http_client() -> Result<reqwest::blocking::Client, String> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| e.to_string())
}

/// Submits a document to the analysis service on a worker thread and hands
/// the parsed result back over a channel polled by the frame loop. The
/// cancel flag is checked before delivery so a torn-down app never receives
/// a late result.
pub struct AnalysisClient {
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn analyze_url(&self) -> String {
        format!("{}/analyze/final-report", self.base_url.trim_end_matches('/'))
    }

    pub fn spawn_analyze(
        &self,
        file: PathBuf,
        cancel: Arc<AtomicBool>,
    ) -> Receiver<Result<AnalysisResult, DashboardError>> {
        let (tx, rx) = mpsc::channel();
        let url = self.analyze_url();

        std::thread::spawn(move || {
            tracing::info!(url = %url, file = %file.display(), "submitting document for analysis");
            let outcome = run_analyze(&url, &file);
            if let Err(e) = &outcome {
                tracing::warn!(error = %e, "analysis request failed");
            }
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            let _ = tx.send(outcome);
        });

        rx
    }
}

fn run_analyze(url: &str, file: &Path) -> Result<AnalysisResult, DashboardError> {
    let client = http_client().map_err(DashboardError::AnalysisRequestFailed)?;

    let form = reqwest::blocking::multipart::Form::new()
        .file("file", file)
        .map_err(|e| DashboardError::AnalysisRequestFailed(e.to_string()))?;

    let response = client
        .post(url)
        .multipart(form)
        .send()
        .map_err(|e| DashboardError::AnalysisRequestFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DashboardError::AnalysisRequestFailed(format!(
            "HTTP {}",
            response.status()
        )));
    }

    let body = response
        .bytes()
        .map_err(|e| DashboardError::AnalysisRequestFailed(e.to_string()))?;

    AnalysisResult::from_json(&body)
}

/// Posts a stored result to the PDF-rendering service and returns the
/// binary document. Same worker-thread/channel shape as `AnalysisClient`.
pub struct ReportClient {
    base_url: String,
}

impl ReportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn export_url(&self) -> String {
        format!("{}/download-pdf", self.base_url.trim_end_matches('/'))
    }

    pub fn spawn_export(
        &self,
        result: AnalysisResult,
        cancel: Arc<AtomicBool>,
    ) -> Receiver<Result<Vec<u8>, DashboardError>> {
        let (tx, rx) = mpsc::channel();
        let url = self.export_url();

        std::thread::spawn(move || {
            tracing::info!(url = %url, "requesting PDF report");
            let outcome = run_export(&url, &result);
            if let Err(e) = &outcome {
                tracing::warn!(error = %e, "report export failed");
            }
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            let _ = tx.send(outcome);
        });

        rx
    }
}

fn run_export(url: &str, result: &AnalysisResult) -> Result<Vec<u8>, DashboardError> {
    let client = http_client().map_err(DashboardError::ReportExportFailed)?;

    let response = client
        .post(url)
        .json(result)
        .send()
        .map_err(|e| DashboardError::ReportExportFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(DashboardError::ReportExportFailed(format!(
            "HTTP {}",
            response.status()
        )));
    }

    let body = response
        .bytes()
        .map_err(|e| DashboardError::ReportExportFailed(e.to_string()))?;

    Ok(body.to_vec())
}
