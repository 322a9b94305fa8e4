// src/error.rs
use thiserror::Error;

/// Everything that can go wrong in response to a user action. Each failure
/// is terminal to the operation that triggered it and is surfaced through
/// the error modal; no variant ever takes down unrelated views.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Please select a CSV / XLSX / PDF file")]
    NoFileSelected,

    #[error("Unsupported file type \"{0}\" — expected csv, xlsx or pdf")]
    UnsupportedFileType(String),

    #[error("Analysis request failed: {0}")]
    AnalysisRequestFailed(String),

    #[error("Analysis response was malformed: {0}")]
    MalformedAnalysisResult(String),

    #[error("Report export failed: {0}")]
    ReportExportFailed(String),

    #[error("No analysis result to export")]
    NoResultToExport,
}
