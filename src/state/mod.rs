// src/state/mod.rs
use std::path::PathBuf;

use crate::chat::ChatSession;
use crate::error::DashboardError;
use crate::report::{AnalysisResult, SummaryLanguage};

pub mod intro;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "pdf"];

/// Core application state. The analysis result and the chat transcript are
/// each owned here and mutated only through these operations; the views are
/// projections of whatever this holds.
pub struct AppState {
    // Upload
    pub selected_file: Option<PathBuf>,
    pub loading: bool,

    // Analysis fan-out
    pub result: Option<AnalysisResult>,
    pub summary_language: SummaryLanguage,

    // Chat
    pub chat: ChatSession,

    // Export
    pub exporting: bool,

    // Minimal UI state
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selected_file: None,
            loading: false,
            result: None,
            summary_language: SummaryLanguage::English,
            chat: ChatSession::new(),
            exporting: false,
            error_message: None,
        }
    }

    /// Replaces the held file reference unconditionally. Does not touch
    /// loading or result state; validation happens at submit time.
    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
    }

    /// Validates the pending submission and flips to loading. Returns the
    /// file to hand to the analysis client, or `None` while a request is
    /// already in flight (re-submitting during loading is a silent no-op so
    /// duplicate requests can never race).
    pub fn begin_analysis(&mut self) -> Result<Option<PathBuf>, DashboardError> {
        if self.loading {
            return Ok(None);
        }

        let file = self
            .selected_file
            .clone()
            .ok_or(DashboardError::NoFileSelected)?;

        let extension = file
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DashboardError::UnsupportedFileType(extension));
        }

        self.loading = true;
        Ok(Some(file))
    }

    /// Applies the outcome of an analysis request. Loading is cleared on
    /// both branches so a failed request can never leave the view stuck on
    /// "Analyzing…". A success replaces the previous result wholesale.
    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResult, DashboardError>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Starts an export of the stored result. Exporting without a result is
    /// a caller error; a second export while one is pending is a no-op.
    pub fn begin_export(&mut self) -> Result<Option<AnalysisResult>, DashboardError> {
        if self.exporting {
            return Ok(None);
        }
        let result = self
            .result
            .clone()
            .ok_or(DashboardError::NoResultToExport)?;
        self.exporting = true;
        Ok(Some(result))
    }

    /// Applies the outcome of an export request; on success the bytes are
    /// returned for the caller to save.
    pub fn finish_export(
        &mut self,
        outcome: Result<Vec<u8>, DashboardError>,
    ) -> Option<Vec<u8>> {
        self.exporting = false;
        match outcome {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    /// Summary text for the selected language, if a result exists.
    pub fn summary_text(&self) -> Option<&str> {
        self.result
            .as_ref()
            .map(|r| r.summary_for(self.summary_language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{InvestorMetrics, LoanRecommendation};
    use std::collections::HashMap;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            investor_metrics: InvestorMetrics {
                total_income: 100000.0,
                total_expense: 40000.0,
                net_profit: 60000.0,
                credit_score: 750.0,
            },
            ai_summary: HashMap::from([
                ("english".to_string(), "Healthy".to_string()),
                ("tamil".to_string(), "t".to_string()),
                ("hindi".to_string(), "h".to_string()),
            ]),
            loan_recommendation: LoanRecommendation {
                eligible: true,
                recommended_amount: 500000.0,
                tenure_months: 24,
                risk_level: "Low".to_string(),
            },
        }
    }

    #[test]
    fn submit_without_a_file_is_rejected() {
        let mut state = AppState::new();
        let err = state.begin_analysis().unwrap_err();
        assert!(matches!(err, DashboardError::NoFileSelected));
        assert!(!state.loading);
    }

    #[test]
    fn submit_with_unsupported_extension_is_rejected() {
        let mut state = AppState::new();
        state.select_file(PathBuf::from("ledger.docx"));
        let err = state.begin_analysis().unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFileType(ext) if ext == "docx"));
        assert!(!state.loading);
    }

    #[test]
    fn submit_flips_to_loading_and_yields_the_file() {
        let mut state = AppState::new();
        state.select_file(PathBuf::from("ledger.csv"));
        let file = state.begin_analysis().unwrap();
        assert_eq!(file, Some(PathBuf::from("ledger.csv")));
        assert!(state.loading);
    }

    #[test]
    fn resubmit_while_loading_is_a_no_op() {
        let mut state = AppState::new();
        state.select_file(PathBuf::from("ledger.xlsx"));
        assert!(state.begin_analysis().unwrap().is_some());
        assert_eq!(state.begin_analysis().unwrap(), None);
        assert!(state.loading);
    }

    #[test]
    fn success_stores_the_result_verbatim_and_clears_loading() {
        let mut state = AppState::new();
        state.select_file(PathBuf::from("ledger.csv"));
        state.begin_analysis().unwrap();

        state.finish_analysis(Ok(sample_result()));
        assert!(!state.loading);
        assert_eq!(state.result, Some(sample_result()));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn failure_clears_loading_and_surfaces_the_error() {
        let mut state = AppState::new();
        state.select_file(PathBuf::from("ledger.csv"));
        state.begin_analysis().unwrap();

        state.finish_analysis(Err(DashboardError::AnalysisRequestFailed(
            "connection refused".to_string(),
        )));
        assert!(!state.loading);
        assert!(state.result.is_none());
        assert!(state.error_message.is_some());
    }

    #[test]
    fn repeated_submissions_overwrite_the_result() {
        let mut state = AppState::new();
        state.select_file(PathBuf::from("ledger.csv"));
        state.begin_analysis().unwrap();
        state.finish_analysis(Ok(sample_result()));

        let mut second = sample_result();
        second.investor_metrics.net_profit = 1.0;
        state.begin_analysis().unwrap();
        state.finish_analysis(Ok(second.clone()));

        assert_eq!(state.result, Some(second));
    }

    #[test]
    fn language_selection_only_changes_the_summary_text() {
        let mut state = AppState::new();
        state.finish_analysis(Ok(sample_result()));

        let before = state.result.clone();
        state.summary_language = SummaryLanguage::Tamil;
        assert_eq!(state.summary_text(), Some("t"));
        assert_eq!(state.result, before);
    }

    #[test]
    fn export_without_a_result_is_rejected() {
        let mut state = AppState::new();
        let err = state.begin_export().unwrap_err();
        assert!(matches!(err, DashboardError::NoResultToExport));
        assert!(!state.exporting);
    }

    #[test]
    fn export_round_trip_clears_the_pending_flag() {
        let mut state = AppState::new();
        state.finish_analysis(Ok(sample_result()));

        let payload = state.begin_export().unwrap();
        assert_eq!(payload, Some(sample_result()));
        assert!(state.exporting);

        let bytes = state.finish_export(Ok(vec![0x25, 0x50, 0x44, 0x46]));
        assert_eq!(bytes, Some(vec![0x25, 0x50, 0x44, 0x46]));
        assert!(!state.exporting);
    }

    #[test]
    fn failed_export_produces_no_bytes() {
        let mut state = AppState::new();
        state.finish_analysis(Ok(sample_result()));
        state.begin_export().unwrap();

        let bytes = state.finish_export(Err(DashboardError::ReportExportFailed(
            "HTTP 500".to_string(),
        )));
        assert_eq!(bytes, None);
        assert!(!state.exporting);
        assert!(state.error_message.is_some());
    }
}
