// src/report/mod.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// One analyzed document, exactly as the analysis service returned it.
/// Replaced wholesale on each successful analysis, never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub investor_metrics: InvestorMetrics,
    pub ai_summary: HashMap<String, String>,
    pub loan_recommendation: LoanRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorMetrics {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_profit: f64,
    pub credit_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecommendation {
    pub eligible: bool,
    pub recommended_amount: f64,
    pub tenure_months: u32,
    pub risk_level: String,
}

/// The summary languages the analysis service provides. Keeping this as an
/// enum makes an unsupported language key unrepresentable in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryLanguage {
    English,
    Tamil,
    Hindi,
}

impl SummaryLanguage {
    pub const ALL: [SummaryLanguage; 3] = [
        SummaryLanguage::English,
        SummaryLanguage::Tamil,
        SummaryLanguage::Hindi,
    ];

    /// Key used in the `ai_summary` map of the wire format.
    pub fn key(self) -> &'static str {
        match self {
            SummaryLanguage::English => "english",
            SummaryLanguage::Tamil => "tamil",
            SummaryLanguage::Hindi => "hindi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SummaryLanguage::English => "English",
            SummaryLanguage::Tamil => "Tamil",
            SummaryLanguage::Hindi => "Hindi",
        }
    }

    /// BCP-47 tag handed to the speech synthesizer. Anything without a
    /// dedicated voice falls back to en-US; that is a default, not an error.
    pub fn locale(self) -> &'static str {
        match self {
            SummaryLanguage::Tamil => "ta-IN",
            SummaryLanguage::Hindi => "hi-IN",
            SummaryLanguage::English => "en-US",
        }
    }
}

impl AnalysisResult {
    /// Parses and validates a response body. serde already rejects missing
    /// struct fields; on top of that the english summary must be present
    /// because it anchors the language fallback.
    pub fn from_json(bytes: &[u8]) -> Result<AnalysisResult, DashboardError> {
        let result: AnalysisResult = serde_json::from_slice(bytes)
            .map_err(|e| DashboardError::MalformedAnalysisResult(e.to_string()))?;

        if !result
            .ai_summary
            .contains_key(SummaryLanguage::English.key())
        {
            return Err(DashboardError::MalformedAnalysisResult(
                "ai_summary is missing the \"english\" entry".to_string(),
            ));
        }

        Ok(result)
    }

    /// Narrative text for the requested language, falling back to english
    /// when the service omitted that key.
    pub fn summary_for(&self, language: SummaryLanguage) -> &str {
        self.ai_summary
            .get(language.key())
            .or_else(|| self.ai_summary.get(SummaryLanguage::English.key()))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Two-bucket series for the income/expense chart. O(1), recomputed on
    /// every frame rather than cached.
    pub fn chart_series(&self) -> [(&'static str, f64); 2] {
        [
            ("Income", self.investor_metrics.total_income),
            ("Expense", self.investor_metrics.total_expense),
        ]
    }
}
