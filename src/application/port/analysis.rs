// SPDX-License-Identifier: MPL-2.0
//! AI analysis port definition.
//!
//! This module defines the [`ScanAnalyzer`] trait for requesting a
//! preliminary read of the displayed scan from a hosted model. The
//! inference itself is an external collaborator; this boundary only ships
//! a PNG snapshot out and a report back.
//!
//! # Design Notes
//!
//! - Methods are `async`; callers drive them through Iced `Task`s
//! - The snapshot is the rendered (windowed) image, not the raw DICOM
//!   pixel data, matching what the user currently sees

use crate::domain::scan::AnalysisReport;
use std::fmt;

/// Errors that can occur while requesting an analysis.
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// No API credentials were configured.
    NotConfigured,

    /// The request could not reach the model endpoint.
    RequestFailed(String),

    /// The endpoint answered with a non-success status.
    RejectedByService { status: u16, body: String },

    /// The model's reply could not be parsed into a report.
    MalformedResponse(String),

    /// The model returned no usable content.
    EmptyResponse,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NotConfigured => {
                write!(f, "Analysis service is not configured (missing API key)")
            }
            AnalysisError::RequestFailed(msg) => write!(f, "Analysis request failed: {msg}"),
            AnalysisError::RejectedByService { status, body } => {
                write!(f, "Analysis service rejected the request ({status}): {body}")
            }
            AnalysisError::MalformedResponse(msg) => {
                write!(f, "Analysis response could not be parsed: {msg}")
            }
            AnalysisError::EmptyResponse => write!(f, "No analysis could be generated"),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Port for AI-generated preliminary reads.
///
/// # Example
///
/// ```ignore
/// use dicom_lens::application::port::analysis::ScanAnalyzer;
///
/// async fn preliminary_read(analyzer: &impl ScanAnalyzer, png: Vec<u8>) -> String {
///     match analyzer.analyze(png, None).await {
///         Ok(report) => report.summary,
///         Err(err) => format!("Analysis failed: {err}"),
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait ScanAnalyzer {
    /// Submits a PNG snapshot of the displayed scan and returns the
    /// model's preliminary read.
    ///
    /// `prompt` overrides the default analysis request text; the system
    /// instruction (radiology framing, educational disclaimer) is fixed
    /// by the implementation.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalysisError`] if the service is unconfigured,
    /// unreachable, rejects the request, or answers with unusable content.
    async fn analyze(
        &self,
        png_image: Vec<u8>,
        prompt: Option<String>,
    ) -> Result<AnalysisReport, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_error_display() {
        let err = AnalysisError::NotConfigured;
        assert!(format!("{err}").contains("not configured"));

        let err = AnalysisError::RejectedByService {
            status: 429,
            body: "quota exceeded".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("429"));
        assert!(display.contains("quota exceeded"));

        let err = AnalysisError::EmptyResponse;
        assert_eq!(format!("{err}"), "No analysis could be generated");
    }

    struct MockAnalyzer {
        configured: bool,
    }

    impl ScanAnalyzer for MockAnalyzer {
        async fn analyze(
            &self,
            _png_image: Vec<u8>,
            prompt: Option<String>,
        ) -> Result<AnalysisReport, AnalysisError> {
            if !self.configured {
                return Err(AnalysisError::NotConfigured);
            }
            Ok(AnalysisReport::from_summary(
                prompt.unwrap_or_else(|| "ok".to_string()),
            ))
        }
    }

    #[tokio::test]
    async fn mock_analyzer_unconfigured() {
        let analyzer = MockAnalyzer { configured: false };
        let result = analyzer.analyze(vec![0u8; 8], None).await;
        assert!(matches!(result, Err(AnalysisError::NotConfigured)));
    }

    #[tokio::test]
    async fn mock_analyzer_echoes_prompt() {
        let analyzer = MockAnalyzer { configured: true };
        let report = analyzer
            .analyze(vec![0u8; 8], Some("describe".to_string()))
            .await
            .expect("analysis succeeds");
        assert_eq!(report.summary, "describe");
    }
}
