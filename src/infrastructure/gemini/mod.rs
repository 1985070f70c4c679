// SPDX-License-Identifier: MPL-2.0
//! Hosted model adapter for preliminary reads.
//!
//! Implements the [`ScanAnalyzer`] port against the Gemini
//! `generateContent` REST endpoint. The PNG snapshot is inlined as
//! base64; the reply is requested as JSON matching [`AnalysisReport`]
//! and falls back to a plain-text summary when the model answers with
//! prose anyway.

use crate::application::port::analysis::{AnalysisError, ScanAnalyzer};
use crate::domain::scan::AnalysisReport;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;

const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";

const SYSTEM_INSTRUCTION: &str = "\
You are a professional Radiologist's AI Assistant.
Analyze the provided medical scan (DICOM converted to image).
Identify:
1. Anatomical region (e.g., Head, Chest, Abdomen).
2. Modality (CT, MRI, X-Ray).
3. Any visible anomalies (preliminary findings only).

IMPORTANT:
- Always include a disclaimer that you are an AI and your output is for educational purposes only and not a clinical diagnosis.
- Be concise and technical.";

const DEFAULT_PROMPT: &str =
    "Please provide a professional preliminary analysis of this medical scan.";

/// Analyzer backed by the hosted Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiAnalyzer {
    /// Builds an analyzer from the `GEMINI_API_KEY` environment variable.
    ///
    /// When the key is absent the analyzer stays constructible but every
    /// request fails with [`AnalysisError::NotConfigured`].
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            eprintln!("Gemini credentials missing. Analysis will be disabled.");
        }
        Self::new(api_key)
    }

    /// Builds an analyzer with an explicit key (or none, for a disabled one).
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Whether credentials are available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(png_image: &[u8], prompt: Option<String>) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": "image/png",
                            "data": BASE64.encode(png_image),
                        }
                    },
                    {
                        "text": prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
                    }
                ]
            }],
            "system_instruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "generationConfig": {
                "temperature": 0.2,
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "anatomicalRegion": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "findings": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "confidence": { "type": "NUMBER" }
                    },
                    "required": ["anatomicalRegion", "summary"]
                }
            }
        })
    }

    /// Pulls the first candidate's text out of a `generateContent` reply.
    fn extract_text(response: &serde_json::Value) -> Option<&str> {
        response
            .get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .get(0)?
            .get("text")?
            .as_str()
    }

    /// Parses the model's reply: structured JSON when it honored the
    /// schema, otherwise the raw text as a summary-only report.
    fn parse_reply(text: &str) -> AnalysisReport {
        serde_json::from_str::<AnalysisReport>(text)
            .unwrap_or_else(|_| AnalysisReport::from_summary(text))
    }
}

impl ScanAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        png_image: Vec<u8>,
        prompt: Option<String>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AnalysisError::NotConfigured);
        };

        let url = format!("{ENDPOINT_BASE}/{}:generateContent", self.model);
        let body = Self::request_body(&png_image, prompt);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::RejectedByService {
                status: status.as_u16(),
                body,
            });
        }

        let reply: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        let text = Self::extract_text(&reply).ok_or(AnalysisError::EmptyResponse)?;
        let report = Self::parse_reply(text);
        if report.is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_analyzer_reports_not_configured() {
        let analyzer = GeminiAnalyzer::new(None);
        assert!(!analyzer.is_configured());

        let result = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("build runtime")
            .block_on(analyzer.analyze(vec![0u8; 4], None));
        assert!(matches!(result, Err(AnalysisError::NotConfigured)));
    }

    #[test]
    fn request_body_inlines_png_and_prompt() {
        let body = GeminiAnalyzer::request_body(&[1, 2, 3], Some("look closely".to_string()));

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[0]["inline_data"]["data"], BASE64.encode([1, 2, 3]));
        assert_eq!(parts[1]["text"], "look closely");
        assert_eq!(body["generationConfig"]["temperature"], 0.2);
    }

    #[test]
    fn request_body_uses_default_prompt_when_absent() {
        let body = GeminiAnalyzer::request_body(&[], None);
        assert_eq!(body["contents"][0]["parts"][1]["text"], DEFAULT_PROMPT);
    }

    #[test]
    fn extract_text_walks_candidate_structure() {
        let reply = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"summary\": \"ok\"}" }] }
            }]
        });
        assert_eq!(
            GeminiAnalyzer::extract_text(&reply),
            Some("{\"summary\": \"ok\"}")
        );

        let empty = serde_json::json!({ "candidates": [] });
        assert!(GeminiAnalyzer::extract_text(&empty).is_none());
    }

    #[test]
    fn parse_reply_prefers_structured_json() {
        let report = GeminiAnalyzer::parse_reply(
            r#"{"anatomicalRegion": "Chest", "summary": "Clear.", "confidence": 0.9}"#,
        );
        assert_eq!(report.anatomical_region, "Chest");
        assert_eq!(report.summary, "Clear.");
    }

    #[test]
    fn parse_reply_falls_back_to_plain_text() {
        let report = GeminiAnalyzer::parse_reply("The scan shows clear lung fields.");
        assert_eq!(report.summary, "The scan shows clear lung fields.");
        assert_eq!(report.anatomical_region, "Unknown");
        assert!(report.findings.is_empty());
    }
}
