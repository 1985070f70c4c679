// SPDX-License-Identifier: MPL-2.0
//! Value objects describing a loaded scan and its stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown for DICOM tags the file does not carry.
pub const UNKNOWN_VALUE: &str = "N/A";

/// Patient and study information extracted from a scan's DICOM tags.
///
/// All fields fall back to [`UNKNOWN_VALUE`] when the corresponding tag
/// is absent, so the metadata panel never renders empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientMetadata {
    pub name: String,
    pub id: String,
    pub birth_date: String,
    pub sex: String,
    pub modality: String,
    pub study_date: String,
    pub study_description: String,
    pub institution: String,
}

impl Default for PatientMetadata {
    fn default() -> Self {
        let unknown = || UNKNOWN_VALUE.to_string();
        Self {
            name: unknown(),
            id: unknown(),
            birth_date: unknown(),
            sex: unknown(),
            modality: unknown(),
            study_date: unknown(),
            study_description: unknown(),
            institution: unknown(),
        }
    }
}

impl PatientMetadata {
    /// Returns `true` if no tag yielded a value.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        [
            &self.name,
            &self.id,
            &self.birth_date,
            &self.sex,
            &self.modality,
            &self.study_date,
            &self.study_description,
            &self.institution,
        ]
        .iter()
        .all(|field| field.as_str() == UNKNOWN_VALUE)
    }
}

/// A preliminary AI read of the displayed scan.
///
/// Deserializes both the model's structured response (camelCase) and
/// the store's row format (snake_case).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub findings: Vec<String>,

    #[serde(default, alias = "anatomicalRegion")]
    pub anatomical_region: String,

    #[serde(default)]
    pub confidence: f32,
}

impl AnalysisReport {
    /// Wraps a free-text model reply into a report with no structured fields.
    #[must_use]
    pub fn from_summary(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            findings: Vec::new(),
            anatomical_region: "Unknown".to_string(),
            confidence: 0.0,
        }
    }

    /// Returns `true` when the report carries no usable content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.findings.is_empty()
    }
}

/// A persisted scan row, as returned by the store's `scans` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub file_path: String,
    pub patient_name: String,
    pub patient_id: String,
    pub modality: String,
    pub study_date: String,
    pub institution: String,
    #[serde(default)]
    pub analyses: Vec<AnalysisReport>,
}

impl ScanRecord {
    /// Short label for the history list: modality plus patient name.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} — {}", self.modality, self.patient_name)
    }

    /// Returns `true` when at least one analysis is attached.
    #[must_use]
    pub fn has_analysis(&self) -> bool {
        !self.analyses.is_empty()
    }
}
