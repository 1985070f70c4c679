// SPDX-License-Identifier: MPL-2.0
//! Scan domain: patient metadata, stored scan records, and analysis reports.

mod types;

pub use types::{AnalysisReport, PatientMetadata, ScanRecord, UNKNOWN_VALUE};
