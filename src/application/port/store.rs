// SPDX-License-Identifier: MPL-2.0
//! Scan persistence port definition.
//!
//! This module defines the [`ScanStore`] trait for persisting scans and
//! analyses to the backing store and querying recent history. The wire
//! protocol is an external collaborator; this boundary only sees domain
//! types.
//!
//! # Design Notes
//!
//! - Methods are `async`; callers drive them through Iced `Task`s
//! - A store may be *disabled* (no credentials): uploads then return
//!   `Ok(None)` and history returns an empty list, so the viewer keeps
//!   working without persistence

use crate::domain::scan::{AnalysisReport, PatientMetadata, ScanRecord};
use std::fmt;

/// Errors that can occur during store operations.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The request could not reach the store.
    RequestFailed(String),

    /// The store answered with a non-success status.
    RejectedByService { status: u16, body: String },

    /// The store's reply could not be parsed.
    MalformedResponse(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::RequestFailed(msg) => write!(f, "Store request failed: {msg}"),
            StoreError::RejectedByService { status, body } => {
                write!(f, "Store rejected the request ({status}): {body}")
            }
            StoreError::MalformedResponse(msg) => {
                write!(f, "Store response could not be parsed: {msg}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Port for scan/analysis persistence and history queries.
#[allow(async_fn_in_trait)]
pub trait ScanStore {
    /// Uploads the scan file and inserts its record.
    ///
    /// Returns the inserted record, or `None` when the store is disabled.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the upload or insert fails.
    async fn upload_scan(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        metadata: &PatientMetadata,
    ) -> Result<Option<ScanRecord>, StoreError>;

    /// Attaches an analysis to a previously uploaded scan.
    ///
    /// No-op when the store is disabled.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the insert fails.
    async fn save_analysis(
        &self,
        scan_id: &str,
        analysis: &AnalysisReport,
    ) -> Result<(), StoreError>;

    /// Fetches the most recent scan records, newest first, with their
    /// attached analyses.
    ///
    /// Returns an empty list when the store is disabled.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the query fails.
    async fn recent_scans(&self, limit: u32) -> Result<Vec<ScanRecord>, StoreError>;
}
