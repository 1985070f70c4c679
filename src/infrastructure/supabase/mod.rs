// SPDX-License-Identifier: MPL-2.0
//! Supabase adapter for scan persistence.
//!
//! Implements the [`ScanStore`] port against Supabase's storage and
//! PostgREST endpoints. Scan files go into the `dicom-scans` bucket under
//! `scans/{timestamp}_{filename}`; records live in the `scans` table with
//! attached rows in `analyses`.
//!
//! When `SUPABASE_URL` / `SUPABASE_ANON_KEY` are absent the store is
//! *disabled*: uploads return no record and history queries return an
//! empty list, so the viewer keeps working without persistence.

use crate::application::port::store::{ScanStore, StoreError};
use crate::domain::scan::{AnalysisReport, PatientMetadata, ScanRecord};
use chrono::Utc;
use serde_json::json;

/// Storage bucket holding uploaded scan files.
const BUCKET: &str = "dicom-scans";

/// Environment variable holding the project URL.
pub const ENV_URL: &str = "SUPABASE_URL";

/// Environment variable holding the anonymous API key.
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone)]
struct Credentials {
    base_url: String,
    anon_key: String,
}

/// Store backed by Supabase storage + PostgREST.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl SupabaseStore {
    /// Builds a store from the `SUPABASE_URL` / `SUPABASE_ANON_KEY`
    /// environment variables, disabled when either is missing.
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var(ENV_URL).ok().filter(|v| !v.is_empty());
        let key = std::env::var(ENV_ANON_KEY).ok().filter(|v| !v.is_empty());

        match (url, key) {
            (Some(base_url), Some(anon_key)) => Self::new(Some((base_url, anon_key))),
            _ => {
                eprintln!("Supabase credentials missing. Persistence will be disabled.");
                Self::new(None)
            }
        }
    }

    /// Builds a store with explicit credentials (or none, for a disabled one).
    #[must_use]
    pub fn new(credentials: Option<(String, String)>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials: credentials.map(|(base_url, anon_key)| Credentials {
                base_url: base_url.trim_end_matches('/').to_string(),
                anon_key,
            }),
        }
    }

    /// Whether credentials are available.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Object path for an uploaded scan, unique per upload instant.
    fn object_path(file_name: &str) -> String {
        format!("scans/{}_{}", Utc::now().timestamp_millis(), file_name)
    }

    fn authorized(
        request: reqwest::RequestBuilder,
        credentials: &Credentials,
    ) -> reqwest::RequestBuilder {
        request
            .header("apikey", &credentials.anon_key)
            .bearer_auth(&credentials.anon_key)
    }
}

impl ScanStore for SupabaseStore {
    async fn upload_scan(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        metadata: &PatientMetadata,
    ) -> Result<Option<ScanRecord>, StoreError> {
        let Some(credentials) = self.credentials.as_ref() else {
            return Ok(None);
        };

        let file_path = Self::object_path(file_name);

        // 1. Upload file to storage
        let upload_url = format!(
            "{}/storage/v1/object/{BUCKET}/{file_path}",
            credentials.base_url
        );
        let response = Self::authorized(self.client.post(&upload_url), credentials)
            .header("content-type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::RejectedByService {
                status: status.as_u16(),
                body,
            });
        }

        // 2. Insert metadata into the scans table
        let insert_url = format!("{}/rest/v1/scans", credentials.base_url);
        let response = Self::authorized(self.client.post(&insert_url), credentials)
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(&json!({
                "file_path": file_path,
                "patient_name": metadata.name,
                "patient_id": metadata.id,
                "modality": metadata.modality,
                "study_date": metadata.study_date,
                "institution": metadata.institution,
            }))
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::RejectedByService {
                status: status.as_u16(),
                body,
            });
        }

        let record: ScanRecord = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
        Ok(Some(record))
    }

    async fn save_analysis(
        &self,
        scan_id: &str,
        analysis: &AnalysisReport,
    ) -> Result<(), StoreError> {
        let Some(credentials) = self.credentials.as_ref() else {
            return Ok(());
        };

        let url = format!("{}/rest/v1/analyses", credentials.base_url);
        let response = Self::authorized(self.client.post(&url), credentials)
            .header("Prefer", "return=minimal")
            .json(&json!({
                "scan_id": scan_id,
                "summary": analysis.summary,
                "findings": analysis.findings,
                "anatomical_region": analysis.anatomical_region,
                "confidence": analysis.confidence,
            }))
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::RejectedByService {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    async fn recent_scans(&self, limit: u32) -> Result<Vec<ScanRecord>, StoreError> {
        let Some(credentials) = self.credentials.as_ref() else {
            return Ok(Vec::new());
        };

        let url = format!("{}/rest/v1/scans", credentials.base_url);
        let response = Self::authorized(self.client.get(&url), credentials)
            .query(&[
                (
                    "select",
                    "*,analyses(summary,findings,anatomical_region,confidence)",
                ),
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::RejectedByService {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_store_is_not_configured() {
        let store = SupabaseStore::new(None);
        assert!(!store.is_configured());
    }

    #[test]
    fn base_url_is_normalized_without_trailing_slash() {
        let store = SupabaseStore::new(Some((
            "https://project.supabase.co/".to_string(),
            "anon".to_string(),
        )));
        let credentials = store.credentials.as_ref().expect("credentials present");
        assert_eq!(credentials.base_url, "https://project.supabase.co");
    }

    #[test]
    fn object_path_is_prefixed_and_keeps_file_name() {
        let path = SupabaseStore::object_path("chest_ct.dcm");
        assert!(path.starts_with("scans/"));
        assert!(path.ends_with("_chest_ct.dcm"));
    }

    #[tokio::test]
    async fn disabled_store_short_circuits_all_operations() {
        let store = SupabaseStore::new(None);

        let record = store
            .upload_scan("ct.dcm", vec![0u8; 4], &PatientMetadata::default())
            .await
            .expect("upload succeeds");
        assert!(record.is_none());

        store
            .save_analysis("id", &AnalysisReport::from_summary("s"))
            .await
            .expect("save succeeds");

        let history = store.recent_scans(10).await.expect("query succeeds");
        assert!(history.is_empty());
    }
}
