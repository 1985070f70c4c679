// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like the
//! DICOM toolkit, the hosted analysis model, and the managed store.
//!
//! # Available Adapters
//!
//! - [`dicom`]: Scan loading and display via the `dicom-rs` toolkit
//!   (implements [`ImageDisplay`])
//! - [`gemini`]: Preliminary reads via the hosted Gemini API
//!   (implements [`ScanAnalyzer`])
//! - [`supabase`]: Persistence via Supabase storage + PostgREST
//!   (implements [`ScanStore`])
//!
//! [`ImageDisplay`]: crate::application::port::ImageDisplay
//! [`ScanAnalyzer`]: crate::application::port::ScanAnalyzer
//! [`ScanStore`]: crate::application::port::ScanStore

pub mod dicom;
pub mod gemini;
pub mod supabase;

// Re-export main types for convenience
pub use dicom::{LoadedScan, ScanSurface};
pub use gemini::GeminiAnalyzer;
pub use supabase::SupabaseStore;
