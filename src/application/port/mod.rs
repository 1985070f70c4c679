// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`display`]: Image display adapter (viewport transform ownership and repaint)
//! - [`analysis`]: AI-generated preliminary reads of the displayed scan
//! - [`store`]: Scan/analysis persistence and history queries
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no DICOM toolkit types)
//! - [`display`] is synchronous; it runs on the UI thread inside gesture handling
//! - [`analysis`] and [`store`] are HTTP-backed and expose `async` methods,
//!   consumed through Iced `Task`s in the update loop

pub mod analysis;
pub mod display;
pub mod store;

// Re-export main types for convenience
pub use analysis::{AnalysisError, ScanAnalyzer};
pub use display::ImageDisplay;
pub use store::{ScanStore, StoreError};
