// SPDX-License-Identifier: MPL-2.0
//! `dicom_lens` is a desktop DICOM scan viewer built with the Iced GUI framework.
//!
//! It loads a scan through the `dicom-rs` toolkit, lets the user window,
//! zoom, and pan it with pointer drags, shows the extracted patient
//! metadata, persists scans and analyses to a Supabase backend, and can
//! request an AI-generated preliminary read from a hosted model.

#![doc(html_root_url = "https://docs.rs/dicom_lens/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
