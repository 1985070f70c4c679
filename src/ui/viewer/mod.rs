// SPDX-License-Identifier: MPL-2.0
//! Viewer: the interactive scan pane and its controller.
//!
//! The [`component`] module owns the display surface, tool selection, and
//! gesture state; [`pane`] renders the windowed image with its overlays;
//! [`empty_state`] is shown before any scan is loaded.

pub mod component;
pub mod empty_state;
pub mod pane;
