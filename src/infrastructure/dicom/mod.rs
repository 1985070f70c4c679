// SPDX-License-Identifier: MPL-2.0
//! DICOM scan loading and display surface.
//!
//! All DICOM parsing, pixel decoding, and VOI LUT (windowing) application
//! is delegated to the `dicom-rs` toolkit (`dicom-object`,
//! `dicom-pixeldata`). This adapter extracts patient metadata from the
//! standard tags and exposes the decoded image as a [`ScanSurface`]
//! implementing the [`ImageDisplay`] port.

use crate::application::port::display::ImageDisplay;
use crate::config::{FALLBACK_WINDOW_CENTER, FALLBACK_WINDOW_WIDTH};
use crate::domain::scan::{PatientMetadata, UNKNOWN_VALUE};
use crate::error::{DicomError, Error};
use crate::ui::state::viewport::{Scale, ViewportTransform, WindowWidth};
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::{DefaultDicomObject, open_file};
use dicom_pixeldata::{ConvertOptions, PixelDecoder, VoiLutOption, WindowLevel};
use iced::widget::image::Handle;
use iced::Size;
use image_rs::codecs::png::PngEncoder;
use image_rs::{ExtendedColorType, ImageEncoder};
use std::path::Path;

/// A scan loaded from disk: its display surface plus extracted metadata.
#[derive(Debug, Clone)]
pub struct LoadedScan {
    pub surface: ScanSurface,
    pub metadata: PatientMetadata,
}

/// Opens and decodes a DICOM file.
///
/// Metadata extraction never fails (missing tags fall back to `"N/A"`),
/// but a file without decodable pixel data is rejected.
///
/// # Errors
///
/// Returns a [`DicomError`] when the file is not a DICOM object or its
/// pixel data cannot be decoded.
pub fn load_scan(path: &Path) -> Result<LoadedScan, DicomError> {
    let object = open_file(path).map_err(|e| DicomError::from_message(&e.to_string()))?;
    let metadata = extract_metadata(&object);
    let surface = ScanSurface::new(object)?;

    Ok(LoadedScan { surface, metadata })
}

/// Reads a string tag, trimming padding and falling back to `"N/A"`.
fn string_tag(object: &DefaultDicomObject, tag: Tag) -> String {
    object
        .element(tag)
        .ok()
        .and_then(|element| element.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string())
}

/// Reads the first value of a numeric tag.
fn float_tag(object: &DefaultDicomObject, tag: Tag) -> Option<f32> {
    object
        .element(tag)
        .ok()
        .and_then(|element| element.to_multi_float32().ok())
        .and_then(|values| values.first().copied())
}

/// Extracts the patient/study tags shown in the metadata panel.
pub fn extract_metadata(object: &DefaultDicomObject) -> PatientMetadata {
    PatientMetadata {
        name: string_tag(object, tags::PATIENT_NAME),
        id: string_tag(object, tags::PATIENT_ID),
        birth_date: string_tag(object, tags::PATIENT_BIRTH_DATE),
        sex: string_tag(object, tags::PATIENT_SEX),
        modality: string_tag(object, tags::MODALITY),
        study_date: string_tag(object, tags::STUDY_DATE),
        study_description: string_tag(object, tags::STUDY_DESCRIPTION),
        institution: string_tag(object, tags::INSTITUTION_NAME),
    }
}

/// Display surface for one loaded scan.
///
/// Owns the parsed DICOM object, the current [`ViewportTransform`], and a
/// cached render of the windowed image. Windowing changes re-run the
/// toolkit's VOI LUT; zoom and pan are applied by the widget layer and
/// need no re-render.
#[derive(Clone)]
pub struct ScanSurface {
    object: DefaultDicomObject,
    transform: ViewportTransform,
    /// VOI window the scan was authored with (tags or fallback).
    default_window: (f32, f32),
    width: u32,
    height: u32,
    /// Stored bit depth, for the technical-specs overlay.
    bits_allocated: u16,
    /// Last-known viewer pane size, for fit-to-default computation.
    viewport_bounds: Option<Size>,
    /// Rendered RGBA pixels for the current VOI window.
    rgba: Vec<u8>,
    handle: Handle,
    /// Set when the VOI window changed since the last render.
    dirty: bool,
}

impl std::fmt::Debug for ScanSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.transform)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl ScanSurface {
    /// Decodes the object's pixel data and renders it with the scan's own
    /// VOI window (or the fallback when the tags are absent).
    ///
    /// # Errors
    ///
    /// Returns a [`DicomError`] when pixel data is missing or cannot be
    /// decoded.
    pub fn new(object: DefaultDicomObject) -> Result<Self, DicomError> {
        let width = float_tag(&object, tags::WINDOW_WIDTH).unwrap_or(FALLBACK_WINDOW_WIDTH);
        let center = float_tag(&object, tags::WINDOW_CENTER).unwrap_or(FALLBACK_WINDOW_CENTER);
        let bits_allocated = object
            .element(tags::BITS_ALLOCATED)
            .ok()
            .and_then(|element| element.to_int::<u16>().ok())
            .unwrap_or(16);

        let (pixels, columns, rows) = render_windowed(&object, width, center)?;
        let handle = Handle::from_rgba(columns, rows, pixels.clone());

        Ok(Self {
            object,
            transform: ViewportTransform::with_window(width, center),
            default_window: (width, center),
            width: columns,
            height: rows,
            bits_allocated,
            viewport_bounds: None,
            rgba: pixels,
            handle,
            dirty: false,
        })
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Records the viewer pane size used by [`fit_to_default`].
    ///
    /// [`fit_to_default`]: ImageDisplay::fit_to_default
    pub fn set_viewport_bounds(&mut self, bounds: Size) {
        self.viewport_bounds = Some(bounds);
    }

    /// Stored bit depth (BitsAllocated tag, defaulting to 16).
    #[must_use]
    pub fn bits_allocated(&self) -> u16 {
        self.bits_allocated
    }

    /// Returns the widget handle for the current render.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Encodes the current windowed render as PNG, for the analysis port.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when PNG encoding fails.
    pub fn snapshot_png(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&self.rgba, self.width, self.height, ExtendedColorType::Rgba8)
            .map_err(|e| Error::Io(e.to_string()))?;
        Ok(out)
    }
}

impl ImageDisplay for ScanSurface {
    fn transform(&self) -> ViewportTransform {
        self.transform
    }

    fn set_transform(&mut self, transform: ViewportTransform) {
        let window_changed = transform.window_width != self.transform.window_width
            || (transform.window_center - self.transform.window_center).abs() > f32::EPSILON;
        self.transform = transform;
        if window_changed {
            self.dirty = true;
        }
    }

    fn request_repaint(&mut self) {
        if !self.dirty {
            // Zoom/pan changes are applied by the widget layer at view
            // time; only a VOI window change needs a new render
            return;
        }

        match render_windowed(
            &self.object,
            self.transform.window_width.value(),
            self.transform.window_center,
        ) {
            Ok((pixels, columns, rows)) => {
                self.handle = Handle::from_rgba(columns, rows, pixels.clone());
                self.rgba = pixels;
            }
            Err(err) => {
                // Keep the previous render; decoding succeeded once, so
                // this is unexpected and worth surfacing in the log
                eprintln!("Failed to re-window scan: {}", err);
            }
        }
        self.dirty = false;
    }

    fn fit_to_default(&self) -> ViewportTransform {
        let (width, center) = self.default_window;
        let mut transform = ViewportTransform::with_window(width, center);

        if let Some(bounds) = self.viewport_bounds {
            if bounds.width > 0.0 && bounds.height > 0.0 && self.width > 0 && self.height > 0 {
                #[allow(clippy::cast_precision_loss)]
                let scale_x = bounds.width / self.width as f32;
                #[allow(clippy::cast_precision_loss)]
                let scale_y = bounds.height / self.height as f32;
                transform.scale = Scale::new(scale_x.min(scale_y));
            }
        }

        transform
    }
}

/// Runs the toolkit's VOI LUT with the given window and returns RGBA
/// pixels plus dimensions.
fn render_windowed(
    object: &DefaultDicomObject,
    width: f32,
    center: f32,
) -> Result<(Vec<u8>, u32, u32), DicomError> {
    // Clamp here as well: a degenerate window must never reach the LUT
    let width = WindowWidth::new(width).value();

    let decoded = object
        .decode_pixel_data()
        .map_err(|e| DicomError::from_message(&e.to_string()))?;

    let options = ConvertOptions::new().with_voi_lut(VoiLutOption::Custom(WindowLevel {
        width: f64::from(width),
        center: f64::from(center),
    }));

    let image = decoded
        .to_dynamic_image_with_options(0, &options)
        .map_err(|e| DicomError::DecodingFailed(e.to_string()))?;

    let rgba = image.to_rgba8();
    let (columns, rows) = rgba.dimensions();
    Ok((rgba.into_raw(), columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_scan_rejects_non_dicom_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("not_a_scan.dcm");
        std::fs::write(&path, b"definitely not dicom").expect("write file");

        let result = load_scan(&path);
        assert!(result.is_err());
    }

    #[test]
    fn load_scan_reports_missing_files_as_errors() {
        let result = load_scan(Path::new("/nonexistent/scan.dcm"));
        assert!(result.is_err());
    }
}
