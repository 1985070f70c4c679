// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Dicom(DicomError),
    Store(String),
    Analysis(String),
}

/// Specific error types for DICOM loading issues.
/// Used to provide user-friendly error messages without exposing parser internals.
#[derive(Debug, Clone)]
pub enum DicomError {
    /// File is not a DICOM object (bad preamble or missing file meta group)
    NotDicom,

    /// File parsed but contains no pixel data element
    NoPixelData,

    /// Pixel data exists but could not be decoded (unsupported transfer syntax, etc.)
    DecodingFailed(String),

    /// I/O error (file not found, permission denied, etc.)
    IoError(String),

    /// Generic error with raw message
    Other(String),
}

impl DicomError {
    /// Returns a short user-facing message for this error type.
    pub fn user_message(&self) -> &'static str {
        match self {
            DicomError::NotDicom => "The selected file is not a valid DICOM object",
            DicomError::NoPixelData => "The DICOM file contains no image data",
            DicomError::DecodingFailed(_) => "The scan's pixel data could not be decoded",
            DicomError::IoError(_) => "The file could not be read",
            DicomError::Other(_) => "The scan could not be loaded",
        }
    }

    /// Attempts to categorize a raw error message from the DICOM toolkit.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("preamble")
            || msg_lower.contains("magic code")
            || msg_lower.contains("file meta")
        {
            return DicomError::NotDicom;
        }

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("i/o error")
        {
            return DicomError::IoError(msg.to_string());
        }

        if msg_lower.contains("pixel data") && msg_lower.contains("missing") {
            return DicomError::NoPixelData;
        }

        if msg_lower.contains("transfer syntax")
            || msg_lower.contains("decode")
            || msg_lower.contains("codec")
            || msg_lower.contains("fragment")
        {
            return DicomError::DecodingFailed(msg.to_string());
        }

        DicomError::Other(msg.to_string())
    }
}

impl fmt::Display for DicomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DicomError::NotDicom => write!(f, "Not a DICOM file"),
            DicomError::NoPixelData => write!(f, "No pixel data in DICOM object"),
            DicomError::DecodingFailed(msg) => write!(f, "Pixel decoding failed: {}", msg),
            DicomError::IoError(msg) => write!(f, "I/O error: {}", msg),
            DicomError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Dicom(e) => write!(f, "DICOM Error: {}", e),
            Error::Store(e) => write!(f, "Store Error: {}", e),
            Error::Analysis(e) => write!(f, "Analysis Error: {}", e),
        }
    }
}

impl From<DicomError> for Error {
    fn from(err: DicomError) -> Self {
        Error::Dicom(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn store_error_formats_properly() {
        let err = Error::Store("bucket rejected upload".into());
        assert_eq!(format!("{}", err), "Store Error: bucket rejected upload");
    }

    #[test]
    fn dicom_error_from_message_not_dicom() {
        let err = DicomError::from_message("Invalid magic code in file preamble");
        assert!(matches!(err, DicomError::NotDicom));
    }

    #[test]
    fn dicom_error_from_message_io() {
        let err = DicomError::from_message("No such file or directory");
        assert!(matches!(err, DicomError::IoError(_)));
    }

    #[test]
    fn dicom_error_from_message_decoding() {
        let err = DicomError::from_message("Unsupported transfer syntax 1.2.840.10008.1.2.4.70");
        assert!(matches!(err, DicomError::DecodingFailed(_)));
    }

    #[test]
    fn dicom_error_user_messages_are_stable() {
        assert_eq!(
            DicomError::NotDicom.user_message(),
            "The selected file is not a valid DICOM object"
        );
        assert_eq!(
            DicomError::NoPixelData.user_message(),
            "The DICOM file contains no image data"
        );
    }

    #[test]
    fn dicom_error_display() {
        let err = DicomError::DecodingFailed("JPEG codec unavailable".to_string());
        assert!(format!("{}", err).contains("JPEG codec unavailable"));
    }
}
