//! Error taxonomy for Core Audio operations.

use crate::fourcc::four_char_code;
use crate::status::{OsStatus, codes};

/// Result type alias using our `CoreAudioError` type
pub type Result<T> = std::result::Result<T, CoreAudioError>;

/// Comprehensive error type for Core Audio operations
///
/// Every variant carries the name of the failing operation. Named kinds
/// describe themselves with a fixed message; only `Unknown` renders the
/// raw status, both as a four-character code and in decimal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreAudioError {
    #[error("Audio file not found during {0}")]
    FileNotFound(String),

    #[error("Unsupported file type during {0}")]
    UnsupportedFileType(String),

    #[error("Unsupported data format during {0}")]
    UnsupportedDataFormat(String),

    #[error("Invalid audio file during {0}")]
    InvalidFile(String),

    #[error("Permission denied during {0}")]
    PermissionDenied(String),

    #[error("Audio property not found during {0}")]
    PropertyNotFound(String),

    #[error("Memory allocation failed during {0}")]
    MemoryAllocation(String),

    #[error("{operation} failed with error: {} ({status})", four_char_code(*.status))]
    Unknown { status: OsStatus, operation: String },
}

impl CoreAudioError {
    pub fn unknown(status: OsStatus, operation: impl Into<String>) -> Self {
        Self::Unknown {
            status,
            operation: operation.into(),
        }
    }

    /// Name of the operation that failed
    pub fn operation(&self) -> &str {
        match self {
            Self::FileNotFound(op)
            | Self::UnsupportedFileType(op)
            | Self::UnsupportedDataFormat(op)
            | Self::InvalidFile(op)
            | Self::PermissionDenied(op)
            | Self::PropertyNotFound(op)
            | Self::MemoryAllocation(op)
            | Self::Unknown { operation: op, .. } => op,
        }
    }

    /// The framework status behind this error, where one exists
    ///
    /// Kinds that are synthesized by this library rather than reported by
    /// the framework (`PropertyNotFound`, `MemoryAllocation`,
    /// `FileNotFound`) return `None`.
    pub const fn status(&self) -> Option<OsStatus> {
        match self {
            Self::UnsupportedFileType(_) => Some(codes::AUDIO_FILE_UNSUPPORTED_FILE_TYPE),
            Self::UnsupportedDataFormat(_) => Some(codes::AUDIO_FILE_UNSUPPORTED_DATA_FORMAT),
            Self::InvalidFile(_) => Some(codes::AUDIO_FILE_INVALID_FILE),
            Self::PermissionDenied(_) => Some(codes::AUDIO_FILE_PERMISSIONS),
            Self::Unknown { status, .. } => Some(*status),
            Self::FileNotFound(_) | Self::PropertyNotFound(_) | Self::MemoryAllocation(_) => None,
        }
    }

    /// Whether this is the synthetic property size mismatch
    pub const fn is_size_mismatch(&self) -> bool {
        matches!(
            self,
            Self::Unknown {
                status: crate::status::SIZE_MISMATCH,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_kinds_use_static_description() {
        let err = CoreAudioError::UnsupportedDataFormat("open".to_string());
        assert_eq!(err.to_string(), "Unsupported data format during open");

        let err = CoreAudioError::PropertyNotFound("dictionary_property".to_string());
        assert_eq!(
            err.to_string(),
            "Audio property not found during dictionary_property"
        );
    }

    #[test]
    fn test_unknown_renders_four_char_code() {
        let err = CoreAudioError::unknown(0x7074_793F, "read_property");
        assert_eq!(
            err.to_string(),
            "read_property failed with error: 'pty?' (1886681407)"
        );

        let err = CoreAudioError::unknown(-50, "read_property");
        assert_eq!(err.to_string(), "read_property failed with error: -50 (-50)");
    }

    #[test]
    fn test_status_and_operation_recovery() {
        let err = CoreAudioError::unknown(-43, "open");
        assert_eq!(err.status(), Some(-43));
        assert_eq!(err.operation(), "open");

        let err = CoreAudioError::PermissionDenied("open".to_string());
        assert_eq!(err.status(), Some(codes::AUDIO_FILE_PERMISSIONS));

        let err = CoreAudioError::PropertyNotFound("typed_property".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.operation(), "typed_property");
    }

    #[test]
    fn test_size_mismatch_detection() {
        assert!(CoreAudioError::unknown(crate::status::SIZE_MISMATCH, "x").is_size_mismatch());
        assert!(!CoreAudioError::unknown(-50, "x").is_size_mismatch());
        assert!(!CoreAudioError::InvalidFile("x".to_string()).is_size_mismatch());
    }
}
