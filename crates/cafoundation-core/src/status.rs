//! `OSStatus` translation.
//!
//! Every AudioToolbox call returns a signed 32-bit status. Zero is success;
//! anything else is a failure, often a packed four-character tag.

use crate::error::{CoreAudioError, Result};
use crate::fourcc::fourcc;

/// Raw status code returned by AudioToolbox calls
pub type OsStatus = i32;

/// The success sentinel (`noErr`)
pub const NO_ERR: OsStatus = 0;

/// Synthetic status used when a property's reported size does not match
/// the size of the requested type. Never produced by the framework.
pub const SIZE_MISMATCH: OsStatus = -1;

/// Well-known status codes
pub mod codes {
    use super::{OsStatus, fourcc};

    const fn tag(bytes: &[u8; 4]) -> OsStatus {
        fourcc(bytes) as OsStatus
    }

    // General audio errors (CoreAudioBaseTypes.h)
    pub const UNIMPLEMENTED: OsStatus = -4;
    pub const FILE_NOT_FOUND: OsStatus = -43;
    pub const FILE_PERMISSION: OsStatus = -54;
    pub const TOO_MANY_FILES_OPEN: OsStatus = -42;
    pub const BAD_FILE_PATH: OsStatus = tag(b"!pth");
    pub const PARAM: OsStatus = -50;
    pub const MEM_FULL: OsStatus = -108;

    // AudioFile
    pub const AUDIO_FILE_UNSPECIFIED: OsStatus = tag(b"wht?");
    pub const AUDIO_FILE_UNSUPPORTED_FILE_TYPE: OsStatus = tag(b"typ?");
    pub const AUDIO_FILE_UNSUPPORTED_DATA_FORMAT: OsStatus = tag(b"fmt?");
    pub const AUDIO_FILE_UNSUPPORTED_PROPERTY: OsStatus = tag(b"pty?");
    pub const AUDIO_FILE_BAD_PROPERTY_SIZE: OsStatus = tag(b"!siz");
    pub const AUDIO_FILE_PERMISSIONS: OsStatus = tag(b"prm?");
    pub const AUDIO_FILE_NOT_OPTIMIZED: OsStatus = tag(b"optm");
    pub const AUDIO_FILE_INVALID_CHUNK: OsStatus = tag(b"chk?");
    pub const AUDIO_FILE_DOES_NOT_ALLOW_64BIT_DATA_SIZE: OsStatus = tag(b"off?");
    pub const AUDIO_FILE_INVALID_PACKET_OFFSET: OsStatus = tag(b"pck?");
    pub const AUDIO_FILE_INVALID_PACKET_DEPENDENCY: OsStatus = tag(b"dep?");
    pub const AUDIO_FILE_INVALID_FILE: OsStatus = tag(b"dta?");
    pub const AUDIO_FILE_OPERATION_NOT_SUPPORTED: OsStatus = 0x6F70_3F3F; // 'op??'
    pub const AUDIO_FILE_NOT_OPEN: OsStatus = -38;
    pub const AUDIO_FILE_END_OF_FILE: OsStatus = -39;
    pub const AUDIO_FILE_POSITION: OsStatus = -40;

    // AudioFormat
    pub const AUDIO_FORMAT_UNSPECIFIED: OsStatus = tag(b"what");
    pub const AUDIO_FORMAT_UNSUPPORTED_PROPERTY: OsStatus = tag(b"prop");
    pub const AUDIO_FORMAT_BAD_PROPERTY_SIZE: OsStatus = tag(b"!siz");
    pub const AUDIO_FORMAT_BAD_SPECIFIER_SIZE: OsStatus = tag(b"!spc");
    pub const AUDIO_FORMAT_UNSUPPORTED_DATA_FORMAT: OsStatus = tag(b"fmt?");
    pub const AUDIO_FORMAT_UNKNOWN_FORMAT: OsStatus = tag(b"!fmt");

    // AudioUnit properties
    pub const AUDIO_UNIT_INVALID_PROPERTY: OsStatus = -10879;
    pub const AUDIO_UNIT_INVALID_PROPERTY_VALUE: OsStatus = -10851;
    pub const AUDIO_UNIT_PROPERTY_NOT_WRITABLE: OsStatus = -10865;
    pub const AUDIO_UNIT_PROPERTY_NOT_IN_USE: OsStatus = -10847;
}

/// Check if a status indicates success
pub const fn is_success(status: OsStatus) -> bool {
    status == NO_ERR
}

/// Classify a status into the error taxonomy
///
/// Success maps to `None`. A fixed table of AudioFile codes maps to named
/// kinds; every other code is preserved in [`CoreAudioError::Unknown`].
pub fn classify(status: OsStatus, operation: &str) -> Option<CoreAudioError> {
    let name = || operation.to_string();
    let error = match status {
        NO_ERR => return None,
        codes::AUDIO_FILE_UNSUPPORTED_FILE_TYPE => CoreAudioError::UnsupportedFileType(name()),
        codes::AUDIO_FILE_UNSUPPORTED_DATA_FORMAT => CoreAudioError::UnsupportedDataFormat(name()),
        codes::AUDIO_FILE_INVALID_FILE => CoreAudioError::InvalidFile(name()),
        codes::AUDIO_FILE_PERMISSIONS => CoreAudioError::PermissionDenied(name()),
        _ => CoreAudioError::Unknown {
            status,
            operation: name(),
        },
    };
    Some(error)
}

/// Convert a status reported through an `Err` path into an error
///
/// Like [`classify`], but a stray success code becomes `Unknown` instead of
/// being dropped.
pub fn failure(status: OsStatus, operation: &str) -> CoreAudioError {
    classify(status, operation).unwrap_or_else(|| CoreAudioError::Unknown {
        status,
        operation: operation.to_string(),
    })
}

/// Return `value` on success, otherwise the classified error
pub fn to_result<T>(status: OsStatus, operation: &str, value: T) -> Result<T> {
    match classify(status, operation) {
        None => Ok(value),
        Some(error) => Err(error),
    }
}

/// Errors from opening, parsing or accessing an audio file
pub const fn is_file_error(status: OsStatus) -> bool {
    matches!(
        status,
        codes::AUDIO_FILE_UNSUPPORTED_FILE_TYPE
            | codes::AUDIO_FILE_UNSUPPORTED_DATA_FORMAT
            | codes::AUDIO_FILE_INVALID_FILE
            | codes::AUDIO_FILE_PERMISSIONS
            | codes::FILE_NOT_FOUND
    )
}

/// Errors from AudioFormat queries
pub const fn is_format_error(status: OsStatus) -> bool {
    matches!(
        status,
        codes::AUDIO_FORMAT_UNSUPPORTED_PROPERTY
            | codes::AUDIO_FORMAT_UNSUPPORTED_DATA_FORMAT
            | codes::AUDIO_FORMAT_UNKNOWN_FORMAT
    )
}

/// Errors from AudioUnit property access
pub const fn is_property_error(status: OsStatus) -> bool {
    matches!(
        status,
        codes::AUDIO_UNIT_INVALID_PROPERTY
            | codes::AUDIO_UNIT_INVALID_PROPERTY_VALUE
            | codes::AUDIO_UNIT_PROPERTY_NOT_WRITABLE
            | codes::AUDIO_UNIT_PROPERTY_NOT_IN_USE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_only_for_zero() {
        assert!(is_success(0));
        for status in [1, -1, -50, i32::MIN, i32::MAX, codes::AUDIO_FILE_INVALID_FILE] {
            assert!(!is_success(status), "{status} is not success");
        }
    }

    #[test]
    fn test_tag_constants_are_big_endian() {
        assert_eq!(codes::AUDIO_FILE_UNSUPPORTED_DATA_FORMAT, 0x666D_743F);
        assert_eq!(codes::AUDIO_FILE_UNSUPPORTED_FILE_TYPE, 0x7479_703F);
        assert_eq!(codes::AUDIO_FILE_PERMISSIONS, 0x7072_6D3F);
        assert_eq!(codes::AUDIO_FILE_INVALID_FILE, 0x6474_613F);
    }

    #[test]
    fn test_classify_success_is_none() {
        assert!(classify(NO_ERR, "open").is_none());
    }

    #[test]
    fn test_classify_known_table() {
        assert_eq!(
            classify(codes::AUDIO_FILE_UNSUPPORTED_FILE_TYPE, "open"),
            Some(CoreAudioError::UnsupportedFileType("open".to_string()))
        );
        assert_eq!(
            classify(codes::AUDIO_FILE_UNSUPPORTED_DATA_FORMAT, "open"),
            Some(CoreAudioError::UnsupportedDataFormat("open".to_string()))
        );
        assert_eq!(
            classify(codes::AUDIO_FILE_INVALID_FILE, "open"),
            Some(CoreAudioError::InvalidFile("open".to_string()))
        );
        assert_eq!(
            classify(codes::AUDIO_FILE_PERMISSIONS, "open"),
            Some(CoreAudioError::PermissionDenied("open".to_string()))
        );
    }

    #[test]
    fn test_classify_preserves_unknown_codes() {
        for status in [-50, -43, codes::AUDIO_FILE_UNSUPPORTED_PROPERTY, 0x6162_6364] {
            assert_eq!(
                classify(status, "read"),
                Some(CoreAudioError::Unknown {
                    status,
                    operation: "read".to_string()
                })
            );
        }
    }

    #[test]
    fn test_classify_is_pure() {
        for status in [codes::AUDIO_FILE_PERMISSIONS, -50, 0, 0x7777_7777] {
            assert_eq!(classify(status, "op"), classify(status, "op"));
        }
    }

    #[test]
    fn test_to_result() {
        assert_eq!(to_result(NO_ERR, "op", 42), Ok(42));
        assert_eq!(
            to_result(codes::AUDIO_FILE_INVALID_FILE, "op", 42),
            Err(CoreAudioError::InvalidFile("op".to_string()))
        );
    }

    #[test]
    fn test_failure_never_drops_success_code() {
        assert_eq!(
            failure(NO_ERR, "op"),
            CoreAudioError::Unknown {
                status: 0,
                operation: "op".to_string()
            }
        );
    }

    #[test]
    fn test_categories() {
        assert!(is_file_error(codes::FILE_NOT_FOUND));
        assert!(is_file_error(codes::AUDIO_FILE_PERMISSIONS));
        assert!(!is_file_error(codes::PARAM));

        assert!(is_format_error(codes::AUDIO_FORMAT_UNKNOWN_FORMAT));
        assert!(is_format_error(codes::AUDIO_FORMAT_UNSUPPORTED_DATA_FORMAT));
        assert!(!is_format_error(codes::AUDIO_FILE_INVALID_FILE));

        assert!(is_property_error(codes::AUDIO_UNIT_PROPERTY_NOT_WRITABLE));
        assert!(!is_property_error(codes::AUDIO_FILE_UNSUPPORTED_PROPERTY));
    }
}
