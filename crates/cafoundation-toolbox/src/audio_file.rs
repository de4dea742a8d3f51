//! Owned AudioToolbox file handles.

use std::path::Path;

use cafoundation_core::status::codes;
use cafoundation_core::{CoreAudioError, OsStatus, Result, four_char_code, is_success, to_result};
use cafoundation_property::{PropertyId, PropertyInfo, PropertySource};
use core_foundation::base::TCFType;
use core_foundation::dictionary::CFDictionary;
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_foundation::url::CFURL;

use crate::ffi;

const OPEN: &str = "AudioFileOpenURL";

/// An open AudioToolbox audio file
///
/// Closes the underlying `AudioFileID` on drop. Properties are read
/// through [`cafoundation_property::PropertyAccess`].
#[derive(Debug)]
pub struct AudioFile {
    id: ffi::AudioFileID,
}

// SAFETY: an `AudioFileID` may be moved between threads as long as it is
// used by one thread at a time, which `&self`/`&mut self` on a non-`Sync`
// type guarantees.
#[allow(unsafe_code)]
unsafe impl Send for AudioFile {}

impl AudioFile {
    /// Open an audio file read-only
    ///
    /// # Errors
    ///
    /// Returns `CoreAudioError::FileNotFound` if the path does not exist,
    /// otherwise the classified status from `AudioFileOpenURL`.
    #[allow(unsafe_code)]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Opening audio file: {}", path.display());

        if !path.exists() {
            return Err(CoreAudioError::FileNotFound(OPEN.to_string()));
        }

        let url = CFURL::from_path(path, false)
            .ok_or_else(|| CoreAudioError::FileNotFound(OPEN.to_string()))?;

        let mut id: ffi::AudioFileID = std::ptr::null_mut();
        let status = unsafe {
            ffi::AudioFileOpenURL(
                url.as_concrete_TypeRef(),
                ffi::kAudioFileReadPermission,
                0,
                &raw mut id,
            )
        };
        to_result(status, OPEN, ())?;

        tracing::debug!("AudioFileID opened at {:?}", id);
        unsafe { Self::from_raw(id) }.ok_or_else(|| CoreAudioError::InvalidFile(OPEN.to_string()))
    }

    /// Take ownership of an already open `AudioFileID`
    ///
    /// # Safety
    ///
    /// `id` must be a valid open file that nothing else will close.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw(id: ffi::AudioFileID) -> Option<Self> {
        if id.is_null() {
            None
        } else {
            Some(Self { id })
        }
    }

    /// Release ownership without closing the file
    pub fn into_raw(self) -> ffi::AudioFileID {
        let id = self.id;
        std::mem::forget(self);
        id
    }

    pub fn as_raw(&self) -> ffi::AudioFileID {
        self.id
    }
}

impl Drop for AudioFile {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let status = unsafe { ffi::AudioFileClose(self.id) };
        if is_success(status) {
            tracing::debug!("AudioFileID at {:?} closed", self.id);
        } else {
            tracing::warn!(
                "AudioFileClose failed for {:?}: {} ({})",
                self.id,
                four_char_code(status),
                status
            );
        }
    }
}

impl PropertySource for AudioFile {
    type Dictionary = CFDictionary;
    type String = CFString;
    type Number = CFNumber;

    #[allow(unsafe_code)]
    fn property_info(&self, id: PropertyId) -> std::result::Result<PropertyInfo, OsStatus> {
        let mut size: u32 = 0;
        let mut writable: u32 = 0;
        let status =
            unsafe { ffi::AudioFileGetPropertyInfo(self.id, id, &raw mut size, &raw mut writable) };

        if is_success(status) {
            Ok(PropertyInfo {
                size,
                writable: writable != 0,
            })
        } else {
            Err(status)
        }
    }

    #[allow(unsafe_code)]
    fn read_property(&self, id: PropertyId, buf: &mut [u8]) -> std::result::Result<usize, OsStatus> {
        let mut size = u32::try_from(buf.len()).map_err(|_| codes::AUDIO_FILE_BAD_PROPERTY_SIZE)?;
        let status = unsafe {
            ffi::AudioFileGetProperty(self.id, id, &raw mut size, buf.as_mut_ptr().cast())
        };

        if is_success(status) {
            Ok(size as usize)
        } else {
            Err(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafoundation_core::AudioStreamBasicDescription;
    use cafoundation_property::{PropertyAccess, ids};

    const SYSTEM_SOUND: &str = "/System/Library/Sounds/Ping.aiff";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        init_tracing();
        let err = AudioFile::open("/nonexistent/missing.caf").unwrap_err();
        assert_eq!(err, CoreAudioError::FileNotFound(OPEN.to_string()));
    }

    #[test]
    fn test_non_audio_file_is_rejected() {
        init_tracing();
        let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        let err = AudioFile::open(manifest).unwrap_err();
        assert_ne!(err, CoreAudioError::FileNotFound(OPEN.to_string()));
        assert_eq!(err.operation(), OPEN);
    }

    /// Reads metadata from a sound that ships with macOS
    ///
    /// Skipped if the file is missing (e.g. a minimal CI image).
    #[test]
    #[allow(unsafe_code)] // Ownership round trip through the raw handle
    fn test_integration_system_sound() {
        init_tracing();
        if !Path::new(SYSTEM_SOUND).exists() {
            eprintln!("Skipping integration test: {SYSTEM_SOUND} not found");
            return;
        }

        let file = AudioFile::open(SYSTEM_SOUND).unwrap();

        assert!(file.is_property_supported(ids::DATA_FORMAT));
        let format: AudioStreamBasicDescription = file.property(ids::DATA_FORMAT).unwrap();
        assert!(format.sample_rate > 0.0);
        assert!(format.channels_per_frame > 0);

        let duration: f64 = file.property(ids::ESTIMATED_DURATION).unwrap();
        assert!(duration > 0.0);

        // Asking for the wrong width never reads partial data
        let err = file.property::<u16>(ids::DATA_FORMAT).unwrap_err();
        assert!(err.is_size_mismatch());

        if let Ok(info) = file.dictionary_property(ids::INFO_DICTIONARY) {
            eprintln!("Info dictionary has {} entries", info.len());
        }

        let raw = file.into_raw();
        let file = unsafe { AudioFile::from_raw(raw) }.unwrap();
        assert!(file.is_property_supported(ids::FILE_FORMAT));
    }
}
