//! AudioToolbox bindings.
//!
//! Provides [`AudioFile`], an owned `AudioFileID` that implements
//! [`cafoundation_property::PropertySource`] so every accessor in the
//! property crate works on real files. Only built on macOS; on other
//! targets the crate is empty apart from [`AVAILABLE`].

#[cfg(target_os = "macos")]
mod audio_file;
#[cfg(target_os = "macos")]
pub mod ffi;

#[cfg(target_os = "macos")]
pub use audio_file::AudioFile;

/// Whether AudioToolbox is available on this target
pub const AVAILABLE: bool = cfg!(target_os = "macos");
