//! Core types shared across the cafoundation crates.
//!
//! This crate translates AudioToolbox `OSStatus` codes into a structured
//! error taxonomy, renders four-character codes for diagnostics, and models
//! the stream format description the framework reports for audio files.
//!
//! The fail-fast helpers in [`check`] sit on top of this and are never used
//! by the library operations themselves.

pub mod check;
pub mod error;
pub mod format;
pub mod fourcc;
pub mod status;

pub use error::{CoreAudioError, Result};
pub use format::AudioStreamBasicDescription;
pub use fourcc::{FourCharCode, ParseFourCharCodeError, four_char_code};
pub use status::{OsStatus, classify, is_success, to_result};
