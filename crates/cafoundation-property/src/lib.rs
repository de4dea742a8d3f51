//! Typed property access for AudioToolbox resources.
//!
//! AudioToolbox exposes file metadata through a two-phase protocol: ask for
//! a property's size, then fetch it into a caller-provided buffer. This
//! crate wraps that protocol behind the [`PropertySource`] trait and turns
//! every failure into a [`cafoundation_core::CoreAudioError`].
//!
//! Fixed-size values are decoded through [`PlainData`] with an exact size
//! check. Dictionary, string and number properties come back as framework
//! objects whose reference is adopted by the returned value.

pub mod accessor;
pub mod ids;
pub mod plain;
pub mod source;

#[cfg(target_os = "macos")]
mod cf;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use accessor::{PropertyAccess, PropertyData};
pub use plain::PlainData;
pub use source::{FromRetained, PropertyId, PropertyInfo, PropertySource};
