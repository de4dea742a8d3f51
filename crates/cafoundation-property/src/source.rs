//! The resource handle contract.

use std::ffi::c_void;

use cafoundation_core::OsStatus;
use serde::Serialize;

/// Numeric property identifier, usually a four-character code
pub type PropertyId = u32;

/// Result of the size query for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyInfo {
    /// Size in bytes of the property value
    pub size: u32,
    /// Whether the property can be set on this resource
    pub writable: bool,
}

/// A framework object type that can adopt a retained reference
pub trait FromRetained: Sized {
    /// Take ownership of one reference to the object at `ptr`
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live object of the implementing
    /// type for which the caller holds one reference. That reference is
    /// transferred to the returned value and must not be released again.
    unsafe fn from_retained(ptr: *const c_void) -> Option<Self>;
}

/// An open resource whose properties can be queried
///
/// Implementations forward to the framework's "get property info" and
/// "get property" calls. Errors carry the raw framework status; the
/// accessor functions classify them. The caller owns the resource; nothing
/// in this crate opens, closes or synchronizes it.
pub trait PropertySource {
    /// Dictionary-like property value
    type Dictionary: FromRetained;
    /// String-like property value
    type String: FromRetained;
    /// Number-like property value
    type Number: FromRetained;

    /// Query the byte size and writability of a property
    fn property_info(&self, id: PropertyId) -> Result<PropertyInfo, OsStatus>;

    /// Copy a property value into `buf`, returning the number of bytes written
    ///
    /// Object-valued properties write a single retained pointer in native
    /// byte order.
    fn read_property(&self, id: PropertyId, buf: &mut [u8]) -> Result<usize, OsStatus>;
}
