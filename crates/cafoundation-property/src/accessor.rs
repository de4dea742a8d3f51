//! Size-then-fetch property reads.
//!
//! Every read follows the same steps:
//!
//! 1. Query the property's size. A failing status aborts the read; a
//!    reported size of zero is `PropertyNotFound` for object and raw reads.
//! 2. For typed reads, compare the reported size with [`PlainData::SIZE`]
//!    and fail with a size mismatch before fetching anything.
//! 3. Fetch into a scratch buffer sized to the reported size, then decode
//!    the bytes or adopt the returned object.
//!
//! The scratch buffer is owned by the call and dropped on every exit path.

use std::ffi::c_void;

use cafoundation_core::status::{SIZE_MISMATCH, failure};
use cafoundation_core::{CoreAudioError, FourCharCode, Result};
use tracing::{debug, trace};

use crate::plain::PlainData;
use crate::source::{FromRetained, PropertyId, PropertyInfo, PropertySource};

const TYPED_PROPERTY: &str = "typed_property";
const DICTIONARY_PROPERTY: &str = "dictionary_property";
const STRING_PROPERTY: &str = "string_property";
const NUMBER_PROPERTY: &str = "number_property";
const RAW_PROPERTY: &str = "raw_property";

/// Owned bytes of a property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyData {
    pub id: PropertyId,
    pub bytes: Vec<u8>,
}

impl PropertyData {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Decode the bytes as `T`, with the same exact-size rule as typed reads
    pub fn decode<T: PlainData>(&self) -> Result<T> {
        if self.bytes.len() != T::SIZE {
            return Err(size_mismatch(self.id, T::SIZE, self.bytes.len()));
        }
        Ok(T::from_bytes(&self.bytes))
    }
}

fn size_mismatch(id: PropertyId, expected: usize, actual: usize) -> CoreAudioError {
    debug!(
        property = %FourCharCode(id),
        expected,
        actual,
        "property size mismatch"
    );
    CoreAudioError::unknown(SIZE_MISMATCH, "Property size mismatch")
}

fn query_info<S: PropertySource + ?Sized>(
    source: &S,
    id: PropertyId,
    operation: &str,
) -> Result<PropertyInfo> {
    trace!(property = %FourCharCode(id), operation, "querying property info");
    source.property_info(id).map_err(|status| {
        debug!(property = %FourCharCode(id), status, operation, "property info query failed");
        failure(status, operation)
    })
}

fn scratch_buffer(size: usize, operation: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| CoreAudioError::MemoryAllocation(operation.to_string()))?;
    buf.resize(size, 0);
    Ok(buf)
}

fn fetch<S: PropertySource + ?Sized>(
    source: &S,
    id: PropertyId,
    buf: &mut [u8],
    operation: &str,
) -> Result<usize> {
    trace!(property = %FourCharCode(id), size = buf.len(), operation, "fetching property");
    let written = source.read_property(id, buf).map_err(|status| {
        debug!(property = %FourCharCode(id), status, operation, "property fetch failed");
        failure(status, operation)
    })?;
    Ok(written.min(buf.len()))
}

/// Read the leading pointer-width bytes as an object pointer
fn object_pointer(bytes: &[u8]) -> *const c_void {
    const WIDTH: usize = std::mem::size_of::<usize>();

    bytes
        .get(..WIDTH)
        .and_then(|raw| <[u8; WIDTH]>::try_from(raw).ok())
        .map_or(std::ptr::null(), |raw| {
            std::ptr::with_exposed_provenance(usize::from_ne_bytes(raw))
        })
}

/// Check whether the resource supports a property
///
/// True whenever the size query succeeds, even for a zero size.
pub fn is_supported<S: PropertySource + ?Sized>(source: &S, id: PropertyId) -> bool {
    source.property_info(id).is_ok()
}

/// Check whether a property can be set on the resource
pub fn is_writable<S: PropertySource + ?Sized>(source: &S, id: PropertyId) -> bool {
    matches!(source.property_info(id), Ok(info) if info.writable)
}

/// Read a fixed-size property as `T`
///
/// The reported size must equal `T::SIZE` exactly; otherwise the read
/// fails with a size mismatch and nothing is fetched. A reported size of
/// zero is never a value, even for a zero-sized `T`.
pub fn typed<T: PlainData, S: PropertySource + ?Sized>(source: &S, id: PropertyId) -> Result<T> {
    let info = query_info(source, id, TYPED_PROPERTY)?;

    let reported = info.size as usize;
    // A zero-sized `T` would otherwise accept an empty property
    if reported == 0 && T::SIZE == 0 {
        return Err(CoreAudioError::PropertyNotFound(TYPED_PROPERTY.to_string()));
    }
    if reported != T::SIZE {
        return Err(size_mismatch(id, T::SIZE, reported));
    }

    let mut buf = scratch_buffer(reported, TYPED_PROPERTY)?;
    let written = fetch(source, id, &mut buf, TYPED_PROPERTY)?;
    if written != T::SIZE {
        return Err(size_mismatch(id, T::SIZE, written));
    }

    Ok(T::from_bytes(&buf))
}

fn object<O: FromRetained, S: PropertySource + ?Sized>(
    source: &S,
    id: PropertyId,
    operation: &str,
) -> Result<O> {
    let info = query_info(source, id, operation)?;
    if info.size == 0 {
        return Err(CoreAudioError::PropertyNotFound(operation.to_string()));
    }

    let mut buf = scratch_buffer(info.size as usize, operation)?;
    let written = fetch(source, id, &mut buf, operation)?;
    let ptr = object_pointer(&buf[..written]);

    // SAFETY: a successful fetch of an object-valued property leaves one
    // retained reference in the buffer, which is adopted exactly once here.
    #[allow(unsafe_code)]
    let adopted = unsafe { O::from_retained(ptr) };

    adopted.ok_or_else(|| {
        debug!(property = %FourCharCode(id), operation, "property returned a null object");
        CoreAudioError::PropertyNotFound(operation.to_string())
    })
}

/// Read a dictionary-valued property, taking ownership of the object
pub fn dictionary<S: PropertySource + ?Sized>(source: &S, id: PropertyId) -> Result<S::Dictionary> {
    object(source, id, DICTIONARY_PROPERTY)
}

/// Read a string-valued property, taking ownership of the object
pub fn string<S: PropertySource + ?Sized>(source: &S, id: PropertyId) -> Result<S::String> {
    object(source, id, STRING_PROPERTY)
}

/// Read a number-valued property, taking ownership of the object
pub fn number<S: PropertySource + ?Sized>(source: &S, id: PropertyId) -> Result<S::Number> {
    object(source, id, NUMBER_PROPERTY)
}

/// Read a property's bytes without interpreting them
pub fn raw<S: PropertySource + ?Sized>(source: &S, id: PropertyId) -> Result<PropertyData> {
    let info = query_info(source, id, RAW_PROPERTY)?;
    if info.size == 0 {
        return Err(CoreAudioError::PropertyNotFound(RAW_PROPERTY.to_string()));
    }

    let mut bytes = scratch_buffer(info.size as usize, RAW_PROPERTY)?;
    let written = fetch(source, id, &mut bytes, RAW_PROPERTY)?;
    bytes.truncate(written);

    Ok(PropertyData { id, bytes })
}

/// Method-style access to the functions in this module
pub trait PropertyAccess: PropertySource {
    fn is_property_supported(&self, id: PropertyId) -> bool {
        is_supported(self, id)
    }

    fn is_property_writable(&self, id: PropertyId) -> bool {
        is_writable(self, id)
    }

    fn property<T: PlainData>(&self, id: PropertyId) -> Result<T> {
        typed(self, id)
    }

    fn dictionary_property(&self, id: PropertyId) -> Result<Self::Dictionary> {
        dictionary(self, id)
    }

    fn string_property(&self, id: PropertyId) -> Result<Self::String> {
        string(self, id)
    }

    fn number_property(&self, id: PropertyId) -> Result<Self::Number> {
        number(self, id)
    }

    fn raw_property(&self, id: PropertyId) -> Result<PropertyData> {
        raw(self, id)
    }
}

impl<S: PropertySource + ?Sized> PropertyAccess for S {}
