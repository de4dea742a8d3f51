//! In-memory property source for tests.
//!
//! `MockSource` answers the size query and fetch calls from a table and
//! counts how often each is made. Object properties hand out a fresh
//! retained [`MockObject`] on every fetch, so tests can observe that the
//! accessor adopts and releases each one exactly once.

use std::cell::Cell;
use std::collections::HashMap;
use std::ffi::c_void;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cafoundation_core::OsStatus;
use cafoundation_core::status::codes;

use crate::source::{FromRetained, PropertyId, PropertyInfo, PropertySource};

const POINTER_WIDTH: usize = std::mem::size_of::<usize>();

#[derive(Debug, Clone)]
enum MockValue {
    Bytes(Vec<u8>),
    Object { value: String, live: Arc<AtomicUsize> },
    Null,
    Fail(OsStatus),
}

#[derive(Debug, Clone)]
struct MockProperty {
    info: Result<PropertyInfo, OsStatus>,
    value: MockValue,
}

/// Scripted [`PropertySource`] with call counters
#[derive(Debug, Default)]
pub struct MockSource {
    properties: HashMap<PropertyId, MockProperty>,
    info_calls: Cell<usize>,
    fetch_calls: Cell<usize>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(mut self, id: PropertyId, size: usize, value: MockValue) -> Self {
        let info = PropertyInfo {
            size: size as u32,
            writable: false,
        };
        self.properties.insert(
            id,
            MockProperty {
                info: Ok(info),
                value,
            },
        );
        self
    }

    /// A property whose size is the length of `bytes`
    pub fn with_bytes(self, id: PropertyId, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        self.insert(id, bytes.len(), MockValue::Bytes(bytes))
    }

    /// An object property; `live` counts objects handed out and not yet released
    pub fn with_object(self, id: PropertyId, value: &str, live: &Arc<AtomicUsize>) -> Self {
        self.insert(
            id,
            POINTER_WIDTH,
            MockValue::Object {
                value: value.to_string(),
                live: Arc::clone(live),
            },
        )
    }

    /// An object property whose fetch succeeds with a null pointer
    pub fn with_null_object(self, id: PropertyId) -> Self {
        self.insert(id, POINTER_WIDTH, MockValue::Null)
    }

    /// A property whose size query fails with `status`
    pub fn with_info_error(mut self, id: PropertyId, status: OsStatus) -> Self {
        self.properties.insert(
            id,
            MockProperty {
                info: Err(status),
                value: MockValue::Fail(status),
            },
        );
        self
    }

    /// A property that reports `size` but whose fetch fails with `status`
    pub fn with_fetch_error(self, id: PropertyId, size: u32, status: OsStatus) -> Self {
        self.insert(id, size as usize, MockValue::Fail(status))
    }

    /// Override the size reported by the size query
    pub fn with_reported_size(mut self, id: PropertyId, size: u32) -> Self {
        if let Some(Ok(info)) = self.properties.get_mut(&id).map(|p| p.info.as_mut()) {
            info.size = size;
        }
        self
    }

    /// Mark a property as writable
    pub fn with_writable(mut self, id: PropertyId) -> Self {
        if let Some(Ok(info)) = self.properties.get_mut(&id).map(|p| p.info.as_mut()) {
            info.writable = true;
        }
        self
    }

    /// Number of size queries made so far
    pub fn info_calls(&self) -> usize {
        self.info_calls.get()
    }

    /// Number of fetches made so far
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.get()
    }
}

fn write_pointer(buf: &mut [u8], addr: usize) -> Result<usize, OsStatus> {
    let dest = buf
        .get_mut(..POINTER_WIDTH)
        .ok_or(codes::AUDIO_FILE_BAD_PROPERTY_SIZE)?;
    dest.copy_from_slice(&addr.to_ne_bytes());
    Ok(POINTER_WIDTH)
}

impl PropertySource for MockSource {
    type Dictionary = MockObject;
    type String = MockObject;
    type Number = MockObject;

    fn property_info(&self, id: PropertyId) -> Result<PropertyInfo, OsStatus> {
        self.info_calls.set(self.info_calls.get() + 1);
        self.properties
            .get(&id)
            .map_or(Err(codes::AUDIO_FILE_UNSUPPORTED_PROPERTY), |p| p.info)
    }

    fn read_property(&self, id: PropertyId, buf: &mut [u8]) -> Result<usize, OsStatus> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        let property = self
            .properties
            .get(&id)
            .ok_or(codes::AUDIO_FILE_UNSUPPORTED_PROPERTY)?;

        match &property.value {
            MockValue::Bytes(bytes) => {
                let dest = buf
                    .get_mut(..bytes.len())
                    .ok_or(codes::AUDIO_FILE_BAD_PROPERTY_SIZE)?;
                dest.copy_from_slice(bytes);
                Ok(bytes.len())
            }
            MockValue::Object { value, live } => {
                if buf.len() < POINTER_WIDTH {
                    return Err(codes::AUDIO_FILE_BAD_PROPERTY_SIZE);
                }
                live.fetch_add(1, Ordering::SeqCst);
                let payload = Box::new(MockPayload {
                    value: value.clone(),
                    live: Arc::clone(live),
                });
                write_pointer(buf, Box::into_raw(payload).expose_provenance())
            }
            MockValue::Null => write_pointer(buf, 0),
            MockValue::Fail(status) => Err(*status),
        }
    }
}

#[derive(Debug)]
struct MockPayload {
    value: String,
    live: Arc<AtomicUsize>,
}

impl Drop for MockPayload {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Object handed out by [`MockSource`], released on drop
#[derive(Debug)]
pub struct MockObject(Box<MockPayload>);

impl MockObject {
    pub fn value(&self) -> &str {
        &self.0.value
    }
}

impl FromRetained for MockObject {
    #[allow(unsafe_code)]
    unsafe fn from_retained(ptr: *const c_void) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        // SAFETY: non-null pointers written by `MockSource` come from
        // `Box::into_raw` and are handed out once per fetch.
        Some(Self(unsafe {
            Box::from_raw(ptr.cast::<MockPayload>().cast_mut())
        }))
    }
}
