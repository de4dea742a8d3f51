//! Core Foundation objects returned by AudioToolbox properties.
//!
//! Property getters follow the create rule: the object written into the
//! buffer carries a reference the caller must release. Wrapping under the
//! create rule hands that reference to the Rust value, which releases it
//! on drop.

#![allow(unsafe_code)]

use std::ffi::c_void;

use core_foundation::base::TCFType;
use core_foundation::dictionary::CFDictionary;
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;

use crate::source::FromRetained;

macro_rules! impl_from_retained {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromRetained for $ty {
                unsafe fn from_retained(ptr: *const c_void) -> Option<Self> {
                    if ptr.is_null() {
                        return None;
                    }
                    // SAFETY: caller guarantees a live object of this type
                    // with one reference owned by us.
                    Some(unsafe { <$ty>::wrap_under_create_rule(ptr.cast()) })
                }
            }
        )*
    };
}

impl_from_retained!(CFDictionary, CFString, CFNumber);
