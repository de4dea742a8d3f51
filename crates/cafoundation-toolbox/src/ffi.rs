//! Raw AudioToolbox `AudioFile` declarations.

#![allow(unsafe_code)]
#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]
#![allow(non_snake_case)]

use std::ffi::c_void;

use cafoundation_core::OsStatus;
use core_foundation::url::CFURLRef;

/// Opaque `AudioFileID` handle
pub type AudioFileID = *mut c_void;
pub type AudioFilePropertyID = u32;
pub type AudioFileTypeID = u32;
pub type AudioFilePermissions = i8;
type UInt32 = u32;

pub const kAudioFileReadPermission: AudioFilePermissions = 0x01;
pub const kAudioFileWritePermission: AudioFilePermissions = 0x02;
pub const kAudioFileReadWritePermission: AudioFilePermissions = 0x03;

#[link(name = "AudioToolbox", kind = "framework")]
unsafe extern "C" {
    pub fn AudioFileOpenURL(
        inFileRef: CFURLRef,
        inPermissions: AudioFilePermissions,
        inFileTypeHint: AudioFileTypeID,
        outAudioFile: *mut AudioFileID,
    ) -> OsStatus;

    pub fn AudioFileClose(inAudioFile: AudioFileID) -> OsStatus;

    pub fn AudioFileGetPropertyInfo(
        inAudioFile: AudioFileID,
        inPropertyID: AudioFilePropertyID,
        outDataSize: *mut UInt32,
        isWritable: *mut UInt32,
    ) -> OsStatus;

    pub fn AudioFileGetProperty(
        inAudioFile: AudioFileID,
        inPropertyID: AudioFilePropertyID,
        ioDataSize: *mut UInt32,
        outPropertyData: *mut c_void,
    ) -> OsStatus;
}
