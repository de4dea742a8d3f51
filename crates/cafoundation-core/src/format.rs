//! Stream format descriptions.
//!
//! Mirrors AudioToolbox's `AudioStreamBasicDescription` and the predicates
//! and constructors commonly needed when inspecting a file's data format.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::fourcc::{FourCharCode, fourcc};

/// Audio format identifiers
pub mod format_ids {
    use super::fourcc;

    pub const LINEAR_PCM: u32 = fourcc(b"lpcm");
    pub const APPLE_LOSSLESS: u32 = fourcc(b"alac");
    pub const MPEG4_AAC: u32 = fourcc(b"aac ");
    pub const MPEG_LAYER_3: u32 = fourcc(b".mp3");
    pub const FLAC: u32 = fourcc(b"flac");
    pub const OPUS: u32 = fourcc(b"opus");
    pub const APPLE_IMA4: u32 = fourcc(b"ima4");
    pub const ULAW: u32 = fourcc(b"ulaw");
    pub const ALAW: u32 = fourcc(b"alaw");
}

/// Audio format flags (`kAudioFormatFlag*`)
pub mod format_flags {
    pub const IS_FLOAT: u32 = 1 << 0;
    pub const IS_BIG_ENDIAN: u32 = 1 << 1;
    pub const IS_SIGNED_INTEGER: u32 = 1 << 2;
    pub const IS_PACKED: u32 = 1 << 3;
    pub const IS_ALIGNED_HIGH: u32 = 1 << 4;
    pub const IS_NON_INTERLEAVED: u32 = 1 << 5;
    pub const IS_NON_MIXABLE: u32 = 1 << 6;
}

/// Layout-compatible mirror of `AudioStreamBasicDescription`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AudioStreamBasicDescription {
    pub sample_rate: f64,
    #[serde(serialize_with = "serialize_format_id")]
    pub format_id: u32,
    pub format_flags: u32,
    pub bytes_per_packet: u32,
    pub frames_per_packet: u32,
    pub bytes_per_frame: u32,
    pub channels_per_frame: u32,
    pub bits_per_channel: u32,
    pub reserved: u32,
}

fn serialize_format_id<S: Serializer>(format_id: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    FourCharCode(*format_id).serialize(serializer)
}

impl AudioStreamBasicDescription {
    /// Size in bytes of the framework struct
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Signed integer, packed, interleaved linear PCM
    pub fn standard_pcm(sample_rate: f64, channels: u32, bits_per_channel: u32) -> Self {
        let bytes_per_sample = bits_per_channel / 8;

        Self {
            sample_rate,
            format_id: format_ids::LINEAR_PCM,
            format_flags: format_flags::IS_SIGNED_INTEGER | format_flags::IS_PACKED,
            bytes_per_packet: bytes_per_sample * channels,
            frames_per_packet: 1,
            bytes_per_frame: bytes_per_sample * channels,
            channels_per_frame: channels,
            bits_per_channel,
            reserved: 0,
        }
    }

    /// 32-bit float, packed, interleaved linear PCM
    pub fn standard_float(sample_rate: f64, channels: u32) -> Self {
        Self {
            sample_rate,
            format_id: format_ids::LINEAR_PCM,
            format_flags: format_flags::IS_FLOAT | format_flags::IS_PACKED,
            bytes_per_packet: 4 * channels,
            frames_per_packet: 1,
            bytes_per_frame: 4 * channels,
            channels_per_frame: channels,
            bits_per_channel: 32,
            reserved: 0,
        }
    }

    pub const fn is_pcm(&self) -> bool {
        self.format_id == format_ids::LINEAR_PCM
    }

    pub const fn is_interleaved(&self) -> bool {
        self.format_flags & format_flags::IS_NON_INTERLEAVED == 0
    }

    pub const fn is_float(&self) -> bool {
        self.format_flags & format_flags::IS_FLOAT != 0
    }

    /// Bytes per sample, only meaningful for linear PCM
    pub const fn bytes_per_sample(&self) -> Option<u32> {
        if self.is_pcm() {
            Some(self.bits_per_channel / 8)
        } else {
            None
        }
    }

    pub const fn format_code(&self) -> FourCharCode {
        FourCharCode(self.format_id)
    }
}

impl fmt::Display for AudioStreamBasicDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Audio Format Description:")?;
        writeln!(f, "  Format ID: {}", self.format_code())?;
        writeln!(f, "  Sample Rate: {:?} Hz", self.sample_rate)?;
        writeln!(f, "  Format Flags: 0x{:X}", self.format_flags)?;
        writeln!(f, "  Bytes Per Packet: {}", self.bytes_per_packet)?;
        writeln!(f, "  Frames Per Packet: {}", self.frames_per_packet)?;
        writeln!(f, "  Bytes Per Frame: {}", self.bytes_per_frame)?;
        writeln!(f, "  Channels Per Frame: {}", self.channels_per_frame)?;
        write!(f, "  Bits Per Channel: {}", self.bits_per_channel)
    }
}
