//! Fixed-size property values.

use cafoundation_core::{AudioStreamBasicDescription, FourCharCode};

/// A plain value decoded from exactly [`PlainData::SIZE`] bytes
///
/// Decoding is explicit and uses native byte order, matching how the
/// framework writes values into the property buffer.
pub trait PlainData: Sized {
    /// Exact byte size the framework must report for this type
    const SIZE: usize;

    /// Decode from a buffer of exactly `SIZE` bytes
    ///
    /// Callers guarantee the length; the accessor checks it before calling.
    fn from_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_plain_data {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PlainData for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_bytes(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_plain_data!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl<T: PlainData, const N: usize> PlainData for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn from_bytes(bytes: &[u8]) -> Self {
        std::array::from_fn(|i| T::from_bytes(&bytes[i * T::SIZE..(i + 1) * T::SIZE]))
    }
}

impl PlainData for FourCharCode {
    const SIZE: usize = u32::SIZE;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self(u32::from_bytes(bytes))
    }
}

impl PlainData for AudioStreamBasicDescription {
    const SIZE: usize = std::mem::size_of::<Self>();

    fn from_bytes(bytes: &[u8]) -> Self {
        let field = |index: usize| {
            let offset = f64::SIZE + index * u32::SIZE;
            u32::from_bytes(&bytes[offset..offset + u32::SIZE])
        };

        Self {
            sample_rate: f64::from_bytes(&bytes[..f64::SIZE]),
            format_id: field(0),
            format_flags: field(1),
            bytes_per_packet: field(2),
            frames_per_packet: field(3),
            bytes_per_frame: field(4),
            channels_per_frame: field(5),
            bits_per_channel: field(6),
            reserved: field(7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asbd_bytes(asbd: &AudioStreamBasicDescription) -> Vec<u8> {
        let mut bytes = asbd.sample_rate.to_ne_bytes().to_vec();
        for field in [
            asbd.format_id,
            asbd.format_flags,
            asbd.bytes_per_packet,
            asbd.frames_per_packet,
            asbd.bytes_per_frame,
            asbd.channels_per_frame,
            asbd.bits_per_channel,
            asbd.reserved,
        ] {
            bytes.extend_from_slice(&field.to_ne_bytes());
        }
        bytes
    }

    #[test]
    fn test_primitive_sizes() {
        assert_eq!(u8::SIZE, 1);
        assert_eq!(i16::SIZE, 2);
        assert_eq!(u32::SIZE, 4);
        assert_eq!(f64::SIZE, 8);
        assert_eq!(<[u32; 3]>::SIZE, 12);
        assert_eq!(FourCharCode::SIZE, 4);
    }

    #[test]
    fn test_primitives_use_native_order() {
        assert_eq!(u32::from_bytes(&7u32.to_ne_bytes()), 7);
        assert_eq!(i64::from_bytes(&(-3i64).to_ne_bytes()), -3);
        assert_eq!(f64::from_bytes(&12.5f64.to_ne_bytes()), 12.5);
    }

    #[test]
    fn test_arrays_decode_elementwise() {
        let mut bytes = Vec::new();
        for v in [1u16, 2, 3] {
            bytes.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(<[u16; 3]>::from_bytes(&bytes), [1, 2, 3]);
    }

    #[test]
    fn test_stream_description_decodes_framework_layout() {
        let asbd = AudioStreamBasicDescription::standard_pcm(44100.0, 2, 24);
        let bytes = asbd_bytes(&asbd);
        assert_eq!(bytes.len(), AudioStreamBasicDescription::SIZE);
        assert_eq!(AudioStreamBasicDescription::from_bytes(&bytes), asbd);
    }
}
