//! AudioFile property identifiers (`kAudioFileProperty*`).

use cafoundation_core::fourcc::fourcc;

use crate::source::PropertyId;

/// `AudioFileTypeID` (u32)
pub const FILE_FORMAT: PropertyId = fourcc(b"ffmt");
/// `AudioStreamBasicDescription`
pub const DATA_FORMAT: PropertyId = fourcc(b"dfmt");
/// u32, nonzero when the file is optimized for writing
pub const IS_OPTIMIZED: PropertyId = fourcc(b"optm");
/// Opaque codec configuration bytes
pub const MAGIC_COOKIE_DATA: PropertyId = fourcc(b"mgic");
/// u64
pub const AUDIO_DATA_BYTE_COUNT: PropertyId = fourcc(b"bcnt");
/// u64
pub const AUDIO_DATA_PACKET_COUNT: PropertyId = fourcc(b"pcnt");
/// u32
pub const MAXIMUM_PACKET_SIZE: PropertyId = fourcc(b"psze");
/// i64
pub const DATA_OFFSET: PropertyId = fourcc(b"doff");
pub const CHANNEL_LAYOUT: PropertyId = fourcc(b"cmap");
/// u32
pub const DEFERRED_SIZE_UPDATES: PropertyId = fourcc(b"dszu");
pub const MARKER_LIST: PropertyId = fourcc(b"mkls");
pub const REGION_LIST: PropertyId = fourcc(b"rgls");
pub const CHUNK_IDS: PropertyId = fourcc(b"chid");
/// `CFDictionary` of metadata strings
pub const INFO_DICTIONARY: PropertyId = fourcc(b"info");
pub const PACKET_TABLE_INFO: PropertyId = fourcc(b"pnfo");
pub const FORMAT_LIST: PropertyId = fourcc(b"flst");
/// u32
pub const PACKET_SIZE_UPPER_BOUND: PropertyId = fourcc(b"pkub");
/// f64 seconds
pub const RESERVE_DURATION: PropertyId = fourcc(b"rsrv");
/// f64 seconds
pub const ESTIMATED_DURATION: PropertyId = fourcc(b"edur");
/// u32 bits per second
pub const BIT_RATE: PropertyId = fourcc(b"brat");
pub const ID3_TAG: PropertyId = fourcc(b"id3t");
/// i32
pub const SOURCE_BIT_DEPTH: PropertyId = fourcc(b"sbtd");
pub const ALBUM_ART_IMAGE: PropertyId = fourcc(b"aart");
/// u32
pub const AUDIO_TRACK_COUNT: PropertyId = fourcc(b"atct");
/// u32
pub const USE_AUDIO_TRACK: PropertyId = fourcc(b"uatk");

/// Every identifier above with a readable name
pub const ALL: &[(PropertyId, &str)] = &[
    (FILE_FORMAT, "FileFormat"),
    (DATA_FORMAT, "DataFormat"),
    (IS_OPTIMIZED, "IsOptimized"),
    (MAGIC_COOKIE_DATA, "MagicCookieData"),
    (AUDIO_DATA_BYTE_COUNT, "AudioDataByteCount"),
    (AUDIO_DATA_PACKET_COUNT, "AudioDataPacketCount"),
    (MAXIMUM_PACKET_SIZE, "MaximumPacketSize"),
    (DATA_OFFSET, "DataOffset"),
    (CHANNEL_LAYOUT, "ChannelLayout"),
    (DEFERRED_SIZE_UPDATES, "DeferredSizeUpdates"),
    (MARKER_LIST, "MarkerList"),
    (REGION_LIST, "RegionList"),
    (CHUNK_IDS, "ChunkIDs"),
    (INFO_DICTIONARY, "InfoDictionary"),
    (PACKET_TABLE_INFO, "PacketTableInfo"),
    (FORMAT_LIST, "FormatList"),
    (PACKET_SIZE_UPPER_BOUND, "PacketSizeUpperBound"),
    (RESERVE_DURATION, "ReserveDuration"),
    (ESTIMATED_DURATION, "EstimatedDuration"),
    (BIT_RATE, "BitRate"),
    (ID3_TAG, "ID3Tag"),
    (SOURCE_BIT_DEPTH, "SourceBitDepth"),
    (ALBUM_ART_IMAGE, "AlbumArtImage"),
    (AUDIO_TRACK_COUNT, "AudioTrackCount"),
    (USE_AUDIO_TRACK, "UseAudioTrack"),
];

/// Readable name of a known property
pub fn name(id: PropertyId) -> Option<&'static str> {
    ALL.iter()
        .find_map(|&(known, name)| (known == id).then_some(name))
}
