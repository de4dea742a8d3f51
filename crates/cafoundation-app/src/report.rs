//! Property report for a single audio file.
//!
//! Built generically over any [`PropertySource`], so the same code runs
//! against an AudioToolbox file or the in-memory mock used in tests.

use std::fmt;
use std::time::{Duration, Instant};

use cafoundation_core::{AudioStreamBasicDescription, CoreAudioError, FourCharCode, Result};
use cafoundation_property::{PropertyAccess, PropertyId, PropertySource, ids};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Support and size of one property
#[derive(Debug, Clone, Serialize)]
pub struct PropertyEntry {
    pub id: FourCharCode,
    pub name: Option<&'static str>,
    pub supported: bool,
    pub writable: bool,
    pub size: Option<u32>,
}

/// Wall-clock time spent on one step of the report
#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub step: &'static str,
    #[serde(rename = "elapsed_us", serialize_with = "serialize_micros")]
    pub elapsed: Duration,
}

fn serialize_micros<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
}

/// Everything `cainspect` reports about a file
///
/// Each reading keeps its own error so one unsupported property does not
/// hide the rest.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub path: String,
    pub properties: Vec<PropertyEntry>,
    #[serde(serialize_with = "serialize_reading")]
    pub file_format: Result<FourCharCode>,
    #[serde(serialize_with = "serialize_reading")]
    pub data_format: Result<AudioStreamBasicDescription>,
    #[serde(serialize_with = "serialize_reading")]
    pub estimated_duration: Result<f64>,
    #[serde(serialize_with = "serialize_reading")]
    pub bit_rate: Result<u32>,
    #[serde(serialize_with = "serialize_reading")]
    pub packet_count: Result<u64>,
    pub timings: Vec<Timing>,
}

fn serialize_reading<T: Serialize, S: Serializer>(
    reading: &Result<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    match reading {
        Ok(value) => map.serialize_entry("value", value)?,
        Err(error) => map.serialize_entry("error", &error.to_string())?,
    }
    map.end()
}

/// Run one step inside a span and record how long it took
fn timed<T>(timings: &mut Vec<Timing>, step: &'static str, run: impl FnOnce() -> T) -> T {
    let _span = tracing::debug_span!("inspect", step).entered();
    let start = Instant::now();
    let value = run();
    let elapsed = start.elapsed();
    tracing::debug!(elapsed_us = elapsed.as_micros() as u64, "{step} done");
    timings.push(Timing { step, elapsed });
    value
}

/// Query each of `queried` plus the well-known readings from `source`
pub fn inspect<S: PropertySource + ?Sized>(
    source: &S,
    path: &str,
    queried: &[PropertyId],
) -> Report {
    tracing::debug!("Inspecting {} ({} properties)", path, queried.len());
    let mut timings = Vec::new();

    let properties = timed(&mut timings, "properties", || {
        queried
            .iter()
            .map(|&id| {
                let info = source.property_info(id).ok();
                PropertyEntry {
                    id: FourCharCode(id),
                    name: ids::name(id),
                    supported: info.is_some(),
                    writable: info.is_some_and(|info| info.writable),
                    size: info.map(|info| info.size),
                }
            })
            .collect()
    });

    let file_format = timed(&mut timings, "file_format", || {
        source.property(ids::FILE_FORMAT)
    });
    let data_format = timed(&mut timings, "data_format", || {
        source.property(ids::DATA_FORMAT)
    });
    let estimated_duration = timed(&mut timings, "estimated_duration", || {
        source.property(ids::ESTIMATED_DURATION)
    });
    let bit_rate = timed(&mut timings, "bit_rate", || source.property(ids::BIT_RATE));
    let packet_count = timed(&mut timings, "packet_count", || {
        source.property(ids::AUDIO_DATA_PACKET_COUNT)
    });

    Report {
        path: path.to_string(),
        properties,
        file_format,
        data_format,
        estimated_duration,
        bit_rate,
        packet_count,
        timings,
    }
}

impl Report {
    /// The first reading that failed, in report order
    pub fn first_failure(&self) -> Option<&CoreAudioError> {
        [
            self.file_format.as_ref().err(),
            self.data_format.as_ref().err(),
            self.estimated_duration.as_ref().err(),
            self.bit_rate.as_ref().err(),
            self.packet_count.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .next()
    }

    /// Human-readable timing table, one line per step
    pub fn render_timings(&self) -> String {
        let mut out = String::from("Timings:\n");
        for timing in &self.timings {
            out.push_str(&format!(
                "  {:<20} {:>10.3} ms\n",
                timing.step,
                timing.elapsed.as_secs_f64() * 1000.0
            ));
        }
        out
    }
}

fn write_reading<T>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    reading: &Result<T>,
    show: impl Fn(&T) -> String,
) -> fmt::Result {
    match reading {
        Ok(value) => writeln!(f, "{label}: {}", show(value)),
        Err(error) => writeln!(f, "{label}: <unavailable> ({error})"),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path)?;
        writeln!(f)?;

        writeln!(f, "Properties ({} queried):", self.properties.len())?;
        writeln!(f, "{}", "=".repeat(60))?;
        for entry in &self.properties {
            let name = entry.name.unwrap_or("?");
            match entry.size {
                Some(size) => writeln!(
                    f,
                    "  {} {:<22} {:>8} bytes{}",
                    entry.id,
                    name,
                    size,
                    if entry.writable { "  writable" } else { "" }
                )?,
                None => writeln!(f, "  {} {:<22} unsupported", entry.id, name)?,
            }
        }
        writeln!(f)?;

        match &self.data_format {
            Ok(format) => writeln!(f, "{format}")?,
            Err(error) => writeln!(f, "Audio Format Description: <unavailable> ({error})")?,
        }
        write_reading(f, "File Format", &self.file_format, ToString::to_string)?;
        write_reading(f, "Estimated Duration", &self.estimated_duration, |d| {
            format!("{d:.3} s")
        })?;
        write_reading(f, "Bit Rate", &self.bit_rate, |b| format!("{b} bps"))?;
        write_reading(f, "Packet Count", &self.packet_count, ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafoundation_core::status::codes;
    use cafoundation_property::mock::MockSource;

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

    fn wav_like_source() -> MockSource {
        let asbd = AudioStreamBasicDescription::standard_pcm(44100.0, 2, 16);
        MockSource::new()
            .with_bytes(ids::FILE_FORMAT, FourCharCode::new(b"WAVE").get().to_ne_bytes())
            .with_bytes(ids::DATA_FORMAT, asbd_bytes(&asbd))
            .with_writable(ids::DATA_FORMAT)
            .with_bytes(ids::ESTIMATED_DURATION, 2.5f64.to_ne_bytes())
            .with_bytes(ids::BIT_RATE, 1_411_200u32.to_ne_bytes())
            .with_bytes(ids::AUDIO_DATA_PACKET_COUNT, 110_250u64.to_ne_bytes())
    }

    #[test]
    fn test_inspect_collects_readings() {
        let source = wav_like_source();
        let report = inspect(&source, "test.wav", &[ids::DATA_FORMAT, ids::MAGIC_COOKIE_DATA]);

        assert_eq!(report.properties.len(), 2);
        let data_format = &report.properties[0];
        assert_eq!(data_format.name, Some("DataFormat"));
        assert!(data_format.supported);
        assert!(data_format.writable);
        assert_eq!(data_format.size, Some(40));

        let cookie = &report.properties[1];
        assert!(!cookie.supported);
        assert_eq!(cookie.size, None);

        assert_eq!(report.file_format, Ok(FourCharCode::new(b"WAVE")));
        assert!(report.data_format.as_ref().unwrap().is_pcm());
        assert_eq!(report.estimated_duration, Ok(2.5));
        assert_eq!(report.bit_rate, Ok(1_411_200));
        assert_eq!(report.packet_count, Ok(110_250));
        assert!(report.first_failure().is_none());
    }

    #[test]
    fn test_failures_are_kept_per_reading() {
        let source = MockSource::new()
            .with_info_error(ids::FILE_FORMAT, codes::AUDIO_FILE_PERMISSIONS)
            .with_bytes(ids::ESTIMATED_DURATION, 1.0f64.to_ne_bytes());
        let report = inspect(&source, "locked.caf", &[]);

        assert_eq!(
            report.first_failure(),
            Some(&CoreAudioError::PermissionDenied("typed_property".to_string()))
        );
        assert_eq!(report.estimated_duration, Ok(1.0));
        assert!(report.bit_rate.is_err());
    }

    #[test]
    fn test_text_rendering() {
        let report = inspect(&wav_like_source(), "test.wav", &[ids::DATA_FORMAT, ids::ID3_TAG]);
        let text = report.to_string();

        assert!(text.starts_with("File: test.wav\n"));
        assert!(text.contains("'dfmt' DataFormat"));
        assert!(text.contains("writable"));
        assert!(text.contains("'id3t' ID3Tag"));
        assert!(text.contains("unsupported"));
        assert!(text.contains("Format ID: 'lpcm'"));
        assert!(text.contains("File Format: 'WAVE'"));
        assert!(text.contains("Estimated Duration: 2.500 s"));
    }

    #[test]
    fn test_json_rendering() {
        let source = MockSource::new().with_bytes(ids::BIT_RATE, 320_000u32.to_ne_bytes());
        let report = inspect(&source, "song.mp3", &[ids::BIT_RATE]);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["path"], "song.mp3");
        assert_eq!(json["bit_rate"]["value"], 320_000);
        assert_eq!(json["properties"][0]["id"], "'brat'");
        assert_eq!(json["properties"][0]["size"], 4);
        assert!(
            json["data_format"]["error"]
                .as_str()
                .unwrap()
                .contains("typed_property failed")
        );
        assert_eq!(json["timings"].as_array().unwrap().len(), 6);
        assert!(json["timings"][0]["elapsed_us"].is_u64());
    }

    #[test]
    fn test_every_step_is_timed_in_order() {
        let report = inspect(&wav_like_source(), "test.wav", &[ids::DATA_FORMAT]);

        let steps: Vec<_> = report.timings.iter().map(|timing| timing.step).collect();
        assert_eq!(
            steps,
            [
                "properties",
                "file_format",
                "data_format",
                "estimated_duration",
                "bit_rate",
                "packet_count"
            ]
        );

        let text = report.render_timings();
        assert!(text.starts_with("Timings:\n"));
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("  estimated_duration"));
        assert!(text.trim_end().ends_with("ms"));
    }
}
