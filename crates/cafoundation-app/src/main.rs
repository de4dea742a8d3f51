//! cainspect
//!
//! Lists the properties an audio file supports and decodes the common
//! ones (format, duration, bit rate, packet count) through AudioToolbox.
//! `--timings` adds the time spent on each reading.

// Report building is only reached through the macOS file path outside tests
#![cfg_attr(not(target_os = "macos"), allow(dead_code))]

mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use cafoundation_core::FourCharCode;
use cafoundation_core::check;
use cafoundation_property::{PropertyId, ids};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::report::Report;

/// Audio file property inspector
#[derive(Parser, Debug)]
#[command(name = "cainspect")]
#[command(about = "Inspect audio file properties through AudioToolbox", long_about = None)]
struct Args {
    /// Audio file to inspect
    file: PathBuf,

    /// Property to list, as a four-character code such as `dfmt`
    /// (repeatable; defaults to every known AudioFile property)
    #[arg(short, long = "property", value_name = "CODE")]
    properties: Vec<FourCharCode>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Exit with an error if any reading fails
    #[arg(long)]
    strict: bool,

    /// Print how long each reading took
    #[arg(long)]
    timings: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cainspect=info,cafoundation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let queried: Vec<PropertyId> = if args.properties.is_empty() {
        ids::ALL.iter().map(|&(id, _)| id).collect()
    } else {
        args.properties.iter().map(|code| code.get()).collect()
    };

    let report = inspect_file(&args.file, &queried)?;

    if args.strict {
        if let Some(error) = report.first_failure() {
            check::unwrap_or_exit::<()>(Err(error.clone()));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
        if args.timings {
            println!();
            print!("{}", report.render_timings());
        }
    }

    Ok(())
}

#[cfg(target_os = "macos")]
fn inspect_file(path: &Path, queried: &[PropertyId]) -> Result<Report> {
    use anyhow::Context;
    use cafoundation_toolbox::AudioFile;

    let file = AudioFile::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    Ok(report::inspect(
        &file,
        &path.display().to_string(),
        queried,
    ))
}

#[cfg(not(target_os = "macos"))]
fn inspect_file(path: &Path, _queried: &[PropertyId]) -> Result<Report> {
    anyhow::bail!(
        "Cannot open {}: AudioToolbox is only available on macOS",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_codes_parse() {
        let args = Args::try_parse_from([
            "cainspect",
            "song.m4a",
            "--property",
            "dfmt",
            "-p",
            "'brat'",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.file, PathBuf::from("song.m4a"));
        assert_eq!(
            args.properties,
            vec![FourCharCode(ids::DATA_FORMAT), FourCharCode(ids::BIT_RATE)]
        );
        assert!(args.json);
        assert!(!args.strict);
        assert!(!args.timings);
    }

    #[test]
    fn test_bad_property_code_is_rejected() {
        let result = Args::try_parse_from(["cainspect", "song.m4a", "--property", "toolong"]);
        assert!(result.is_err());
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_inspect_requires_macos() {
        let err = inspect_file(Path::new("song.m4a"), &[]).unwrap_err();
        assert!(err.to_string().contains("only available on macOS"));
    }
}
