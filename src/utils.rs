//! Helpers for Czech date parsing and output path validation.
//!
//! - Parsing of `day. month-name year` dates as printed by kosmonautix.cz
//! - Early writability check for the output file's directory

use crate::error::{Result, ScrapeError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static CZECH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.\s*(\p{L}+)\s+(\d{4})$").unwrap());

/// Czech month names as `(nominative, genitive)`, January first.
///
/// Article pages print the genitive ("1. ledna 2020"), but the nominative
/// form is accepted as well.
const CZECH_MONTHS: [(&str, &str); 12] = [
    ("leden", "ledna"),
    ("únor", "února"),
    ("březen", "března"),
    ("duben", "dubna"),
    ("květen", "května"),
    ("červen", "června"),
    ("červenec", "července"),
    ("srpen", "srpna"),
    ("září", "září"),
    ("říjen", "října"),
    ("listopad", "listopadu"),
    ("prosinec", "prosince"),
];

/// Look up the month number (1-12) for a Czech month name.
///
/// Matching is case-insensitive.
pub fn czech_month(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    CZECH_MONTHS
        .iter()
        .position(|(nominative, genitive)| name == *nominative || name == *genitive)
        .map(|i| i as u32 + 1)
}

/// Parse a Czech `day. month-name year` date such as `"1. leden 2020"`.
///
/// # Errors
///
/// Returns [`ScrapeError::DateFormat`] if the text does not match the
/// pattern, the month name is unknown, or the day does not exist.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_czech_date("1. leden 2020")?, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
/// ```
pub fn parse_czech_date(text: &str) -> Result<NaiveDate> {
    let invalid = || ScrapeError::DateFormat(text.to_string());
    let caps = CZECH_DATE.captures(text.trim()).ok_or_else(invalid)?;

    let day: u32 = caps[1].parse().map_err(|_| invalid())?;
    let month = czech_month(&caps[2]).ok_or_else(invalid)?;
    let year: i32 = caps[3].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Ensure the directory that will hold `path` exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
/// Runs before any scraping so a bad output path fails without network
/// traffic.
///
/// # Errors
///
/// Returns [`ScrapeError::Io`] if the directory cannot be created or is not
/// writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_parent(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).await?;

    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
