//! CSV rate-profile loader.
//!
//! # CSV format
//!
//! One row per constant-rate segment, plus exactly one base-rate row whose
//! `start` and `end` are empty.  Day bounds are optional; leave both empty
//! for a segment that applies every day.
//!
//! ```csv
//! start,end,rate,first_day,last_day
//! ,,30,,
//! 10.5,11,100,,
//! 11,11.5,75,,
//! 14.5,15,80,1,5
//! ```
//!
//! Rows keep their file order, which is also the lookup priority.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::intensity::{PiecewiseIntensity, RateSegment};
use crate::ArrivalError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ProfileRecord {
    start:     Option<f64>,
    end:       Option<f64>,
    rate:      f64,
    first_day: Option<u32>,
    last_day:  Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`PiecewiseIntensity`] from a CSV file.
pub fn load_profile_csv(path: &Path) -> Result<PiecewiseIntensity, ArrivalError> {
    let file = std::fs::File::open(path)?;
    load_profile_reader(file)
}

/// Like [`load_profile_csv`] but accepts any `Read` source.
pub fn load_profile_reader<R: Read>(reader: R) -> Result<PiecewiseIntensity, ArrivalError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut base_rate: Option<f64> = None;
    let mut segments: Vec<RateSegment> = Vec::new();

    for (line, result) in csv_reader.deserialize::<ProfileRecord>().enumerate() {
        let row = result.map_err(|e| ArrivalError::Parse(e.to_string()))?;
        // Header is line 1.
        let line = line + 2;

        if !row.rate.is_finite() {
            return Err(ArrivalError::Parse(format!("line {line}: rate must be finite")));
        }

        match (row.start, row.end) {
            (None, None) => {
                if base_rate.replace(row.rate).is_some() {
                    return Err(ArrivalError::Parse(format!(
                        "line {line}: more than one base-rate row"
                    )));
                }
            }
            (Some(start), Some(end)) => {
                if !(start.is_finite() && end.is_finite() && start < end) {
                    return Err(ArrivalError::Parse(format!(
                        "line {line}: segment [{start}, {end}) is empty"
                    )));
                }
                let mut segment = RateSegment::new(start, end, row.rate);
                if let Some(days) = parse_days(row.first_day, row.last_day, line)? {
                    segment = segment.on_days(days);
                }
                segments.push(segment);
            }
            _ => {
                return Err(ArrivalError::Parse(format!(
                    "line {line}: start and end must both be set or both be empty"
                )));
            }
        }
    }

    let base_rate = base_rate
        .ok_or_else(|| ArrivalError::Parse("profile has no base-rate row".into()))?;

    Ok(segments
        .into_iter()
        .fold(PiecewiseIntensity::new(base_rate), PiecewiseIntensity::segment))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_days(
    first: Option<u32>,
    last:  Option<u32>,
    line:  usize,
) -> Result<Option<std::ops::RangeInclusive<u32>>, ArrivalError> {
    match (first, last) {
        (None, None) => Ok(None),
        (Some(a), Some(b)) if a <= b => Ok(Some(a..=b)),
        (Some(a), Some(b)) => Err(ArrivalError::Parse(format!(
            "line {line}: day range {a}..={b} is empty"
        ))),
        _ => Err(ArrivalError::Parse(format!(
            "line {line}: first_day and last_day must both be set or both be empty"
        ))),
    }
}
