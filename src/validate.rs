//! Precondition checks that raise the shared error taxonomy
//!
//! These inspect values a reader or the configuration layer has already
//! produced. None of them touch the filesystem.

use crate::error::{QuakeError, Result};
use std::fmt;
use std::str::FromStr;

/// Required columns of a station file, in order
pub const STATION_HEADER: [&str; 4] = ["Latitude", "Longitude", "Elevation", "Name"];

/// Required columns of a 1-D velocity model file, in order
pub const VELOCITY_MODEL_HEADER: [&str; 3] = ["Depth", "Vp", "Vs"];

/// Trigger threshold used by the detection stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMethod {
    /// Fixed threshold value
    Static,
    /// Threshold follows a running statistic of the coalescence trace
    Dynamic,
}

impl FromStr for ThresholdMethod {
    type Err = QuakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "static" => Ok(ThresholdMethod::Static),
            "dynamic" => Ok(ThresholdMethod::Dynamic),
            _ => Err(QuakeError::InvalidThresholdMethod),
        }
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdMethod::Static => write!(f, "static"),
            ThresholdMethod::Dynamic => write!(f, "dynamic"),
        }
    }
}

fn header_matches<S: AsRef<str>>(header: &[S], expected: &[&str]) -> bool {
    header.len() == expected.len()
        && header
            .iter()
            .zip(expected)
            .all(|(got, want)| got.as_ref().trim() == *want)
}

/// Check a station file's header row
pub fn check_station_header<S: AsRef<str>>(header: &[S]) -> Result<()> {
    if header_matches(header, &STATION_HEADER) {
        Ok(())
    } else {
        Err(QuakeError::StationFileHeader)
    }
}

/// Check a velocity model file's header row
pub fn check_velocity_model_header<S: AsRef<str>>(header: &[S]) -> Result<()> {
    if header_matches(header, &VELOCITY_MODEL_HEADER) {
        Ok(())
    } else {
        Err(QuakeError::VelocityModelFileHeader)
    }
}

/// Check a channel code against the SEED convention
///
/// Three characters, the last one a component code: `Z` for vertical,
/// `E`/`N` or `1`/`2` for horizontals.
pub fn check_channel_name(trace_id: &str, channel: &str) -> Result<()> {
    let valid = channel.chars().count() == 3
        && matches!(channel.chars().last(), Some('Z' | 'E' | 'N' | '1' | '2'));
    if valid {
        Ok(())
    } else {
        Err(QuakeError::ChannelName {
            trace: trace_id.to_string(),
        })
    }
}

/// Check that upsampling by `upfactor` lands on a multiple of `target_rate`
pub fn check_upfactor(
    trace_id: &str,
    sampling_rate: u32,
    upfactor: u32,
    target_rate: u32,
) -> Result<()> {
    let upsampled = u64::from(sampling_rate) * u64::from(upfactor);
    if target_rate != 0 && upsampled % u64::from(target_rate) == 0 {
        Ok(())
    } else {
        Err(QuakeError::BadUpfactor {
            trace: trace_id.to_string(),
        })
    }
}

/// Check that a start time does not come after an end time
pub fn check_time_span<T: PartialOrd>(start: T, end: T) -> Result<()> {
    if start > end {
        Err(QuakeError::TimeSpan)
    } else {
        Ok(())
    }
}
