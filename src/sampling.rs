//! Conversion between continuous time and discrete sample counts
//!
//! Waveforms and coalescence functions are indexed by sample, while
//! padding, windows and onsets are configured in seconds. These helpers
//! move between the two at a given sampling rate.
//!
//! Sampling rates are integral: any fractional part is truncated before
//! `time_to_samples` uses the rate.

/// Products within this many ULPs of an integer are treated as that
/// integer before taking the ceiling in [`trim_to_sample_boundary`].
const SAMPLE_SNAP_ULPS: f64 = 4.0;

/// Convert a duration in seconds to the nearest whole number of samples
///
/// The sampling rate is truncated to an integer, the product is rounded
/// half to even, and the result is returned as a signed count. Negative
/// times give negative counts.
///
/// # Example
/// ```
/// use quakemig::sampling::time_to_samples;
///
/// assert_eq!(time_to_samples(1.5, 100.0), 150);
/// assert_eq!(time_to_samples(-0.25, 20.0), -5);
/// ```
pub fn time_to_samples(time: f64, sampling_rate: f64) -> i64 {
    (time * sampling_rate.trunc()).round_ties_even() as i64
}

/// Convert a sample count back to seconds at the (truncated) sampling rate
pub fn samples_to_time(samples: i64, sampling_rate: f64) -> f64 {
    samples as f64 / sampling_rate.trunc()
}

/// Stretch a padding duration so it spans a whole number of samples
///
/// Returns `ceil(time * sampling_rate) / sampling_rate`, rounded to the
/// millisecond. The result is never shorter than the requested padding
/// (for rates that divide 1000) and applying the function twice gives
/// the same value as applying it once.
///
/// # Example
/// ```
/// use quakemig::sampling::trim_to_sample_boundary;
///
/// assert_eq!(trim_to_sample_boundary(1.003, 100.0), 1.01);
/// ```
pub fn trim_to_sample_boundary(time: f64, sampling_rate: f64) -> f64 {
    let samples = ceil_snapped(time * sampling_rate);
    (samples / sampling_rate * 1000.0).round() / 1000.0
}

fn ceil_snapped(value: f64) -> f64 {
    let nearest = value.round();
    let tolerance = value.abs().max(1.0) * SAMPLE_SNAP_ULPS * f64::EPSILON;
    if (value - nearest).abs() <= tolerance {
        nearest
    } else {
        value.ceil()
    }
}
