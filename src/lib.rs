//! quakemig - shared helpers for a seismic migration detection pipeline
//!
//! This library provides the Gaussian kernels used to smooth coalescence
//! volumes, time/sample arithmetic at a given sampling rate, timing
//! instrumentation, logging bootstrap, and the error taxonomy raised by
//! file readers, the waveform archive and configuration checks.

pub mod cli;
pub mod error;
pub mod fs;
pub mod json_output;
pub mod kernel;
pub mod logging;
pub mod sampling;
pub mod timing;
pub mod validate;

pub use error::QuakeError;
pub use kernel::{gaussian_1d, gaussian_3d, Sigma};
pub use sampling::{time_to_samples, trim_to_sample_boundary};
