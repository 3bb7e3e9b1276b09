//! Named failure conditions raised across the detection pipeline
//!
//! Each variant is one specific precondition violation. Nothing here
//! retries or recovers: the caller matches on the variant and decides.
//! Conditions that only spoil one unit of work (a single timestep) carry
//! a short secondary message for the run log, and the pipeline is
//! expected to log it and move on. Everything else ends the run.

use thiserror::Error;

/// Failure conditions shared by file readers, the archive and configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuakeError {
    #[error("incorrect station file header - use:\nLatitude, Longitude, Elevation, Name")]
    StationFileHeader,

    #[error("incorrect velocity model file header - use:\nDepth, Vp, Vs")]
    VelocityModelFileHeader,

    #[error("No data was available for this timestep.")]
    ArchiveEmpty,

    #[error("No .scanmseed data found.")]
    NoScanMseedData,

    #[error("No .StationAvailability files found.")]
    NoStationAvailabilityData,

    #[error(
        "All available data had gaps for this timestep.\n OR: no data present in the archive for the selected stations."
    )]
    DataGap,

    #[error(
        "Channel name header does not conform to\nthe IRIS SEED standard - 3 characters; ending in 'Z' for\nvertical and ending either 'E' & 'N' or '1' & '2' for\nhorizontal components.\n    Working on trace: {trace}"
    )]
    ChannelName { trace: String },

    #[error(
        "chosen upfactor cannot be decimated to\ntarget sampling rate.\n    Working on trace: {trace}"
    )]
    BadUpfactor { trace: String },

    #[error(
        "The Onset object you have created does not inherit from the required base class - see manual."
    )]
    OnsetType,

    #[error(
        "The PhasePicker object you have created does not inherit from the required base class - see manual."
    )]
    PickerType,

    #[error("The start time specified is after the end time.")]
    TimeSpan,

    #[error("Only 'static' or 'dynamic' thresholds are supported.")]
    InvalidThresholdMethod,
}

/// Result type for operations that raise a [`QuakeError`]
pub type Result<T> = std::result::Result<T, QuakeError>;

impl QuakeError {
    /// Stable name of the condition, for log prefixes and matching by text
    pub fn name(&self) -> &'static str {
        match self {
            QuakeError::StationFileHeader => "StationFileHeader",
            QuakeError::VelocityModelFileHeader => "VelocityModelFileHeader",
            QuakeError::ArchiveEmpty => "ArchiveEmpty",
            QuakeError::NoScanMseedData => "NoScanMseedData",
            QuakeError::NoStationAvailabilityData => "NoStationAvailabilityData",
            QuakeError::DataGap => "DataGap",
            QuakeError::ChannelName { .. } => "ChannelName",
            QuakeError::BadUpfactor { .. } => "BadUpfactor",
            QuakeError::OnsetType => "OnsetType",
            QuakeError::PickerType => "PickerType",
            QuakeError::TimeSpan => "TimeSpan",
            QuakeError::InvalidThresholdMethod => "InvalidThresholdMethod",
        }
    }

    /// Short form written to the run log when the pipeline skips a timestep
    pub fn secondary_message(&self) -> Option<&'static str> {
        match self {
            QuakeError::ArchiveEmpty => {
                Some("\t\tNo files found in archive for this time period.")
            }
            QuakeError::DataGap => Some(
                "\t\tAll available data for this time period contains gaps\n\t\tor data not available at start/end of time period",
            ),
            _ => None,
        }
    }

    /// Whether the pipeline may log and continue with the next unit of work
    pub fn is_recoverable(&self) -> bool {
        self.secondary_message().is_some()
    }
}
