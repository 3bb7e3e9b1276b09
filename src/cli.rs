//! CLI argument parsing for quakemig

use crate::kernel::Sigma;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for kernel summaries
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "quakemig")]
#[command(version)]
#[command(about = "Kernels and sample arithmetic for seismic migration", long_about = None)]
pub struct Cli {
    /// Also write the log to <STEM>.log
    #[arg(long = "log", value_name = "STEM", global = true)]
    pub log: Option<PathBuf>,

    /// Enable debug-level log output
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a duration to the nearest whole number of samples
    Samples {
        /// Duration in seconds
        #[arg(short, long, allow_hyphen_values = true)]
        time: f64,
        /// Sampling rate in Hz (fractional part is ignored)
        #[arg(short, long)]
        rate: f64,
    },

    /// Stretch a padding duration to a whole number of samples
    Trim {
        /// Padding in seconds
        #[arg(short, long, allow_hyphen_values = true)]
        time: f64,
        /// Sampling rate in Hz
        #[arg(short, long)]
        rate: f64,
    },

    /// Build a 3-D Gaussian kernel and print its summary
    Kernel {
        #[arg(long)]
        nx: usize,
        #[arg(long)]
        ny: usize,
        #[arg(long)]
        nz: usize,
        /// One sigma for all axes, or three comma-separated values
        #[arg(long, value_parser = parse_sigma)]
        sigma: Sigma,
        /// Output format (text or json)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Parse `S` or `SX,SY,SZ`
pub fn parse_sigma(s: &str) -> Result<Sigma, String> {
    let values = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid sigma '{}': {}", v.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [s] => Ok(Sigma::Isotropic(*s)),
        [sx, sy, sz] => Ok(Sigma::Anisotropic([*sx, *sy, *sz])),
        _ => Err(format!(
            "sigma takes 1 or 3 comma-separated values, got {}",
            values.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_sigma() {
        assert_eq!(parse_sigma("1.5"), Ok(Sigma::Isotropic(1.5)));
    }

    #[test]
    fn test_parse_vector_sigma() {
        assert_eq!(
            parse_sigma("1, 2,3.5"),
            Ok(Sigma::Anisotropic([1.0, 2.0, 3.5]))
        );
    }

    #[test]
    fn test_parse_sigma_rejects_two_values() {
        assert!(parse_sigma("1,2").is_err());
        assert!(parse_sigma("abc").is_err());
    }

    #[test]
    fn test_cli_parses_kernel() {
        let cli = Cli::try_parse_from([
            "quakemig", "kernel", "--nx", "3", "--ny", "4", "--nz", "5", "--sigma", "2",
        ])
        .unwrap();
        match cli.command {
            Command::Kernel { nx, ny, nz, sigma, .. } => {
                assert_eq!((nx, ny, nz), (3, 4, 5));
                assert_eq!(sigma, Sigma::Isotropic(2.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_trim_accepts_negative_time() {
        let cli = Cli::try_parse_from(["quakemig", "trim", "--time", "-0.5", "--rate", "100"])
            .unwrap();
        match cli.command {
            Command::Trim { time, rate } => assert_eq!((time, rate), (-0.5, 100.0)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_log_flag() {
        let cli = Cli::try_parse_from([
            "quakemig", "samples", "--time", "1.5", "--rate", "100", "--log", "out/run",
        ])
        .unwrap();
        assert_eq!(cli.log, Some(PathBuf::from("out/run")));
    }
}
