use anyhow::Result;
use clap::Parser;
use quakemig::cli::{Cli, Command, OutputFormat};
use quakemig::json_output::KernelSummary;
use quakemig::logging::{LogConfig, Logger, LOG_SPACER};
use quakemig::{kernel, sampling, timing};

/// Build and install the process logger from CLI flags
fn init_logging(args: &Cli) -> Result<Logger> {
    let config = LogConfig {
        logstem: args.log.clone(),
        debug: args.debug,
    };
    let logger = Logger::new(&config)?;
    logger.install()?;
    Ok(logger)
}

fn print_summary(summary: &KernelSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", summary.to_json()?),
        OutputFormat::Text => {
            println!(
                "shape:      {} x {} x {}",
                summary.shape[0], summary.shape[1], summary.shape[2]
            );
            println!("sigma:      {:?}", summary.sigma.per_axis());
            println!(
                "peak:       {} at {:?}",
                summary.peak, summary.peak_index
            );
            println!("sum:        {:.6}", summary.sum);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let logger = init_logging(&args)?;
    if let Some(path) = logger.log_path() {
        tracing::debug!("logging to {}", path.display());
    }

    match args.command {
        Command::Samples { time, rate } => {
            if rate <= 0.0 {
                anyhow::bail!("Invalid value for --rate: {} (must be > 0)", rate);
            }
            println!("{}", sampling::time_to_samples(time, rate));
        }
        Command::Trim { time, rate } => {
            if rate <= 0.0 {
                anyhow::bail!("Invalid value for --rate: {} (must be > 0)", rate);
            }
            println!("{}", sampling::trim_to_sample_boundary(time, rate));
        }
        Command::Kernel {
            nx,
            ny,
            nz,
            sigma,
            format,
        } => {
            if sigma.per_axis().iter().any(|s| *s <= 0.0) {
                anyhow::bail!("Invalid value for --sigma: every sigma must be > 0");
            }
            tracing::info!("{}", LOG_SPACER);
            tracing::info!("\tBuilding {} x {} x {} Gaussian kernel", nx, ny, nz);
            let volume = timing::timeit("gaussian_3d", || kernel::gaussian_3d(nx, ny, nz, sigma));
            tracing::info!("{}", LOG_SPACER);
            print_summary(&KernelSummary::from_kernel(&volume, sigma), format)?;
        }
    }

    Ok(())
}
