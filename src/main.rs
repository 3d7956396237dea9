use clap::Parser;
use tracing_subscriber::EnvFilter;

use parcel_track::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("parcel_track=debug,info")
    } else {
        EnvFilter::new("parcel_track=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let couriers = cli.couriers.as_deref();
    match cli.command {
        cli::Commands::Track(args) => {
            cli::track::run(args, couriers, cli.format, cli.verbose)?;
        }
        cli::Commands::Find(args) => {
            cli::find::run(args, couriers, cli.format, cli.verbose)?;
        }
        cli::Commands::Couriers(args) => {
            cli::couriers::run(args, couriers, cli.format, cli.verbose)?;
        }
        cli::Commands::Verify(args) => {
            cli::verify::run(args, couriers, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
