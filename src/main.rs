use clap::Parser;
use listwatch::adapter::inbound::cli::command::{Cli, Commands};
use listwatch::adapter::inbound::cli::output::{self, OutputConfig};
use listwatch::adapter::inbound::cli::{context, daemon, exchanges, stats, sync, verify};
use listwatch::error::Result;
use listwatch::infrastructure::config::settings::Config;
use tokio::signal;
use tracing::{error, info, warn};

/// Exit status for a run cut short by Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config = match context::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    if cli.quiet {
        config.logging.init_with_level("warn");
    } else {
        config.init_logging();
    }
    info!("listwatch starting");

    let runs_until_interrupted = cli.command.runs_until_interrupted();
    tokio::select! {
        result = dispatch(&config, cli.command) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                output::error(&e.to_string());
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            if !runs_until_interrupted {
                warn!("Interrupted before the command finished");
                output::error("Interrupted");
                std::process::exit(EXIT_INTERRUPTED);
            }
            info!("Shutdown signal received");
        }
    }

    info!("listwatch stopped");
}

async fn dispatch(config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Sync(args) => sync::execute(config, &args).await,
        Commands::Daemon(args) => daemon::execute(config, &args).await,
        Commands::Stats => stats::execute(config).await,
        Commands::Verify(args) => verify::execute(config, &args).await,
        Commands::Exchanges => {
            exchanges::execute(config);
            Ok(())
        }
    }
}
