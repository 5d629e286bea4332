use appindex::cli::commands::{CliArgs, Commands};
use appindex::cli::handlers::{handle_detect, handle_reconcile};
use appindex::util::logging;
use appindex::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    logging::init_logging(logging::config_for_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("appindex v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args).await,
        Commands::Reconcile(reconcile_args) => handle_reconcile(reconcile_args).await,
    };

    std::process::exit(exit_code);
}
