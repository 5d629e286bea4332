pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, FetchArgs, ReconcileArgs};
pub use output::{OutputFormat, OutputFormatter};
