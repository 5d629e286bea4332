//! Structured logging setup for appindex
//!
//! Wraps the `tracing-subscriber` registry with the two output shapes the
//! binary and embedding services need: human-readable console lines and
//! JSON records. Initialization happens at most once per process.
//!
//! # Example
//!
//! ```no_run
//! use appindex::util::logging;
//!
//! logging::init_from_env();
//!
//! tracing::info!(repo = "octocat/hello-world", "Detecting technologies");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Crates whose chatter is capped at `warn` unless `RUST_LOG` says otherwise
const NOISY_DEPENDENCIES: [&str; 3] = ["h2", "hyper", "reqwest"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for the `appindex` target
    pub level: Level,

    /// Emit JSON records instead of console lines
    pub use_json: bool,

    pub include_target: bool,

    /// File and line number
    pub include_location: bool,

    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with location and thread metadata
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            ..Default::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::from_default_env();

        if let Ok(directive) = format!("appindex={}", self.level).parse() {
            filter = filter.add_directive(directive);
        }

        if env::var("RUST_LOG").is_err() {
            for krate in NOISY_DEPENDENCIES {
                if let Ok(directive) = format!("{}=warn", krate).parse() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        filter
    }
}

/// Parses a level name case-insensitively, falling back to `INFO`
///
/// ```
/// use appindex::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("verbose"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.env_filter();

        // Logs go to stderr so `-f json` output on stdout stays parseable
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_thread_ids(config.include_thread_ids)
            .with_thread_names(config.include_thread_ids);

        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.use_json {
            registry.with(layer.json()).try_init()
        } else {
            registry.with(layer).try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already configured by host: {}", e);
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Reads `APPINDEX_LOG_LEVEL` and `APPINDEX_LOG_JSON`, plus `RUST_LOG` filtering
pub fn init_from_env() {
    init_logging(config_from_env());
}

fn config_from_env() -> LoggingConfig {
    let level = env::var("APPINDEX_LOG_LEVEL")
        .map(|v| parse_level(&v))
        .unwrap_or(Level::INFO);

    let use_json = env::var("APPINDEX_LOG_JSON")
        .ok()
        .and_then(|v| v.trim().to_lowercase().parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        level,
        use_json,
        ..Default::default()
    }
}

/// Environment settings with the level overridden by command-line flags.
///
/// `log_level` wins, then `verbose` (DEBUG), then `quiet` (ERROR). Without
/// any flag the level comes from `APPINDEX_LOG_LEVEL`, defaulting to INFO.
pub fn config_for_cli(log_level: Option<&str>, verbose: bool, quiet: bool) -> LoggingConfig {
    let mut config = config_from_env();
    if let Some(level_str) = log_level {
        config.level = parse_level(level_str);
    } else if verbose {
        config.level = Level::DEBUG;
    } else if quiet {
        config.level = Level::ERROR;
    }
    config
}

pub fn with_level(level_str: &str) {
    init_logging(LoggingConfig::with_level(parse_level(level_str)));
}
