use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Technology detection and tech-stack annotation for a personal web-app catalog
#[derive(Parser, Debug)]
#[command(
    name = "appindex",
    about = "Detect the technologies a GitHub repository uses",
    version,
    author,
    long_about = "appindex reads a fixed set of well-known files (package.json, requirements.txt, \
                  go.mod, Cargo.toml, Dockerfile, wrangler.toml, README.md) from a GitHub \
                  repository and infers the technologies it uses, each with a usage role. \
                  Results can be matched against a tech catalog and used to backfill roles \
                  on catalog annotations."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect technologies used by a GitHub repository",
        long_about = "Fetches the probed files from the repository and prints every detected \
                      technology with its usage role. With --catalog, prints only the catalog \
                      entries that match a detection.\n\n\
                      Examples:\n  \
                      appindex detect https://github.com/octocat/hello-world\n  \
                      appindex detect https://github.com/octocat/hello-world -f json\n  \
                      appindex detect https://github.com/octocat/hello-world --catalog tech.json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Backfill usage roles on tech-stack annotations",
        long_about = "Reads catalog annotations ({\"id\", \"usage_role\"} objects) and fills in the \
                      usage role of every role-less entry whose catalog technology was detected \
                      in the repository. Entries that already carry a role are left untouched.\n\n\
                      Examples:\n  \
                      appindex reconcile https://github.com/octocat/hello-world \\\n    \
                      --catalog tech.json --entries entries.json"
    )]
    Reconcile(ReconcileArgs),
}

/// Options shared by every command that talks to GitHub
#[derive(Parser, Debug, Clone)]
pub struct FetchArgs {
    #[arg(
        long,
        value_name = "TOKEN",
        help = "GitHub token (overrides configured credentials)"
    )]
    pub token: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Request timeout in seconds")]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "GITHUB_URL", help = "Repository URL on github.com")]
    pub github_url: String,

    #[arg(
        long,
        value_name = "FILE",
        help = "Tech catalog JSON file; prints catalog matches instead of raw detections"
    )]
    pub catalog: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ReconcileArgs {
    #[arg(value_name = "GITHUB_URL", help = "Repository URL on github.com")]
    pub github_url: String,

    #[arg(long, value_name = "FILE", help = "Tech catalog JSON file")]
    pub catalog: PathBuf,

    #[arg(long, value_name = "FILE", help = "Annotation list JSON file")]
    pub entries: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_detect_args() {
        let args = CliArgs::parse_from(["appindex", "detect", "https://github.com/a/b"]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.github_url, "https://github.com/a/b");
                assert_eq!(detect_args.format, OutputFormatArg::Human);
                assert!(detect_args.catalog.is_none());
                assert!(detect_args.fetch.timeout.is_none());
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_detect_with_options() {
        let args = CliArgs::parse_from([
            "appindex",
            "detect",
            "https://github.com/a/b",
            "--catalog",
            "tech.json",
            "--format",
            "json",
            "--token",
            "ghp_x",
            "--timeout",
            "30",
        ]);

        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.format, OutputFormatArg::Json);
                assert_eq!(detect_args.catalog, Some(PathBuf::from("tech.json")));
                assert_eq!(detect_args.fetch.token.as_deref(), Some("ghp_x"));
                assert_eq!(detect_args.fetch.timeout, Some(30));
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_reconcile_requires_files() {
        let result = CliArgs::try_parse_from(["appindex", "reconcile", "https://github.com/a/b"]);
        assert!(result.is_err());

        let args = CliArgs::parse_from([
            "appindex",
            "reconcile",
            "https://github.com/a/b",
            "--catalog",
            "tech.json",
            "--entries",
            "entries.json",
            "-f",
            "yaml",
        ]);
        match args.command {
            Commands::Reconcile(reconcile_args) => {
                assert_eq!(reconcile_args.entries, PathBuf::from("entries.json"));
                assert_eq!(reconcile_args.format, OutputFormatArg::Yaml);
            }
            _ => panic!("Expected Reconcile command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["appindex", "--log-level", "debug", "detect", "x"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        let args = CliArgs::parse_from(["appindex", "detect", "x", "-q"]);
        assert!(args.quiet);

        let result = CliArgs::try_parse_from(["appindex", "-v", "-q", "detect", "x"]);
        assert!(result.is_err());
    }
}
