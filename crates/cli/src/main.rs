mod commands;
mod logging;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Waypoint wizard definition toolchain.
#[derive(Parser)]
#[command(name = "waypoint", version, about = "Waypoint wizard definition toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log to stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a definition and check that it forms a navigable wizard
    Check {
        /// Path to the definition file (.json or .toml)
        file: PathBuf,
    },

    /// Validate a definition document against the JSON Schema
    Validate {
        /// Path to the definition file (.json or .toml)
        file: PathBuf,
    },

    /// Run static analysis: reachability, routes and complexity
    Paths {
        /// Path to the definition file (.json or .toml)
        file: PathBuf,
        /// Comma-separated list of analyses to run
        /// (validation,reachability,routes,complexity). Default: all.
        #[arg(long)]
        analysis: Option<String>,
    },

    /// Simulate a session: reset, then advance to the final step
    Walk {
        /// Path to the definition file (.json or .toml)
        file: PathBuf,
        /// Override a fact (name=value; value parsed as JSON when possible)
        #[arg(long = "fact", value_name = "NAME=VALUE")]
        facts: Vec<String>,
        /// Treat every step as complete
        #[arg(long)]
        complete_all: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Check { file } => {
            commands::check::cmd_check(&file, cli.output, cli.quiet);
        }
        Commands::Validate { file } => {
            commands::validate::cmd_validate(&file, cli.output, cli.quiet);
        }
        Commands::Paths { file, analysis } => {
            commands::paths::cmd_paths(&file, analysis.as_deref(), cli.output, cli.quiet);
        }
        Commands::Walk {
            file,
            facts,
            complete_all,
        } => {
            commands::walk::cmd_walk(&file, &facts, complete_all, cli.output, cli.quiet);
        }
    }
}

/// Report an error message in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
