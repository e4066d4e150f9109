use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Create the issues described by the CSV file.
    Create(CliOptions),
    /// Rendered help text.
    Help(String),
    /// Rendered version line.
    Version(String),
    /// Rendered usage error.
    Invalid(String),
}

/// Options accepted on the command line.
///
/// Every option is optional here; defaults are applied when the run
/// configuration is resolved, after the project config file has been read.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    name = "chincol",
    about = "CLI to create GitHub issues from CSV file",
    version
)]
pub struct CliOptions {
    /// GitHub repository (username/repository)
    #[arg(short, long, value_name = "repository", value_parser = parse_repository)]
    pub repo: Option<String>,

    /// Path to CSV file [default: ./issues.csv]
    #[arg(short, long, value_name = "path")]
    pub file: Option<PathBuf>,

    /// Color for labels created on demand [default: 0000FF]
    #[arg(short = 'c', long, value_name = "hex")]
    pub label_color: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_repository(value: &str) -> Result<String, String> {
    crate::config::validate_repository(value)
        .map(|()| value.to_string())
        .map_err(|e| e.to_string())
}

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    match CliOptions::try_parse_from(args) {
        Ok(options) => Command::Create(options),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Command::Help(err.to_string())
            }
            ErrorKind::DisplayVersion => Command::Version(err.to_string()),
            _ => Command::Invalid(err.to_string()),
        },
    }
}
