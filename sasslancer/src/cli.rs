use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use sasslancer::config::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "sasslancer")]
#[command(about = "Parses a lexed stylesheet token stream and prints its syntax tree")]
pub struct Cli {
    /// JSON array of tokens, `-` reads standard input
    pub input: PathBuf,

    /// JSON config file with `parser` and `logLevel` settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Overrides the configured log level
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// More verbose logging, may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Tree,
}

impl Cli {
    pub fn level(&self, configured: LogLevel) -> LogLevel {
        self.log_level.unwrap_or(configured).raised(self.verbose)
    }
}

#[cfg(test)]
mod test_cli {
    use super::*;

    #[test]
    fn parse_args() {
        let cli = Cli::try_parse_from(["sasslancer", "-vv", "--format", "tree", "in.json"]).unwrap();
        assert_eq!(cli.format, Format::Tree);
        assert_eq!(cli.level(LogLevel::Warn), LogLevel::Debug);
        assert_eq!(cli.input, PathBuf::from("in.json"));

        let cli = Cli::try_parse_from(["sasslancer", "--log-level", "error", "-"]).unwrap();
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.level(LogLevel::Trace), LogLevel::Error);
        assert!(Cli::try_parse_from(["sasslancer"]).is_err());
    }
}
