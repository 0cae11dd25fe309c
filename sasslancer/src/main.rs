mod cli;

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cli::{Cli, Format};
use sasslancer::logging::{set_level, tracing_init};
use sasslancer::{Config, Token};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let handle = tracing_init(cli.level(Config::default().log_level))?;

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    set_level(&handle, cli.level(config.log_level))?;

    let tokens = read_tokens(cli)?;
    info!(count = tokens.len(), "read tokens");

    let stylesheet = match sasslancer::parse_tokens(tokens, &config.parser) {
        Ok(stylesheet) => stylesheet,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&stylesheet)?),
        Format::Tree => println!("{}", stylesheet.fancy_string()),
    }
    Ok(ExitCode::SUCCESS)
}

fn read_tokens(cli: &Cli) -> anyhow::Result<Vec<Token>> {
    let text = if cli.input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("could not read tokens from stdin")?;
        text
    } else {
        std::fs::read_to_string(&cli.input)
            .with_context(|| format!("could not read {}", cli.input.display()))?
    };
    serde_json::from_str(&text).context("input is not a JSON array of tokens")
}
