//! goserve-gen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser};
use commands::{NewCommand, NewFlags};
use goserve_gen::{observability, GeneratorConfig};

#[derive(Parser)]
#[command(name = "goserve-gen")]
#[command(version)]
#[command(about = "Generate a goserve backend project", long_about = None)]
struct Cli {
    /// Directory to generate the project into
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    target: String,

    /// Go module path (e.g. `github.com/acme/shop`)
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    module: String,

    /// Feature module to generate; repeat for more than one
    #[arg(short = 'f', long = "feature", value_name = "NAME")]
    features: Vec<String>,

    /// Do not run `go mod tidy` after generation
    #[arg(long)]
    skip_tidy: bool,

    /// Write straight into the target instead of staging
    #[arg(long)]
    in_place: bool,

    /// Configuration file (defaults to `./goserve-gen.toml`)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the generation report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    let config = GeneratorConfig::load_optional(cli.config.as_deref())?;
    let flags = NewFlags {
        skip_tidy: cli.skip_tidy,
        in_place: cli.in_place,
        json: cli.json,
    };

    let cmd = NewCommand::new(cli.target, cli.module, cli.features, &config, flags)?;
    cmd.execute()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "goserve-gen",
            "shop",
            "github.com/acme/shop",
            "-f",
            "product",
            "--feature",
            "order",
            "--skip-tidy",
            "--in-place",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.target, "shop");
        assert_eq!(cli.module, "github.com/acme/shop");
        assert_eq!(cli.features, vec!["product", "order"]);
        assert!(cli.skip_tidy);
        assert!(cli.in_place);
        assert!(!cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_positionals_are_required_and_non_empty() {
        assert!(Cli::try_parse_from(["goserve-gen"]).is_err());
        assert!(Cli::try_parse_from(["goserve-gen", "shop"]).is_err());
        assert!(Cli::try_parse_from(["goserve-gen", "", "github.com/acme/shop"]).is_err());
        assert!(Cli::try_parse_from(["goserve-gen", "shop", ""]).is_err());
    }
}
