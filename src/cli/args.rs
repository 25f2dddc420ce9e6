//! Command-line interface definitions.

use clap::{ColorChoice, Parser, ValueEnum};
use std::path::PathBuf;

/// Annotate external links in HTML syntax trees (JSON) with safe new-tab behavior
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Syntax tree files (JSON). Use `-` or omit to read stdin
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Options file path (default: autoblank.toml, if present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    pub format: Format,

    /// Write one file per input into this directory instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Additional internal domain (repeatable)
    #[arg(short, long = "domain", value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

/// Output format of transformed trees.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

impl Format {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["autoblank"]).unwrap();
        assert!(cli.inputs.is_empty());
        assert_eq!(cli.format, Format::Html);
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_full_args() {
        let cli = Cli::try_parse_from([
            "autoblank",
            "-C",
            "site.toml",
            "-f",
            "json",
            "-d",
            "a.com",
            "--domain",
            "b.com",
            "-o",
            "out",
            "--pretty",
            "page.json",
            "-",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.domains, ["a.com", "b.com"]);
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(cli.pretty);
        assert_eq!(cli.inputs, [PathBuf::from("page.json"), PathBuf::from("-")]);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["autoblank", "-f", "xml"]).is_err());
    }
}
