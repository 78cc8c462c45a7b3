//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hugopod")]
#[command(author, version, about = "Export Dendron vaults as Hugo content", long_about = None)]
pub struct Cli {
    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Default log filter for the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a vault to a Hugo content directory
    Export(ExportArgs),

    /// Show where every note would be written, without writing
    Plan(ExportArgs),

    /// Print the option schema
    Schema,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Path to the Dendron vault
    #[arg(long)]
    pub vault: PathBuf,

    /// Destination directory (Hugo `content/`)
    #[arg(long)]
    pub dest: PathBuf,

    /// Vault name used as the top-level output directory
    #[arg(long)]
    pub vault_name: Option<String>,

    /// Config file (.toml, .yml, .yaml or .json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Note exported as the vault's `_index` (default: root)
    #[arg(long)]
    pub fname: Option<String>,

    /// Also write stub notes for missing ancestors
    #[arg(long)]
    pub include_stubs: bool,

    /// Content file extension (default: md)
    #[arg(long)]
    pub extension: Option<String>,

    /// Compute outputs without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from([
            "hugopod", "export", "--vault", "notes", "--dest", "site/content", "--include-stubs", "-vv",
        ]);
        assert_eq!(cli.log_level(), "trace");
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.vault, PathBuf::from("notes"));
                assert_eq!(args.dest, PathBuf::from("site/content"));
                assert!(args.include_stubs);
                assert!(args.fname.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_output_format_flags() {
        let cli = Cli::parse_from(["hugopod", "--yaml", "schema"]);
        assert_eq!(cli.output_format(), OutputFormat::Yaml);
        let cli = Cli::parse_from(["hugopod", "schema", "-q"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert_eq!(cli.log_level(), "error");
    }
}
