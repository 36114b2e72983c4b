//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::web::{DEFAULT_BIND, DEFAULT_PORT};

/// PDF to DOCX conversion service.
#[derive(Debug, Parser)]
#[command(name = "pdf2docx-server", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP conversion server
    Serve(ServeArgs),
    /// Convert a single PDF file locally
    Convert(ConvertArgs),
    /// Show converter tool availability
    Info,
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Maximum upload size in megabytes
    #[arg(long, default_value_t = 50)]
    pub upload_limit: usize,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep uploaded and converted files instead of deleting them
    #[arg(long)]
    pub keep_files: bool,
}

/// Arguments for the `convert` subcommand.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input PDF file
    pub input: PathBuf,

    /// Output directory for the converted DOCX
    #[arg(short, long, default_value = "outputs")]
    pub output: PathBuf,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
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
    fn test_parse_serve_defaults() {
        let cli = Cli::parse_from(["pdf2docx-server", "serve"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, DEFAULT_PORT);
                assert_eq!(args.bind, DEFAULT_BIND);
                assert_eq!(args.upload_limit, 50);
                assert!(!args.keep_files);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "pdf2docx-server",
            "serve",
            "--port",
            "9000",
            "--bind",
            "0.0.0.0",
            "--keep-files",
        ]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 9000);
                assert_eq!(args.bind, "0.0.0.0");
                assert!(args.keep_files);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from(["pdf2docx-server", "convert", "report.pdf"]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input, PathBuf::from("report.pdf"));
                assert_eq!(args.output, PathBuf::from("outputs"));
            }
            _ => panic!("expected convert"),
        }
    }
}
