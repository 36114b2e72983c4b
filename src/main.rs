//! pdf2docx-server - PDF to DOCX conversion service
//!
//! CLI entry point

use std::path::Path;
use std::time::Instant;

use clap::Parser;
use pdf2docx_server::{
    docx_output_path, exit_codes, Cli, Commands, ConvertArgs, ConvertConfig, DocumentConverter,
    ServeArgs, ServerConfig, SofficeConverter, WebServer, SOFFICE_BIN,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => run_serve(&args),
        Commands::Convert(args) => run_convert(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_codes::GENERAL_ERROR
        }
    });
}

/// Load the conversion config, warning (not failing) on a broken file.
fn load_config(path: Option<&Path>) -> ConvertConfig {
    match path {
        Some(config_path) => match ConvertConfig::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {e}");
                ConvertConfig::default()
            }
        },
        None => ConvertConfig::load().unwrap_or_default(),
    }
}

// ============ Serve Command ============

fn run_serve(args: &ServeArgs) -> anyhow::Result<()> {
    let mut convert = load_config(args.config.as_deref());
    if args.keep_files {
        convert = convert.with_keep_files(true);
    }

    let config = ServerConfig::default()
        .with_port(args.port)
        .with_bind(&args.bind)
        .with_upload_limit(args.upload_limit * 1024 * 1024);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let server = WebServer::with_config(config, convert);
        server.run().await.map_err(|e| anyhow::anyhow!("{e}"))
    })
}

// ============ Convert Command ============

fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let config = load_config(args.config.as_deref());
    let converter = SofficeConverter::from_config(&config);

    std::fs::create_dir_all(&args.output)?;

    let base = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let output = docx_output_path(&args.output, &base);

    let start = Instant::now();
    let path = converter.convert(&args.input, &output)?;

    println!(
        "Converted {} -> {} ({:.2}s)",
        args.input.display(),
        path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("pdf2docx-server v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);

    println!();
    println!("Conversion Tools:");
    check_tool_with_version(SOFFICE_BIN, "LibreOffice", &["--version"]);

    println!();
    println!("Config File Locations:");
    println!("  Local: ./pdf2docx.toml");
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join("pdf2docx-server/config.toml").display()
        );
    }

    Ok(())
}

fn check_tool_with_version(cmd: &str, name: &str, version_args: &[&str]) {
    match which::which(cmd) {
        Ok(path) => {
            if let Ok(output) = std::process::Command::new(&path).args(version_args).output() {
                let version_str = String::from_utf8_lossy(&output.stdout);
                let first_line = version_str.lines().next().unwrap_or("");
                if !first_line.is_empty() && first_line.len() < 80 {
                    println!("  {}: {} ({})", name, first_line.trim(), path.display());
                } else {
                    println!("  {}: {} (found)", name, path.display());
                }
            } else {
                println!("  {}: {} (found)", name, path.display());
            }
        }
        Err(_) => println!("  {}: Not found", name),
    }
}
