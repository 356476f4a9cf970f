//! validar-factura - command-line invoice validator
//!
//! Validates one or more invoice JSON files, prints a summary per file and
//! writes `<name>_resultado.json` next to each input.
//! Returns non-zero when a file is missing or is not a valid invoice record.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use factura_dian::FacturaError;
use factura_dian::files::{render_summary, validate_file, write_result};
use factura_dian::upload::validate_uploads;

#[derive(Parser)]
#[command(name = "validar-factura")]
#[command(about = "Valida facturas comerciales de importación (DIAN)")]
struct Cli {
    /// Invoice JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the JSON report to stdout instead of writing `_resultado.json`
    #[arg(long)]
    stdout: bool,

    /// Print one batch report (`{"resultados": [...]}`) for all files
    #[arg(long, conflicts_with = "stdout")]
    batch: bool,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.batch {
        return run_batch(&cli.files);
    }

    let mut failed = false;
    for path in &cli.files {
        if !run_one(path, cli.stdout) {
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_one(path: &Path, to_stdout: bool) -> bool {
    let result = match validate_file(path) {
        Ok(r) => r,
        Err(FacturaError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("Error: No se encontró el archivo {}", path.display());
            return false;
        }
        Err(FacturaError::Json(_)) => {
            eprintln!("Error: El archivo {} no es un JSON válido.", path.display());
            return false;
        }
        Err(e) => {
            eprintln!("Error: {}: {e}", path.display());
            return false;
        }
    };

    if to_stdout {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error al serializar el resultado: {e}");
                return false;
            }
        }
        return true;
    }

    println!("{}", render_summary(&result));
    match write_result(path, &result) {
        Ok(out) => println!("\nReporte de validación guardado en: {}", out.display()),
        Err(e) => eprintln!("Error al guardar el archivo de resultado: {e}"),
    }
    true
}

fn run_batch(paths: &[PathBuf]) -> ExitCode {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match std::fs::read(path) {
            Ok(bytes) => files.push((path.display().to_string(), bytes)),
            Err(_) => {
                eprintln!("Error: No se encontró el archivo {}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    let batch = validate_uploads(files.iter().map(|(name, bytes)| (name.as_str(), bytes)));
    match serde_json::to_string_pretty(&batch) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error al serializar el resultado: {e}");
            ExitCode::FAILURE
        }
    }
}
