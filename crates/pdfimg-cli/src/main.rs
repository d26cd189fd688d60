//! pdfimg: emit PDF image XObjects for JPEG files.
//!
//! Usage: `pdfimg photo.jpg scan.jpg -o images.obj --resources xobjects.txt`
//!
//! The object block is written to `--output` (stdout if omitted). Object
//! numbering starts after `--start-object`, so the block can be spliced into
//! a document whose writer has already used that many objects.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use pdfimg_core::counter::ObjectCounter;
use pdfimg_core::image::ImageRecord;
use pdfimg_core::options::EmitOptions;
use pdfimg_core::plugin::{ImageImport, NoEncryption};
use pdfimg_input_jpeg::JpegImport;
use pdfimg_output::{ImageObjectEmitter, ImageRegistry, SourceImage};

#[derive(Parser)]
#[command(
    name = "pdfimg",
    version,
    about = "Emit PDF image objects for JPEG files"
)]
struct Cli {
    /// JPEG files to embed
    #[arg(required_unless_present = "dump_config")]
    inputs: Vec<PathBuf>,

    /// Output file for the object block (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write `/IMG… n 0 R` resource entries to this file
    #[arg(long)]
    resources: Option<PathBuf>,

    /// PDF/A mode: omit alternate image dictionaries
    #[arg(long)]
    pdfa: bool,

    /// Last object number already used by the document (default: 0)
    #[arg(long)]
    start_object: Option<u64>,

    /// zlib level for ICC and palette streams (0-9, default 6)
    #[arg(long)]
    compression_level: Option<u32>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dump effective merged config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Parse one TOML config file. Missing files are silently ignored.
fn read_config_file(path: &Path) -> Option<EmitOptions> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<EmitOptions>(&contents) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            eprintln!("Warning: failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Load config from global and project-local TOML files.
/// The project-local file fully overrides the global one.
fn load_config() -> EmitOptions {
    let mut opts = EmitOptions::default();

    // 1. Global config: ~/.config/pdfimg/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        if let Some(parsed) = read_config_file(&config_dir.join("pdfimg").join("config.toml")) {
            opts = parsed;
        }
    }

    // 2. Project-local config: ./.pdfimg.toml
    if let Some(parsed) = read_config_file(Path::new(".pdfimg.toml")) {
        opts = parsed;
    }

    opts
}

/// Apply CLI flags on top of config-loaded options.
/// Only overrides when the CLI flag was explicitly provided.
fn apply_cli_overrides(opts: &mut EmitOptions, cli: &Cli) {
    if cli.verbose > 0 {
        opts.verbose = cli.verbose;
    }
    if cli.pdfa {
        opts.pdfa = true;
    }
    if let Some(start) = cli.start_object {
        opts.start_object = start;
    }
    if let Some(level) = cli.compression_level {
        opts.compression_level = level;
    }
}

/// Default log filter for the merged verbosity; `RUST_LOG` still wins.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn main() {
    let cli = Cli::parse();

    // Config warnings are emitted before the logger exists, so they go to stderr.
    let mut options = load_config();
    apply_cli_overrides(&mut options, &cli);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(options.verbose)),
    )
    .init();

    // Handle --dump-config
    if cli.dump_config {
        match toml::to_string_pretty(&options) {
            Ok(s) => {
                println!("{}", s);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = run(&cli, &options) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn import_file(importer: &dyn ImageImport, path: &Path) -> Result<ImageRecord> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !importer.handles_extension(ext) {
        log::warn!(
            "{} does not have a JPEG extension, importing anyway",
            path.display()
        );
    }
    let raw = std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let record = importer
        .import(raw)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    Ok(record)
}

fn run(cli: &Cli, options: &EmitOptions) -> Result<()> {
    options.validate()?;

    // Import is independent per file; emission below must stay sequential.
    let importer = JpegImport;
    log::info!("Importing {} file(s) with {}", cli.inputs.len(), importer.name());
    let imported: Vec<Result<ImageRecord>> = cli
        .inputs
        .par_iter()
        .map(|path| import_file(&importer, path))
        .collect();

    let mut registry = ImageRegistry::new();
    for (path, record) in cli.inputs.iter().zip(imported) {
        let record = record?;
        registry.add(path.display().to_string(), SourceImage::new(record));
    }

    let emitter = ImageObjectEmitter::new(&NoEncryption, options.clone());
    let mut counter = ObjectCounter::new(options.start_object);
    let block = registry.emit_all(&emitter, &mut counter)?;

    match &cli.output {
        Some(path) => std::fs::write(path, &block.bytes)
            .with_context(|| format!("Cannot write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(&block.bytes)
            .context("Cannot write to stdout")?,
    }

    if let Some(path) = &cli.resources {
        std::fs::write(path, block.xobjects.resource_entries())
            .with_context(|| format!("Cannot write {}", path.display()))?;
    }

    log::info!(
        "Wrote {} bytes; next free object number is {}",
        block.bytes.len(),
        counter.current() + 1
    );
    Ok(())
}
