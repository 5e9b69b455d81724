use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::ImageFormat;
use tracing::info;
use tracing_subscriber::EnvFilter;

use binqr::{
    encode, save_payload, scan_file, validate, MediaCache, RecoveryPipeline, RenderAction,
    RenderRouter, StillImage, TextPreview,
};

#[derive(Parser)]
#[command(name = "binqr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Encodes a file to a QR code and recovers it from a scanned QR code")]
struct Cli {
    /// Log pipeline steps
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a file into a QR code image
    Encode {
        /// The file to encode
        #[arg(short, long)]
        input: PathBuf,

        /// The output image
        #[arg(short, long)]
        output: PathBuf,

        /// Allow overwriting of the output file
        #[arg(long, alias = "override")]
        overwrite: bool,

        /// Error correction level: L, M, Q or H [default: M]
        #[arg(long)]
        ecc: Option<String>,

        /// Pixels per module [default: 38]
        #[arg(long)]
        pixels: Option<String>,
    },

    /// Decode a QR code image back into the original bytes
    Decode {
        /// The image to scan
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for media files handed to a player [default: $BINQR_CACHE_DIR or <tmp>/binqr]
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Save the recovered bytes here, adding the detected extension if none is given
        #[arg(long)]
        save: Option<PathBuf>,

        /// Allow overwriting of the saved file
        #[arg(long)]
        overwrite: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Encode { input, output, overwrite, ecc, pixels } => {
            run_encode(input, output, overwrite, ecc, pixels)
        }
        Command::Decode { input, cache_dir, save, overwrite } => {
            run_decode(input, cache_dir, save, overwrite)
        }
    }
}

fn run_encode(
    input: PathBuf,
    output: PathBuf,
    overwrite: bool,
    ecc: Option<String>,
    pixels: Option<String>,
) -> Result<()> {
    let params = validate(input, output, ecc.as_deref(), pixels.as_deref(), overwrite)?;

    let payload = fs::read(params.input())
        .with_context(|| format!("Failed to read {}", params.input().display()))?;
    let img = encode(&payload, params.ec_level(), params.module_size())?;

    let format = ImageFormat::from_path(params.output()).unwrap_or(ImageFormat::Png);
    img.save_with_format(params.output(), format)
        .with_context(|| format!("Failed to write {}", params.output().display()))?;

    info!(
        "Encoded {} bytes from {} into {}",
        payload.len(),
        params.input().display(),
        params.output().display()
    );
    Ok(())
}

fn run_decode(
    input: PathBuf,
    cache_dir: Option<PathBuf>,
    save: Option<PathBuf>,
    overwrite: bool,
) -> Result<()> {
    let scan = scan_file(&input)?;

    let cache = cache_dir.map(MediaCache::new).unwrap_or_default();
    let mut pipeline = RecoveryPipeline::new(RenderRouter::new(cache));
    let rec = pipeline.on_scan_result(&mut StillImage, scan)?;

    println!("{}", rec.status.trim_end());
    match (rec.decision.action, &rec.decision.materialized_path) {
        (RenderAction::PlayMedia, Some(path)) => println!("Media ready at {}", path.display()),
        (RenderAction::ShowImage, _) => println!("Image preview available"),
        _ => println!("{}", TextPreview::new(&rec.payload)),
    }

    if let Some(path) = save {
        let path = save_payload(&rec.payload, &rec.classification, path, overwrite)?;
        println!("File saved to {}", path.display());
    }
    Ok(())
}
