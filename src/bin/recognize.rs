use clap::{Parser, Subcommand};
use local_barcode_recognizer::tools::{
    dataset_iter, dataset_root_from_env, expected_text, rotation_stats,
};
use local_barcode_recognizer::{
    DecodeOptions, DecodeOrchestrator, DecodeOutcome, DecodeRequest, RecognitionWorker, hints,
    image_decoder,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "recognize", version, about = "Decode barcodes from still images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode the symbol in a single image
    Decode {
        #[arg(long)]
        image: PathBuf,
        /// Treat the file as a base64 text payload instead of raw image bytes
        #[arg(long)]
        base64: bool,
        /// Restrict to these symbologies (repeatable, e.g. --format qr)
        #[arg(long = "format")]
        formats: Vec<String>,
        /// Option map as JSON, e.g. '{"codeTypes":["qr"]}'; overrides --format
        #[arg(long)]
        options: Option<String>,
    },
    /// Print luminance/binary stats for every rotation of an image
    Inspect {
        #[arg(long)]
        image: PathBuf,
    },
    /// Decode every image under a directory on the worker pool
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long = "format")]
        formats: Vec<String>,
    },
    /// List accepted symbology names
    Formats,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Decode {
            image,
            base64,
            formats,
            options,
        } => decode_cmd(&image, base64, formats, options.as_deref()),
        Command::Inspect { image } => inspect_cmd(&image),
        Command::Batch {
            root,
            limit,
            formats,
        } => batch_cmd(root, limit, formats),
        Command::Formats => {
            for name in hints::known_names() {
                let format = hints::format_for_name(name)
                    .map(|f| f.to_string())
                    .unwrap_or_default();
                println!("{name:<16} {format}");
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn options_from_args(
    formats: Vec<String>,
    json: Option<&str>,
) -> local_barcode_recognizer::Result<DecodeOptions> {
    match json {
        Some(json) => DecodeOptions::from_json(json),
        None if formats.is_empty() => Ok(DecodeOptions::default()),
        None => Ok(DecodeOptions::with_code_types(formats)),
    }
}

fn read_request(
    path: &Path,
    base64: bool,
    options: DecodeOptions,
) -> Result<DecodeRequest, Box<dyn std::error::Error>> {
    if base64 {
        let payload = std::fs::read_to_string(path)?;
        Ok(DecodeRequest::from_base64(&payload, options)?)
    } else {
        Ok(DecodeRequest::new(std::fs::read(path)?, options))
    }
}

fn decode_cmd(
    image: &Path,
    base64: bool,
    formats: Vec<String>,
    options: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = options_from_args(formats, options)?;
    let request = read_request(image, base64, options)?;
    let orchestrator = DecodeOrchestrator::default();

    let start = Instant::now();
    let (outcome, telemetry) = orchestrator.decode_with_telemetry(&request)?;
    let elapsed = start.elapsed();

    match outcome {
        DecodeOutcome::Found(symbol) => {
            println!("{}", symbol.text);
            log::info!(
                "{} at {} after {} attempt(s) ({:.2?})",
                symbol.format,
                symbol.rotation,
                telemetry.angles_attempted,
                elapsed
            );
        }
        DecodeOutcome::NotFound => {
            eprintln!(
                "No symbol found in {} ({} rotations, {} rejected candidates, {:.2?})",
                image.display(),
                telemetry.angles_attempted,
                telemetry.rejected,
                elapsed
            );
        }
    }
    Ok(())
}

fn inspect_cmd(image: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(image)?;
    let grid = image_decoder::decode(&bytes)?;
    let orchestrator = DecodeOrchestrator::default();
    let config = orchestrator.config();

    println!("Image: {} ({}x{})", image.display(), grid.width(), grid.height());
    println!(
        "Binarizer: block_size={} min_dynamic_range={}",
        config.block_size, config.min_dynamic_range
    );

    for stats in rotation_stats(&grid, config)? {
        println!(
            "  {:>4}: {}x{} luminance {}-{} avg {} | dark={} ({:.2}%)",
            stats.rotation.to_string(),
            stats.width,
            stats.height,
            stats.gray.min,
            stats.gray.max,
            stats.gray.avg,
            stats.binary.black_pixels,
            stats.binary.black_ratio * 100.0
        );
    }

    let request = DecodeRequest::new(bytes, DecodeOptions::default());
    let (outcome, telemetry) = orchestrator.decode_with_telemetry(&request)?;
    match outcome.symbol() {
        Some(symbol) => println!(
            "Decoded {} at {}: {}",
            symbol.format, symbol.rotation, symbol.text
        ),
        None => println!(
            "No symbol after {} rotations ({} rejected candidates)",
            telemetry.angles_attempted, telemetry.rejected
        ),
    }
    Ok(())
}

fn batch_cmd(
    root: Option<PathBuf>,
    limit: Option<usize>,
    formats: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = root.unwrap_or_else(dataset_root_from_env);
    if !root.exists() {
        return Err(format!("dataset root not found: {}", root.display()).into());
    }

    let options = options_from_args(formats, None)?;
    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if images.is_empty() {
        println!("No images found under {}", root.display());
        return Ok(());
    }

    let worker = RecognitionWorker::new(DecodeOrchestrator::default())?;
    let start = Instant::now();
    let mut pending = Vec::with_capacity(images.len());
    for path in &images {
        match std::fs::read(path) {
            Ok(bytes) => {
                let request = DecodeRequest::new(bytes, options.clone());
                pending.push((path, worker.submit(request)));
            }
            Err(err) => println!("  {} -> load_failed ({})", path.display(), err),
        }
    }

    let mut found = 0usize;
    let mut matched = 0usize;
    let mut labeled = 0usize;
    for (path, handle) in pending {
        let expected = expected_text(path);
        match handle.wait() {
            Ok(DecodeOutcome::Found(symbol)) => {
                found += 1;
                if let Some(expected) = &expected {
                    labeled += 1;
                    if *expected == symbol.text {
                        matched += 1;
                    }
                }
                println!(
                    "  {} -> hit [{} at {}] {}",
                    path.display(),
                    symbol.format,
                    symbol.rotation,
                    symbol.text
                );
            }
            Ok(DecodeOutcome::NotFound) => {
                if expected.is_some() {
                    labeled += 1;
                }
                println!("  {} -> miss", path.display());
            }
            Err(err) => println!("  {} -> error ({})", path.display(), err),
        }
    }

    println!(
        "Decoded {}/{} images on {} threads in {:.2?}",
        found,
        images.len(),
        worker.threads(),
        start.elapsed()
    );
    if labeled > 0 {
        let rate = matched as f64 / labeled as f64 * 100.0;
        println!("Labeled accuracy: {}/{} = {:.2}%", matched, labeled, rate);
    }
    Ok(())
}
