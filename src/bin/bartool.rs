use anyhow::{Context, Result, bail};
use bar_label::capture::{NeverCancel, poll_until_decoded};
use bar_label::detector::measurer::heights;
use bar_label::detector::{BarMeasurer, RegionLocator};
use bar_label::lookup::{OfflineLookup, TitleLookup};
use bar_label::tools::{
    ImageSequenceSource, binarize, binary_stats, dataset_iter, dataset_root_from_env,
    decode_batch, grayscale_stats, load_gray, save_png,
};
use bar_label::{Decoder, DecodeConfig, decoder::quantize, encode_symbols, render};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bartool", version, about = "Bar label encoder and reader")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw an identifier as a label image
    Encode {
        /// Identifier to encode
        id: String,
        /// Title used to name the output file
        #[arg(long)]
        title: Option<String>,
        /// Output path (overrides the title-derived name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read a label from an image or a directory of frames
    Decode {
        /// Image file holding the label
        #[arg(long, conflicts_with = "frames", required_unless_present = "frames")]
        image: Option<PathBuf>,
        /// Directory of frames polled in name order
        #[arg(long)]
        frames: Option<PathBuf>,
        /// Stop after this many frames
        #[arg(long)]
        max_frames: Option<usize>,
        /// Print `<prefix><id>` instead of the bare identifier
        #[arg(long)]
        url_prefix: Option<String>,
    },
    /// Print every pipeline stage for one image
    DebugDecode {
        /// Image file to inspect
        #[arg(long)]
        image: PathBuf,
    },
    /// Decode every image under a directory in parallel
    Batch {
        /// Directory searched recursively for images (default: `BAR_DATASET_ROOT`)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Decode at most this many images
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode { id, title, output } => encode_cmd(&id, title, output)?,
        Command::Decode {
            image,
            frames,
            max_frames,
            url_prefix,
        } => decode_cmd(image, frames, max_frames, url_prefix.as_deref())?,
        Command::DebugDecode { image } => debug_decode_cmd(&image)?,
        Command::Batch { root, limit } => batch_cmd(root, limit),
    }
    Ok(())
}

fn encode_cmd(id: &str, title: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let mut found = OfflineLookup.lookup(id);
    if !found.valid {
        bail!("Identifier {id:?} is not valid");
    }
    if title.is_some() {
        found.title = title;
    }

    let digits = encode_symbols(id).context("Failed to encode identifier")?;
    let img = render(&digits).context("Failed to render label")?;

    let path = output.unwrap_or_else(|| PathBuf::from(found.file_name(id)));
    save_png(&img, &path).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {} ({} bars)", path.display(), digits.len());
    Ok(())
}

fn decode_cmd(
    image: Option<PathBuf>,
    frames: Option<PathBuf>,
    max_frames: Option<usize>,
    url_prefix: Option<&str>,
) -> Result<()> {
    let decoder = Decoder::from_env();

    let text = match (image, frames) {
        (Some(image), _) => {
            let gray = load_gray(&image)
                .with_context(|| format!("Failed to load image {}", image.display()))?;
            decoder
                .decode(&gray)
                .with_context(|| format!("No label read from {}", image.display()))?
        }
        (None, Some(dir)) => {
            let mut source = ImageSequenceSource::from_dir(&dir, max_frames);
            let outcome = poll_until_decoded(&mut source, &mut NeverCancel, decoder.config())
                .with_context(|| format!("No label read from frames in {}", dir.display()))?;
            eprintln!("Decoded after {} frames", outcome.frames_polled);
            outcome.text
        }
        (None, None) => bail!("Either --image or --frames is required"),
    };

    match url_prefix {
        Some(prefix) => println!("{prefix}{text}"),
        None => println!("{text}"),
    }
    Ok(())
}

fn debug_decode_cmd(image: &Path) -> Result<()> {
    let config = DecodeConfig::from_env();
    let gray = load_gray(image)
        .with_context(|| format!("Failed to load image {}", image.display()))?;
    println!("Image: {} ({}x{})", image.display(), gray.width(), gray.height());

    let gray_stats = grayscale_stats(gray.as_raw());
    println!(
        "Grayscale range: {}-{}, average: {}",
        gray_stats.min, gray_stats.max, gray_stats.avg
    );

    let stats = binary_stats(&binarize(&gray, &config));
    println!(
        "Binary: dark_pixels={} total={} dark_ratio={:.2}%",
        stats.dark_pixels,
        stats.total_pixels,
        stats.dark_ratio * 100.0
    );

    let candidates = RegionLocator::find_candidates(
        gray.as_raw(),
        gray.width() as usize,
        gray.height() as usize,
        &config,
    );
    println!("Found {} candidate outlines", candidates.len());
    for (i, c) in candidates.iter().take(10).enumerate() {
        println!(
            "  Candidate {}: {}x{} at ({}, {}) aspect={:.2}",
            i,
            c.region.width,
            c.region.height,
            c.region.x,
            c.region.y,
            c.region.aspect_ratio()
        );
    }

    let region = RegionLocator::locate(&gray, &config).context("Locator failed")?;
    let crop = region.crop(&gray);

    let all = BarMeasurer::measure_all(&crop, &config).context("Measurement failed")?;
    println!("Measured {} bar-shaped features", all.len());
    for bar in &all {
        println!("  x={:>3} height={:.3}", bar.x, bar.height);
    }

    let bars = BarMeasurer::measure(&crop, &config).context("Sentinel stripping failed")?;
    let digits = quantize(&heights(&bars)).context("Quantization failed")?;
    println!("Digits: {:?}", digits);

    let text = bar_label::decode_digits(&digits).context("Digit decoding failed")?;
    println!("Text: {text}");
    Ok(())
}

fn batch_cmd(root: Option<PathBuf>, limit: Option<usize>) {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let paths: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    let config = DecodeConfig::from_env();

    let start = Instant::now();
    let entries = decode_batch(&paths, &config);
    let elapsed = start.elapsed();

    let mut decoded = 0usize;
    for entry in &entries {
        match &entry.result {
            Ok(text) => {
                decoded += 1;
                println!("{}: {}", entry.path.display(), text);
            }
            Err(err) => println!("{}: error: {}", entry.path.display(), err),
        }
    }

    let rate = if entries.is_empty() {
        0.0
    } else {
        decoded as f64 / entries.len() as f64 * 100.0
    };
    println!(
        "Decoded {}/{} images ({:.1}%) in {:.2?}",
        decoded,
        entries.len(),
        rate,
        elapsed
    );
}
