//! Batch driver (supplemented from `examples/original_source/main.py`):
//! walks an input directory of raster images, compresses each at a sweep
//! of quality factors, writes the compressed bytes, decodes a handful of
//! checkpoint qualities back to PNG, and appends a size table to a CSV
//! file per input image.
//!
//! Not part of the codec's core (`spec.md` §6 names this a driver-level
//! collaborator): raster I/O goes through the `image` crate rather than
//! this codec's own format, the same way the teacher's benchmarking code
//! reaches for `image` instead of its own decoders for things outside its
//! core's concern.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info, warn, Level};

/// Checkpoint quality values that also get decoded back to a PNG preview.
const PREVIEW_QUALITIES: [u8; 6] = [1, 20, 40, 60, 80, 100];

#[derive(Parser, Debug)]
#[command(about = "Compress a directory of images across a quality sweep")]
struct Args
{
    /// Directory of input raster images (any format the `image` crate reads).
    input_dir: PathBuf,

    /// Directory compressed output and CSV tables are written under.
    #[arg(short, long, default_value = "batch-out")]
    output_dir: PathBuf,

    #[arg(long)]
    debug: bool
}

fn setup_logger(debug: bool)
{
    let level = if debug { Level::Debug } else { Level::Info };
    simple_logger::init_with_level(level).unwrap();
}

fn quality_sweep() -> impl Iterator<Item = u8>
{
    // matches the original driver's range(0, 101, 5) with 0 clamped to 1.
    (0..=100).step_by(5).map(|q| if q == 0 { 1 } else { q })
}

fn write_csv_row(csv_path: &Path, header_needed: bool, quality: u8, size: usize) -> std::io::Result<()>
{
    use std::io::Write;

    let mut file = fs::OpenOptions::new().create(true).append(true).open(csv_path)?;
    if header_needed
    {
        writeln!(file, "quality,compressed_size_bytes")?;
    }
    writeln!(file, "{quality},{size}")
}

fn process_one(path: &Path, output_dir: &Path) -> Result<(), String>
{
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image").to_string();
    let image = image::open(path).map_err(|e| format!("failed to load {}: {e}", path.display()))?.to_rgb8();
    let (width, height) = (image.width() as usize, image.height() as usize);

    let image_dir = output_dir.join(&stem);
    fs::create_dir_all(&image_dir).map_err(|e| e.to_string())?;
    let csv_path = image_dir.join(format!("{stem}.csv"));
    let header_needed = !csv_path.exists();
    let mut wrote_header = header_needed;

    for quality in quality_sweep()
    {
        let bytes = jcodec::encode(image.as_raw(), width, height, quality)
            .map_err(|e| format!("encode failed at quality {quality}: {e}"))?;

        let raw_path = image_dir.join(format!("{stem} {quality}.raw"));
        fs::write(&raw_path, &bytes).map_err(|e| e.to_string())?;
        info!("{}: quality {quality} -> {} bytes", path.display(), bytes.len());

        if PREVIEW_QUALITIES.contains(&quality)
        {
            let (rgb, w, h) = jcodec::decode(&bytes).map_err(|e| format!("decode failed at quality {quality}: {e}"))?;
            let preview: image::RgbImage = image::ImageBuffer::from_raw(w as u32, h as u32, rgb)
                .ok_or_else(|| "decoded buffer did not match image dimensions".to_string())?;
            let preview_path = image_dir.join(format!("{stem} {quality}.png"));
            preview.save(&preview_path).map_err(|e| e.to_string())?;
        }

        write_csv_row(&csv_path, wrote_header, quality, bytes.len()).map_err(|e| e.to_string())?;
        wrote_header = false;

        fs::remove_file(&raw_path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn main()
{
    let args = Args::parse();
    setup_logger(args.debug);

    let entries = match fs::read_dir(&args.input_dir)
    {
        Ok(entries) => entries,
        Err(e) =>
        {
            error!("could not read input directory {}: {e}", args.input_dir.display());
            std::process::exit(1);
        }
    };

    let mut failures = 0u32;
    for entry in entries.flatten()
    {
        let path = entry.path();
        if !path.is_file()
        {
            continue;
        }
        if let Err(e) = process_one(&path, &args.output_dir)
        {
            warn!("skipping {}: {e}", path.display());
            failures += 1;
        }
    }

    if failures > 0
    {
        error!("{failures} file(s) failed to process");
        std::process::exit(1);
    }
}
