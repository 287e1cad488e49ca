//! Convert the alpha mask of an image into a normalized signed distance field image.
//!
//! Example:
//!   spiral-sdf glyph.png glyph_distance.png --spread 20 --size 64

use std::path::PathBuf;
use std::time::Instant;
use anyhow::{ Context, Result };
use clap::{ Parser, ValueEnum };
use spiral_distance_field::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert an alpha mask into a signed distance field image", long_about = None)]
struct Args {
    /// Image whose alpha channel describes the shape.
    input: PathBuf,

    /// Where to write the distance field, as png, gif, jpg or jpeg.
    output: PathBuf,

    /// Maximum search radius in pixels.
    #[arg(long, default_value_t = DEFAULT_SPREAD)]
    spread: u32,

    /// Which alpha values count as inside the shape.
    #[arg(long, value_enum, default_value_t = Threshold::Nonzero)]
    threshold: Threshold,

    /// Average the field down to a square of this many pixels per side.
    /// Must evenly divide the input width and height.
    #[arg(long)]
    size: Option<u32>,

    /// Storage used while building the field.
    #[arg(long, value_enum, default_value_t = Storage::F32)]
    precision: Storage,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Threshold {
    /// Any alpha above zero.
    Nonzero,

    /// Alpha of at least half the maximum.
    Half,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Storage {
    F32,
    F16,
}

impl Args {
    fn options(&self) -> ConversionOptions {
        let threshold = match self.threshold {
            Threshold::Nonzero => ThresholdPolicy::NonZero,
            Threshold::Half => ThresholdPolicy::AtLeastHalf,
        };

        let precision = match self.precision {
            Storage::F32 => Precision::F32,
            Storage::F16 => Precision::F16,
        };

        ConversionOptions::default()
            .with_spread(self.spread)
            .with_threshold(threshold)
            .with_output_size(self.size)
            .with_precision(precision)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let options = args.options();
    log::debug!("{:?}", options);

    let start = Instant::now();

    convert_file(&args.input, &args.output, &options).with_context(|| format!(
        "could not convert {} into {}", args.input.display(), args.output.display()
    ))?;

    println!("Processing time: {:?}", start.elapsed());
    Ok(())
}
