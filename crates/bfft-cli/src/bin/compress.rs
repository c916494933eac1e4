//! `bfft-compress`: load a raster image, search per-block Blaschke
//! parameters (unless `-no-opt`), compress, and write the binary
//! container.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use bfft_codec::container;
use bfft_pipeline::{compress_image, CompressOptions, OptimizeLevel};
use bfft_transform::ResizeType;

/// Compress a raster image into the Blaschke Fourier transform container
/// format.
#[derive(Debug, Parser)]
#[command(name = "bfft-compress", version, about)]
struct Args {
    /// Source image path (PNG/JPEG/BMP/... -- format is autodetected).
    source: PathBuf,

    /// Force the decoded channel count: 1=G, 2=GA, 3=RGB, 4=RGBA. Defaults
    /// to the source image's native channel count.
    #[arg(long = "channels", value_name = "1..4")]
    channels: Option<u8>,

    /// Fraction of transformed coefficients retained per block, in `(0, 1]`.
    #[arg(long = "ratio", default_value_t = 0.5)]
    ratio: f64,

    /// Resampling strategy applied at the transform boundary.
    #[arg(long = "resize", value_enum, default_value_t = ResizeArg::LinearInterpolation)]
    resize: ResizeArg,

    /// Skip the per-block Blaschke parameter search and use the all-zero
    /// (classical-DFT-equivalent) function system.
    #[arg(long = "no-opt")]
    no_opt: bool,

    /// Optimisation effort level, `0..=3` (ignored with `-no-opt`).
    #[arg(long = "lvl", default_value_t = 3)]
    lvl: u8,

    /// Square tile size, `8..=128`.
    #[arg(long = "block", default_value_t = 16)]
    block: usize,

    /// Output container path. Defaults to the source's basename with a
    /// `.bc` extension.
    #[arg(long = "name")]
    name: Option<PathBuf>,

    /// Raise the log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Resampling strategy exposed on the command line (mirrors
/// [`bfft_transform::ResizeType`] with CLI-friendly names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ResizeArg {
    /// Zero-extend on the way in, truncate on the way out.
    Simple,
    /// Piecewise-linear interpolation against the function system's
    /// native sample positions.
    LinearInterpolation,
}

impl From<ResizeArg> for ResizeType {
    fn from(value: ResizeArg) -> Self {
        match value {
            ResizeArg::Simple => Self::Truncate,
            ResizeArg::LinearInterpolation => Self::LinearInterpolate,
        }
    }
}

fn default_output_name(source: &std::path::Path) -> PathBuf {
    source.with_extension("bc")
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "bfft_compress=info,bfft_pipeline=info",
        1 => "bfft_compress=debug,bfft_pipeline=debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let optimize = if args.no_opt {
        None
    } else {
        Some(OptimizeLevel::from_u8(args.lvl).context("invalid -lvl")?)
    };
    let options = CompressOptions {
        ratio: args.ratio,
        resize_type: args.resize.into(),
        block_size: args.block,
        optimize,
        channels: args.channels,
    };
    options.validate().context("invalid compressor options")?;

    let output = args.name.unwrap_or_else(|| default_output_name(&args.source));
    tracing::info!(source = %args.source.display(), output = %output.display(), "compressing");

    let channels =
        compress_image(&args.source, &options).with_context(|| format!("compressing {}", args.source.display()))?;

    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    container::write_image(&mut writer, &channels).with_context(|| format!("writing {}", output.display()))?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(args) {
        tracing::error!(error = %err, "bfft-compress failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
