//! `bfft-decompress`: read the binary container and write back a raster
//! image.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use bfft_codec::container;
use bfft_pipeline::decompress_image;

/// Decompress a Blaschke Fourier transform container back into an image.
#[derive(Debug, Parser)]
#[command(name = "bfft-decompress", version, about)]
struct Args {
    /// Compressed container path.
    source: PathBuf,

    /// Output image path. Defaults to the source with a `.png` extension.
    #[arg(long = "name")]
    name: Option<PathBuf>,

    /// Raise the log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_output_name(source: &std::path::Path) -> PathBuf {
    source.with_extension("png")
}

fn init_logging(verbose: u8) {
    let default_level =
        if verbose == 0 { "bfft_decompress=info,bfft_pipeline=info" } else { "bfft_decompress=debug,bfft_pipeline=debug" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let output = args.name.unwrap_or_else(|| default_output_name(&args.source));
    tracing::info!(source = %args.source.display(), output = %output.display(), "decompressing");

    let file = File::open(&args.source).with_context(|| format!("opening {}", args.source.display()))?;
    let mut reader = BufReader::new(file);
    let channels =
        container::read_image(&mut reader).with_context(|| format!("reading {}", args.source.display()))?;

    decompress_image(&channels, &output).with_context(|| format!("writing {}", output.display()))?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(args) {
        tracing::error!(error = %err, "bfft-decompress failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
