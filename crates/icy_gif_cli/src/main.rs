use std::{fs, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use flexi_logger::Logger;
use icy_gif::{EncodeOptions, GifEncoder};

#[derive(Parser)]
#[command(version, about = "Converts an image to a GIF with the 216 color web safe palette.")]
pub struct Cli {
    #[arg(help = "Image to convert.", required = true)]
    input: PathBuf,

    #[arg(help = "GIF file to write.", required = true)]
    output: PathBuf,

    #[arg(help = "Number of parallel workers (default: number of cores).", short = 'j', long)]
    workers: Option<usize>,

    #[arg(help = "TOML file with encoder options.", long)]
    config: Option<PathBuf>,

    #[arg(help = "Print debug output.", short, long, default_value_t = false)]
    verbose: bool,
}

fn load_options(args: &Cli) -> anyhow::Result<EncodeOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EncodeOptions::default(),
    };
    if args.workers.is_some() {
        options.workers = args.workers;
    }
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let _logger = Logger::try_with_env_or_str(if args.verbose { "debug" } else { "info" })?
        .log_to_stderr()
        .start()?;

    let options = load_options(&args)?;
    let img = image::open(&args.input).with_context(|| format!("loading {}", args.input.display()))?;
    log::info!(
        "encoding {} ({}x{}) with {} workers",
        args.input.display(),
        img.width(),
        img.height(),
        options.effective_workers()
    );

    let start = Instant::now();
    GifEncoder::new(options)
        .encode_to_file(&args.output, &img)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let size = fs::metadata(&args.output).map(|m| m.len()).unwrap_or_default();
    log::info!("wrote {} ({} bytes) in {:?}", args.output.display(), size, start.elapsed());
    Ok(())
}
