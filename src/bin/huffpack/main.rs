use std::{
    fs::{self, File},
    io::{Read, Seek, Write},
    path::{Path, PathBuf},
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{debug, info, info_span, level_filters::LevelFilter};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

mod progress;
use progress::{fmt_size, ProgressMonitor};

#[derive(Parser)]
#[command(version, about = "Huffman compression for arbitrary files", long_about = None)]
struct Cli {
    /// Log more details, repeat for even more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Don't draw a progress bar
    #[arg(long, global = true)]
    no_progress: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Encode {
        /// File to encode
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the encoded stream
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Decompress a file produced by `encode`
    Decode {
        /// File to decode
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write the decoded bytes
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let show_progress = !cli.no_progress;
    init_tracing(cli.verbose, show_progress);

    match cli.command {
        Commands::Encode { input, output } => {
            let (input_size, output_size) = encode(&input, &output, show_progress)?;
            report(input_size, output_size, input_size as f64 / output_size as f64);
        }
        Commands::Decode { input, output } => {
            let (input_size, output_size) = decode(&input, &output, show_progress)?;
            report(input_size, output_size, output_size as f64 / input_size as f64);
        }
    }
    Ok(())
}

fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// The layer drawing a bar for every span, only installed when progress is shown.
fn progress_layer(show_progress: bool) -> Option<IndicatifLayer<Registry>> {
    show_progress.then(IndicatifLayer::new)
}

fn init_tracing(verbosity: u8, show_progress: bool) {
    let indicatif_layer = progress_layer(show_progress);
    // log lines have to go through the bars' writer, or they get drawn over
    let writer = match &indicatif_layer {
        Some(layer) => BoxMakeWriter::new(layer.get_stderr_writer()),
        None => BoxMakeWriter::new(std::io::stderr),
    };
    tracing_subscriber::registry()
        .with(indicatif_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(writer),
        )
        .with(level_filter(verbosity))
        .init();
}

/// Open `input` and create `output`, returning the input's size.
fn open_files(input: &Path, output: &Path) -> Result<(File, File, u64)> {
    info!("opening file {}", input.display());
    let source = File::open(input).wrap_err_with(|| format!("can't open file {}", input.display()))?;
    let input_size = source
        .metadata()
        .wrap_err_with(|| format!("couldn't obtain stat for {}", input.display()))?
        .len();

    info!("creating file {}", output.display());
    let target =
        File::create(output).wrap_err_with(|| format!("can't create file {}", output.display()))?;
    Ok((source, target, input_size))
}

fn encode(input: &Path, output: &Path, show_progress: bool) -> Result<(u64, u64)> {
    let (source, target, input_size) = open_files(input, output)?;

    info!("encoding {} to {}", input.display(), output.display());
    let span = info_span!("encode");
    let _entered = span.enter();
    if show_progress {
        // the encoder reads its input twice
        let monitor = ProgressMonitor::new(source, 2 * input_size, span.clone())?;
        run_encode(monitor, target)?;
    } else {
        run_encode(source, target)?;
    }

    finish(input_size, output)
}

fn run_encode<R: Read + Seek>(source: R, target: File) -> Result<()> {
    debug!("counting frequencies, then writing header and codes");
    huffpack::encode(source, target).wrap_err("got error while encoding")
}

fn decode(input: &Path, output: &Path, show_progress: bool) -> Result<(u64, u64)> {
    let (source, target, input_size) = open_files(input, output)?;

    info!("decoding {} to {}", input.display(), output.display());
    let span = info_span!("decode");
    let _entered = span.enter();
    if show_progress {
        let monitor = ProgressMonitor::new(source, input_size, span.clone())?;
        run_decode(monitor, target)?;
    } else {
        run_decode(source, target)?;
    }

    finish(input_size, output)
}

fn run_decode<R: Read, W: Write>(source: R, target: W) -> Result<()> {
    debug!("reading header, then walking the tree for every symbol");
    huffpack::decode(source, target).wrap_err("got error while decoding")
}

fn finish(input_size: u64, output: &Path) -> Result<(u64, u64)> {
    info!("finished. see {}", output.display());
    let output_size = fs::metadata(output)
        .wrap_err_with(|| format!("couldn't obtain stat for {}", output.display()))?
        .len();
    Ok((input_size, output_size))
}

fn report(input_size: u64, output_size: u64, ratio: f64) {
    info!(
        "input size: {}, output size: {}, ratio: {}",
        fmt_size(input_size as f64),
        fmt_size(output_size as f64),
        console::style(format!("{:.3}", ratio)).bold()
    );
}
