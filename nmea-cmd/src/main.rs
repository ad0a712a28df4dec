mod decode;
mod filter;
mod info;

use std::fs::File;
use std::io::{stderr, stdin, stdout, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about NMEA0183 capture files.
    ///
    /// Reports message counts by topic and talker, completed satellites-in-view reports,
    /// and errors by kind.
    Info {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: info::Format,

        /// Treat sentences without a checksum as errors
        #[arg(long, action)]
        require_checksum: bool,

        /// Input capture files. Use - for stdin.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Decode sentences, writing one JSON event per line to stdout.
    ///
    /// Sentences that fail to decode are logged and skipped.
    Decode {
        /// Treat sentences without a checksum as errors
        #[arg(long, action)]
        require_checksum: bool,

        /// Only write completed satellites-in-view reports
        #[arg(long, action)]
        views_only: bool,

        /// Input capture file. Use - for stdin.
        input: PathBuf,
    },
    /// Filter sentences by topic and talker.
    ///
    /// Sentences are re-encoded on output, so sentences received without a checksum
    /// are written with one. Sentences that fail to decode are dropped.
    Filter {
        /// Only include these topics, e.g., RMC,GGA
        #[arg(short, long, value_name = "csv", value_delimiter = ',')]
        topics: Vec<String>,

        /// Only include these talkers, e.g., GP,GL
        #[arg(short = 'T', long, value_name = "csv", value_delimiter = ',')]
        talkers: Vec<String>,

        /// Exclude these topics.
        ///
        /// If used with --topics, values are first included, then excluded.
        #[arg(short, long, value_name = "csv", value_delimiter = ',')]
        exclude_topics: Vec<String>,

        /// Delete output file if it already exists
        #[arg(long, action)]
        clobber: bool,

        /// Output file path.
        #[arg(short, long, default_value = "filtered.nmea", value_name = "path")]
        output: PathBuf,

        /// Input capture file. Use - for stdin.
        input: PathBuf,
    },
}

pub(crate) fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(stdin())));
    }
    let file = File::open(path).with_context(|| format!("opening input {path:?}"))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("NMEA_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Info {
            format,
            require_checksum,
            inputs,
        } => info::info(inputs, format, *require_checksum),
        Commands::Decode {
            require_checksum,
            views_only,
            input,
        } => {
            let src = open_input(input)?;
            decode::decode(src, stdout().lock(), *require_checksum, *views_only)
        }
        Commands::Filter {
            topics,
            talkers,
            exclude_topics,
            clobber,
            output,
            input,
        } => {
            if !clobber && output.exists() {
                bail!("{output:?} exists; use --clobber");
            }
            let filters = filter::Filters::new(topics, talkers, exclude_topics)?;
            debug!("{filters:?}");

            let src = open_input(input)?;
            let dest = File::create(output)
                .with_context(|| format!("failed to create output {output:?}"))?;
            let stats = filter::filter(src, BufWriter::new(dest), &filters)?;
            info!(
                written = stats.written,
                skipped = stats.skipped,
                invalid = stats.invalid,
                "filtered {input:?} to {output:?}"
            );
            Ok(())
        }
    }
}
