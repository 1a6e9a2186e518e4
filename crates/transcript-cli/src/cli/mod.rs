//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use transcript_core::analysis::IssueSeverity;

mod commands;

#[derive(Parser)]
#[command(name = "transcript")]
#[command(version)]
#[command(about = "Inspect and export time-coded transcript documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Report every problem found in a document
    Lint {
        /// Document to check
        path: PathBuf,

        /// Lowest severity to report
        #[arg(long, value_enum, default_value_t = SeverityArg::Info)]
        min_severity: SeverityArg,

        /// Stop after this many issues (0 = unlimited)
        #[arg(long, default_value_t = 0)]
        max_issues: usize,

        /// Rule id to skip; may be repeated
        #[arg(long = "disable", value_name = "RULE")]
        disabled: Vec<String>,
    },
    /// Print the playback segments of a document or a time range of it
    Segments {
        /// Document to render
        path: PathBuf,

        /// Range start, as seconds or [HH:]MM:SS(.fff)
        #[arg(long, value_parser = parse_time)]
        from: Option<f64>,

        /// Range end, as seconds or [HH:]MM:SS(.fff)
        #[arg(long, value_parser = parse_time)]
        until: Option<f64>,

        /// Print JSON instead of one line per segment
        #[arg(long)]
        json: bool,
    },
    /// Export a document as subtitles or as a document again
    Export {
        /// Document to export
        input: PathBuf,

        /// Output file; its extension picks the format unless --format is given
        output: PathBuf,

        /// Format extension to use instead of the output's extension
        #[arg(short, long, value_name = "EXT")]
        format: Option<String>,

        /// Add per-word timestamps (WebVTT only)
        #[arg(long)]
        word_timings: bool,

        /// Prefix cues with the speaker's name
        #[arg(long)]
        speaker_names: bool,

        /// Split cues after this many characters
        #[arg(long, value_name = "CHARS")]
        max_line_length: Option<usize>,

        /// Indent document output
        #[arg(long)]
        pretty: bool,
    },
    /// Summarize a document: duration, speakers, paragraphs and sources
    Info {
        /// Document to describe
        path: PathBuf,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SeverityArg {
    Info,
    Hint,
    Warning,
    Error,
}

impl From<SeverityArg> for IssueSeverity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Self::Info,
            SeverityArg::Hint => Self::Hint,
            SeverityArg::Warning => Self::Warning,
            SeverityArg::Error => Self::Error,
        }
    }
}

fn parse_time(text: &str) -> Result<f64, String> {
    transcript_core::utils::parse_timestamp(text).map_err(|e| e.to_string())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dispatch(cli.command)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Lint {
            path,
            min_severity,
            max_issues,
            disabled,
        } => commands::lint::run(&path, min_severity.into(), max_issues, &disabled),
        Commands::Segments {
            path,
            from,
            until,
            json,
        } => commands::segments::run(&path, from, until, json),
        Commands::Export {
            input,
            output,
            format,
            word_timings,
            speaker_names,
            max_line_length,
            pretty,
        } => {
            let options = commands::export::ExportArgs {
                format,
                word_timings,
                speaker_names,
                max_line_length,
                pretty,
            };
            commands::export::run(&input, &output, &options)
        }
        Commands::Info { path } => commands::info::run(&path),
    }
}
