use crate::align::ScoreModel;
use crate::commands::batch::PairingMode;
use crate::utils::{GenomicRegion, OutputFormat, Result};
use chrono::Datelike;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="nwalign",
          version=&**FULL_VERSION,
          about="Global pairwise sequence alignment with linear gap costs",
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) {}. This program comes with ABSOLUTELY NO WARRANTY.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(global = true)]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Align two sequences")]
    Align(AlignArgs),
    #[clap(about = "Align many sequence pairs from a FASTA file")]
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["seq_a", "genome_path", "fasta_path"])))]
#[command(arg_required_else_help(true))]
pub struct AlignArgs {
    #[clap(long = "seq-a")]
    #[clap(help = "First sequence")]
    #[clap(value_name = "SEQ")]
    #[clap(requires = "seq_b")]
    pub seq_a: Option<String>,

    #[clap(long = "seq-b")]
    #[clap(help = "Second sequence")]
    #[clap(value_name = "SEQ")]
    #[clap(requires = "seq_a")]
    pub seq_b: Option<String>,

    #[clap(short = 'g')]
    #[clap(long = "genome")]
    #[clap(help = "Indexed reference FASTA to fetch regions from")]
    #[clap(value_name = "FASTA")]
    #[clap(requires_all = ["region_a", "region_b"])]
    #[arg(value_parser = check_file_exists)]
    pub genome_path: Option<PathBuf>,

    #[clap(long = "region-a")]
    #[clap(help = "First region (contig:start-end, 0-based half-open, or a bare contig)")]
    #[clap(value_name = "REGION")]
    #[clap(requires = "genome_path")]
    #[arg(value_parser = GenomicRegion::from_string)]
    pub region_a: Option<GenomicRegion>,

    #[clap(long = "region-b")]
    #[clap(help = "Second region (contig:start-end, 0-based half-open, or a bare contig)")]
    #[clap(value_name = "REGION")]
    #[clap(requires = "genome_path")]
    #[arg(value_parser = GenomicRegion::from_string)]
    pub region_b: Option<GenomicRegion>,

    #[clap(short = 'f')]
    #[clap(long = "fasta")]
    #[clap(help = "FASTA file (optionally gzipped); its first two records are aligned")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub fasta_path: Option<PathBuf>,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output path (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: Option<PathBuf>,

    #[clap(long = "format")]
    #[clap(value_name = "FORMAT")]
    #[clap(help = "Output format (pretty, fasta or cigar)")]
    #[clap(default_value = "pretty")]
    pub format: OutputFormat,

    #[clap(long = "uppercase")]
    #[clap(help = "Convert sequences to upper case before aligning")]
    pub uppercase: bool,

    #[clap(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct BatchArgs {
    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "fasta")]
    #[clap(help = "FASTA file (optionally gzipped) with the sequences to align")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub fasta_path: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output TSV path (stdout if omitted)")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: Option<PathBuf>,

    #[clap(short = 'm')]
    #[clap(long = "mode")]
    #[clap(value_name = "MODE")]
    #[clap(help = "Pairing of records (pairs: 1-2, 3-4, ...; all: every unordered pair)")]
    #[clap(default_value = "pairs")]
    pub mode: PairingMode,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(long = "score-only")]
    #[clap(help = "Only compute scores (linear memory, no CIGAR or identity)")]
    pub score_only: bool,

    #[clap(long = "uppercase")]
    #[clap(help = "Convert sequences to upper case before aligning")]
    pub uppercase: bool,

    #[clap(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ScoringArgs {
    #[clap(help_heading("Scoring"))]
    #[clap(long = "scoring")]
    #[clap(value_name = "SCORING")]
    #[clap(help = "Scoring function: MATCH,MISMATCH,GAP")]
    #[clap(default_value = "1,-1,-1")]
    #[clap(allow_hyphen_values = true)]
    pub scores: ScoreModel,

    #[clap(help_heading("Scoring"))]
    #[clap(long = "gap-char")]
    #[clap(value_name = "CHAR")]
    #[clap(help = "Symbol used for gaps in the output")]
    #[clap(default_value = "-")]
    #[clap(allow_hyphen_values = true)]
    #[arg(value_parser = gap_char_from_string)]
    pub gap_char: u8,
}

impl ScoringArgs {
    pub fn score_model(&self) -> Result<ScoreModel> {
        self.scores
            .with_gap_symbol(self.gap_char)
            .map_err(|e| e.to_string())
    }
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_output_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn gap_char_from_string(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [c] if c.is_ascii_graphic() => Ok(*c),
        _ => Err(format!(
            "Gap character must be a single printable ASCII character, got `{}`",
            s
        )),
    }
}
