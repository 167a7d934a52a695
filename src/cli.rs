use crate::{
    constants::*,
    core::{breakpoint::Breakpoint, svtype::SvType},
    error::SvqError,
    utils::util::Result,
};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| env!("CARGO_PKG_VERSION").to_string());

#[derive(Parser, Debug)]
#[command(name="svq",
          version=&**FULL_VERSION,
          about="Population structural variant evidence query",
          long_about = None,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Search(SearchArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search(_) => "search",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct SearchArgs {
    /// Directory holding the per-sample evidence index
    #[arg(
        short = 'i',
        long = "index",
        value_name = "INDEX",
        value_parser = check_dir_exists
    )]
    pub index_dir: PathBuf,

    /// Left breakpoint region (chrom:start-end)
    #[arg(
        short = 'l',
        long = "left",
        value_name = "REGION",
        value_parser = parse_query_region
    )]
    pub left: Breakpoint,

    /// Right breakpoint region (chrom:start-end)
    #[arg(
        short = 'r',
        long = "right",
        value_name = "REGION",
        value_parser = parse_query_region
    )]
    pub right: Breakpoint,

    /// SV type of the candidate variant (DEL, DUP, INS, INV, BND)
    #[arg(
        short = 't',
        long = "sv-type",
        value_name = "TYPE",
        default_value = "DEL",
        value_parser = parse_sv_type
    )]
    pub sv_type: SvType,

    /// Tolerance in bp added to the breakpoint windows
    #[arg(
        short = 's',
        long = "slop",
        value_name = "SLOP",
        default_value_t = DEFAULT_SLOP
    )]
    pub slop: u32,

    /// Restrict the query to these sample indexes (comma-separated)
    #[arg(
        long = "samples",
        value_name = "SAMPLES",
        value_delimiter = ',',
        help_heading = "Advanced"
    )]
    pub sample_ids: Option<Vec<u32>>,

    /// Print the per-sample evidence depth table before the summary
    #[arg(short = 'd', long = "depths", help_heading = "Advanced")]
    pub depths: bool,

    /// Emit the report as JSON instead of tab-separated text
    #[arg(short = 'j', long = "json", help_heading = "Advanced")]
    pub json: bool,

    /// Write output to a file [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,
}

/// Initializes the verbosity level for logging based on the command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
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
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_dir_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.is_dir() {
        return Err(SvqError::usage(format!(
            "Index directory does not exist: {}",
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(SvqError::usage(format!(
                "Path does not exist: {}",
                parent_dir.display()
            )));
        }
    }
    Ok(s.to_string())
}

fn parse_query_region(s: &str) -> Result<Breakpoint> {
    Breakpoint::from_region(s)
}

fn parse_sv_type(s: &str) -> Result<SvType> {
    s.parse()
}
