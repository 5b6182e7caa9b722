mod error;
mod paths;
mod reader;
mod render;
mod scanner;
mod search;
mod system_io;
mod types;

use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use system_io::{LogFs, OsFs};
use types::TypeFilter;

#[derive(Parser, Debug)]
#[command(version, about = "View and search terminal session logs", long_about = None)]
struct Args {
    /// Log directory containing raw/ and clean/ subdirectories
    #[arg(long, default_value = "~/ttylogs")]
    log_dir: String,

    /// List all log files
    #[arg(long)]
    list: bool,

    /// Show a specific log file (relative to the log directory)
    #[arg(long, value_name = "NAME")]
    show: Option<String>,

    /// Search for text in all logs (case-insensitive)
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// With --show, print only the last N lines
    #[arg(long, value_name = "N")]
    tail: Option<usize>,

    /// Number of recent log files to summarize
    #[arg(long, value_name = "N", default_value_t = 5)]
    recent: usize,

    /// Log type to show
    #[arg(long = "type", value_enum, default_value_t = TypeFilter::All)]
    log_type: TypeFilter,
}

#[derive(Debug, PartialEq)]
enum Mode<'a> {
    List,
    Show(&'a str),
    Search(&'a str),
    Recent,
}

impl Args {
    /// `--list` wins over `--show`, which wins over `--search`.
    fn mode(&self) -> Mode<'_> {
        if self.list {
            Mode::List
        } else if let Some(name) = self.show.as_deref().filter(|n| !n.is_empty()) {
            Mode::Show(name)
        } else if let Some(query) = self.search.as_deref().filter(|q| !q.is_empty()) {
            Mode::Search(query)
        } else {
            Mode::Recent
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = run(&args, &OsFs, &mut out) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return;
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args, fs: &dyn LogFs, out: &mut dyn Write) -> io::Result<()> {
    let log_dir = paths::expand_tilde(&args.log_dir);
    log::debug!("Using log directory {}", log_dir.display());

    match args.mode() {
        Mode::List => list_mode(fs, &log_dir, args.log_type, out),
        Mode::Show(name) => show_mode(fs, &log_dir, name, args.tail, out),
        Mode::Search(query) => search_mode(fs, &log_dir, query, args.log_type, out),
        Mode::Recent => recent_mode(fs, &log_dir, args.recent, args.log_type, out),
    }
}

fn list_mode(fs: &dyn LogFs, log_dir: &Path, filter: TypeFilter, out: &mut dyn Write) -> io::Result<()> {
    let catalog = scanner::list_logs(fs, log_dir, filter);
    render::print_problems(&catalog.problems, out)?;
    if catalog.entries.is_empty() {
        return writeln!(out, "No log files found");
    }
    render::print_catalog_table(&catalog.entries, filter, out)
}

fn show_mode(
    fs: &dyn LogFs,
    log_dir: &Path,
    name: &str,
    tail: Option<usize>,
    out: &mut dyn Write,
) -> io::Result<()> {
    let path = log_dir.join(name);
    match reader::show_log(fs, &path, tail, out) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!("show {} failed: {e:?}", path.display());
            writeln!(out, "{e}")
        }
    }
}

fn search_mode(
    fs: &dyn LogFs,
    log_dir: &Path,
    query: &str,
    filter: TypeFilter,
    out: &mut dyn Write,
) -> io::Result<()> {
    let outcome = search::search_logs(fs, log_dir, query, search::DEFAULT_MAX_RESULTS, filter);
    render::print_problems(&outcome.problems, out)?;
    if outcome.matches.is_empty() {
        return writeln!(out, "No matches found for '{query}'");
    }
    render::print_matches(&outcome.matches, query, filter, out)
}

fn recent_mode(
    fs: &dyn LogFs,
    log_dir: &Path,
    recent: usize,
    filter: TypeFilter,
    out: &mut dyn Write,
) -> io::Result<()> {
    let catalog = scanner::list_logs(fs, log_dir, filter);
    render::print_problems(&catalog.problems, out)?;
    if catalog.entries.is_empty() {
        return writeln!(out, "No log files found");
    }
    render::print_recent(&catalog.entries, recent, filter, out)
}
