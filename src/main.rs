mod error;
mod output;
mod parser;
mod settings;
mod workbook;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use parser::assemble::Assembler;
use settings::Settings;

#[derive(Parser)]
#[command(name = "sheet_extract", about = "Fixed-layout smelting sheets to JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (default: ./sheet_extract.{toml,json,yaml} if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory to scan for workbooks
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Directory to write documents into
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Process one workbook at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Log failed workbooks and continue instead of stopping
    #[arg(long, global = true)]
    keep_going: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every workbook in the input directory (default)
    Run,
    /// Print one workbook's document to stdout
    Extract {
        file: PathBuf,
    },
    /// Print the active layout
    Layout,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(dir) = cli.input {
        settings.input_dir = dir;
    }
    if let Some(dir) = cli.output {
        settings.output_dir = dir;
    }
    settings.parallel &= !cli.sequential;
    settings.fail_fast &= !cli.keep_going;

    let assembler = settings.assembler()?;
    info!(
        sections = assembler.layout().templates().len(),
        input = %settings.input_dir.display(),
        "Starting sheet extraction"
    );

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let files = workbook::scan(&settings)?;
            if files.is_empty() {
                println!("No workbooks found in {:?}.", settings.input_dir);
                return Ok(());
            }
            println!("Processing {} workbooks...", files.len());
            let counts = process_files(&files, &settings, &assembler)?;
            counts.print();
        }
        Commands::Extract { file } => {
            let sheets = workbook::read_sheets(&file)?;
            let doc = parser::process_workbook(&assembler, &sheets);
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &doc)?;
            println!();
        }
        Commands::Layout => {
            println!("{}", serde_json::to_string_pretty(assembler.layout())?);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

#[derive(Default)]
struct RunCounts {
    documents: usize,
    pages: usize,
    errors: usize,
}

impl RunCounts {
    fn print(&self) {
        println!(
            "Wrote {} documents ({} pages, {} errors).",
            self.documents, self.pages, self.errors,
        );
    }
}

/// Read → assemble → write for one workbook. Returns the number of pages written.
fn process_file(path: &Path, out_dir: &Path, assembler: &Assembler) -> error::Result<usize> {
    let sheets = workbook::read_sheets(path)?;
    let doc = parser::process_workbook(assembler, &sheets);
    let out = output::output_path(out_dir, path);
    output::write_document(&out, &doc)?;
    info!(
        file = %path.display(),
        sheets = sheets.len(),
        pages = doc.len(),
        out = %out.display(),
        "wrote document"
    );
    Ok(doc.len())
}

fn process_files(
    files: &[PathBuf],
    settings: &Settings,
    assembler: &Assembler,
) -> anyhow::Result<RunCounts> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let job = |path: &Path| {
        let result = process_file(path, &settings.output_dir, assembler);
        pb.inc(1);
        result
    };
    let results = map_files(files, settings, job);
    pb.finish_and_clear();

    let mut counts = RunCounts::default();
    for (path, result) in files.iter().zip(results?) {
        match result {
            Ok(pages) => {
                counts.documents += 1;
                counts.pages += pages;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping workbook");
                counts.errors += 1;
            }
        }
    }
    Ok(counts)
}

/// Per-file results in input order. With `fail_fast`, the first failure is
/// returned and no further files are started.
#[cfg(feature = "rayon")]
fn map_files<F>(
    files: &[PathBuf],
    settings: &Settings,
    job: F,
) -> error::Result<Vec<error::Result<usize>>>
where
    F: Fn(&Path) -> error::Result<usize> + Sync + Send,
{
    use rayon::prelude::*;

    if !settings.parallel {
        return map_files_sequential(files, settings, job);
    }
    if settings.fail_fast {
        let done: Vec<usize> = files.par_iter().map(|p| job(p)).collect::<error::Result<_>>()?;
        return Ok(done.into_iter().map(Ok).collect());
    }
    Ok(files.par_iter().map(|p| job(p)).collect())
}

#[cfg(not(feature = "rayon"))]
fn map_files<F>(
    files: &[PathBuf],
    settings: &Settings,
    job: F,
) -> error::Result<Vec<error::Result<usize>>>
where
    F: Fn(&Path) -> error::Result<usize>,
{
    map_files_sequential(files, settings, job)
}

fn map_files_sequential<F>(
    files: &[PathBuf],
    settings: &Settings,
    job: F,
) -> error::Result<Vec<error::Result<usize>>>
where
    F: Fn(&Path) -> error::Result<usize>,
{
    if settings.fail_fast {
        let done: Vec<usize> = files.iter().map(|p| job(p)).collect::<error::Result<_>>()?;
        return Ok(done.into_iter().map(Ok).collect());
    }
    Ok(files.iter().map(|p| job(p)).collect())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
