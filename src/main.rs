//! ats-lens: Resume ATS Compatibility Checker CLI

use anyhow::{Context, Result};
use ats_lens::cache::AnalysisCache;
use ats_lens::config::{
    build_ignore_set, is_ignored, load_config, starter_config, Config, CONFIG_FILENAME,
};
use ats_lens::extract::{extract_text, read_stdin, ExtractError, STDIN_NAME};
use ats_lens::history::{
    append_run, find_project_root, format_delta, load_history, previous_score, save_history,
};
use ats_lens::reporter::{render_report, ConsoleReporter, JsonReporter};
use ats_lens::{AtsEngine, Document, ResumeReport};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use walkdir::WalkDir;

/// Directory scans switch to parallel analysis above this many files
const PARALLEL_THRESHOLD: usize = 10;

/// ats-lens: Resume ATS Compatibility Checker
#[derive(Parser, Debug)]
#[command(name = "ats-lens")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Resume file or directory to analyze; "-" reads text from stdin
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Print the plain-text report
    #[arg(long, conflicts_with_all = ["json", "quiet"])]
    plain: bool,

    /// Minimum overall score (exit 1 if any resume is below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Quiet mode (one line per resume)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (candidate profile, formatting issues, debug logs)
    #[arg(long, short)]
    verbose: bool,

    /// Original file name when the text was extracted elsewhere (e.g. resume.pdf)
    #[arg(long, value_name = "FILENAME")]
    name: Option<String>,

    /// Path to config file (default: search .atslensrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Largest input accepted, in bytes
    #[arg(long, value_name = "BYTES")]
    max_bytes: Option<u64>,

    /// Disable caching (re-analyze all files even if unchanged)
    #[arg(long)]
    no_cache: bool,

    /// Clear the analysis cache before running
    #[arg(long)]
    clear_cache: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .atslensrc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ats_lens=debug"
    } else {
        "ats_lens=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(Commands::Init { threshold, dir }) = args.command {
        return run_init(threshold, dir.as_deref());
    }

    let path = args
        .path
        .clone()
        .context("A resume path is required (use - for stdin)")?;
    let from_stdin = path.as_os_str() == "-";

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = if from_stdin {
        cwd.clone()
    } else if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone())
    } else {
        path.clone()
    };

    // Load config (CLI flags override config file)
    let config = load_config(&work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.max_bytes);
    let engine = config.build_engine()?;

    let history_root = if from_stdin {
        None
    } else {
        find_project_root(&work_dir)
    };
    let mut cache = if args.no_cache || from_stdin {
        AnalysisCache::disabled()
    } else {
        let cache_root = history_root.as_deref().unwrap_or(work_dir.as_path());
        AnalysisCache::new(cache_root).for_settings(&engine.settings_fingerprint())
    };

    if args.clear_cache {
        cache.clear();
        if !args.quiet {
            eprintln!("{}: Cache cleared", "Info".blue());
        }
    }

    let (reports, had_errors) = if from_stdin {
        let extracted = read_stdin(config.max_input_bytes(), args.name.as_deref())?;
        let doc = Document::new(&extracted.text).with_filename(extracted.filename.as_deref());
        (vec![engine.report(Path::new(STDIN_NAME), &doc)], false)
    } else {
        let ignore_set = if config.ignore.is_empty() {
            None
        } else {
            Some(build_ignore_set(&config.ignore)?)
        };
        let files = collect_resume_files(&path, ignore_set.as_ref(), &config.get_resume_patterns())?;

        if files.is_empty() {
            eprintln!("{}: No resume files found", "Warning".yellow());
            return Ok(ExitCode::from(2));
        }

        if let Some(jobs) = args.jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
                .ok();
        }

        let name = if files.len() == 1 {
            args.name.as_deref()
        } else {
            if args.name.is_some() && !args.quiet {
                eprintln!(
                    "{}: --name only applies to a single resume; ignored",
                    "Warning".yellow()
                );
            }
            None
        };

        let use_parallel = args.parallel || files.len() > PARALLEL_THRESHOLD;
        analyze_files(&engine, &files, name, &config, &mut cache, use_parallel, args.quiet)
    };

    if let Err(e) = cache.save() {
        warn!("{:#}", e);
    }

    if reports.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let analyses: Vec<_> = reports.iter().map(|r| r.analysis.clone()).collect();
    let stats = AtsEngine::aggregate_stats(&analyses);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
    } else if args.plain {
        let rendered: Vec<String> = reports.iter().map(|r| render_report(&r.analysis)).collect();
        println!("{}", rendered.join("\n\n"));
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        let history = history_root.as_deref().map(load_history);
        for report in &reports {
            let previous = history
                .as_ref()
                .and_then(|h| previous_score(h, &report.path));
            let delta = format_delta(previous, report.analysis.overall_score);
            reporter.report_quiet(report, &delta);
        }
        persist_history(history_root.as_deref(), &reports);
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(&reports, &stats);
        }

        persist_history(history_root.as_deref(), &reports);
    }

    if let Some(threshold) = config.threshold {
        let failing: Vec<&ResumeReport> = reports
            .iter()
            .filter(|r| r.analysis.overall_score < threshold)
            .collect();

        if !failing.is_empty() {
            if !args.quiet && !args.json {
                for report in &failing {
                    eprintln!(
                        "\n{}: {} scored {:.1}, below threshold {}",
                        "Failed".red().bold(),
                        report.path.display(),
                        report.analysis.overall_score,
                        threshold
                    );
                }
            }
            return Ok(ExitCode::from(1));
        }
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Append this run to the trend history when a project root was found
fn persist_history(root: Option<&Path>, reports: &[ResumeReport]) {
    let Some(root) = root else {
        return;
    };
    let mut history = load_history(root);
    append_run(&mut history, reports);
    if let Err(e) = save_history(root, &history) {
        warn!("{:#}", e);
    }
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(70.0);
    std::fs::write(&config_path, starter_config(threshold_value))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn collect_resume_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    resume_patterns: &[&str],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && is_resume_file(file_path, resume_patterns) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn is_resume_file(path: &Path, resume_patterns: &[&str]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_lowercase();
    resume_patterns
        .iter()
        .any(|p| name.ends_with(&p.to_lowercase()))
}

/// One file read and scored (or served from cache)
struct Analyzed {
    report: ResumeReport,
    text: String,
    filename: Option<String>,
    from_cache: bool,
}

fn analyze_file(
    engine: &AtsEngine,
    cache: &AnalysisCache,
    path: &Path,
    name: Option<&str>,
    max_bytes: u64,
) -> Result<Analyzed, ExtractError> {
    let extracted = extract_text(path, max_bytes)?;
    let filename = name.map(str::to_string).or(extracted.filename);
    let doc = Document::new(&extracted.text).with_filename(filename.as_deref());

    let (analysis, from_cache) = match cache.get(path, doc.text, doc.filename) {
        Some(cached) => (cached, true),
        None => (engine.analyze_document(&doc), false),
    };
    let report = engine.report_with(path, &doc, analysis);

    Ok(Analyzed {
        report,
        text: extracted.text,
        filename,
        from_cache,
    })
}

/// Analyze files sequentially or with rayon, then fill the cache in order
fn analyze_files(
    engine: &AtsEngine,
    files: &[PathBuf],
    name: Option<&str>,
    config: &Config,
    cache: &mut AnalysisCache,
    parallel: bool,
    quiet: bool,
) -> (Vec<ResumeReport>, bool) {
    use rayon::prelude::*;

    let max_bytes = config.max_input_bytes();
    let outcomes: Vec<(&PathBuf, Result<Analyzed, ExtractError>)> = {
        let cache = &*cache;
        if parallel {
            files
                .par_iter()
                .map(|file| (file, analyze_file(engine, cache, file, name, max_bytes)))
                .collect()
        } else {
            files
                .iter()
                .map(|file| (file, analyze_file(engine, cache, file, name, max_bytes)))
                .collect()
        }
    };

    let mut reports = Vec::new();
    let mut had_errors = false;
    let mut cache_hits = 0;

    for (file, outcome) in outcomes {
        match outcome {
            Ok(analyzed) => {
                if analyzed.from_cache {
                    cache_hits += 1;
                } else {
                    cache.set(
                        file,
                        &analyzed.text,
                        analyzed.filename.as_deref(),
                        analyzed.report.analysis.clone(),
                    );
                }
                reports.push(analyzed.report);
            }
            Err(e) => {
                eprintln!(
                    "{}: Failed to analyze {}: {}",
                    "Error".red(),
                    file.display(),
                    e
                );
                had_errors = true;
            }
        }
    }

    if !quiet && cache_hits > 0 {
        eprintln!(
            "{}: {} files from cache, {} analyzed",
            "Cache".blue(),
            cache_hits,
            files.len() - cache_hits
        );
    }

    (reports, had_errors)
}
