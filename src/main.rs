//! CLI entry point for the gradebook statistics tool.
//!
//! Provides subcommands for a full class report, single-student and
//! single-subject summaries, the composite ranking and composite range search.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use gradebook_stats::{
    input::load_gradebook,
    output::{print_json, print_pretty, write_json, write_ranking_csv},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_INTERVAL: u32 = 10;

#[derive(Parser)]
#[command(name = "gradebook_stats")]
#[command(about = "Descriptive statistics over a weighted gradebook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize every subject and the weighted composite scores
    Report {
        /// CSV file with student,subject,score rows
        #[arg(short, long)]
        grades: PathBuf,

        /// Subject weights (CSV subject,weight or JSON object)
        #[arg(short, long)]
        weights: PathBuf,

        /// Bucket width for subject distributions
        #[arg(short, long)]
        interval: Option<u32>,

        /// Optional: write the report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Show one student's composite score, band and percentile rank
    Student {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(short, long)]
        grades: PathBuf,

        #[arg(short, long)]
        weights: PathBuf,
    },
    /// Show statistics for one subject
    Subject {
        #[arg(value_name = "SUBJECT")]
        name: String,

        #[arg(short, long)]
        grades: PathBuf,

        /// Bucket width for the score distribution
        #[arg(short, long)]
        interval: Option<u32>,
    },
    /// Rank students by composite score
    Rank {
        #[arg(short, long)]
        grades: PathBuf,

        #[arg(short, long)]
        weights: PathBuf,

        /// Optional: CSV file to write the ranking to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List students whose composite score lies in [min, max]
    Range {
        #[arg(short, long)]
        grades: PathBuf,

        #[arg(short, long)]
        weights: PathBuf,

        #[arg(long, default_value_t = 0.0)]
        min: f64,

        #[arg(long, default_value_t = 100.0)]
        max: f64,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            grades,
            weights,
            interval,
            json,
        } => report(&grades, &weights, resolve_interval(interval), json.as_deref())?,
        Commands::Student {
            name,
            grades,
            weights,
        } => student(&name, &grades, &weights)?,
        Commands::Subject {
            name,
            grades,
            interval,
        } => subject(&name, &grades, resolve_interval(interval))?,
        Commands::Rank {
            grades,
            weights,
            output,
        } => rank(&grades, &weights, output.as_deref())?,
        Commands::Range {
            grades,
            weights,
            min,
            max,
        } => range(&grades, &weights, min, max)?,
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging() -> WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gradebook_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"))
        .to_path_buf();
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradebook_stats.log"))
        .to_os_string();

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

/// Reads the filter from `var`, falling back to `default` when unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

/// `--interval` wins, then `GRADEBOOK_INTERVAL`, then the built-in default.
fn resolve_interval(arg: Option<u32>) -> u32 {
    arg.or_else(|| {
        let raw = std::env::var("GRADEBOOK_INTERVAL").ok()?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(value = %raw, "Ignoring unparsable GRADEBOOK_INTERVAL");
                None
            }
        }
    })
    .unwrap_or(DEFAULT_INTERVAL)
}

#[tracing::instrument(skip(grades, weights, json))]
fn report(grades: &Path, weights: &Path, interval: u32, json: Option<&Path>) -> Result<()> {
    let book = load_gradebook(grades, Some(weights))?;
    let report = book.class_report(interval)?;

    for summary in &report.subjects {
        info!(
            subject = %summary.subject,
            average = summary.average,
            median = summary.median,
            stddev = summary.standard_deviation,
            iqr = summary.iqr,
            max = summary.max,
            min = summary.min,
            "Subject"
        );
    }
    info!(
        students = report.weighted.student_count,
        average = report.weighted.average,
        median = report.weighted.median,
        stddev = report.weighted.standard_deviation,
        iqr = report.weighted.iqr,
        "Weighted scores"
    );
    for bucket in report.weighted.distribution.buckets() {
        info!(range = %bucket.label, count = bucket.count, "Weighted distribution");
    }
    print_pretty(&report);

    if let Some(path) = json {
        write_json(path, &report)?;
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}

#[tracing::instrument(skip(grades, weights))]
fn student(name: &str, grades: &Path, weights: &Path) -> Result<()> {
    let book = load_gradebook(grades, Some(weights))?;
    let summary = book.weighted().student_summary(name)?;
    print_json(&summary)
}

#[tracing::instrument(skip(grades))]
fn subject(name: &str, grades: &Path, interval: u32) -> Result<()> {
    let book = load_gradebook(grades, None)?;
    if !book.store().subjects().contains(name) {
        warn!("No student has a score for this subject; all figures default to 0");
    }
    for (student, score) in book.store().sorted_grades_by_subject(name) {
        info!(student = %student, score, "Grade");
    }
    let summary = book.subjects().summary(name, interval)?;
    print_json(&summary)
}

#[tracing::instrument(skip_all)]
fn rank(grades: &Path, weights: &Path, output: Option<&Path>) -> Result<()> {
    let book = load_gradebook(grades, Some(weights))?;
    let ranking = book.weighted().ranking();

    for (idx, row) in ranking.iter().enumerate() {
        info!(
            rank = idx + 1,
            student = %row.student,
            score = row.score,
            band = row.band.label(),
            pr = row.percentile_rank,
            "Ranked"
        );
    }

    if let Some(path) = output {
        write_ranking_csv(path, &ranking)?;
        info!(path = %path.display(), rows = ranking.len(), "Ranking written");
    }
    Ok(())
}

#[tracing::instrument(skip(grades, weights))]
fn range(grades: &Path, weights: &Path, min: f64, max: f64) -> Result<()> {
    if min > max {
        bail!("--min ({min}) must not exceed --max ({max})");
    }
    let book = load_gradebook(grades, Some(weights))?;
    let students = book.weighted().find_students_by_score_range(min, max);
    info!(count = students.len(), "Students in range");
    for name in &students {
        info!(student = %name, "Match");
    }
    Ok(())
}
