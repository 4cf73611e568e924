use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pronunciation_scoring::{
    aggregate_reports, compute_case_report, CaseReport, Meta, PronunciationEvaluator,
    PronunciationEvaluatorBuilder, Report, ScoringConfig, TranscriptionOutcome,
    REPORT_SCHEMA_VERSION,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[path = "pronunciation_report/json_report_formatter.rs"]
mod json_report_formatter;

#[derive(Debug, Parser)]
#[command(name = "pronunciation_report")]
#[command(about = "Score transcribed pronunciation attempts against their reference texts")]
struct Args {
    /// JSON array of `{id, expected_text, transcript?, transcription_error?}`.
    #[arg(long, env = "PRONUNCIATION_REPORT_CASES")]
    cases: PathBuf,
    #[arg(long, env = "PRONUNCIATION_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "PRONUNCIATION_REPORT_WINDOW_RADIUS", allow_negative_numbers = true)]
    window_radius: Option<i64>,
    #[arg(long, env = "PRONUNCIATION_REPORT_THRESHOLD")]
    threshold: Option<f64>,
    #[arg(long, env = "PRONUNCIATION_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "PRONUNCIATION_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "PRONUNCIATION_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
}

#[derive(Debug, Deserialize)]
struct Case {
    id: String,
    expected_text: String,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    transcription_error: Option<String>,
}

impl Case {
    fn outcome(&self) -> TranscriptionOutcome {
        match (&self.transcription_error, &self.transcript) {
            (Some(reason), _) => TranscriptionOutcome::Failed {
                reason: reason.clone(),
            },
            (None, Some(text)) => TranscriptionOutcome::Transcript(text.clone()),
            (None, None) => TranscriptionOutcome::Failed {
                reason: "no transcript recorded".to_string(),
            },
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let config = resolve_config(&repo_root, &args)?;
    let out_path = resolve_out_path(&repo_root, args.out.as_ref());

    let mut cases = load_cases(&resolve_path(&repo_root, &args.cases))?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let evaluator = PronunciationEvaluatorBuilder::new(config.clone())
        .build()
        .map_err(|err| format!("Failed to build PronunciationEvaluator: {err}"))?;

    let started = Instant::now();
    let case_reports = score_cases(&evaluator, &cases)?;
    let aggregates = aggregate_reports(&case_reports);

    tracing::info!(
        cases = aggregates.counts.total,
        scored = aggregates.counts.scored,
        failed = aggregates.counts.failed,
        mean_overall = aggregates
            .scores
            .overall
            .as_ref()
            .map(|d| format!("{:.2}", d.mean))
            .unwrap_or_else(|| "n/a".to_string()),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scoring pass complete"
    );

    let report = Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            window_radius: config.window_radius,
            mispronunciation_threshold: config.mispronunciation_threshold,
            case_count: case_reports.len(),
        },
        cases: case_reports,
        aggregates,
    };
    json_report_formatter::write_report(&out_path, &report)?;
    tracing::info!(path = %out_path.display(), "report written");
    Ok(())
}

fn score_cases(
    evaluator: &PronunciationEvaluator,
    cases: &[Case],
) -> Result<Vec<CaseReport>, String> {
    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_message("starting...");

    let mut reports = Vec::with_capacity(cases.len());
    for case in cases {
        progress.set_message(case.id.clone());
        let result = evaluator
            .evaluate_outcome(&case.expected_text, case.outcome())
            .map_err(|err| format!("{}: scoring failed: {err}", case.id))?;
        reports.push(compute_case_report(&case.id, &case.expected_text, result));
        progress.inc(1);
    }
    progress.finish_with_message("scoring pass complete");
    Ok(reports)
}

fn resolve_config(repo_root: &Path, args: &Args) -> Result<ScoringConfig, String> {
    let base = match args.config.as_ref() {
        Some(path) => ScoringConfig::load(&resolve_path(repo_root, path))
            .map_err(|err| format!("Failed to load scoring config: {err}"))?,
        None => ScoringConfig::default(),
    };
    let window_radius = args
        .window_radius
        .unwrap_or(base.window_radius as i64);
    let threshold = args.threshold.unwrap_or(base.mispronunciation_threshold);
    ScoringConfig::new(window_radius, threshold).map_err(|err| err.to_string())
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()))
}

fn resolve_out_path(repo_root: &Path, out: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = out {
        return resolve_path(repo_root, path);
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    repo_root
        .join("target")
        .join("pronunciation_reports")
        .join(format!("pronunciation-report-{run_id}.json"))
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}
