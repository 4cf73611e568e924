use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use libtest_mimic::{Arguments, Failed, Trial};
use pronunciation_scoring::{
    AttemptFeedback, MispronunciationRecord, PronunciationEvaluatorBuilder, ScoreBundle,
    ScoringConfig, TranscriptionOutcome,
};
use serde::Deserialize;

const DEFAULT_DELTA: f64 = 1e-9;
const SUITE_NAME: &str = "reference_scores_match_within_delta";
const FIXTURE_PATH: &str = "test-data/scoring/reference_cases.json";

#[derive(Debug, Deserialize)]
struct ReferenceCase {
    id: String,
    expected_text: String,
    transcript: String,
    window_radius: i64,
    mispronunciation_threshold: f64,
    expected: ScoreBundle,
}

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let delta = env_f64("PRONUNCIATION_IT_DELTA", DEFAULT_DELTA);

    let cases = match load_cases(&repo_root.join(FIXTURE_PATH)) {
        Ok(cases) => cases,
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };
    if cases.is_empty() {
        run_setup_failure(&args, format!("No reference cases found in {FIXTURE_PATH}."));
        return;
    }

    let tests = cases
        .into_iter()
        .map(|case| {
            let test_name = format!("{SUITE_NAME}::case::{}", case.id);
            Trial::test(test_name, move || {
                run_reference_case(&case, delta).map_err(Failed::from)
            })
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn run_reference_case(case: &ReferenceCase, delta: f64) -> Result<(), String> {
    let config = ScoringConfig::new(case.window_radius, case.mispronunciation_threshold)
        .map_err(|err| format!("{}: invalid fixture config: {err}", case.id))?;
    let evaluator = PronunciationEvaluatorBuilder::new(config)
        .build()
        .map_err(|err| format!("{}: build failed: {err}", case.id))?;

    let result = evaluator
        .evaluate_outcome(
            &case.expected_text,
            TranscriptionOutcome::Transcript(case.transcript.clone()),
        )
        .map_err(|err| format!("{}: evaluate_outcome() failed: {err}", case.id))?;
    let actual = match &result.feedback {
        AttemptFeedback::Scored(bundle) => bundle,
        AttemptFeedback::Failed { error } => {
            return Err(format!("{}: unexpected failure marker: {error}", case.id));
        }
    };

    compare_bundle(&case.id, actual, &case.expected, delta)
}

fn compare_bundle(
    id: &str,
    actual: &ScoreBundle,
    expected: &ScoreBundle,
    delta: f64,
) -> Result<(), String> {
    let mut failures = Vec::new();

    for (name, got, want) in [
        ("correctness_score", actual.correctness_score, expected.correctness_score),
        ("fluency_score", actual.fluency_score, expected.fluency_score),
        ("clarity_score", actual.clarity_score, expected.clarity_score),
        ("overall_score", actual.overall_score, expected.overall_score),
    ] {
        if (got - want).abs() > delta {
            failures.push(format!("{name}: got {got}, want {want}"));
        }
    }

    let got_analysis = &actual.detailed_analysis;
    let want_analysis = &expected.detailed_analysis;
    if got_analysis.expected_words != want_analysis.expected_words
        || got_analysis.transcribed_words != want_analysis.transcribed_words
    {
        failures.push(format!(
            "word counts: got {}/{}, want {}/{}",
            got_analysis.expected_words,
            got_analysis.transcribed_words,
            want_analysis.expected_words,
            want_analysis.transcribed_words
        ));
    }
    if got_analysis.word_scores.len() != want_analysis.word_scores.len() {
        failures.push(format!(
            "word_scores length: got {}, want {}",
            got_analysis.word_scores.len(),
            want_analysis.word_scores.len()
        ));
    } else {
        for (idx, (got, want)) in got_analysis
            .word_scores
            .iter()
            .zip(want_analysis.word_scores.iter())
            .enumerate()
        {
            if (got - want).abs() > delta {
                failures.push(format!("word_scores[{idx}]: got {got}, want {want}"));
            }
        }
    }

    compare_records(
        &actual.mispronounced_words,
        &expected.mispronounced_words,
        delta,
        &mut failures,
    );

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{id}:\n  {}", failures.join("\n  ")))
    }
}

fn compare_records(
    actual: &[MispronunciationRecord],
    expected: &[MispronunciationRecord],
    delta: f64,
    failures: &mut Vec<String>,
) {
    if actual.len() != expected.len() {
        failures.push(format!(
            "mispronounced_words length: got {}, want {}",
            actual.len(),
            expected.len()
        ));
        return;
    }
    for (got, want) in actual.iter().zip(expected.iter()) {
        let same_labels = got.word == want.word
            && got.expected_pronunciation == want.expected_pronunciation
            && got.actual_pronunciation == want.actual_pronunciation
            && got.position == want.position;
        if !same_labels || (got.confidence_score - want.confidence_score).abs() > delta {
            failures.push(format!("mispronounced record: got {got:?}, want {want:?}"));
        }
    }
}

fn load_cases(path: &Path) -> Result<Vec<ReferenceCase>, String> {
    let file = File::open(path).map_err(|err| {
        format!(
            "Missing reference fixture {}: {err}. Regenerate test-data/scoring.",
            path.display()
        )
    })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse {}: {err}", path.display()))
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(default)
}
