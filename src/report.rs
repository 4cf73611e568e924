use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::types::{AttemptFeedback, AttemptResult};

pub const REPORT_SCHEMA_VERSION: u32 = 1;
const MOST_MISPRONOUNCED_TOP_N: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub window_radius: usize,
    pub mispronunciation_threshold: f64,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub expected_text: String,
    pub transcribed_text: String,
    pub feedback: AttemptFeedback,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub scores: ScoreDistributions,
    pub most_mispronounced: Vec<WordFrequency>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub scored: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ScoreDistributions {
    pub correctness: Option<MetricDistribution>,
    pub fluency: Option<MetricDistribution>,
    pub clarity: Option<MetricDistribution>,
    pub overall: Option<MetricDistribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDistribution {
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u32,
}

pub fn compute_case_report(id: &str, expected_text: &str, result: AttemptResult) -> CaseReport {
    let mut notes = Vec::new();
    match &result.feedback {
        AttemptFeedback::Failed { .. } => notes.push("transcription_failed".to_string()),
        AttemptFeedback::Scored(bundle) => {
            let analysis = &bundle.detailed_analysis;
            if analysis.transcribed_words == 0 {
                notes.push("empty_transcript".to_string());
            }
            if analysis.expected_words != analysis.transcribed_words {
                notes.push(format!(
                    "word_count_mismatch:expected={} transcribed={}",
                    analysis.expected_words, analysis.transcribed_words
                ));
            }
        }
    }

    CaseReport {
        id: id.to_string(),
        expected_text: expected_text.to_string(),
        transcribed_text: result.transcribed_text,
        feedback: result.feedback,
        notes,
    }
}

pub fn aggregate_reports(cases: &[CaseReport]) -> AggregateReport {
    let bundles: Vec<_> = cases
        .iter()
        .filter_map(|case| case.feedback.bundle())
        .collect();

    let scores_of = |pick: fn(&crate::types::ScoreBundle) -> f64| -> Vec<f64> {
        bundles.iter().map(|bundle| pick(bundle)).collect()
    };

    let mut word_counts: HashMap<&str, u32> = HashMap::new();
    for bundle in &bundles {
        for record in &bundle.mispronounced_words {
            *word_counts.entry(record.word.as_str()).or_insert(0) += 1;
        }
    }
    let mut most_mispronounced: Vec<WordFrequency> = word_counts
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word: word.to_string(),
            count,
        })
        .collect();
    most_mispronounced.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    most_mispronounced.truncate(MOST_MISPRONOUNCED_TOP_N);

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(cases.len()),
            scored: to_u32(bundles.len()),
            failed: to_u32(cases.len().saturating_sub(bundles.len())),
        },
        scores: ScoreDistributions {
            correctness: distribution_or_none(&scores_of(|b| b.correctness_score)),
            fluency: distribution_or_none(&scores_of(|b| b.fluency_score)),
            clarity: distribution_or_none(&scores_of(|b| b.clarity_score)),
            overall: distribution_or_none(&scores_of(|b| b.overall_score)),
        },
        most_mispronounced,
    }
}

fn distribution_or_none(values: &[f64]) -> Option<MetricDistribution> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(MetricDistribution {
        mean: mean(&sorted),
        p50: percentile_sorted(&sorted, 0.5),
        p90: percentile_sorted(&sorted, 0.9),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn percentile_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    if sorted_values.len() == 1 {
        return sorted_values[0];
    }

    let clamped = percentile.clamp(0.0, 1.0);
    let max_index = (sorted_values.len() - 1) as f64;
    let rank = clamped * max_index;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = rank - lower as f64;
        sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
