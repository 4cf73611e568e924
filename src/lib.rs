pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod types;

pub use alignment::similarity::similarity_ratio;
pub use alignment::tokenization::tokenize_words;
pub use alignment::window::{align, align_tokens};
pub use config::ScoringConfig;
pub use error::ScoringError;
pub use pipeline::builder::PronunciationEvaluatorBuilder;
pub use pipeline::runtime::PronunciationEvaluator;
pub use pipeline::traits::{PronunciationScorer, Tokenizer, Transcriber, WordAligner};
pub use report::{
    aggregate_reports, compute_case_report, AggregateReport, CaseReport, Meta, Report,
    REPORT_SCHEMA_VERSION,
};
pub use scoring::score;
pub use types::{
    AttemptFeedback, AttemptResult, DetailedAnalysis, MatchResult, MispronunciationRecord,
    ScoreBundle, TranscriptionOutcome, WordToken,
};
