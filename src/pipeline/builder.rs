use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::defaults::{WeightedPronunciationScorer, WhitespaceTokenizer, WindowedWordAligner};
use crate::pipeline::runtime::{PronunciationEvaluator, PronunciationEvaluatorParts};
use crate::pipeline::traits::{PronunciationScorer, Tokenizer, WordAligner};

pub struct PronunciationEvaluatorBuilder {
    config: ScoringConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    word_aligner: Option<Box<dyn WordAligner>>,
    scorer: Option<Box<dyn PronunciationScorer>>,
}

impl PronunciationEvaluatorBuilder {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            word_aligner: None,
            scorer: None,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_word_aligner(mut self, word_aligner: Box<dyn WordAligner>) -> Self {
        self.word_aligner = Some(word_aligner);
        self
    }

    pub fn with_scorer(mut self, scorer: Box<dyn PronunciationScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn build(self) -> Result<PronunciationEvaluator, ScoringError> {
        self.config.validate()?;

        Ok(PronunciationEvaluator::from_parts(PronunciationEvaluatorParts {
            config: self.config,
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(WhitespaceTokenizer)),
            word_aligner: self
                .word_aligner
                .unwrap_or_else(|| Box::new(WindowedWordAligner)),
            scorer: self
                .scorer
                .unwrap_or_else(|| Box::new(WeightedPronunciationScorer)),
        }))
    }
}
