//! Analysis engine - orchestrates all rules

use crate::cache::fingerprint;
use crate::profile::CandidateProfile;
use crate::{
    AggregateResult, ContactAnalysis, ContentAnalysis, Document, FormattingAnalysis,
    ResumeReport, SectionAnalysis, Tier,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::rules::{
    AnalysisRule, ContactRule, ContentRule, FormattingRule, SectionRule, SubScore, Vocabulary,
};
use super::scoring::round_one_decimal;
use super::ScoreCalculator;

/// Default upper bound on analyzed text (5 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Stateless scoring engine holding only immutable configuration
#[derive(Debug, Clone)]
pub struct AtsEngine {
    vocabulary: Vocabulary,
    max_input_bytes: usize,
}

impl AtsEngine {
    /// Create an engine with the built-in vocabulary
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }

    /// Replace the keyword tables (e.g. with config extensions applied)
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Set the input size bound; longer text is truncated before analysis
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// Process-wide engine with default configuration
    pub fn shared() -> &'static AtsEngine {
        static ENGINE: OnceLock<AtsEngine> = OnceLock::new();
        ENGINE.get_or_init(AtsEngine::new)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }

    /// Cut text down to the input bound, on a char boundary
    fn bounded<'t>(&self, text: &'t str) -> &'t str {
        if text.len() <= self.max_input_bytes {
            return text;
        }
        let mut end = self.max_input_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        warn!(
            original_bytes = text.len(),
            limit = self.max_input_bytes,
            "input truncated before analysis"
        );
        &text[..end]
    }

    fn run<R: AnalysisRule>(rule: &R, doc: &Document<'_>) -> R::Output {
        let output = rule.analyze(doc);
        debug!(rule = rule.name(), score = output.score(), "sub-score");
        output
    }

    pub fn analyze_contact(&self, text: &str) -> ContactAnalysis {
        Self::run(&ContactRule::new(), &Document::new(self.bounded(text)))
    }

    pub fn analyze_sections(&self, text: &str) -> SectionAnalysis {
        Self::run(
            &SectionRule::new(&self.vocabulary.sections),
            &Document::new(self.bounded(text)),
        )
    }

    pub fn analyze_content(&self, text: &str) -> ContentAnalysis {
        Self::run(
            &ContentRule::new(&self.vocabulary.action_verbs, &self.vocabulary.impact_keywords),
            &Document::new(self.bounded(text)),
        )
    }

    pub fn analyze_formatting(&self, text: &str, filename: Option<&str>) -> FormattingAnalysis {
        let doc = Document::new(self.bounded(text)).with_filename(filename);
        Self::run(&FormattingRule::new(&self.vocabulary), &doc)
    }

    /// Run all four analyzers and combine their results
    pub fn aggregate(&self, text: &str, filename: Option<&str>) -> AggregateResult {
        self.analyze_document(&Document::new(text).with_filename(filename))
    }

    pub fn analyze_document(&self, doc: &Document<'_>) -> AggregateResult {
        let doc = Document::new(self.bounded(doc.text)).with_filename(doc.filename);
        let vocab = &self.vocabulary;

        let contact = Self::run(&ContactRule::new(), &doc);
        let sections = Self::run(&SectionRule::new(&vocab.sections), &doc);
        let content = Self::run(
            &ContentRule::new(&vocab.action_verbs, &vocab.impact_keywords),
            &doc,
        );
        let formatting = Self::run(&FormattingRule::new(vocab), &doc);

        let result = ScoreCalculator::combine(contact, sections, content, formatting);
        debug!(
            overall = result.overall_score,
            tier = %result.tier,
            filename = doc.filename.unwrap_or("-"),
            "overall score"
        );
        result
    }

    /// Candidate profile using this engine's skills table
    pub fn profile(&self, text: &str) -> CandidateProfile {
        CandidateProfile::extract(self.bounded(text), &self.vocabulary.skills)
    }

    /// Full per-file report: analysis, profile and text fingerprint
    pub fn report(&self, path: &Path, doc: &Document<'_>) -> ResumeReport {
        self.report_with(path, doc, self.analyze_document(doc))
    }

    /// Build a report around an already computed (e.g. cached) analysis
    pub fn report_with(
        &self,
        path: &Path,
        doc: &Document<'_>,
        analysis: AggregateResult,
    ) -> ResumeReport {
        ResumeReport {
            path: path.to_path_buf(),
            fingerprint: fingerprint(doc.text),
            analysis,
            profile: self.profile(doc.text),
        }
    }

    /// Fingerprint of everything that changes scores besides the input
    pub fn settings_fingerprint(&self) -> String {
        fingerprint(&format!(
            "{}:{:?}:{}",
            env!("CARGO_PKG_VERSION"),
            self.vocabulary,
            self.max_input_bytes
        ))
    }

    /// Analyze multiple documents sequentially
    pub fn analyze_many(&self, docs: &[Document<'_>]) -> Vec<AggregateResult> {
        docs.iter().map(|doc| self.analyze_document(doc)).collect()
    }

    /// Analyze multiple documents in parallel using rayon
    pub fn analyze_parallel(&self, docs: &[Document<'_>]) -> Vec<AggregateResult> {
        use rayon::prelude::*;

        docs.par_iter().map(|doc| self.analyze_document(doc)).collect()
    }

    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[AggregateResult]) -> AggregateStats {
        let mut tiers: BTreeMap<Tier, usize> = [Tier::Poor, Tier::Fair, Tier::Good, Tier::Excellent]
            .into_iter()
            .map(|t| (t, 0))
            .collect();

        if results.is_empty() {
            return AggregateStats {
                files_analyzed: 0,
                average_score: 0.0,
                tiers,
            };
        }

        let total: f64 = results.iter().map(|r| r.overall_score).sum();
        for result in results {
            *tiers.entry(result.tier).or_insert(0) += 1;
        }

        AggregateStats {
            files_analyzed: results.len(),
            average_score: round_one_decimal(total / results.len() as f64),
            tiers,
        }
    }
}

impl Default for AtsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics from multiple resume analyses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of files analyzed
    pub files_analyzed: usize,
    /// Mean overall score, one decimal
    pub average_score: f64,
    /// Count of results per tier
    pub tiers: BTreeMap<Tier, usize>,
}

impl Default for AggregateStats {
    fn default() -> Self {
        AtsEngine::aggregate_stats(&[])
    }
}
