//! ats-lens: Resume ATS Compatibility Checker
//!
//! This library scores plain resume text against heuristics that approximate
//! how Applicant Tracking Systems parse and rank candidate documents, and
//! renders an improvement report from the result.

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod extract;
pub mod history;
pub mod profile;
pub mod reporter;
pub mod text;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use analyzer::rules::SubScore;
pub use analyzer::AtsEngine;
pub use profile::CandidateProfile;

/// Resume text plus the original filename, as handed to the analyzers
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    /// Extracted plain text
    pub text: &'a str,
    /// Original file name (only used for format compatibility)
    pub filename: Option<&'a str>,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: Option<&'a str>) -> Self {
        self.filename = filename.filter(|f| !f.is_empty());
        self
    }
}

/// Contact information analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAnalysis {
    /// Sub-score (0-100)
    pub score: u8,
    /// Labels of contact elements that were detected
    pub found_elements: Vec<String>,
    /// Labels of contact elements that were not detected
    pub missing_elements: Vec<String>,
}

/// Canonical resume section detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAnalysis {
    /// Sub-score (0-100), 20 points per section
    pub score: u8,
    pub found_sections: Vec<String>,
    pub missing_sections: Vec<String>,
}

/// Content quality heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    /// Sub-score (0-100)
    pub score: u8,
    /// Whitespace-separated token count
    pub word_count: usize,
    /// Sentences pairing an impact keyword with a number
    pub quantified_achievements: usize,
    /// Distinct action verbs present in the text
    pub action_verbs_found: usize,
    /// Reading-ease score of the whole text
    pub readability: Readability,
    /// Mean tokens per sentence (0 when there are no sentences)
    pub average_sentence_length: f64,
    /// Problems in detection order
    pub issues: Vec<String>,
    /// Positive findings in detection order
    pub strengths: Vec<String>,
}

/// Formatting compatibility heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingAnalysis {
    /// Sub-score (0-100)
    pub score: u8,
    /// Compatibility of the file format, when a filename was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_score: Option<u8>,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Reading-ease value, or unavailable when the text has no measurable sentences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Readability {
    Score(f64),
    Unavailable,
}

impl Readability {
    pub fn value(&self) -> Option<f64> {
        match self {
            Readability::Score(v) => Some(*v),
            Readability::Unavailable => None,
        }
    }
}

impl std::fmt::Display for Readability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readability::Score(v) => write!(f, "{:.2}", v),
            Readability::Unavailable => write!(f, "Unable to calculate"),
        }
    }
}

/// ATS compatibility tier, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Tier {
    /// Classify an overall score (inclusive lower bounds)
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Tier::Excellent
        } else if score >= 70.0 {
            Tier::Good
        } else if score >= 50.0 {
            Tier::Fair
        } else {
            Tier::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent - Highly ATS Compatible",
            Tier::Good => "Good - ATS Compatible with minor improvements",
            Tier::Fair => "Fair - Needs improvements for better ATS compatibility",
            Tier::Poor => "Poor - Major improvements needed for ATS compatibility",
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Tier::Excellent => "🟢",
            Tier::Good => "🟡",
            Tier::Fair => "🟠",
            Tier::Poor => "🔴",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Excellent => write!(f, "Excellent"),
            Tier::Good => write!(f, "Good"),
            Tier::Fair => write!(f, "Fair"),
            Tier::Poor => write!(f, "Poor"),
        }
    }
}

/// Sub-scores of the four analyzers (each 0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub contact_information: u8,
    pub resume_sections: u8,
    pub content_quality: u8,
    pub formatting: u8,
}

/// The combined result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// Weighted overall score (0-100, one decimal)
    pub overall_score: f64,
    /// Compatibility tier of the overall score
    pub tier: Tier,
    pub contact: ContactAnalysis,
    pub sections: SectionAnalysis,
    pub content: ContentAnalysis,
    pub formatting: FormattingAnalysis,
    /// Consolidated recommendations (at most eight)
    pub recommendations: Vec<String>,
    /// Strengths passed through from content analysis
    pub strengths: Vec<String>,
}

impl AggregateResult {
    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            contact_information: self.contact.score,
            resume_sections: self.sections.score,
            content_quality: self.content.score,
            formatting: self.formatting.score,
        }
    }
}

/// Everything reported for one analyzed resume file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReport {
    pub path: PathBuf,
    /// SHA-256 of the analyzed text
    pub fingerprint: String,
    pub analysis: AggregateResult,
    pub profile: CandidateProfile,
}

/// Detect contact details with the default engine
pub fn analyze_contact(text: &str) -> ContactAnalysis {
    AtsEngine::shared().analyze_contact(text)
}

/// Detect canonical sections with the default engine
pub fn analyze_sections(text: &str) -> SectionAnalysis {
    AtsEngine::shared().analyze_sections(text)
}

/// Evaluate content quality with the default engine
pub fn analyze_content(text: &str) -> ContentAnalysis {
    AtsEngine::shared().analyze_content(text)
}

/// Evaluate formatting compatibility with the default engine
pub fn analyze_formatting(text: &str, filename: Option<&str>) -> FormattingAnalysis {
    AtsEngine::shared().analyze_formatting(text, filename)
}

/// Run all four analyzers and combine them into an overall score
pub fn aggregate(text: &str, filename: Option<&str>) -> AggregateResult {
    AtsEngine::shared().aggregate(text, filename)
}

/// Render the plain-text compatibility report
pub fn render_report(result: &AggregateResult) -> String {
    reporter::text::render_report(result)
}
