//! The four independent resume analyzers

pub mod contact;
pub mod content;
pub mod formatting;
pub mod sections;
pub mod vocabulary;

pub use contact::ContactRule;
pub use content::ContentRule;
pub use formatting::FormattingRule;
pub use sections::SectionRule;
pub use vocabulary::{Section, Vocabulary};

use crate::{ContactAnalysis, ContentAnalysis, Document, FormattingAnalysis, SectionAnalysis};
use regex::{Match, Regex};

/// A result that carries a 0-100 sub-score
pub trait SubScore {
    fn score(&self) -> u8;
}

/// Trait for analysis rules
pub trait AnalysisRule {
    type Output: SubScore;

    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Analyze a document; never fails, degenerate input degrades the score
    fn analyze(&self, doc: &Document<'_>) -> Self::Output;
}

/// First match of an ordered pattern list, evaluated until one hits
pub fn first_match<'t>(patterns: &[Regex], text: &'t str) -> Option<Match<'t>> {
    patterns.iter().find_map(|re| re.find(text))
}

impl SubScore for ContactAnalysis {
    fn score(&self) -> u8 {
        self.score
    }
}

impl SubScore for SectionAnalysis {
    fn score(&self) -> u8 {
        self.score
    }
}

impl SubScore for ContentAnalysis {
    fn score(&self) -> u8 {
        self.score
    }
}

impl SubScore for FormattingAnalysis {
    fn score(&self) -> u8 {
        self.score
    }
}
