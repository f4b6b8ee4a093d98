//! Canonical section detection by keyword membership

use super::vocabulary::Section;
use super::AnalysisRule;
use crate::{Document, SectionAnalysis};

const POINTS_PER_SECTION: u8 = 20;

/// Rule for detecting the five canonical resume sections
pub struct SectionRule<'v> {
    sections: &'v [(Section, Vec<String>)],
}

impl<'v> SectionRule<'v> {
    pub fn new(sections: &'v [(Section, Vec<String>)]) -> Self {
        Self { sections }
    }
}

impl AnalysisRule for SectionRule<'_> {
    type Output = SectionAnalysis;

    fn name(&self) -> &'static str {
        "sections"
    }

    fn analyze(&self, doc: &Document<'_>) -> SectionAnalysis {
        let text_lower = doc.text.to_lowercase();
        let mut score = 0u8;
        let mut found = Vec::new();
        let mut missing = Vec::new();

        for (section, keywords) in self.sections {
            if keywords.iter().any(|k| text_lower.contains(k.as_str())) {
                score = score.saturating_add(POINTS_PER_SECTION);
                found.push(section.to_string());
            } else {
                missing.push(section.to_string());
            }
        }

        SectionAnalysis {
            score: score.min(100),
            found_sections: found,
            missing_sections: missing,
        }
    }
}
