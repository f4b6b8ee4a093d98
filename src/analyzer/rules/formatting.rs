//! Formatting compatibility: file format, table/column layout, unusual
//! characters and spacing.

use super::vocabulary::Vocabulary;
use super::AnalysisRule;
use crate::text;
use crate::{Document, FormattingAnalysis};

const COMPATIBLE_FORMAT: u8 = 95;
const ACCEPTABLE_FORMAT: u8 = 70;
const FORMAT_PENALTY: u8 = 10;

/// Three double-spaces in a row
const COLUMN_GAP: &str = "      ";
const COMPLEX_LINE_RATIO: f64 = 0.3;
const COMPLEX_PENALTY: u8 = 15;

const MAX_UNUSUAL_CHARS: usize = 10;
const UNUSUAL_PENALTY: u8 = 10;

const DOUBLE_SPACE_RATIO: f64 = 0.1;
const SPACING_PENALTY: u8 = 5;

/// Characters outside `[A-Za-z0-9 \t\n.,;:()\-@/]`
fn is_unusual(c: char) -> bool {
    !(c.is_ascii_alphanumeric()
        || matches!(
            c,
            ' ' | '\t' | '\n' | '.' | ',' | ';' | ':' | '(' | ')' | '-' | '@' | '/'
        ))
}

/// Extension after the last dot, lowercased; empty when there is no dot
fn extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Rule for evaluating formatting compatibility
pub struct FormattingRule<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> FormattingRule<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }
}

impl AnalysisRule for FormattingRule<'_> {
    type Output = FormattingAnalysis;

    fn name(&self) -> &'static str {
        "formatting"
    }

    fn analyze(&self, doc: &Document<'_>) -> FormattingAnalysis {
        let text = doc.text;
        let mut score = 100u8;
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        let format_score = doc.filename.map(|filename| {
            let ext = extension(filename);
            let format_score = self.vocabulary.format_score(&ext);
            if format_score < ACCEPTABLE_FORMAT {
                let shown = if ext.is_empty() {
                    "(no extension)".to_string()
                } else {
                    format!(".{}", ext)
                };
                score = score.saturating_sub(FORMAT_PENALTY);
                issues.push(format!("File format {} may not be ATS-friendly", shown));
                recommendations.push("Use PDF or DOCX format".to_string());
            } else if format_score < COMPATIBLE_FORMAT {
                recommendations.push("PDF or DOCX formats are more ATS-friendly".to_string());
            }
            format_score
        });

        let lines = text::lines(text);
        let complex = lines
            .iter()
            .filter(|line| line.contains('\t') || line.contains(COLUMN_GAP))
            .count();
        if complex as f64 > lines.len() as f64 * COMPLEX_LINE_RATIO {
            score = score.saturating_sub(COMPLEX_PENALTY);
            issues.push("May contain complex formatting (tables/columns)".to_string());
            recommendations.push("Use simple formatting without tables".to_string());
        }

        let unusual = text.chars().filter(|c| is_unusual(*c)).count();
        if unusual > MAX_UNUSUAL_CHARS {
            score = score.saturating_sub(UNUSUAL_PENALTY);
            issues.push("Contains unusual characters that may cause parsing issues".to_string());
            recommendations.push("Remove special symbols and fancy formatting".to_string());
        }

        let double_spaces = text.matches("  ").count();
        if double_spaces as f64 > text::word_count(text) as f64 * DOUBLE_SPACE_RATIO {
            score = score.saturating_sub(SPACING_PENALTY);
            issues.push("Inconsistent spacing detected".to_string());
            recommendations.push("Use consistent single spacing".to_string());
        }

        FormattingAnalysis {
            score: score.min(100),
            format_score,
            issues,
            recommendations,
        }
    }
}
