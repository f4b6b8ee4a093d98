//! Content quality: length, quantified achievements, action verbs,
//! readability, special characters and sentence length.
//!
//! Starts from 100 and subtracts a fixed penalty per failed check. The
//! numeric pattern for achievements is deliberately lenient: a bare number
//! next to an impact keyword counts.

use super::AnalysisRule;
use crate::text;
use crate::{ContentAnalysis, Document, Readability};
use regex::Regex;
use std::sync::OnceLock;

const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 2000;
const SHORT_PENALTY: u8 = 20;
const LONG_PENALTY: u8 = 10;

const ACHIEVEMENTS_STRONG: usize = 3;
const FEW_ACHIEVEMENTS_PENALTY: u8 = 5;
const NO_ACHIEVEMENTS_PENALTY: u8 = 15;

const ACTION_VERBS_STRONG: usize = 5;
const ACTION_VERBS_SOME: usize = 2;
const FEW_VERBS_PENALTY: u8 = 5;
const NO_VERBS_PENALTY: u8 = 10;

const READABLE: f64 = 60.0;
const HARD_TO_READ: f64 = 30.0;
const LESS_READABLE_PENALTY: u8 = 5;
const HARD_TO_READ_PENALTY: u8 = 10;

const SPECIAL_CHAR_RATIO: f64 = 0.10;
const SPECIAL_CHAR_PENALTY: u8 = 15;

const LONG_SENTENCE: f64 = 25.0;
const SHORT_SENTENCE: f64 = 8.0;
const SENTENCE_PENALTY: u8 = 5;

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b\d+(?:[,.]\d+)?\s*(%|percent|\$|k|K|m|M|million|thousand)?\b")
            .expect("valid regex")
    })
}

/// Characters outside `[A-Za-z0-9 \t\n.-]`
fn is_special(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || matches!(c, ' ' | '\t' | '\n' | '.' | '-'))
}

/// Rule for evaluating resume content
pub struct ContentRule<'v> {
    action_verbs: &'v [String],
    impact_keywords: &'v [String],
}

impl<'v> ContentRule<'v> {
    pub fn new(action_verbs: &'v [String], impact_keywords: &'v [String]) -> Self {
        Self {
            action_verbs,
            impact_keywords,
        }
    }

    /// Sentences containing an impact keyword and a number
    fn count_quantified(&self, sentences: &[&str]) -> usize {
        sentences
            .iter()
            .filter(|sentence| {
                let lower = sentence.to_lowercase();
                self.impact_keywords.iter().any(|k| lower.contains(k.as_str()))
                    && number_pattern().is_match(&lower)
            })
            .count()
    }

    /// Vocabulary verbs present anywhere in the text
    fn count_action_verbs(&self, text_lower: &str) -> usize {
        self.action_verbs
            .iter()
            .filter(|v| text_lower.contains(v.as_str()))
            .count()
    }
}

fn special_char_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    let special = text.chars().filter(|c| is_special(*c)).count();
    text::ratio(special, total)
}

struct Tally {
    score: u8,
    issues: Vec<String>,
    strengths: Vec<String>,
}

impl Tally {
    fn penalize(&mut self, points: u8, issue: impl Into<String>) {
        self.score = self.score.saturating_sub(points);
        self.issues.push(issue.into());
    }

    fn strength(&mut self, strength: impl Into<String>) {
        self.strengths.push(strength.into());
    }
}

impl AnalysisRule for ContentRule<'_> {
    type Output = ContentAnalysis;

    fn name(&self) -> &'static str {
        "content"
    }

    fn analyze(&self, doc: &Document<'_>) -> ContentAnalysis {
        let text = doc.text;
        let mut tally = Tally {
            score: 100,
            issues: Vec::new(),
            strengths: Vec::new(),
        };

        let word_count = text::word_count(text);
        if word_count < MIN_WORDS {
            tally.penalize(SHORT_PENALTY, "Resume is too short (under 200 words)");
        } else if word_count > MAX_WORDS {
            tally.penalize(LONG_PENALTY, "Resume may be too long (over 2000 words)");
        } else {
            tally.strength(format!("Good length ({} words)", word_count));
        }

        let sentences = text::sentences(text);
        let quantified = self.count_quantified(&sentences);
        if quantified >= ACHIEVEMENTS_STRONG {
            tally.strength("Contains quantified achievements");
        } else if quantified >= 1 {
            tally.penalize(
                FEW_ACHIEVEMENTS_PENALTY,
                "Could use more quantified achievements",
            );
        } else {
            tally.penalize(
                NO_ACHIEVEMENTS_PENALTY,
                "Lacks quantified achievements (numbers, percentages)",
            );
        }

        let action_verbs = self.count_action_verbs(&text.to_lowercase());
        if action_verbs >= ACTION_VERBS_STRONG {
            tally.strength("Uses strong action verbs");
        } else if action_verbs >= ACTION_VERBS_SOME {
            tally.penalize(FEW_VERBS_PENALTY, "Could use more action verbs");
        } else {
            tally.penalize(NO_VERBS_PENALTY, "Lacks strong action verbs");
        }

        let readability = match text::flesch_reading_ease(text) {
            Some(value) => {
                if value >= READABLE {
                    tally.strength("Good readability score");
                } else if value >= HARD_TO_READ {
                    tally.penalize(LESS_READABLE_PENALTY, "Text could be more readable");
                } else {
                    tally.penalize(HARD_TO_READ_PENALTY, "Text is difficult to read");
                }
                Readability::Score(value)
            }
            None => Readability::Unavailable,
        };

        if special_char_ratio(text) > SPECIAL_CHAR_RATIO {
            tally.penalize(
                SPECIAL_CHAR_PENALTY,
                "May contain excessive special characters/formatting",
            );
        }

        let average_sentence_length = text::average_sentence_length(&sentences);
        if average_sentence_length > LONG_SENTENCE {
            tally.penalize(SENTENCE_PENALTY, "Sentences may be too long");
        } else if average_sentence_length < SHORT_SENTENCE {
            tally.penalize(SENTENCE_PENALTY, "Sentences may be too short");
        }

        ContentAnalysis {
            score: tally.score.min(100),
            word_count,
            quantified_achievements: quantified,
            action_verbs_found: action_verbs,
            readability,
            average_sentence_length,
            issues: tally.issues,
            strengths: tally.strengths,
        }
    }
}
