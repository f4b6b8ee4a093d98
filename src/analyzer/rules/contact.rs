//! Contact information: email, phone, LinkedIn, location, full name

use super::{first_match, AnalysisRule};
use crate::{ContactAnalysis, Document};
use regex::Regex;
use std::sync::OnceLock;

const EMAIL_POINTS: u8 = 25;
const PHONE_POINTS: u8 = 20;
const LINKEDIN_POINTS: u8 = 15;
const LOCATION_POINTS: u8 = 10;
const NAME_POINTS: u8 = 30;

/// Number of leading non-empty lines searched for a name
const NAME_LINES: usize = 3;

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
    })
}

fn linkedin_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").expect("valid regex"))
}

/// Phone formats in precedence order
pub fn phone_patterns() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
            r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}",
            r"\(\d{3}\)\s?\d{3}[-.\s]?\d{4}",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    })
}

/// "City, ST" then "City City, ST"
pub fn location_patterns() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"\b[A-Z][a-z]+,\s*[A-Z]{2}\b",
            r"\b[A-Z][a-z]+\s+[A-Z][a-z]+,\s*[A-Z]{2}\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    })
}

/// Rule for detecting contact details
pub struct ContactRule;

impl ContactRule {
    pub fn new() -> Self {
        Self
    }

    /// At least one of the first non-empty lines has two or more tokens,
    /// and its first three tokens are alphabetic once hyphens and
    /// apostrophes are removed.
    fn has_full_name(text: &str) -> bool {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(NAME_LINES)
            .any(|line| {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                tokens.len() >= 2 && tokens.iter().take(3).all(|t| is_name_token(t))
            })
    }
}

fn is_name_token(token: &str) -> bool {
    let mut letters = token.chars().filter(|c| *c != '-' && *c != '\'').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

impl Default for ContactRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRule for ContactRule {
    type Output = ContactAnalysis;

    fn name(&self) -> &'static str {
        "contact"
    }

    fn analyze(&self, doc: &Document<'_>) -> ContactAnalysis {
        let text = doc.text;
        let mut score = 0u8;
        let mut found = Vec::new();
        let mut missing = Vec::new();

        let mut check = |hit: bool, points: u8, label: &str, missing_label: Option<&str>| {
            if hit {
                score += points;
                found.push(label.to_string());
            } else if let Some(m) = missing_label {
                missing.push(m.to_string());
            }
        };

        check(
            email_pattern().is_match(text),
            EMAIL_POINTS,
            "Email",
            Some("Email address"),
        );
        check(
            first_match(phone_patterns(), text).is_some(),
            PHONE_POINTS,
            "Phone",
            Some("Phone number"),
        );
        check(
            linkedin_pattern().is_match(text),
            LINKEDIN_POINTS,
            "LinkedIn",
            Some("LinkedIn profile"),
        );
        // location is a bonus: no "missing" entry
        check(
            first_match(location_patterns(), text).is_some(),
            LOCATION_POINTS,
            "Location",
            None,
        );
        check(
            Self::has_full_name(text),
            NAME_POINTS,
            "Name",
            Some("Full name"),
        );

        ContactAnalysis {
            score: score.min(100),
            found_elements: found,
            missing_elements: missing,
        }
    }
}
