//! Candidate profile: location, known skills and years of experience,
//! used to build a job-search query.

use crate::analyzer::rules::contact::location_patterns;
use crate::analyzer::rules::first_match;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Skills preferred as the single search term, in this order
const PREFERRED_QUERY_SKILLS: &[&str] = &["java", "python", "sql"];

fn experience_patterns() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?i)(\d+)\s*to\s*(\d+)\s*years",
            r"(?i)(\d+)\s*-\s*(\d+)\s*years",
            r"(?i)(\d+)\+?\s*years",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    })
}

/// Job-search hints extracted from resume text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    /// First "City, ST" style match
    pub location: Option<String>,
    /// Known skills present in the text, in table order
    pub skills: Vec<String>,
    /// Largest year count mentioned
    pub experience_years: u32,
}

impl CandidateProfile {
    /// Extract a profile, matching skills from the given table
    pub fn extract(text: &str, skills_table: &[String]) -> Self {
        let location = first_match(location_patterns(), text).map(|m| m.as_str().to_string());

        let lower = text.to_lowercase();
        let mut skills: Vec<String> = Vec::new();
        for skill in skills_table {
            if lower.contains(skill.as_str()) && !skills.contains(skill) {
                skills.push(skill.clone());
            }
        }

        Self {
            location,
            skills,
            experience_years: experience_years(text),
        }
    }

    /// `"<skill> jobs"` for the first preferred skill found, otherwise every
    /// skill joined; `None` without skills.
    pub fn search_query(&self) -> Option<String> {
        if self.skills.is_empty() {
            return None;
        }
        let preferred = self
            .skills
            .iter()
            .find(|s| PREFERRED_QUERY_SKILLS.contains(&s.as_str()));
        Some(match preferred {
            Some(skill) => format!("{} jobs", skill),
            None => format!("{} jobs", self.skills.join(" ")),
        })
    }
}

/// Maximum year count over all experience patterns, 0 when none match
pub fn experience_years(text: &str) -> u32 {
    experience_patterns()
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .flat_map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .filter_map(|m| m.as_str().parse::<u32>().ok())
                .collect::<Vec<_>>()
        })
        .max()
        .unwrap_or(0)
}
