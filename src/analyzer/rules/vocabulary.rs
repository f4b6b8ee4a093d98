//! Keyword tables and file-format scores.
//!
//! These are configuration data, not behavior: the analyzers only iterate
//! them. `Vocabulary` owns a copy so configuration can extend the defaults
//! without touching the static tables.

use serde::{Deserialize, Serialize};

/// The five canonical resume sections, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Contact,
    Experience,
    Education,
    Skills,
    Summary,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Contact,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Summary,
    ];

    /// Lowercase key used in config files
    pub fn key(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Summary => "summary",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.key() == key.trim().to_lowercase())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Contact => write!(f, "Contact"),
            Section::Experience => write!(f, "Experience"),
            Section::Education => write!(f, "Education"),
            Section::Skills => write!(f, "Skills"),
            Section::Summary => write!(f, "Summary"),
        }
    }
}

pub const SECTION_KEYWORDS: &[(Section, &[&str])] = &[
    (
        Section::Contact,
        &["contact", "phone", "email", "address", "linkedin"],
    ),
    (
        Section::Experience,
        &["experience", "work", "employment", "career", "professional"],
    ),
    (
        Section::Education,
        &["education", "degree", "university", "college", "school"],
    ),
    (
        Section::Skills,
        &["skills", "technical", "competencies", "expertise", "abilities"],
    ),
    (Section::Summary, &["summary", "objective", "profile", "about"]),
];

pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "managed",
    "led",
    "developed",
    "created",
    "implemented",
    "improved",
    "increased",
    "reduced",
    "optimized",
    "designed",
    "built",
    "collaborated",
    "coordinated",
    "supervised",
    "trained",
    "analyzed",
    "executed",
    "delivered",
    "established",
    "maintained",
    "organized",
];

/// Impact verb stems that mark a sentence as a candidate quantified
/// achievement. Matched as substrings, so every inflection counts
/// ("reduc" covers reduce, reduces, reduced, reducing).
pub const IMPACT_KEYWORDS: &[&str] = &[
    "increas",
    "reduc",
    "grow",
    "grew",
    "boost",
    "sav",
    "cut",
    "improv",
    "lead",
    "led",
    "manag",
    "achiev",
    "build",
    "built",
    "develop",
    "creat",
    "optimi",
    "generat",
    "scal",
    "deliver",
];

/// Compatibility score per file extension (lowercase, no dot)
pub const FORMAT_SCORES: &[(&str, u8)] = &[
    ("pdf", 100),
    ("docx", 95),
    ("doc", 80),
    ("rtf", 70),
    ("txt", 60),
    ("html", 50),
    ("jpg", 20),
    ("png", 20),
    ("gif", 15),
];

pub const UNKNOWN_FORMAT_SCORE: u8 = 50;

pub const SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "c#",
    "javascript",
    "html",
    "css",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
];

/// Owned lookup tables used by one engine instance
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub sections: Vec<(Section, Vec<String>)>,
    pub action_verbs: Vec<String>,
    pub impact_keywords: Vec<String>,
    pub skills: Vec<String>,
    pub format_scores: Vec<(String, u8)>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            sections: SECTION_KEYWORDS
                .iter()
                .map(|(section, words)| (*section, owned(words)))
                .collect(),
            action_verbs: owned(ACTION_VERBS),
            impact_keywords: owned(IMPACT_KEYWORDS),
            skills: owned(SKILLS),
            format_scores: FORMAT_SCORES
                .iter()
                .map(|(ext, score)| (ext.to_string(), *score))
                .collect(),
        }
    }
}

impl Vocabulary {
    /// Add synonyms for a section; matching is case-insensitive
    pub fn extend_section(&mut self, section: Section, keywords: &[String]) {
        if let Some((_, words)) = self.sections.iter_mut().find(|(s, _)| *s == section) {
            merge_lowercase(words, keywords);
        }
    }

    pub fn extend_action_verbs(&mut self, verbs: &[String]) {
        merge_lowercase(&mut self.action_verbs, verbs);
    }

    pub fn extend_impact_keywords(&mut self, keywords: &[String]) {
        merge_lowercase(&mut self.impact_keywords, keywords);
    }

    pub fn extend_skills(&mut self, skills: &[String]) {
        merge_lowercase(&mut self.skills, skills);
    }

    /// Compatibility score for an extension (without the dot)
    pub fn format_score(&self, extension: &str) -> u8 {
        let ext = extension.to_lowercase();
        self.format_scores
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, score)| *score)
            .unwrap_or(UNKNOWN_FORMAT_SCORE)
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn merge_lowercase(target: &mut Vec<String>, extra: &[String]) {
    for word in extra {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !target.contains(&word) {
            target.push(word);
        }
    }
}
