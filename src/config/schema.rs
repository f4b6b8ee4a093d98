//! Config schema and deserialization

use crate::analyzer::rules::{Section, Vocabulary};
use crate::analyzer::AtsEngine;
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// File-name suffixes scanned when no `resumePatterns` are configured
pub const DEFAULT_RESUME_PATTERNS: &[&str] = &[".txt", ".md", ".text"];

/// Extra keywords appended to the built-in tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyConfig {
    /// Section key (contact, experience, education, skills, summary) -> synonyms
    #[serde(default)]
    pub sections: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub action_verbs: Vec<String>,

    #[serde(default)]
    pub impact_keywords: Vec<String>,

    #[serde(default)]
    pub skills: Vec<String>,
}

impl VocabularyConfig {
    /// Base entries first, then this config's entries
    fn merge_from(&mut self, base: VocabularyConfig) {
        for (section, mut words) in base.sections {
            let entry = self.sections.entry(section).or_default();
            words.append(entry);
            *entry = words;
        }
        prepend(&mut self.action_verbs, base.action_verbs);
        prepend(&mut self.impact_keywords, base.impact_keywords);
        prepend(&mut self.skills, base.skills);
    }
}

fn prepend(target: &mut Vec<String>, mut base: Vec<String>) {
    base.append(target);
    *target = base;
}

/// Root config structure for .atslensrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Minimum overall score (exit 1 if any resume is below)
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Glob patterns for files/directories to exclude from scans
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Custom resume file suffixes (default: .txt, .md, .text)
    #[serde(default)]
    pub resume_patterns: Vec<String>,

    /// Largest input accepted, in bytes
    #[serde(default)]
    pub max_input_bytes: Option<u64>,

    #[serde(default)]
    pub vocabulary: VocabularyConfig,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<f64>, cli_max_bytes: Option<u64>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_max_bytes.is_some() {
            self.max_input_bytes = cli_max_bytes;
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.max_input_bytes.is_none() {
            self.max_input_bytes = base.max_input_bytes;
        }

        prepend(&mut self.ignore, base.ignore);

        if self.resume_patterns.is_empty() {
            self.resume_patterns = base.resume_patterns;
        }

        self.vocabulary.merge_from(base.vocabulary);
    }

    /// Resume file suffixes for directory scans
    pub fn get_resume_patterns(&self) -> Vec<&str> {
        if self.resume_patterns.is_empty() {
            DEFAULT_RESUME_PATTERNS.to_vec()
        } else {
            self.resume_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Effective input bound in bytes
    pub fn max_input_bytes(&self) -> u64 {
        self.max_input_bytes
            .unwrap_or(crate::analyzer::engine::DEFAULT_MAX_INPUT_BYTES as u64)
    }

    /// Built-in tables extended with this config's entries
    pub fn build_vocabulary(&self) -> Result<Vocabulary> {
        let mut vocabulary = Vocabulary::default();
        for (key, words) in &self.vocabulary.sections {
            let Some(section) = Section::from_key(key) else {
                anyhow::bail!(
                    "Unknown section \"{}\" in vocabulary.sections (expected one of: {})",
                    key,
                    Section::ALL.map(|s| s.key()).join(", ")
                );
            };
            vocabulary.extend_section(section, words);
        }
        vocabulary.extend_action_verbs(&self.vocabulary.action_verbs);
        vocabulary.extend_impact_keywords(&self.vocabulary.impact_keywords);
        vocabulary.extend_skills(&self.vocabulary.skills);
        Ok(vocabulary)
    }

    /// Engine configured from this file
    pub fn build_engine(&self) -> Result<AtsEngine> {
        let max_bytes = usize::try_from(self.max_input_bytes()).unwrap_or(usize::MAX);
        Ok(AtsEngine::new()
            .with_vocabulary(self.build_vocabulary()?)
            .with_max_input_bytes(max_bytes))
    }
}
