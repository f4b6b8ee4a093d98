//! Score calculation: weighting, tier classification and consolidated
//! recommendations

use crate::{
    AggregateResult, ContactAnalysis, ContentAnalysis, FormattingAnalysis, ScoreBreakdown,
    SectionAnalysis, Tier,
};

pub const CONTACT_WEIGHT: f64 = 0.25;
pub const SECTIONS_WEIGHT: f64 = 0.25;
pub const CONTENT_WEIGHT: f64 = 0.35;
pub const FORMATTING_WEIGHT: f64 = 0.15;

/// Upper bound on the consolidated recommendation list
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Calculator for overall ATS scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Weighted overall score, rounded to one decimal and kept in [0, 100]
    pub fn overall(breakdown: &ScoreBreakdown) -> f64 {
        let raw = breakdown.contact_information as f64 * CONTACT_WEIGHT
            + breakdown.resume_sections as f64 * SECTIONS_WEIGHT
            + breakdown.content_quality as f64 * CONTENT_WEIGHT
            + breakdown.formatting as f64 * FORMATTING_WEIGHT;
        round_one_decimal(raw).clamp(0.0, 100.0)
    }

    /// Category labels with their weights, in report order
    pub fn weights() -> [(&'static str, f64); 4] {
        [
            ("Contact Information", CONTACT_WEIGHT),
            ("Resume Sections", SECTIONS_WEIGHT),
            ("Content Quality", CONTENT_WEIGHT),
            ("Formatting", FORMATTING_WEIGHT),
        ]
    }

    /// Consolidated recommendations: missing contact info, missing sections,
    /// content issues, then formatting recommendations, capped.
    pub fn recommendations(
        contact: &ContactAnalysis,
        sections: &SectionAnalysis,
        content: &ContentAnalysis,
        formatting: &FormattingAnalysis,
    ) -> Vec<String> {
        let mut recs = Vec::new();

        if !contact.missing_elements.is_empty() {
            recs.push(format!(
                "Add missing contact info: {}",
                contact.missing_elements.join(", ")
            ));
        }

        if !sections.missing_sections.is_empty() {
            recs.push(format!(
                "Include these sections: {}",
                sections.missing_sections.join(", ")
            ));
        }

        recs.extend(content.issues.iter().cloned());
        recs.extend(formatting.recommendations.iter().cloned());
        recs.truncate(MAX_RECOMMENDATIONS);
        recs
    }

    /// Combine the four analyzer results into the aggregate payload
    pub fn combine(
        contact: ContactAnalysis,
        sections: SectionAnalysis,
        content: ContentAnalysis,
        formatting: FormattingAnalysis,
    ) -> AggregateResult {
        let breakdown = ScoreBreakdown {
            contact_information: contact.score,
            resume_sections: sections.score,
            content_quality: content.score,
            formatting: formatting.score,
        };
        let overall_score = Self::overall(&breakdown);
        let recommendations = Self::recommendations(&contact, &sections, &content, &formatting);
        let strengths = content.strengths.clone();

        AggregateResult {
            overall_score,
            tier: Tier::from_score(overall_score),
            contact,
            sections,
            content,
            formatting,
            recommendations,
            strengths,
        }
    }
}

/// One-decimal rounding with ties going to the even digit (96.25 -> 96.2)
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
