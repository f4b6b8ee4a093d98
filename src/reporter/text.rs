//! Plain-text compatibility report

use crate::AggregateResult;

const WIDTH: usize = 60;

/// Render the fixed-structure report for one aggregate result
pub fn render_report(result: &AggregateResult) -> String {
    let rule = "=".repeat(WIDTH);
    let mut lines = vec![
        rule.clone(),
        "ATS RESUME COMPATIBILITY REPORT".to_string(),
        rule.clone(),
        String::new(),
        format!("OVERALL ATS SCORE: {:.1}/100", result.overall_score),
        format!("{} {}", result.tier.indicator(), result.tier.label()),
        String::new(),
    ];

    let breakdown = result.breakdown();
    lines.extend([
        "DETAILED SCORE BREAKDOWN:".to_string(),
        "-".repeat(40),
        format!("Contact Information:  {}/100", breakdown.contact_information),
        format!("Resume Sections:      {}/100", breakdown.resume_sections),
        format!("Content Quality:      {}/100", breakdown.content_quality),
        format!("Formatting:           {}/100", breakdown.formatting),
        String::new(),
    ]);

    if !result.strengths.is_empty() {
        lines.push("STRENGTHS:".to_string());
        lines.extend(result.strengths.iter().map(|s| format!("   • {}", s)));
        lines.push(String::new());
    }

    if !result.recommendations.is_empty() {
        lines.push("IMPROVEMENT RECOMMENDATIONS:".to_string());
        lines.extend(
            result
                .recommendations
                .iter()
                .enumerate()
                .map(|(i, rec)| format!("   {}. {}", i + 1, rec)),
        );
        lines.push(String::new());
    }

    lines.push("CONTACT INFORMATION ANALYSIS:".to_string());
    found_missing(
        &mut lines,
        &result.contact.found_elements,
        &result.contact.missing_elements,
    );

    lines.push("RESUME SECTIONS ANALYSIS:".to_string());
    found_missing(
        &mut lines,
        &result.sections.found_sections,
        &result.sections.missing_sections,
    );

    let content = &result.content;
    lines.extend([
        "CONTENT ANALYSIS:".to_string(),
        format!("   • Word Count: {}", content.word_count),
        format!(
            "   • Quantified Achievements: {}",
            content.quantified_achievements
        ),
        format!("   • Action Verbs Used: {}", content.action_verbs_found),
        format!("   • Readability Score: {}", content.readability),
        format!(
            "   • Average Sentence Length: {:.1} words",
            content.average_sentence_length
        ),
        String::new(),
    ]);

    let formatting = &result.formatting;
    if formatting.format_score.is_some() || !formatting.issues.is_empty() {
        lines.push("FORMATTING ANALYSIS:".to_string());
        if let Some(format_score) = formatting.format_score {
            lines.push(format!("   File Format Score: {}/100", format_score));
        }
        lines.extend(formatting.issues.iter().map(|i| format!("   • {}", i)));
        lines.push(String::new());
    }

    lines.extend([
        rule.clone(),
        "TIP: ATS systems prioritize clear structure, relevant keywords,".to_string(),
        "    and standard formatting. Focus on these areas for improvement!".to_string(),
        rule,
    ]);
    lines.join("\n")
}

fn found_missing(lines: &mut Vec<String>, found: &[String], missing: &[String]) {
    if !found.is_empty() {
        lines.push(format!("   Found: {}", found.join(", ")));
    }
    if !missing.is_empty() {
        lines.push(format!("   Missing: {}", missing.join(", ")));
    }
    lines.push(String::new());
}
