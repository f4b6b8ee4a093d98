//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{ResumeReport, Tier};
use colored::{ColoredString, Colorize};

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single resume
    pub fn report(&self, report: &ResumeReport) {
        print!("{}", self.render(report));
    }

    /// Report multiple resumes with summary
    pub fn report_many(&self, reports: &[ResumeReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }
        print!("{}", self.render_summary(stats));
    }

    /// Report in quiet mode (score, tier and trend delta)
    pub fn report_quiet(&self, report: &ResumeReport, delta: &str) {
        println!("{}", self.render_quiet(report, delta));
    }

    pub fn render_quiet(&self, report: &ResumeReport, delta: &str) -> String {
        format!(
            "{}: {:.1} ({}){}",
            report.path.display(),
            report.analysis.overall_score,
            self.colorize_tier(report.analysis.tier),
            delta
        )
    }

    /// Full console rendering of one resume
    pub fn render(&self, report: &ResumeReport) -> String {
        let mut lines = Vec::new();
        self.print_header(&mut lines, report);
        self.print_score(&mut lines, report);
        self.print_breakdown(&mut lines, report);
        self.print_strengths(&mut lines, report);
        self.print_recommendations(&mut lines, report);
        self.print_details(&mut lines, report);
        if self.verbose {
            self.print_formatting(&mut lines, report);
            self.print_profile(&mut lines, report);
        }
        format!("{}\n\n", lines.join("\n"))
    }

    fn style(&self, text: impl Into<String>, paint: fn(ColoredString) -> ColoredString) -> String {
        let text = text.into();
        if self.use_colors {
            paint(text.as_str().normal()).to_string()
        } else {
            text
        }
    }

    fn print_header(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        let analysis = &report.analysis;
        let format = match analysis.formatting.format_score {
            Some(score) => format!("{}/100", score),
            None => "n/a".to_string(),
        };
        lines.push(String::new());
        lines.push(self.style(
            format!("📄 ATS Compatibility: {}", report.path.display()),
            |s| s.bold(),
        ));
        lines.push(format!(
            "   Words: {} | Format score: {} | Fingerprint: {}",
            analysis.content.word_count,
            format,
            &report.fingerprint[..report.fingerprint.len().min(12)]
        ));
        lines.push(String::new());
    }

    fn print_score(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        let analysis = &report.analysis;
        lines.push(format!(
            "   Score: {} {} {}",
            self.create_score_bar(analysis.overall_score),
            analysis.tier.indicator(),
            self.style(self.colorize_tier(analysis.tier), |s| s.bold())
        ));
        lines.push(format!(
            "   {}",
            self.style(analysis.tier.label(), |s| s.dimmed())
        ));
        lines.push(String::new());
    }

    fn print_breakdown(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        lines.push(format!("   {}", self.style("Score Breakdown:", |s| s.bold())));
        let breakdown = report.analysis.breakdown();
        let scores = [
            breakdown.contact_information,
            breakdown.resume_sections,
            breakdown.content_quality,
            breakdown.formatting,
        ];
        for ((name, weight), score) in ScoreCalculator::weights().into_iter().zip(scores) {
            let score_str = format!("{:>3}/100", score);
            let colored_score = if score >= 80 {
                self.style(score_str, |s| s.green())
            } else if score >= 60 {
                self.style(score_str, |s| s.yellow())
            } else {
                self.style(score_str, |s| s.red())
            };
            lines.push(format!(
                "   {} {} {} (weight {}%, contributes {:.2})",
                self.create_mini_bar(score),
                colored_score,
                name,
                (weight * 100.0).round(),
                score as f64 * weight
            ));
        }
        lines.push(String::new());
    }

    fn print_strengths(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        if report.analysis.strengths.is_empty() {
            return;
        }
        lines.push(format!("   {}", self.style("Strengths:", |s| s.bold())));
        let check = self.style("✓", |s| s.green());
        for strength in &report.analysis.strengths {
            lines.push(format!("   {} {}", check, strength));
        }
        lines.push(String::new());
    }

    fn print_recommendations(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        if report.analysis.recommendations.is_empty() {
            return;
        }
        lines.push(format!("   {}", self.style("Recommendations:", |s| s.bold())));
        for (i, rec) in report.analysis.recommendations.iter().enumerate() {
            lines.push(format!(
                "   {} {}",
                self.style(format!("{}.", i + 1), |s| s.cyan()),
                rec
            ));
        }
        lines.push(String::new());
    }

    fn print_details(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        let analysis = &report.analysis;
        lines.push(format!("   {}", self.style("Details:", |s| s.bold())));
        lines.push(self.found_missing_line(
            "Contact",
            &analysis.contact.found_elements,
            &analysis.contact.missing_elements,
        ));
        lines.push(self.found_missing_line(
            "Sections",
            &analysis.sections.found_sections,
            &analysis.sections.missing_sections,
        ));
        let content = &analysis.content;
        lines.push(format!(
            "   Content:  {} quantified achievements, {} action verbs, readability {}, {:.1} words/sentence",
            content.quantified_achievements,
            content.action_verbs_found,
            content.readability,
            content.average_sentence_length
        ));
    }

    fn found_missing_line(&self, label: &str, found: &[String], missing: &[String]) -> String {
        let found = if found.is_empty() {
            "none".to_string()
        } else {
            found.join(", ")
        };
        let missing = if missing.is_empty() {
            String::new()
        } else {
            format!(
                " | missing: {}",
                self.style(missing.join(", "), |s| s.yellow())
            )
        };
        format!("   {:<9} {}{}", format!("{}:", label), found, missing)
    }

    fn print_formatting(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        let issues = &report.analysis.formatting.issues;
        if issues.is_empty() {
            return;
        }
        lines.push(String::new());
        lines.push(format!("   {}", self.style("Formatting Issues:", |s| s.bold())));
        let warning = self.style("⚠", |s| s.yellow());
        for issue in issues {
            lines.push(format!("   {} {}", warning, issue));
        }
    }

    fn print_profile(&self, lines: &mut Vec<String>, report: &ResumeReport) {
        let profile = &report.profile;
        let skills = if profile.skills.is_empty() {
            "none".to_string()
        } else {
            profile.skills.join(", ")
        };
        lines.extend([
            String::new(),
            format!("   {}", self.style("Candidate Profile:", |s| s.bold())),
            format!(
                "   Location:   {}",
                profile.location.as_deref().unwrap_or("not found")
            ),
            format!("   Skills:     {}", skills),
            format!("   Experience: {} years", profile.experience_years),
        ]);
        if let Some(query) = profile.search_query() {
            lines.push(format!(
                "   {} {}",
                self.style("→", |s| s.dimmed()),
                self.style(format!("job search: \"{}\"", query), |s| s.italic())
            ));
        }
    }

    /// Summary block for multi-file runs
    pub fn render_summary(&self, stats: &AggregateStats) -> String {
        let average_tier = Tier::from_score(stats.average_score);
        let distribution: Vec<String> = stats
            .tiers
            .iter()
            .rev()
            .map(|(tier, count)| format!("{} {}", tier, count))
            .collect();
        let banner = "═".repeat(60);
        let lines = [
            String::new(),
            banner.clone(),
            self.style("Summary", |s| s.bold()),
            banner,
            format!(
                "   Files analyzed: {}",
                self.style(stats.files_analyzed.to_string(), |s| s.bold())
            ),
            format!(
                "   Average score:  {} ({})",
                self.style(format!("{:.1}", stats.average_score), |s| s.bold()),
                self.colorize_tier(average_tier)
            ),
            format!("   Tiers:          {}", distribution.join(", ")),
        ];
        format!("{}\n\n", lines.join("\n"))
    }

    fn colorize_tier(&self, tier: Tier) -> String {
        let s = tier.to_string();
        match tier {
            Tier::Excellent => self.style(s, |s| s.green().bold()),
            Tier::Good => self.style(s, |s| s.green()),
            Tier::Fair => self.style(s, |s| s.yellow()),
            Tier::Poor => self.style(s, |s| s.red().bold()),
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score.clamp(0.0, 100.0) * 20.0) / 100.0) as usize;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>5.1}", "█".repeat(filled), "░".repeat(empty), score);

        if score >= 85.0 {
            self.style(bar, |s| s.green())
        } else if score >= 70.0 {
            self.style(bar, |s| s.yellow())
        } else {
            self.style(bar, |s| s.red())
        }
    }

    fn create_mini_bar(&self, score: u8) -> String {
        let filled = (score.min(100) as usize * 10) / 100;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
