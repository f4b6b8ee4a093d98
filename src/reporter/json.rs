//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::{ResumeReport, Tier};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single resume as JSON
    pub fn report(&self, report: &ResumeReport) -> String {
        self.to_json(report, "{}")
    }

    /// Report multiple resumes as JSON array
    pub fn report_many(&self, reports: &[ResumeReport]) -> String {
        self.to_json(reports, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(&self, reports: &[ResumeReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: JsonSummary {
                files_analyzed: stats.files_analyzed,
                average_score: stats.average_score,
                average_tier: Tier::from_score(stats.average_score),
                tiers: &stats.tiers,
            },
        };
        self.to_json(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [ResumeReport],
    summary: JsonSummary<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    files_analyzed: usize,
    average_score: f64,
    average_tier: Tier,
    tiers: &'a BTreeMap<Tier, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AtsEngine, Document};
    use std::path::Path;

    fn make_report(path: &str, text: &str) -> ResumeReport {
        AtsEngine::new().report(Path::new(path), &Document::new(text).with_filename(Some(path)))
    }

    #[test]
    fn test_json_single_result_has_expected_keys() {
        let report = make_report("jane.pdf", "Jane Doe\njane@example.com");
        let json = JsonReporter::new().report(&report);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["path"], "jane.pdf");
        assert_eq!(parsed["fingerprint"].as_str().map(str::len), Some(64));
        let analysis = &parsed["analysis"];
        assert!(analysis["overallScore"].is_f64());
        assert!(analysis["tier"].is_string());
        assert_eq!(analysis["contact"]["score"], 55);
        assert_eq!(analysis["formatting"]["formatScore"], 100);
        let readability = &analysis["content"]["readability"];
        assert!(readability.is_f64() || readability.is_null());
        assert!(parsed["profile"]["skills"].is_array());
    }

    #[test]
    fn test_json_roundtrips_into_report() {
        let report = make_report("a.txt", "Ada Lovelace. Managed 4 analysts.");
        let json = JsonReporter::new().report(&report);
        let back: ResumeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.path, report.path);
        assert_eq!(back.fingerprint, report.fingerprint);
        assert_eq!(back.analysis.overall_score, report.analysis.overall_score);
        assert_eq!(back.analysis.contact, report.analysis.contact);
        assert_eq!(back.profile, report.profile);
    }

    #[test]
    fn test_json_pretty_output() {
        let report = make_report("a.txt", "text");
        let json = JsonReporter::new().pretty().report(&report);
        assert!(json.contains('\n'), "pretty JSON should have newlines");
    }

    #[test]
    fn test_json_report_many() {
        let reports = [make_report("a.txt", "one"), make_report("b.txt", "two")];
        let json = JsonReporter::new().report_many(&reports);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[1]["path"], "b.txt");
    }

    #[test]
    fn test_json_report_with_summary() {
        let reports = [make_report("a.txt", "one"), make_report("b.txt", "")];
        let analyses: Vec<_> = reports.iter().map(|r| r.analysis.clone()).collect();
        let stats = AtsEngine::aggregate_stats(&analyses);

        let json = JsonReporter::new().report_with_summary(&reports, &stats);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let summary = &parsed["summary"];
        assert_eq!(summary["filesAnalyzed"], 2);
        assert_eq!(summary["averageScore"], stats.average_score);
        assert_eq!(summary["averageTier"], "poor");
        assert_eq!(summary["tiers"]["poor"], 2);
        assert_eq!(summary["tiers"]["excellent"], 0);
        assert_eq!(parsed["results"].as_array().unwrap().len(), 2);
    }
}
