//! Human-readable rendering of a run summary.
//!
//! Pure presentation: result computation lives in the runner, and nothing
//! here prints — callers decide where the text goes.

use std::fmt::Write;

use crate::harness::runner::RunSummary;

/// Renders the count line and, when anything did not pass, an itemized list
/// of the failing checks with their diagnostics.
pub fn report(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Check results: {}/{} passed",
        summary.passed(),
        summary.total()
    );

    if !summary.all_passed() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Failing checks:");
        for result in summary.failing() {
            let diagnostic = result.diagnostic.as_deref().unwrap_or("no diagnostic");
            let _ = writeln!(out, "  - {} ({}): {}", result.name, result.status, diagnostic);
        }
    }

    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::check::{CheckResult, Metric};

    #[test]
    fn test_report_all_passed_is_single_count_line() {
        let summary = RunSummary::new(vec![
            CheckResult::passed("health", None),
            CheckResult::passed(
                "process-job-posting",
                Some(Metric {
                    label: "key requirements".to_string(),
                    value: 6,
                }),
            ),
        ]);
        let text = report(&summary);
        assert!(text.starts_with("Check results: 2/2 passed"));
        assert!(!text.contains("Failing checks"));
    }

    #[test]
    fn test_report_lists_failing_checks_in_order() {
        let summary = RunSummary::new(vec![
            CheckResult::failed("health", "unexpected status 500: upstream exploded"),
            CheckResult::passed("process-job-posting", None),
            CheckResult::errored("optimize-resume", "request failed: connection refused"),
        ]);
        let text = report(&summary);
        assert!(text.contains("Check results: 1/3 passed"));
        assert!(text.contains("Failing checks:"));

        let health_pos = text.find("health (failed)").unwrap();
        let optimize_pos = text.find("optimize-resume (errored)").unwrap();
        assert!(health_pos < optimize_pos, "failing list must keep run order");
        assert!(text.contains("unexpected status 500"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn test_summary_counts_are_consistent() {
        let summary = RunSummary::new(vec![
            CheckResult::passed("a", None),
            CheckResult::failed("b", "d"),
            CheckResult::errored("c", "d"),
        ]);
        assert_eq!(summary.total(), 3);
        assert_eq!(
            summary.passed() + summary.failed() + summary.errored(),
            summary.total()
        );
        assert!(!summary.all_passed());
        let failing: Vec<&str> = summary.failing().map(|r| r.name.as_str()).collect();
        assert_eq!(failing, vec!["b", "c"]);
    }
}
