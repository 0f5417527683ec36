//! Check registration and sequential execution.
//!
//! `CheckSet` holds the ordered run list and enforces name uniqueness at
//! registration time — before any network activity. `CheckRunner` executes
//! the list strictly sequentially; a failed or errored check never stops the
//! run, so the aggregate always completes with a `RunSummary`.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::errors::HarnessError;
use crate::harness::check::{Check, CheckResponse, CheckResult, CheckStatus, RequestMethod, Verdict};

// ────────────────────────────────────────────────────────────────────────────
// Check set
// ────────────────────────────────────────────────────────────────────────────

/// The ordered list of checks for one run. Names are unique within a set.
#[derive(Debug, Default)]
pub struct CheckSet {
    checks: Vec<Check>,
    names: HashSet<String>,
}

impl CheckSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check to the run list, preserving registration order.
    pub fn register(&mut self, check: Check) -> Result<(), HarnessError> {
        if !self.names.insert(check.name().to_string()) {
            return Err(HarnessError::DuplicateCheckName(check.name().to_string()));
        }
        self.checks.push(check);
        Ok(())
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Runner
// ────────────────────────────────────────────────────────────────────────────

/// Executes checks against one service instance.
///
/// The client carries an explicit request timeout: a stalled exchange expires
/// and is classified as an errored check instead of hanging the run.
pub struct CheckRunner {
    client: Client,
    base_url: String,
}

impl CheckRunner {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Runs a single check to its terminal state. Transport problems are
    /// captured in the result, never raised to the caller.
    pub async fn run_one(&self, check: &Check) -> CheckResult {
        let url = format!("{}{}", self.base_url, check.path());
        debug!("running check '{}' against {url}", check.name());

        let request = match check.method() {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => {
                let mut request = self.client.post(&url);
                if let Some(payload) = check.payload() {
                    request = request.json(payload);
                }
                request
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("check '{}' errored: {e}", check.name());
                return CheckResult::errored(check.name(), format!("request to {url} failed: {e}"));
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("check '{}' errored reading body: {e}", check.name());
                return CheckResult::errored(
                    check.name(),
                    format!("reading response body from {url} failed: {e}"),
                );
            }
        };

        match check.evaluate(&CheckResponse { status, body }) {
            Verdict::Pass { metric } => CheckResult::passed(check.name(), metric),
            Verdict::Fail { reason } => {
                warn!("check '{}' failed: {reason}", check.name());
                CheckResult::failed(check.name(), reason)
            }
        }
    }

    /// Runs every check in registration order. Never stops early; the
    /// summary accumulates one result per check, in input order.
    pub async fn run_all(&self, set: &CheckSet) -> RunSummary {
        info!("running {} check(s) against {}", set.len(), self.base_url);
        let mut results = Vec::with_capacity(set.len());
        for check in set.checks() {
            results.push(self.run_one(check).await);
        }
        RunSummary::new(results)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Run summary
// ────────────────────────────────────────────────────────────────────────────

/// Aggregate over one run's ordered results. All counts are derived from the
/// underlying results, so `passed + failed + errored == total` by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    results: Vec<CheckResult>,
}

impl RunSummary {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Failed)
    }

    pub fn errored(&self) -> usize {
        self.count(CheckStatus::Errored)
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Non-passing results, in run order.
    pub fn failing(&self) -> impl Iterator<Item = &CheckResult> {
        self.results
            .iter()
            .filter(|r| r.status != CheckStatus::Passed)
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::net::SocketAddr;

    use crate::harness::check::Verdict;

    /// Serves `app` on an ephemeral local port and returns its address.
    async fn spawn_service(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    /// A mock speaking the service's documented endpoint contract.
    fn mock_service() -> Router {
        Router::new()
            .route("/health", get(|| async { StatusCode::OK }))
            .route(
                "/broken-health",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route(
                "/process-job-posting",
                post(|| async {
                    Json(json!({
                        "success": true,
                        "keyRequirements": ["React", "Node.js", "Python"],
                    }))
                }),
            )
            .route(
                "/optimize-resume",
                post(|| async {
                    Json(json!({ "success": false, "error": "no API key configured" }))
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    StatusCode::OK
                }),
            )
    }

    fn runner_for(addr: SocketAddr) -> CheckRunner {
        CheckRunner::new(format!("http://{addr}"), Duration::from_secs(5))
    }

    fn status_check(name: &str, path: &str) -> Check {
        Check::get(name, path, |response| {
            if response.status == 200 {
                Verdict::pass()
            } else {
                Verdict::fail(format!(
                    "unexpected status {}: {}",
                    response.status,
                    response.summary()
                ))
            }
        })
    }

    fn success_flag_check(name: &str, path: &str) -> Check {
        Check::post(name, path, json!({"resumeText": "x", "jobDescription": "y"}), |response| {
            let parsed: serde_json::Value = match response.parse() {
                Ok(v) => v,
                Err(e) => return Verdict::fail(format!("unparseable body ({e})")),
            };
            if parsed["success"] == json!(true) {
                Verdict::pass()
            } else {
                Verdict::fail(format!("service reported failure: {}", response.summary()))
            }
        })
    }

    // ── registration ────────────────────────────────────────────────────────

    #[test]
    fn test_duplicate_check_name_rejected_before_any_network_call() {
        let mut set = CheckSet::new();
        set.register(status_check("health", "/health")).unwrap();
        let err = set
            .register(status_check("health", "/health"))
            .unwrap_err();
        assert!(
            matches!(err, HarnessError::DuplicateCheckName(ref name) if name == "health"),
            "expected DuplicateCheckName, got {err:?}"
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_registration_preserves_order() {
        let mut set = CheckSet::new();
        set.register(status_check("first", "/health")).unwrap();
        set.register(status_check("second", "/health")).unwrap();
        set.register(status_check("third", "/health")).unwrap();
        let names: Vec<&str> = set.checks().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    // ── run_one classification ──────────────────────────────────────────────

    #[tokio::test]
    async fn test_health_200_passes() {
        let addr = spawn_service(mock_service()).await;
        let result = runner_for(addr).run_one(&status_check("health", "/health")).await;
        assert_eq!(result.status, CheckStatus::Passed);
        assert!(result.diagnostic.is_none());
    }

    #[tokio::test]
    async fn test_health_500_fails_with_status_in_diagnostic() {
        let addr = spawn_service(mock_service()).await;
        let result = runner_for(addr)
            .run_one(&status_check("health", "/broken-health"))
            .await;
        assert_eq!(result.status, CheckStatus::Failed);
        let diagnostic = result.diagnostic.unwrap();
        assert!(
            diagnostic.contains("500"),
            "diagnostic must carry the observed status: {diagnostic}"
        );
    }

    #[tokio::test]
    async fn test_unsatisfiable_predicate_is_failed_not_errored() {
        let addr = spawn_service(mock_service()).await;
        let result = runner_for(addr)
            .run_one(&success_flag_check("optimize-resume", "/optimize-resume"))
            .await;
        assert_eq!(result.status, CheckStatus::Failed);
    }

    #[tokio::test]
    async fn test_metric_extracted_on_pass() {
        let addr = spawn_service(mock_service()).await;
        let check = Check::post(
            "process-job-posting",
            "/process-job-posting",
            json!({"jobText": "sample"}),
            |response| {
                let parsed: serde_json::Value = response.parse().unwrap_or(json!({}));
                match parsed["keyRequirements"].as_array() {
                    Some(reqs) => Verdict::pass_with_metric("key requirements", reqs.len() as u64),
                    None => Verdict::fail("keyRequirements missing"),
                }
            },
        );
        let result = runner_for(addr).run_one(&check).await;
        assert_eq!(result.status, CheckStatus::Passed);
        let metric = result.metric.unwrap();
        assert_eq!(metric.value, 3);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_errored_with_diagnostic() {
        // Bind and immediately drop a listener so the port refuses connections.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = runner_for(addr).run_one(&status_check("health", "/health")).await;
        assert_eq!(result.status, CheckStatus::Errored);
        let diagnostic = result.diagnostic.unwrap();
        assert!(!diagnostic.is_empty(), "errored checks must carry a cause");
    }

    #[tokio::test]
    async fn test_timeout_becomes_errored() {
        let addr = spawn_service(mock_service()).await;
        let runner = CheckRunner::new(format!("http://{addr}"), Duration::from_millis(250));
        let result = runner.run_one(&status_check("slow", "/slow")).await;
        assert_eq!(result.status, CheckStatus::Errored);
        assert!(result.diagnostic.is_some());
    }

    // ── run_all ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_run_all_never_stops_early() {
        let addr = spawn_service(mock_service()).await;
        let mut set = CheckSet::new();
        set.register(status_check("broken", "/broken-health")).unwrap();
        set.register(success_flag_check("refused", "/optimize-resume"))
            .unwrap();
        set.register(status_check("health", "/health")).unwrap();

        let summary = runner_for(addr).run_all(&set).await;
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.errored(), 0);

        // Results stay in registration order; the trailing check still ran.
        let names: Vec<&str> = summary.results().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["broken", "refused", "health"]);
        assert_eq!(summary.results()[2].status, CheckStatus::Passed);
    }

    #[tokio::test]
    async fn test_run_all_completes_when_every_check_errors() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut set = CheckSet::new();
        set.register(status_check("first", "/health")).unwrap();
        set.register(status_check("second", "/health")).unwrap();

        let summary = runner_for(addr).run_all(&set).await;
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.errored(), 2);
        assert_eq!(summary.passed() + summary.failed() + summary.errored(), summary.total());
    }

    #[tokio::test]
    async fn test_run_all_empty_set_yields_empty_summary() {
        let addr = spawn_service(mock_service()).await;
        let summary = runner_for(addr).run_all(&CheckSet::new()).await;
        assert_eq!(summary.total(), 0);
        assert!(summary.all_passed());
    }
}
