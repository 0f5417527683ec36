//! Check descriptors and per-check outcomes.
//!
//! A `Check` is one independent request/predicate pair. Running it moves it
//! through a terminal state machine: `Pending -> {Passed | Failed | Errored}`
//! — no retries, no re-entry. The distinction matters for diagnosis:
//! `Errored` means the exchange never completed (transport failure, timeout);
//! `Failed` means the service answered but the answer was wrong.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Longest body excerpt carried in a diagnostic.
const BODY_SNIPPET_LEN: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Check descriptor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

/// Success predicate evaluated over a completed response.
pub type Predicate = Box<dyn Fn(&CheckResponse) -> Verdict + Send + Sync>;

/// One named verification unit: a single request against a declared endpoint
/// plus the predicate that decides whether the response counts as success.
pub struct Check {
    name: String,
    method: RequestMethod,
    path: String,
    payload: Option<Value>,
    predicate: Predicate,
}

impl Check {
    pub fn get(
        name: impl Into<String>,
        path: impl Into<String>,
        predicate: impl Fn(&CheckResponse) -> Verdict + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            method: RequestMethod::Get,
            path: path.into(),
            payload: None,
            predicate: Box::new(predicate),
        }
    }

    pub fn post(
        name: impl Into<String>,
        path: impl Into<String>,
        payload: Value,
        predicate: impl Fn(&CheckResponse) -> Verdict + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            method: RequestMethod::Post,
            path: path.into(),
            payload: Some(payload),
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Endpoint path, joined onto the runner's base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Applies the success predicate to a completed response.
    pub fn evaluate(&self, response: &CheckResponse) -> Verdict {
        (self.predicate)(response)
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Responses and verdicts
// ────────────────────────────────────────────────────────────────────────────

/// A completed HTTP exchange as seen by a predicate: the numeric status and
/// the raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResponse {
    pub status: u16,
    pub body: String,
}

impl CheckResponse {
    /// Deserializes the body as JSON into a typed schema.
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// A truncated body excerpt safe to embed in diagnostics.
    pub fn summary(&self) -> String {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            return "<empty body>".to_string();
        }
        let mut snippet: String = trimmed.chars().take(BODY_SNIPPET_LEN).collect();
        if trimmed.chars().count() > BODY_SNIPPET_LEN {
            snippet.push('…');
        }
        snippet
    }
}

/// A numeric observation a passing predicate may extract for reporting,
/// e.g. the number of key requirements the service found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: u64,
}

/// Predicate output: pass (with an optional metric) or fail with a reason.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass { metric: Option<Metric> },
    Fail { reason: String },
}

impl Verdict {
    pub fn pass() -> Self {
        Verdict::Pass { metric: None }
    }

    pub fn pass_with_metric(label: impl Into<String>, value: u64) -> Self {
        Verdict::Pass {
            metric: Some(Metric {
                label: label.into(),
                value,
            }),
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Verdict::Fail {
            reason: reason.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

/// Terminal status of one executed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    /// Response received and the predicate held.
    Passed,
    /// Response received but the predicate did not hold.
    Failed,
    /// The exchange never completed: connection failure, timeout, or a body
    /// that could not be read.
    Errored,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
            CheckStatus::Errored => "errored",
        };
        f.write_str(s)
    }
}

/// Outcome of running one check. The diagnostic is always present for
/// non-passing results and is sufficient to reproduce the observed failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub diagnostic: Option<String>,
    pub metric: Option<Metric>,
}

impl CheckResult {
    pub fn passed(name: impl Into<String>, metric: Option<Metric>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Passed,
            diagnostic: None,
            metric,
        }
    }

    pub fn failed(name: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed,
            diagnostic: Some(diagnostic.into()),
            metric: None,
        }
    }

    pub fn errored(name: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Errored,
            diagnostic: Some(diagnostic.into()),
            metric: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
