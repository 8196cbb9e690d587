use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Test Case Record (Immutable Input)
/// Test cases are immutable once loaded - the engine must not mutate them
/// Ordering matters - execution is sequential and the report is index-aligned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Named arguments for the entry point. A record without an `input` key
    /// binds as the empty mapping, so zero-parameter methods still run.
    #[serde(default)]
    pub input: Map<String, Value>,
    /// Expected result, carried for the grading layer downstream. The engine
    /// itself never reads it. Older case documents used the key `output`.
    #[serde(default, alias = "output", skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<Value>,
}

impl TestCase {
    /// Build a case from raw named arguments.
    pub fn with_input(input: Map<String, Value>) -> Self {
        Self {
            input,
            expected_output: None,
        }
    }
}

/// Per-Case Status
/// Distinguishes an environment fault from a failure of the candidate's own
/// logic, so the orchestrator can surface them differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Ok,
    RuntimeError,
    /// Reserved: per-case time limits are enforced by the process supervisor
    /// outside the engine, which maps a kill onto this status.
    Timeout,
    SystemError,
}

/// Per-Case Outcome
/// Exactly one per test case. `result` and `elapsed_millis` travel only with
/// `ok`; `error` (and optionally `traceback`) only with the error statuses.
/// The constructors below are the only intended way to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseOutcome {
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_millis: Option<f64>,
}

impl CaseOutcome {
    /// Successful invocation: the returned value verbatim plus wall-clock
    /// milliseconds measured strictly around the call.
    pub fn ok(result: Value, elapsed_millis: f64) -> Self {
        Self {
            status: CaseStatus::Ok,
            result: Some(result),
            error: None,
            traceback: None,
            elapsed_millis: Some(elapsed_millis),
        }
    }

    /// Failure inside candidate logic: binding mismatch, error return, panic.
    pub fn runtime_error(error: impl Into<String>, traceback: Option<String>) -> Self {
        Self {
            status: CaseStatus::RuntimeError,
            result: None,
            error: Some(error.into()),
            traceback,
            elapsed_millis: None,
        }
    }

    /// Environment or setup fault - always fatal for the whole batch.
    pub fn system_error(error: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::SystemError,
            result: None,
            error: Some(error.into()),
            traceback: None,
            elapsed_millis: None,
        }
    }

    /// Reserved for the external supervisor; the engine never produces it.
    pub fn timeout(error: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Timeout,
            result: None,
            error: Some(error.into()),
            traceback: None,
            elapsed_millis: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CaseStatus::Ok
    }
}

/// Execution Report
/// Ordered collection of per-case outcomes, index-aligned with the case
/// document, or a single synthetic outcome after a fatal short-circuit.
/// Serializes as a bare JSON array - the one line the orchestrator parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report(Vec<CaseOutcome>);

impl Report {
    /// Single-element report for a failure that aborts the entire batch
    /// before (or instead of) case execution.
    pub fn fatal(outcome: CaseOutcome) -> Self {
        Self(vec![outcome])
    }

    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<CaseOutcome>> for Report {
    fn from(outcomes: Vec<CaseOutcome>) -> Self {
        Self(outcomes)
    }
}
