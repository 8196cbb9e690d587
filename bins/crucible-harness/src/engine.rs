//! Batch orchestration: load the candidate, read the cases, resolve the
//! entry point, run everything.
//!
//! The contract with the orchestrator is that this function always returns
//! a report. Setup failures short-circuit into a single-element report
//! carrying the classified error; only case execution produces one outcome
//! per case.

use crucible_common::config::Config;
use crucible_common::types::{CaseOutcome, Report};
use tracing::{error, info};

use crate::candidate::{BoundMethod, CandidateRegistry, LoadError, SOLUTION_TYPE};
use crate::{executor, testcase, unwind};

/// Run one full batch for `config`, loading the candidate through
/// `register`.
pub fn run<F>(register: F, config: &Config) -> Report
where
    F: FnOnce(&mut CandidateRegistry),
{
    let Some(entry_point) = config.entry_point.as_deref() else {
        error!("no entry point configured");
        return Report::fatal(CaseOutcome::system_error(
            "No entry point configured. Pass --entry-point or set ENTRY_POINT.",
        ));
    };

    // Candidate first, cases second: when both are broken, the load error
    // wins, matching the historical runner.
    let registry = match unwind::contain(|| {
        let mut registry = CandidateRegistry::new();
        register(&mut registry);
        registry
    }) {
        Ok(registry) => registry,
        Err(panic) => {
            error!(error = %panic.message, "candidate registration panicked");
            return Report::fatal(CaseOutcome::runtime_error(
                format!("Load error: {}", panic.message),
                panic.traceback,
            ));
        }
    };

    let candidate = match registry.construct(SOLUTION_TYPE) {
        Ok(candidate) => candidate,
        Err(err @ LoadError::TypeMissing(_)) => {
            error!(error = %err, "candidate type missing");
            return Report::fatal(CaseOutcome::system_error(err.to_string()));
        }
        Err(LoadError::Init { message, traceback }) => {
            error!(error = %message, "candidate construction panicked");
            return Report::fatal(CaseOutcome::runtime_error(
                format!("Load error: {message}"),
                traceback,
            ));
        }
    };

    let cases = match testcase::load_cases(&config.testcases_path) {
        Ok(cases) => cases,
        Err(err) => {
            let detail = format!("{err:#}");
            error!(error = %detail, "test case document unusable");
            return Report::fatal(CaseOutcome::system_error(format!(
                "Failed to load test cases: {detail}"
            )));
        }
    };

    let Some(method) = BoundMethod::resolve(candidate.as_ref(), entry_point) else {
        error!(entry_point, "entry point not found on the candidate");
        return Report::fatal(CaseOutcome::system_error(format!(
            "Method '{entry_point}' not found in {SOLUTION_TYPE}."
        )));
    };

    info!(entry_point = method.name(), cases = cases.len(), "executing batch");
    Report::from(executor::run_cases(&method, &cases))
}
