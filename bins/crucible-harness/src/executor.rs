//! Per-case execution over a bound entry point.
//!
//! One test case can never take its neighbors with it: binding failures,
//! handler errors, and panics all become an outcome for that case and the
//! loop moves on. Outcome index i always describes case index i.

use std::time::Instant;

use crucible_common::types::{CaseOutcome, TestCase};
use tracing::{debug, warn};

use crate::args::CallArgs;
use crate::candidate::BoundMethod;
use crate::unwind;

/// Run every case in document order and collect one outcome per case.
pub fn run_cases(method: &BoundMethod<'_>, cases: &[TestCase]) -> Vec<CaseOutcome> {
    let mut outcomes = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        outcomes.push(run_case(method, index, case));
    }
    outcomes
}

fn run_case(method: &BoundMethod<'_>, index: usize, case: &TestCase) -> CaseOutcome {
    let args = match CallArgs::bind(method.params(), &case.input) {
        Ok(args) => args,
        Err(err) => {
            warn!(case = index, error = %err, "argument binding failed");
            return CaseOutcome::runtime_error(err.to_string(), None);
        }
    };

    // The clock covers only the candidate's own work, not binding or
    // serialization.
    let started = Instant::now();
    let invoked = unwind::contain(|| method.call(&args));
    let elapsed_millis = started.elapsed().as_secs_f64() * 1000.0;

    match invoked {
        Ok(Ok(result)) => {
            debug!(case = index, elapsed_millis, "case finished");
            CaseOutcome::ok(result, elapsed_millis)
        }
        Ok(Err(err)) => {
            warn!(case = index, error = %err, "case returned an error");
            CaseOutcome::runtime_error(err.to_string(), None)
        }
        Err(panic) => {
            warn!(case = index, error = %panic.message, "case panicked");
            CaseOutcome::runtime_error(panic.message, panic.traceback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{InvokeError, MethodTable};
    use crucible_common::types::CaseStatus;
    use serde_json::{json, Map, Value};

    fn sample_table() -> MethodTable {
        let mut methods = MethodTable::new();
        methods.define("sumList", &["nums"], |args| {
            let nums: Vec<i64> = args.get("nums")?;
            Ok(json!(nums.iter().sum::<i64>()))
        });
        methods.define("pickNinth", &["nums"], |args| {
            let nums: Vec<i64> = args.get("nums")?;
            Ok(json!(nums[9]))
        });
        methods.define("alwaysFails", &[], |_args| {
            Err(InvokeError::failed("nothing works"))
        });
        methods
    }

    fn case(input: Value) -> TestCase {
        match input {
            Value::Object(map) => TestCase::with_input(map),
            _ => TestCase::with_input(Map::new()),
        }
    }

    #[test]
    fn test_run_cases_ok_outcome() {
        let methods = sample_table();
        let bound = BoundMethod::resolve(&methods, "sumList").unwrap();

        let outcomes = run_cases(&bound, &[case(json!({"nums": [3, 1, 2]}))]);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, CaseStatus::Ok);
        assert_eq!(outcomes[0].result, Some(json!(6)));
        assert_eq!(outcomes[0].error, None);
        assert!(outcomes[0].elapsed_millis.unwrap() >= 0.0);
    }

    #[test]
    fn test_run_cases_handler_error() {
        let methods = sample_table();
        let bound = BoundMethod::resolve(&methods, "alwaysFails").unwrap();

        let outcomes = run_cases(&bound, &[case(json!({}))]);
        assert_eq!(outcomes[0].status, CaseStatus::RuntimeError);
        assert_eq!(outcomes[0].error.as_deref(), Some("nothing works"));
        assert_eq!(outcomes[0].result, None);
        assert_eq!(outcomes[0].elapsed_millis, None);
    }

    #[test]
    fn test_run_cases_binding_mismatch() {
        let methods = sample_table();
        let bound = BoundMethod::resolve(&methods, "sumList").unwrap();

        let outcomes = run_cases(&bound, &[case(json!({"numz": [1, 2]}))]);
        assert_eq!(outcomes[0].status, CaseStatus::RuntimeError);
        assert!(outcomes[0].error.as_deref().unwrap().contains("nums"));
    }

    #[test]
    fn test_run_cases_panic_does_not_stop_the_batch() {
        let methods = sample_table();
        let bound = BoundMethod::resolve(&methods, "pickNinth").unwrap();

        let outcomes = run_cases(
            &bound,
            &[
                case(json!({"nums": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]})),
                case(json!({"nums": [1, 2, 3]})),
                case(json!({"nums": [9, 9, 9, 9, 9, 9, 9, 9, 9, 9]})),
            ],
        );

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, CaseStatus::Ok);
        assert_eq!(outcomes[0].result, Some(json!(9)));

        assert_eq!(outcomes[1].status, CaseStatus::RuntimeError);
        let error = outcomes[1].error.as_deref().unwrap();
        assert!(error.contains("index out of bounds"));
        assert!(outcomes[1].traceback.as_deref().unwrap().contains("stack backtrace:"));

        assert_eq!(outcomes[2].status, CaseStatus::Ok);
        assert_eq!(outcomes[2].result, Some(json!(9)));
    }

    #[test]
    fn test_run_cases_empty_battery() {
        let methods = sample_table();
        let bound = BoundMethod::resolve(&methods, "sumList").unwrap();
        assert!(run_cases(&bound, &[]).is_empty());
    }
}
