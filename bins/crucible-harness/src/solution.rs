//! The replaceable candidate unit.
//!
//! The grading service overwrites this file with the submitted code before
//! building the per-submission binary, the same way the earlier runner
//! dropped a `solution.py` next to the harness. The unmodified repository
//! ships the sample below so a stock build always has something to run.
//!
//! A submission must:
//! - keep `pub fn register(registry: &mut CandidateRegistry)`;
//! - register a constructor under [`SOLUTION_TYPE`];
//! - answer `signature`/`invoke` for every method the problem names
//!   (a [`MethodTable`] covers the usual case).

use serde_json::json;

use crate::candidate::{Candidate, CandidateRegistry, InvokeError, MethodTable, SOLUTION_TYPE};

pub fn register(registry: &mut CandidateRegistry) {
    registry.register(SOLUTION_TYPE, || {
        let mut methods = MethodTable::new();
        methods.define("secondLargest", &["nums"], |args| {
            let nums: Vec<i64> = args.get("nums")?;
            if nums.is_empty() {
                return Err(InvokeError::failed("nums must not be empty"));
            }
            Ok(json!(nums.iter().sum::<i64>()))
        });
        Box::new(methods) as Box<dyn Candidate>
    });
}
