//! Loading the ordered test case document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crucible_common::types::TestCase;

/// Read and parse the case document at `path`.
///
/// Any failure - missing file, unreadable bytes, malformed JSON, or a
/// document that is not an array of case records - is fatal for the whole
/// batch; the engine folds the context chain into a single report entry.
pub fn load_cases(path: &Path) -> Result<Vec<TestCase>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let cases: Vec<TestCase> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(cases)
}
