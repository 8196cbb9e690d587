//! Report emission.
//!
//! The orchestrator takes the last line of the engine's stdout and parses
//! it as the full batch report, so the report is serialized compactly and
//! written in one shot with a single trailing newline. Everything else the
//! engine has to say goes to stderr.

use std::io::{self, Write};

use crucible_common::types::Report;

/// Serialize `report` as one JSON line into `writer`.
pub fn emit<W: Write>(writer: &mut W, report: &Report) -> io::Result<()> {
    let line = serde_json::to_string(report)?;
    writeln!(writer, "{line}")?;
    writer.flush()
}

/// Write the report to stdout, the engine's result channel.
pub fn emit_stdout(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    emit(&mut handle, report)
}
