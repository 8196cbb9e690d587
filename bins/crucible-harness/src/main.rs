mod args;
mod candidate;
mod engine;
mod executor;
mod report;
mod solution;
mod testcase;
mod unwind;

use std::path::PathBuf;

use clap::Parser;
use crucible_common::Config;
use tracing::info;
use uuid::Uuid;

/// Per-submission execution engine: runs the candidate's entry point over a
/// battery of test cases and writes one JSON report line to stdout.
#[derive(Parser, Debug)]
#[command(name = "crucible-harness")]
#[command(about = "Run a candidate solution against a test case battery", long_about = None)]
struct Cli {
    /// Method the candidate must implement (falls back to ENTRY_POINT)
    #[arg(short, long)]
    entry_point: Option<String>,

    /// Path to the test case document (falls back to TESTCASES_PATH)
    #[arg(short, long)]
    testcases: Option<PathBuf>,

    /// Correlation id to stamp on log lines (falls back to RUN_ID)
    #[arg(long)]
    run_id: Option<String>,
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Stdout belongs exclusively to the report line the orchestrator
    // parses; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if cli.entry_point.is_some() {
        config.entry_point = cli.entry_point;
    }
    if let Some(path) = cli.testcases {
        config.testcases_path = path;
    }
    if cli.run_id.is_some() {
        config.run_id = cli.run_id;
    }

    let run_id = config
        .run_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let span = tracing::info_span!("run", id = %run_id);
    let _guard = span.enter();

    info!(
        entry_point = config.entry_point.as_deref().unwrap_or("<unset>"),
        testcases = %config.testcases_path.display(),
        "harness booting"
    );

    let report = engine::run(solution::register, &config);

    info!(outcomes = report.len(), "run complete");

    // Errors travel inside the report, so the process exits 0 even for a
    // failed batch. Losing stdout itself is the one unreportable failure.
    if let Err(err) = report::emit_stdout(&report) {
        eprintln!("✗ Failed to write report: {err}");
        std::process::exit(1);
    }
}
