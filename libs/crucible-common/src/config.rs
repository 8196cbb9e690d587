use std::env;
use std::path::PathBuf;

/// Engine configuration
/// Provides defaults with environment variable overrides; CLI flags in the
/// harness binary take precedence over both
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the method the candidate must implement. Supplied by the
    /// orchestrator per problem; there is no sensible default, and an unset
    /// value is reported as a system error rather than guessed.
    pub entry_point: Option<String>,
    /// Path of the test-case document, resolved against the working
    /// directory the orchestrator launches the engine in.
    pub testcases_path: PathBuf,
    /// Correlation id for log lines. Generated when the orchestrator does
    /// not pass one. Never part of the report.
    pub run_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            entry_point: env::var("ENTRY_POINT").ok().filter(|v| !v.is_empty()),
            testcases_path: env::var("TESTCASES_PATH")
                .unwrap_or_else(|_| "testcases.json".to_string())
                .into(),
            run_id: env::var("RUN_ID").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn new() -> Self {
        Self::from_env()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_defaults() {
        env::remove_var("ENTRY_POINT");
        env::remove_var("TESTCASES_PATH");
        env::remove_var("RUN_ID");

        let config = Config::default();
        assert_eq!(config.entry_point, None);
        assert_eq!(config.testcases_path, PathBuf::from("testcases.json"));
        assert_eq!(config.run_id, None);
    }

    #[test]
    #[serial]
    fn test_config_env_overrides() {
        env::set_var("ENTRY_POINT", "twoSum");
        env::set_var("TESTCASES_PATH", "/work/cases.json");
        env::set_var("RUN_ID", "run-42");

        let config = Config::from_env();
        assert_eq!(config.entry_point.as_deref(), Some("twoSum"));
        assert_eq!(config.testcases_path, PathBuf::from("/work/cases.json"));
        assert_eq!(config.run_id.as_deref(), Some("run-42"));

        env::remove_var("ENTRY_POINT");
        env::remove_var("TESTCASES_PATH");
        env::remove_var("RUN_ID");
    }

    #[test]
    #[serial]
    fn test_empty_entry_point_treated_as_unset() {
        env::set_var("ENTRY_POINT", "");
        let config = Config::from_env();
        assert_eq!(config.entry_point, None);
        env::remove_var("ENTRY_POINT");
    }
}
