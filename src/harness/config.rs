use std::env;
use std::time::Duration;

use thiserror::Error;

use super::log::LogLevel;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid number")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be at least 1")]
    Zero { var: &'static str },
    #[error("{var} must be at most {max}")]
    TooLarge { var: &'static str, max: u64 },
    #[error("SIDH_LOG_LEVEL={0:?} is not a log level")]
    InvalidLogLevel(String),
}

/// Knobs of a test run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Number of full key exchanges checked per parameter set.
    pub test_loops: usize,
    /// Number of iterations averaged by each benchmark.
    pub bench_loops: usize,
    /// The total elapsed time is reported divided by this count.
    pub elapsed_iterations: u32,
    /// Stop starting new suites once this much time has passed.
    pub deadline: Option<Duration>,
    /// Entries above this level are dropped from the run log.
    pub max_log_level: LogLevel,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            test_loops: 10,
            bench_loops: 100,
            elapsed_iterations: 100,
            deadline: None,
            max_log_level: LogLevel::Info,
        }
    }
}

/// Loop counts are bounded so a benchmark average fits a `u32` divisor.
pub const MAX_LOOPS: u64 = u32::MAX as u64;

fn parse_count(
    var: &'static str,
    value: Option<String>,
    max: u64,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let n: u64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value: value.clone() })?;
    if n == 0 {
        return Err(ConfigError::Zero { var });
    }
    if n > max {
        return Err(ConfigError::TooLarge { var, max });
    }
    Ok(Some(n))
}

impl HarnessConfig {
    pub fn with_test_loops(mut self, test_loops: usize) -> Self {
        self.test_loops = test_loops;
        self
    }

    pub fn with_bench_loops(mut self, bench_loops: usize) -> Self {
        self.bench_loops = bench_loops;
        self
    }

    pub fn with_elapsed_iterations(mut self, elapsed_iterations: u32) -> Self {
        self.elapsed_iterations = elapsed_iterations;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_max_log_level(mut self, level: LogLevel) -> Self {
        self.max_log_level = level;
        self
    }

    /// Defaults overridden by `SIDH_TEST_LOOPS`, `SIDH_BENCH_LOOPS`,
    /// `SIDH_RUN_DEADLINE_SECS` and `SIDH_LOG_LEVEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// As `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(n) = parse_count("SIDH_TEST_LOOPS", lookup("SIDH_TEST_LOOPS"), MAX_LOOPS)? {
            config.test_loops = n as usize;
        }
        if let Some(n) = parse_count("SIDH_BENCH_LOOPS", lookup("SIDH_BENCH_LOOPS"), MAX_LOOPS)? {
            config.bench_loops = n as usize;
        }
        let deadline = lookup("SIDH_RUN_DEADLINE_SECS");
        if let Some(n) = parse_count("SIDH_RUN_DEADLINE_SECS", deadline, u64::MAX)? {
            config.deadline = Some(Duration::from_secs(n));
        }
        if let Some(level) = lookup("SIDH_LOG_LEVEL") {
            config.max_log_level =
                LogLevel::parse(&level).ok_or(ConfigError::InvalidLogLevel(level))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_variables() {
        let config = HarnessConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.test_loops, 10);
        assert_eq!(config.bench_loops, 100);
    }

    #[test]
    fn variables_override_defaults() {
        let config = HarnessConfig::from_lookup(|var| match var {
            "SIDH_TEST_LOOPS" => Some("2".to_string()),
            "SIDH_RUN_DEADLINE_SECS" => Some("30".to_string()),
            "SIDH_LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.test_loops, 2);
        assert_eq!(config.bench_loops, 100);
        assert_eq!(config.deadline, Some(Duration::from_secs(30)));
        assert_eq!(config.max_log_level, LogLevel::Debug);
    }

    #[test]
    fn bad_variables_are_errors() {
        let err = HarnessConfig::from_lookup(|var| {
            (var == "SIDH_BENCH_LOOPS").then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "SIDH_BENCH_LOOPS", .. }));

        let err = HarnessConfig::from_lookup(|var| {
            (var == "SIDH_TEST_LOOPS").then(|| "0".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::Zero { var: "SIDH_TEST_LOOPS" });
    }

    #[test]
    fn loop_counts_are_bounded() {
        let huge = (1u64 << 32).to_string();
        let err = HarnessConfig::from_lookup(|var| {
            (var == "SIDH_BENCH_LOOPS").then(|| huge.clone())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::TooLarge { var: "SIDH_BENCH_LOOPS", max: MAX_LOOPS });

        let config = HarnessConfig::from_lookup(|var| {
            (var == "SIDH_TEST_LOOPS").then(|| MAX_LOOPS.to_string())
        })
        .unwrap();
        assert_eq!(config.test_loops as u64, MAX_LOOPS);
    }
}
