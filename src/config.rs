use std::env;

use tracing::warn;

use crate::matching::MatchMode;

/// Result cap the workflow has always shipped with.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Workflow variables arrive as environment variables, named exactly as the
/// host's configuration sheet defines them.
const ENV_MATCH_MODE: &str = "match_mode";
const ENV_MAX_RESULTS: &str = "max_results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub max_results: usize,
    pub match_mode: MatchMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            match_mode: MatchMode::default(),
        }
    }
}

impl Config {
    /// Reads workflow variables from the environment. Unset or malformed
    /// values keep their defaults; malformed ones are logged, never fatal.
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(ENV_MATCH_MODE).ok().as_deref(),
            env::var(ENV_MAX_RESULTS).ok().as_deref(),
        )
    }

    fn from_values(match_mode: Option<&str>, max_results: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = match_mode {
            match raw.parse() {
                Ok(mode) => config.match_mode = mode,
                Err(err) => warn!("ignoring {ENV_MATCH_MODE}: {err}"),
            }
        }

        if let Some(raw) = max_results {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_results = n,
                Ok(_) => warn!("ignoring {ENV_MAX_RESULTS}: must be positive"),
                Err(err) => warn!("ignoring {ENV_MAX_RESULTS} '{raw}': {err}"),
            }
        }

        config
    }

    /// Applies command-line overrides on top of the environment. A zero
    /// result cap is rejected with the same warning the environment path
    /// gives it.
    pub fn with_overrides(
        mut self,
        match_mode: Option<MatchMode>,
        max_results: Option<usize>,
    ) -> Self {
        if let Some(mode) = match_mode {
            self.match_mode = mode;
        }
        match max_results {
            Some(0) => warn!("ignoring {ENV_MAX_RESULTS} override: must be positive"),
            Some(n) => self.max_results = n,
            None => {}
        }
        self
    }
}
