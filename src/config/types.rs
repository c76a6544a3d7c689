// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use crate::backend::DEFAULT_BACKEND_URL;
use crate::submission::debouncer::DEFAULT_DEBOUNCE_MS;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What to do with a response that belongs to an older submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaleResponsePolicy {
    /// Apply every response as it arrives; the last one to resolve wins
    #[default]
    Apply,
    /// Apply only the response for the most recent submission
    Discard,
}

/// Backend connection section
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Per-request timeout in seconds, 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            url: default_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Submission behaviour section
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub stale_responses: StaleResponsePolicy,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        SubmissionConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

fn default_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:5000/api");
        assert_eq!(config.backend.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.submission.debounce_ms, 500);
        assert_eq!(config.submission.stale_responses, StaleResponsePolicy::Apply);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config: Config = toml::from_str("[backend]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(config.backend.timeout(), None);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<Config, _> =
            toml::from_str("[submission]\nstale_responses = \"sometimes\"\n");
        assert!(result.is_err());
    }

    // Every valid policy spelling parses to its variant
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_valid_policy_parsing(policy in prop::sample::select(vec!["apply", "discard"])) {
            let toml_content = format!("[submission]\nstale_responses = \"{}\"\n", policy);
            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse valid policy: {}", policy);

            let expected = match policy {
                "apply" => StaleResponsePolicy::Apply,
                "discard" => StaleResponsePolicy::Discard,
                _ => unreachable!(),
            };
            prop_assert_eq!(config.unwrap().submission.stale_responses, expected);
        }

        #[test]
        fn prop_missing_fields_use_defaults(
            include_backend in prop::bool::ANY,
            include_submission in prop::bool::ANY,
            debounce in 0u64..5000,
        ) {
            let mut toml_content = String::new();
            if include_backend {
                toml_content.push_str("[backend]\n");
            }
            if include_submission {
                toml_content.push_str(&format!("[submission]\ndebounce_ms = {}\n", debounce));
            }

            let config: Config = toml::from_str(&toml_content).unwrap();
            prop_assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
            prop_assert_eq!(config.backend.timeout_secs, DEFAULT_TIMEOUT_SECS);
            let expected_debounce = if include_submission { debounce } else { DEFAULT_DEBOUNCE_MS };
            prop_assert_eq!(config.submission.debounce_ms, expected_debounce);
        }
    }
}
