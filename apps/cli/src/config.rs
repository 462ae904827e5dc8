// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Harness configuration loaded from environment variables.

/// Harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// `tracing` filter directive, e.g. `info,addin_lite_routing=debug`.
    pub log_filter: String,
    /// Multi-line human readable log records instead of compact ones.
    pub pretty_logs: bool,
    /// Indent the JSON report.
    pub pretty_output: bool,
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(default)
        };
        Self {
            log_filter: lookup("RUST_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "info".into()),
            pretty_logs: flag("ADDIN_LITE_PRETTY_LOGS", false),
            pretty_output: flag("ADDIN_LITE_PRETTY_JSON", true),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = HarnessConfig::from_lookup(|_| None);
        assert_eq!(config.log_filter, "info");
        assert!(!config.pretty_logs);
        assert!(config.pretty_output);
    }

    #[test]
    fn reads_flags() {
        let config = HarnessConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("debug".into()),
            "ADDIN_LITE_PRETTY_LOGS" => Some("Yes".into()),
            "ADDIN_LITE_PRETTY_JSON" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.log_filter, "debug");
        assert!(config.pretty_logs);
        assert!(!config.pretty_output);
    }
}
