// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Router configuration loaded from environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do once every strategy has been rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastResort {
    /// Emit the first-candidate X trunk without feasibility checks and let the
    /// host report the conflict.
    #[default]
    EmitUnchecked,
    /// Give up with [`Error::NoFeasibleRoute`](crate::Error::NoFeasibleRoute).
    Fail,
}

impl std::str::FromStr for LastResort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emit" | "emit_unchecked" => Ok(Self::EmitUnchecked),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown last resort policy: {other}")),
        }
    }
}

/// Router configuration. Lengths are in project units (feet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Room taken by one fitting along each duct it joins.
    pub min_fitting_length: f64,
    /// Shortest duct the host accepts.
    pub min_duct_length: f64,
    /// Trunk height above the top of the routed elements.
    pub vertical_trunk_offset: f64,
    /// Distance of the fallback trunks outside the routed elements.
    pub horizontal_trunk_offset: f64,
    pub last_resort: LastResort,
    /// Plain-text diagnostic log, disabled when `None`.
    pub trace_path: Option<PathBuf>,
}

impl RouterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup, falling back to defaults
    /// for missing or malformed values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, default: f64| {
            lookup(key)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(default)
        };

        Self {
            min_fitting_length: number(
                "AUTOROUTE_MIN_FITTING_LENGTH",
                defaults.min_fitting_length,
            ),
            min_duct_length: number("AUTOROUTE_MIN_DUCT_LENGTH", defaults.min_duct_length),
            vertical_trunk_offset: number(
                "AUTOROUTE_VERTICAL_TRUNK_OFFSET",
                defaults.vertical_trunk_offset,
            ),
            horizontal_trunk_offset: number(
                "AUTOROUTE_HORIZONTAL_TRUNK_OFFSET",
                defaults.horizontal_trunk_offset,
            ),
            last_resort: lookup("AUTOROUTE_LAST_RESORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.last_resort),
            trace_path: lookup("AUTOROUTE_TRACE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Clearance for a branch: an elbow, a minimum duct and the trunk fitting.
    #[inline]
    pub fn one_duct_two_fittings(&self) -> f64 {
        self.min_duct_length + 2.0 * self.min_fitting_length
    }

    /// Clearance between two fittings on the same duct.
    #[inline]
    pub fn two_fittings(&self) -> f64 {
        2.0 * self.min_fitting_length
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            min_fitting_length: 1.0,
            min_duct_length: 1.0,
            vertical_trunk_offset: 15.0,
            horizontal_trunk_offset: 5.0,
            last_resort: LastResort::EmitUnchecked,
            trace_path: None,
        }
    }
}
