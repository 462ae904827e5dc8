// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User choices collected by the options step of a reinforcement command.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bar types, hook types and stirrup spacings for a beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamRebarOptions {
    pub top_end_bar_type: String,
    pub top_center_bar_type: String,
    pub bottom_bar_type: String,
    pub transverse_bar_type: String,
    /// Hook at the outer ends of the top start and top end bars.
    pub top_hook_type: String,
    /// Hook at both ends of every stirrup.
    pub transverse_hook_type: String,
    /// Stirrup spacing in the two end groups.
    pub transverse_end_spacing: f64,
    /// Stirrup spacing in the center group.
    pub transverse_center_spacing: f64,
}

impl BeamRebarOptions {
    pub fn validate(&self) -> Result<()> {
        positive("transverse_end_spacing", self.transverse_end_spacing)?;
        positive("transverse_center_spacing", self.transverse_center_spacing)
    }

    pub fn bar_types(&self) -> [&str; 4] {
        [
            &self.top_end_bar_type,
            &self.top_center_bar_type,
            &self.bottom_bar_type,
            &self.transverse_bar_type,
        ]
    }

    pub fn hook_types(&self) -> [&str; 2] {
        [&self.top_hook_type, &self.transverse_hook_type]
    }
}

/// Bar types, tie spacings and vertical bar count for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRebarOptions {
    pub vertical_bar_type: String,
    pub transverse_bar_type: String,
    pub transverse_hook_type: String,
    pub transverse_end_spacing: f64,
    pub transverse_center_spacing: f64,
    /// Total number of vertical bars, split over the four faces.
    pub vertical_bar_count: usize,
}

impl ColumnRebarOptions {
    pub fn validate(&self) -> Result<()> {
        positive("transverse_end_spacing", self.transverse_end_spacing)?;
        positive("transverse_center_spacing", self.transverse_center_spacing)?;
        if self.vertical_bar_count < 4 {
            return Err(Error::InvalidOptions(format!(
                "vertical_bar_count must be at least 4, got {}",
                self.vertical_bar_count
            )));
        }
        Ok(())
    }

    pub fn bar_types(&self) -> [&str; 2] {
        [&self.vertical_bar_type, &self.transverse_bar_type]
    }

    pub fn hook_types(&self) -> [&str; 1] {
        [&self.transverse_hook_type]
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidOptions(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> ColumnRebarOptions {
        ColumnRebarOptions {
            vertical_bar_type: "#8".into(),
            transverse_bar_type: "#4".into(),
            transverse_hook_type: "Stirrup/Tie - 135 deg.".into(),
            transverse_end_spacing: 0.5,
            transverse_center_spacing: 1.0,
            vertical_bar_count: 10,
        }
    }

    #[test]
    fn column_options_need_four_bars() {
        assert!(column().validate().is_ok());
        let few = ColumnRebarOptions {
            vertical_bar_count: 3,
            ..column()
        };
        assert!(matches!(few.validate(), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn spacing_must_be_positive() {
        let zero = ColumnRebarOptions {
            transverse_center_spacing: 0.0,
            ..column()
        };
        assert!(zero.validate().is_err());
        let nan = ColumnRebarOptions {
            transverse_end_spacing: f64::NAN,
            ..column()
        };
        assert!(nan.validate().is_err());
    }
}
