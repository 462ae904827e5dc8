// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed cover and layout constants (project length units, feet by default).

use serde::{Deserialize, Serialize};

/// Layout constants for beams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamRebarConstants {
    /// Cover of the top start/end bars.
    pub top_end_offset: f64,
    /// Cover of the top center bars.
    pub top_center_offset: f64,
    /// Cover of the bottom bars.
    pub bottom_offset: f64,
    /// Cover of the stirrups.
    pub transverse_offset: f64,
    /// Distance from each beam end to the first stirrup group.
    pub transverse_end_offset: f64,
    /// Clear gap between neighbouring stirrup groups.
    pub transverse_gap: f64,
    pub top_bar_count: usize,
    pub bottom_bar_count: usize,
}

impl Default for BeamRebarConstants {
    fn default() -> Self {
        Self {
            top_end_offset: 0.2,
            top_center_offset: 0.23,
            bottom_offset: 0.271,
            transverse_offset: 0.125,
            transverse_end_offset: 1.2,
            transverse_gap: 1.0,
            top_bar_count: 2,
            bottom_bar_count: 5,
        }
    }
}

/// Layout constants for columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRebarConstants {
    /// Cover of the ties.
    pub transverse_offset: f64,
    /// Cover of the vertical bars.
    pub vertical_offset: f64,
    /// Extra length of vertical bars past the column top (lap splice).
    pub vertical_extension: f64,
}

impl Default for ColumnRebarConstants {
    fn default() -> Self {
        Self {
            transverse_offset: 0.125,
            vertical_offset: 0.25,
            vertical_extension: 3.0,
        }
    }
}

/// Constants for both framing kinds, as loaded by a command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementConstants {
    pub beam: BeamRebarConstants,
    pub column: ColumnRebarConstants,
}
