// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout descriptors handed from the planners to the placement code.

use addin_lite_geometry::{Line, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One bar group: the shape of a single bar plus how it is arrayed.
///
/// Produced by a planner and consumed once by the placement orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarGeometry {
    /// Direction the bar array is distributed along.
    pub normal: Vector3<f64>,
    /// Segments describing one bar's shape.
    pub curves: Vec<Line>,
    /// Number of bars in the array, at least one.
    pub bar_count: usize,
    /// Center-to-center spacing between bars.
    pub spacing: f64,
}

impl RebarGeometry {
    pub fn new(
        normal: Vector3<f64>,
        curves: Vec<Line>,
        bar_count: usize,
        spacing: f64,
    ) -> Result<Self> {
        if bar_count == 0 {
            return Err(Error::InvalidLayout("bar count must be at least 1".into()));
        }
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(Error::InvalidLayout(format!(
                "spacing must be non-negative, got {spacing}"
            )));
        }
        if curves.is_empty() {
            return Err(Error::InvalidLayout("bar shape has no curves".into()));
        }
        Ok(Self {
            normal,
            curves,
            bar_count,
            spacing,
        })
    }

    /// Total length of one bar's centerline.
    pub fn bar_length(&self) -> f64 {
        self.curves.iter().map(Line::length).sum()
    }

    /// Distance from the first bar to the last one.
    pub fn array_length(&self) -> f64 {
        (self.bar_count - 1) as f64 * self.spacing
    }
}

/// Position of a top bar group along a beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopLocation {
    Start,
    Center,
    End,
}

/// Position of a stirrup group along the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransverseLocation {
    Start,
    Center,
    End,
}

/// Face of a column carrying a vertical bar group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalSide {
    East,
    North,
    West,
    South,
}

impl TopLocation {
    pub const ALL: [TopLocation; 3] = [Self::Start, Self::Center, Self::End];
}

impl TransverseLocation {
    pub const ALL: [TransverseLocation; 3] = [Self::Start, Self::Center, Self::End];
}

impl VerticalSide {
    /// Placement order, which is also the remainder priority when splitting bars.
    pub const ALL: [VerticalSide; 4] = [Self::East, Self::North, Self::West, Self::South];
}

#[cfg(test)]
mod tests {
    use super::*;
    use addin_lite_geometry::Point3;

    fn bar() -> Vec<Line> {
        vec![Line::new(Point3::origin(), Point3::new(4.0, 0.0, 0.0))]
    }

    #[test]
    fn rejects_zero_bars_and_negative_spacing() {
        let normal = Vector3::new(0.0, 1.0, 0.0);
        assert!(RebarGeometry::new(normal, bar(), 0, 1.0).is_err());
        assert!(RebarGeometry::new(normal, bar(), 3, -0.5).is_err());
        assert!(RebarGeometry::new(normal, Vec::new(), 3, 0.5).is_err());
    }

    #[test]
    fn lengths() {
        let g = RebarGeometry::new(Vector3::new(0.0, 1.0, 0.0), bar(), 5, 0.25).unwrap();
        assert_eq!(g.bar_length(), 4.0);
        assert_eq!(g.array_length(), 1.0);
    }
}
