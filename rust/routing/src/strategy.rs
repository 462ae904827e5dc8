// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered trunk placement strategies.

use std::fmt;

use addin_lite_geometry::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::plan::RoutingPlan;
use crate::riser::Riser;
use crate::trunk::{plan_trunk, plan_trunk_unchecked, Axis, Infeasibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Trunk inside the routed elements' footprint.
    Candidate,
    /// Trunk pushed outside the footprint by the horizontal offset.
    Outside,
    /// Unchecked trunk emitted once everything else failed.
    LastResort,
}

/// One trunk placement to try.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub axis: Axis,
    /// Cross-axis coordinate of the trunk.
    pub coordinate: f64,
    pub kind: StrategyKind,
}

impl Strategy {
    /// Plan this strategy's trunk. The last resort skips the clearance checks.
    pub fn plan(
        &self,
        risers: &[Riser],
        trunk_height: f64,
        config: &RouterConfig,
    ) -> Result<RoutingPlan, Infeasibility> {
        match self.kind {
            StrategyKind::LastResort => {
                plan_trunk_unchecked(risers, self.axis, self.coordinate, trunk_height, config)
            }
            _ => plan_trunk(risers, self.axis, self.coordinate, trunk_height, config),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (axis, across) = match self.axis {
            Axis::X => ("X", "y"),
            Axis::Y => ("Y", "x"),
        };
        let kind = match self.kind {
            StrategyKind::Candidate => "candidate",
            StrategyKind::Outside => "outside",
            StrategyKind::LastResort => "last resort",
        };
        write!(f, "{axis} trunk at {across} = {:.3} ({kind})", self.coordinate)
    }
}

/// Trunk coordinates across `axis`: the middle of the bounds, then the
/// middles of the lower and upper halves.
pub fn candidate_coordinates(bounds: &BoundingBox, axis: Axis) -> [f64; 3] {
    let (min, max) = match axis {
        Axis::X => (bounds.min.y, bounds.max.y),
        Axis::Y => (bounds.min.x, bounds.max.x),
    };
    let mid = (min + max) / 2.0;
    [mid, (min + mid) / 2.0, (mid + max) / 2.0]
}

/// Checked strategies in the order they are tried.
pub fn strategies(bounds: &BoundingBox, config: &RouterConfig) -> Vec<Strategy> {
    let mut list = Vec::with_capacity(8);
    for axis in [Axis::X, Axis::Y] {
        list.extend(
            candidate_coordinates(bounds, axis)
                .into_iter()
                .map(|coordinate| Strategy {
                    axis,
                    coordinate,
                    kind: StrategyKind::Candidate,
                }),
        );
    }
    list.push(Strategy {
        axis: Axis::X,
        coordinate: bounds.max.y + config.horizontal_trunk_offset,
        kind: StrategyKind::Outside,
    });
    list.push(Strategy {
        axis: Axis::Y,
        coordinate: bounds.max.x + config.horizontal_trunk_offset,
        kind: StrategyKind::Outside,
    });
    list
}

/// X trunk at the first candidate, without checks.
pub fn last_resort(bounds: &BoundingBox) -> Strategy {
    Strategy {
        axis: Axis::X,
        coordinate: candidate_coordinates(bounds, Axis::X)[0],
        kind: StrategyKind::LastResort,
    }
}

/// First strategy whose trunk passes the clearance checks, without involving
/// the host.
pub fn first_feasible(
    risers: &[Riser],
    strategies: &[Strategy],
    trunk_height: f64,
    config: &RouterConfig,
) -> Option<(Strategy, RoutingPlan)> {
    strategies.iter().find_map(|strategy| {
        strategy
            .plan(risers, trunk_height, config)
            .ok()
            .map(|plan| (*strategy, plan))
    })
}
