// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Duct network plans.
//!
//! A plan is a value: ducts by index, fittings joining duct ends, and the
//! connectors attached to duct ends. Nothing touches the host until the plan
//! is emitted, so strategies can build, compare and drop plans freely.

use addin_lite_geometry::{unit_vector, Line, Point3};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::connector::ConnectorId;

/// Purpose of a duct within the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuctRole {
    /// Short horizontal duct leaving a sideways facing connector.
    Lead,
    /// Vertical stub rising to the stub height.
    Riser,
    /// Cross-axis duct from a riser to the trunk.
    Branch,
    /// Horizontal main duct.
    Trunk,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctRun {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub role: DuctRole,
}

impl DuctRun {
    pub fn line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Center of a fitting joined at `end`, one fitting length beyond it along
    /// the duct. `None` for a zero-length duct.
    pub fn fitting_center(&self, end: DuctEnd, fitting_length: f64) -> Option<Point3<f64>> {
        let direction = unit_vector(&(self.end - self.start)).ok()?;
        Some(match end {
            DuctEnd::Start => self.start - direction * fitting_length,
            DuctEnd::End => self.end + direction * fitting_length,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuctEnd {
    Start,
    End,
}

/// Duct referenced by a plan: one of its own, or a riser emitted earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuctRef {
    /// Index into the plan's own ducts.
    Planned(usize),
    /// Index of a riser stub created before the plan.
    Riser(usize),
}

/// One end of a duct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuctPort {
    pub duct: DuctRef,
    pub end: DuctEnd,
}

impl DuctPort {
    pub fn start(duct: DuctRef) -> Self {
        Self {
            duct,
            end: DuctEnd::Start,
        }
    }

    pub fn end(duct: DuctRef) -> Self {
        Self {
            duct,
            end: DuctEnd::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittingPlan {
    Elbow { ports: [DuctPort; 2] },
    /// `run` ports are collinear, `branch` leaves the run sideways.
    Tee { run: [DuctPort; 2], branch: DuctPort },
}

impl FittingPlan {
    pub fn ports(&self) -> SmallVec<[DuctPort; 3]> {
        match self {
            FittingPlan::Elbow { ports } => SmallVec::from_slice(ports),
            FittingPlan::Tee { run, branch } => smallvec![run[0], run[1], *branch],
        }
    }
}

/// Ducts, fittings and connector attachments to create together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingPlan {
    pub ducts: Vec<DuctRun>,
    pub fittings: Vec<FittingPlan>,
    pub attachments: Vec<(ConnectorId, DuctPort)>,
}

impl RoutingPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a duct, returning a reference to it.
    pub fn duct(&mut self, start: Point3<f64>, end: Point3<f64>, role: DuctRole) -> DuctRef {
        self.ducts.push(DuctRun { start, end, role });
        DuctRef::Planned(self.ducts.len() - 1)
    }

    pub fn elbow(&mut self, a: DuctPort, b: DuctPort) {
        self.fittings.push(FittingPlan::Elbow { ports: [a, b] });
    }

    pub fn tee(&mut self, run: [DuctPort; 2], branch: DuctPort) {
        self.fittings.push(FittingPlan::Tee { run, branch });
    }

    pub fn attach(&mut self, connector: ConnectorId, port: DuctPort) {
        self.attachments.push((connector, port));
    }

    pub fn is_empty(&self) -> bool {
        self.ducts.is_empty() && self.fittings.is_empty()
    }

    pub fn count_ducts(&self, role: DuctRole) -> usize {
        self.ducts.iter().filter(|d| d.role == role).count()
    }

    pub fn elbow_count(&self) -> usize {
        self.fittings
            .iter()
            .filter(|f| matches!(f, FittingPlan::Elbow { .. }))
            .count()
    }

    pub fn tee_count(&self) -> usize {
        self.fittings.len() - self.elbow_count()
    }

    /// Position of a planned port. Riser ports are resolved by the caller.
    pub fn port_point(&self, port: &DuctPort) -> Option<Point3<f64>> {
        match port.duct {
            DuctRef::Planned(i) => self.ducts.get(i).map(|d| match port.end {
                DuctEnd::Start => d.start,
                DuctEnd::End => d.end,
            }),
            DuctRef::Riser(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_ports_cover_all_ends() {
        let mut plan = RoutingPlan::new();
        let a = plan.duct(Point3::origin(), Point3::new(1.0, 0.0, 0.0), DuctRole::Trunk);
        let b = plan.duct(Point3::new(3.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0), DuctRole::Trunk);
        plan.tee(
            [DuctPort::end(a), DuctPort::start(b)],
            DuctPort::end(DuctRef::Riser(0)),
        );
        plan.elbow(DuctPort::start(a), DuctPort::end(b));

        assert_eq!(plan.fittings[0].ports().len(), 3);
        assert_eq!(plan.fittings[1].ports().len(), 2);
        assert_eq!(plan.tee_count(), 1);
        assert_eq!(plan.elbow_count(), 1);
        assert_eq!(
            plan.port_point(&DuctPort::end(a)),
            Some(Point3::new(1.0, 0.0, 0.0))
        );
        assert_eq!(plan.port_point(&DuctPort::end(DuctRef::Riser(0))), None);
    }

    #[test]
    fn fitting_centers_sit_past_the_ends() {
        let duct = DuctRun {
            start: Point3::new(-9.0, 0.0, 23.0),
            end: Point3::new(-3.0, 0.0, 23.0),
            role: DuctRole::Trunk,
        };
        assert_eq!(
            duct.fitting_center(DuctEnd::Start, 1.0),
            Some(Point3::new(-10.0, 0.0, 23.0))
        );
        assert_eq!(
            duct.fitting_center(DuctEnd::End, 1.0),
            Some(Point3::new(-2.0, 0.0, 23.0))
        );

        let point = DuctRun {
            start: Point3::origin(),
            end: Point3::origin(),
            role: DuctRole::Branch,
        };
        assert_eq!(point.fitting_center(DuctEnd::End, 1.0), None);
    }
}
