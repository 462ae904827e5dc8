// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Horizontal trunk planning.
//!
//! A trunk runs along one axis at a fixed cross-axis coordinate, at trunk
//! height. Each riser meets it at a junction: directly if the riser sits on
//! the trunk line, otherwise through a branch duct along the cross axis.
//!
//! | Riser          | Junction at trunk end | Junction mid-trunk   |
//! |----------------|-----------------------|----------------------|
//! | on the line    | elbow                 | tee                  |
//! | offset         | dog-leg (2 elbows)    | elbow + tee          |
//! | two, opposite  | tee joining both      | not supported        |

use std::fmt;

use addin_lite_geometry::{is_equal, Point3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::RouterConfig;
use crate::connector::ConnectorId;
use crate::plan::{DuctPort, DuctRef, DuctRole, RoutingPlan};
use crate::riser::Riser;

/// Horizontal axis a trunk runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Coordinate along the axis.
    #[inline]
    pub fn along(self, p: &Point3<f64>) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    /// Coordinate across the axis, in the horizontal plane.
    #[inline]
    pub fn across(self, p: &Point3<f64>) -> f64 {
        match self {
            Axis::X => p.y,
            Axis::Y => p.x,
        }
    }

    #[inline]
    pub fn point(self, along: f64, across: f64, z: f64) -> Point3<f64> {
        match self {
            Axis::X => Point3::new(along, across, z),
            Axis::Y => Point3::new(across, along, z),
        }
    }
}

/// Why a trunk placement was rejected before reaching the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Infeasibility {
    /// An offset riser leaves no room for elbow, branch duct and trunk fitting.
    StubTooClose { connector: ConnectorId, offset: f64 },
    /// Two junctions along the trunk are closer than two fittings.
    StubsTooClose {
        first: ConnectorId,
        second: ConnectorId,
        distance: f64,
    },
    /// Two risers share a junction but don't approach from opposite sides.
    SameSide {
        first: ConnectorId,
        second: ConnectorId,
    },
    /// A junction needs a fitting with more than three ports.
    UnsupportedJunction { position: f64, branches: usize },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::StubTooClose { connector, offset } => write!(
                f,
                "stub of connector {connector} is {:.3} from the trunk",
                offset.abs()
            ),
            Infeasibility::StubsTooClose {
                first,
                second,
                distance,
            } => write!(
                f,
                "stubs of connectors {first} and {second} are {distance:.3} apart along the trunk"
            ),
            Infeasibility::SameSide { first, second } => write!(
                f,
                "stubs of connectors {first} and {second} meet the trunk from the same side"
            ),
            Infeasibility::UnsupportedJunction { position, branches } => write!(
                f,
                "{branches} branches meet the trunk at {position:.3}"
            ),
        }
    }
}

/// Check the feasibility rules for a trunk at `coordinate` on the cross axis.
pub fn check_trunk(
    risers: &[Riser],
    axis: Axis,
    coordinate: f64,
    config: &RouterConfig,
) -> Result<(), Infeasibility> {
    let offset = |r: &Riser| axis.across(&r.top) - coordinate;

    for riser in risers {
        let d = offset(riser);
        if !is_equal(d, 0.0) && d.abs() < config.one_duct_two_fittings() {
            return Err(Infeasibility::StubTooClose {
                connector: riser.connector,
                offset: d,
            });
        }
    }

    for (i, a) in risers.iter().enumerate() {
        for b in &risers[i + 1..] {
            let distance = (axis.along(&a.top) - axis.along(&b.top)).abs();
            if is_equal(distance, 0.0) {
                let (da, db) = (offset(a), offset(b));
                let opposite =
                    !is_equal(da, 0.0) && !is_equal(db, 0.0) && da.signum() != db.signum();
                if !opposite {
                    return Err(Infeasibility::SameSide {
                        first: a.connector,
                        second: b.connector,
                    });
                }
            } else if distance < config.two_fittings() {
                return Err(Infeasibility::StubsTooClose {
                    first: a.connector,
                    second: b.connector,
                    distance,
                });
            }
        }
    }
    Ok(())
}

/// Plan a trunk after checking it is feasible. Pure: nothing is sent to the
/// host.
pub fn plan_trunk(
    risers: &[Riser],
    axis: Axis,
    coordinate: f64,
    trunk_height: f64,
    config: &RouterConfig,
) -> Result<RoutingPlan, Infeasibility> {
    check_trunk(risers, axis, coordinate, config)?;
    plan_trunk_unchecked(risers, axis, coordinate, trunk_height, config)
}

/// Plan a trunk without the clearance checks.
///
/// The result may contain ducts too short for the host to accept. Only a
/// junction that no elbow or tee can serve is still reported.
pub fn plan_trunk_unchecked(
    risers: &[Riser],
    axis: Axis,
    coordinate: f64,
    trunk_height: f64,
    config: &RouterConfig,
) -> Result<RoutingPlan, Infeasibility> {
    let fitting = config.min_fitting_length;
    let junctions = junctions(risers, axis);
    let mut plan = RoutingPlan::new();

    let trunk: SmallVec<[DuctRef; 2]> = junctions
        .windows(2)
        .map(|pair| {
            plan.duct(
                axis.point(pair[0].along + fitting, coordinate, trunk_height),
                axis.point(pair[1].along - fitting, coordinate, trunk_height),
                DuctRole::Trunk,
            )
        })
        .collect();

    for (k, junction) in junctions.iter().enumerate() {
        let mut trunk_ports: SmallVec<[DuctPort; 2]> = SmallVec::new();
        if k > 0 {
            trunk_ports.push(DuctPort::end(trunk[k - 1]));
        }
        if k + 1 < junctions.len() {
            trunk_ports.push(DuctPort::start(trunk[k]));
        }

        let legs: SmallVec<[DuctPort; 2]> = junction
            .risers
            .iter()
            .map(|&i| leg(&mut plan, &risers[i], i, axis, coordinate, trunk_height, fitting))
            .collect();

        match (legs.as_slice(), trunk_ports.as_slice()) {
            ([branch], [port]) => plan.elbow(*branch, *port),
            ([branch], [left, right]) => plan.tee([*left, *right], *branch),
            ([first, second], [port]) => plan.tee([*first, *second], *port),
            _ => {
                return Err(Infeasibility::UnsupportedJunction {
                    position: junction.along,
                    branches: legs.len(),
                })
            }
        }
    }

    Ok(plan)
}

struct Junction {
    along: f64,
    risers: SmallVec<[usize; 2]>,
}

/// Risers grouped by position along the trunk, in ascending order.
fn junctions(risers: &[Riser], axis: Axis) -> SmallVec<[Junction; 3]> {
    let mut order: SmallVec<[usize; 3]> = (0..risers.len()).collect();
    order.sort_by(|&a, &b| {
        axis.along(&risers[a].top)
            .total_cmp(&axis.along(&risers[b].top))
    });

    let mut junctions: SmallVec<[Junction; 3]> = SmallVec::new();
    for i in order {
        let along = axis.along(&risers[i].top);
        match junctions.last_mut() {
            Some(last) if is_equal(last.along, along) => last.risers.push(i),
            _ => junctions.push(Junction {
                along,
                risers: SmallVec::from_slice(&[i]),
            }),
        }
    }
    junctions
}

/// Port where riser `index` reaches the trunk, adding a branch if it is offset.
fn leg(
    plan: &mut RoutingPlan,
    riser: &Riser,
    index: usize,
    axis: Axis,
    coordinate: f64,
    trunk_height: f64,
    fitting: f64,
) -> DuctPort {
    let stub_top = DuctPort::end(DuctRef::Riser(index));
    let along = axis.along(&riser.top);
    let across = axis.across(&riser.top);
    let offset = across - coordinate;
    if is_equal(offset, 0.0) {
        return stub_top;
    }

    let toward = -offset.signum();
    let branch = plan.duct(
        axis.point(along, across + toward * fitting, trunk_height),
        axis.point(along, coordinate - toward * fitting, trunk_height),
        DuctRole::Branch,
    );
    plan.elbow(stub_top, DuctPort::start(branch));
    DuctPort::end(branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::FittingPlan;
    use approx::assert_relative_eq;

    fn riser(connector: ConnectorId, x: f64, y: f64) -> Riser {
        Riser {
            connector,
            top: Point3::new(x, y, 22.0),
        }
    }

    /// Equipment riser two fittings in front of the outlet, terminals opposite.
    fn scenario() -> Vec<Riser> {
        vec![riser(1, -2.0, 0.0), riser(2, -10.0, 5.0), riser(3, -10.0, -5.0)]
    }

    #[test]
    fn midpoint_trunk_joins_opposite_terminals_with_a_tee() {
        let config = RouterConfig::default();
        let plan = plan_trunk(&scenario(), Axis::X, 0.0, 23.0, &config).unwrap();

        assert_eq!(plan.count_ducts(DuctRole::Trunk), 1);
        assert_eq!(plan.count_ducts(DuctRole::Branch), 2);
        let trunk = plan.ducts.iter().find(|d| d.role == DuctRole::Trunk).unwrap();
        assert_eq!(trunk.start, Point3::new(-9.0, 0.0, 23.0));
        assert_eq!(trunk.end, Point3::new(-3.0, 0.0, 23.0));

        // Elbow at each terminal stub, the tee, and the equipment elbow
        assert_eq!(plan.elbow_count(), 3);
        assert_eq!(plan.tee_count(), 1);
        let equipment_elbow = FittingPlan::Elbow {
            ports: [
                DuctPort::end(DuctRef::Riser(0)),
                DuctPort::end(DuctRef::Planned(0)),
            ],
        };
        assert!(plan.fittings.contains(&equipment_elbow));

        for branch in plan.ducts.iter().filter(|d| d.role == DuctRole::Branch) {
            assert_relative_eq!(branch.length(), 3.0, epsilon = 1e-9);
            assert_relative_eq!(branch.start.x, -10.0);
        }
    }

    #[test]
    fn offset_riser_mid_trunk_gets_tee_with_branch() {
        let risers = [riser(1, 0.0, 0.0), riser(2, 10.0, 5.0), riser(3, 20.0, 0.0)];
        let plan = plan_trunk(&risers, Axis::X, 0.0, 23.0, &RouterConfig::default()).unwrap();
        assert_eq!(plan.count_ducts(DuctRole::Trunk), 2);
        assert_eq!(plan.count_ducts(DuctRole::Branch), 1);
        assert_eq!(plan.elbow_count(), 3);
        assert_eq!(plan.tee_count(), 1);
        match plan.fittings.iter().find(|f| matches!(f, FittingPlan::Tee { .. })) {
            Some(FittingPlan::Tee { run, .. }) => {
                let left = plan.port_point(&run[0]).unwrap();
                let right = plan.port_point(&run[1]).unwrap();
                assert_relative_eq!(left.x, 9.0);
                assert_relative_eq!(right.x, 11.0);
            }
            _ => panic!("no tee planned"),
        }
    }

    #[test]
    fn offset_riser_at_trunk_end_is_a_dog_leg() {
        let risers = [riser(1, 0.0, 5.0), riser(2, 10.0, 0.0), riser(3, 20.0, 0.0)];
        let plan = plan_trunk(&risers, Axis::X, 0.0, 23.0, &RouterConfig::default()).unwrap();
        assert_eq!(plan.count_ducts(DuctRole::Branch), 1);
        assert_eq!(plan.elbow_count(), 3);
        assert_eq!(plan.tee_count(), 1);
    }

    #[test]
    fn y_trunk_swaps_coordinates() {
        let risers = [riser(1, 0.0, 0.0), riser(2, 5.0, 10.0), riser(3, 0.0, 20.0)];
        let plan = plan_trunk(&risers, Axis::Y, 0.0, 23.0, &RouterConfig::default()).unwrap();
        let trunks: Vec<_> = plan
            .ducts
            .iter()
            .filter(|d| d.role == DuctRole::Trunk)
            .collect();
        assert_eq!(trunks.len(), 2);
        assert!(trunks.iter().all(|d| d.start.x == 0.0 && d.end.x == 0.0));
        assert_eq!(trunks[0].start.y, 1.0);
    }

    #[test]
    fn stub_too_close_to_trunk() {
        let config = RouterConfig::default();
        let err = check_trunk(&scenario(), Axis::X, 2.5, &config).unwrap_err();
        assert_eq!(
            err,
            Infeasibility::StubTooClose {
                connector: 1,
                offset: -2.5
            }
        );
    }

    #[test]
    fn stubs_too_close_along_trunk() {
        let risers = [riser(1, 0.0, 0.0), riser(2, 1.5, 5.0), riser(3, 20.0, 0.0)];
        let err = check_trunk(&risers, Axis::X, 0.0, &RouterConfig::default()).unwrap_err();
        assert!(matches!(err, Infeasibility::StubsTooClose { first: 1, second: 2, .. }));
    }

    #[test]
    fn coincident_stubs_must_straddle_the_trunk() {
        let config = RouterConfig::default();
        let risers = [riser(1, 0.0, 0.0), riser(2, -10.0, 10.0), riser(3, -10.0, 20.0)];
        assert_eq!(
            check_trunk(&risers, Axis::X, 0.0, &config),
            Err(Infeasibility::SameSide {
                first: 2,
                second: 3
            })
        );
        // A trunk between them is fine
        assert!(check_trunk(&risers, Axis::X, 15.0, &config).is_ok());
    }

    #[test]
    fn unchecked_plan_still_needs_three_port_junctions() {
        let risers = [riser(1, 0.0, 0.0), riser(2, 0.0, 5.0), riser(3, 0.0, -5.0)];
        let err = plan_trunk_unchecked(&risers, Axis::X, 0.0, 23.0, &RouterConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Infeasibility::UnsupportedJunction { branches: 3, .. }
        ));
    }
}
