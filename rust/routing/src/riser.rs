// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical stubs from each connector up to the common stub height.
//!
//! The trunk network lives one fitting above the stub tops, so every stub
//! ends in an elbow or tee centered at trunk height.

use addin_lite_geometry::{
    is_equal, is_opposite_direction, is_same_direction, offset_point, unit_vector, Point3,
    Vector3,
};
use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::connector::{Connector, ConnectorId, RouteRequest};
use crate::error::{Error, Result};
use crate::plan::{DuctPort, DuctRole, RoutingPlan};

/// The top of one connector's vertical stub.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Riser {
    pub connector: ConnectorId,
    /// Stub top, at the stub height.
    pub top: Point3<f64>,
}

/// Stubs for all three connectors of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RiserPlan {
    pub plan: RoutingPlan,
    /// Equipment first, then the terminals.
    pub risers: Vec<Riser>,
    /// Plan duct index of each riser's stub.
    pub stubs: Vec<usize>,
    pub stub_height: f64,
    pub trunk_height: f64,
}

/// Height every stub rises to: one fitting below the trunk, measured from
/// the top of the terminals.
pub fn stub_height(terminal_top: f64, config: &RouterConfig) -> f64 {
    terminal_top + config.vertical_trunk_offset - config.min_fitting_length
}

/// Plan the stubs for a request.
pub fn plan_risers(request: &RouteRequest, config: &RouterConfig) -> Result<RiserPlan> {
    let stub_height = stub_height(request.terminal_top(), config);

    let mut plan = RoutingPlan::new();
    let mut risers = Vec::with_capacity(3);
    let mut stubs = Vec::with_capacity(3);
    for connector in request.connectors() {
        let (riser, stub) = plan_riser(&mut plan, connector, stub_height, config)?;
        risers.push(riser);
        stubs.push(stub);
    }

    Ok(RiserPlan {
        plan,
        risers,
        stubs,
        stub_height,
        trunk_height: stub_height + config.min_fitting_length,
    })
}

fn plan_riser(
    plan: &mut RoutingPlan,
    connector: &Connector,
    stub_height: f64,
    config: &RouterConfig,
) -> Result<(Riser, usize)> {
    let up = Vector3::z();
    let direction = unit_vector(&connector.direction)?;
    let fitting = config.min_fitting_length;

    // Sideways connectors get a lead duct and an elbow before the stub
    let (stub_start, lead) = if is_same_direction(&direction, &up) {
        (connector.origin, None)
    } else if is_equal(direction.z, 0.0) {
        let lead_end = offset_point(&connector.origin, &direction, fitting)?;
        let corner = offset_point(&connector.origin, &direction, 2.0 * fitting)?;
        (corner + up * fitting, Some(lead_end))
    } else if is_opposite_direction(&direction, &up) {
        return Err(Error::UnsupportedConnector(format!(
            "connector {} faces down",
            connector.id
        )));
    } else {
        return Err(Error::UnsupportedConnector(format!(
            "connector {} is neither vertical nor horizontal",
            connector.id
        )));
    };

    let top = Point3::new(stub_start.x, stub_start.y, stub_height);
    if top.z - stub_start.z < config.min_duct_length {
        return Err(Error::UnsupportedConnector(format!(
            "connector {} is too close to the trunk height {:.3}",
            connector.id,
            stub_height + fitting
        )));
    }

    let index = plan.ducts.len();
    let stub = plan.duct(stub_start, top, DuctRole::Riser);
    match lead {
        Some(lead_end) => {
            let lead = plan.duct(connector.origin, lead_end, DuctRole::Lead);
            plan.attach(connector.id, DuctPort::start(lead));
            plan.elbow(DuctPort::end(lead), DuctPort::start(stub));
        }
        None => plan.attach(connector.id, DuctPort::start(stub)),
    }

    Ok((
        Riser {
            connector: connector.id,
            top,
        },
        index,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use addin_lite_geometry::BoundingBox;
    use approx::assert_relative_eq;

    fn connector(id: u64, origin: Point3<f64>, direction: Vector3<f64>) -> Connector {
        Connector {
            id,
            owner: id * 10,
            origin,
            direction,
            bounds: BoundingBox::new(
                origin - Vector3::new(0.5, 0.5, 0.5),
                origin + Vector3::new(0.5, 0.5, 0.0),
            ),
        }
    }

    fn request() -> RouteRequest {
        RouteRequest {
            equipment: connector(1, Point3::origin(), -Vector3::x()),
            terminals: [
                connector(2, Point3::new(-10.0, 5.0, 8.0), Vector3::z()),
                connector(3, Point3::new(-10.0, -5.0, 8.0), Vector3::z()),
            ],
        }
    }

    #[test]
    fn stubs_rise_to_common_height() {
        let risers = plan_risers(&request(), &RouterConfig::default()).unwrap();
        assert_relative_eq!(risers.stub_height, 22.0);
        assert_relative_eq!(risers.trunk_height, 23.0);
        assert!(risers.risers.iter().all(|r| r.top.z == 22.0));

        // Equipment: lead duct, elbow, then a stub two fittings out
        let equipment = risers.risers[0];
        assert_relative_eq!(equipment.top.x, -2.0);
        assert_relative_eq!(equipment.top.y, 0.0);
        let stub = risers.plan.ducts[risers.stubs[0]];
        assert_relative_eq!(stub.start.z, 1.0);
        assert_eq!(risers.plan.count_ducts(DuctRole::Lead), 1);
        assert_eq!(risers.plan.elbow_count(), 1);

        // Terminals rise straight up
        let terminal = risers.plan.ducts[risers.stubs[1]];
        assert_eq!(terminal.start, Point3::new(-10.0, 5.0, 8.0));
        assert_eq!(risers.plan.attachments.len(), 3);
    }

    #[test]
    fn tall_equipment_does_not_lift_the_stubs() {
        let mut req = request();
        req.equipment.bounds = BoundingBox::new(
            Point3::new(-1.0, -1.0, -0.5),
            Point3::new(1.0, 1.0, 30.0),
        );
        let risers = plan_risers(&req, &RouterConfig::default()).unwrap();
        assert_relative_eq!(risers.stub_height, 8.0 + 15.0 - 1.0);
        assert_relative_eq!(risers.trunk_height, 23.0);
    }

    #[test]
    fn downward_connector_is_rejected() {
        let mut req = request();
        req.terminals[1].direction = -Vector3::z();
        assert!(matches!(
            plan_risers(&req, &RouterConfig::default()),
            Err(Error::UnsupportedConnector(_))
        ));
    }

    #[test]
    fn inclined_connector_is_rejected() {
        let mut req = request();
        req.equipment.direction = Vector3::new(1.0, 0.0, 1.0);
        assert!(matches!(
            plan_risers(&req, &RouterConfig::default()),
            Err(Error::UnsupportedConnector(_))
        ));
    }

    #[test]
    fn zero_direction_is_degenerate() {
        let mut req = request();
        req.equipment.direction = Vector3::zeros();
        assert!(matches!(
            plan_risers(&req, &RouterConfig::default()),
            Err(Error::Geometry(_))
        ));
    }
}
