// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connector inputs read from the host document.

use addin_lite_geometry::{BoundingBox, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Host element identifier (equipment, terminals, ducts and fittings).
pub type ElementId = u64;

/// Host connector identifier.
pub type ConnectorId = u64;

/// A duct connector on a piece of equipment or an air terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ConnectorId,
    /// Element that owns the connector.
    pub owner: ElementId,
    pub origin: Point3<f64>,
    /// Outward facing direction of the connector.
    pub direction: Vector3<f64>,
    /// Bounding box of the owner element.
    pub bounds: BoundingBox,
}

/// One equipment outlet feeding two terminals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub equipment: Connector,
    pub terminals: [Connector; 2],
}

impl RouteRequest {
    /// Equipment first, then the terminals in request order.
    pub fn connectors(&self) -> [&Connector; 3] {
        [&self.equipment, &self.terminals[0], &self.terminals[1]]
    }

    /// Union of the owners' bounding boxes.
    pub fn bounds(&self) -> BoundingBox {
        self.terminals
            .iter()
            .fold(self.equipment.bounds, |acc, t| acc.union(&t.bounds))
    }

    /// Highest point of the terminals' owners. The equipment is left out so a
    /// tall unit does not lift the whole network.
    pub fn terminal_top(&self) -> f64 {
        self.terminals[0].bounds.max.z.max(self.terminals[1].bounds.max.z)
    }
}
