// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host document for scripted commands.
//!
//! Records every element creation call and rejects what a real document
//! would: ducts shorter than the minimum, fittings whose ports do not meet at
//! one center, connectors attached away from their duct end.

use addin_lite_geometry::{points_equal, Point3, TOLERANCE};
use addin_lite_rebar::{
    BeamRebarOptions, ColumnRebarOptions, HostContext, OptionsProvider, RebarBarType,
    RebarFactory, RebarHookType, RebarId, RebarRequest,
};
use addin_lite_routing::{
    ConnectorId, DuctEnd, DuctNetworkBuilder, DuctRole, DuctRun, ElementId, HostError, HostPort,
    RouteRequest, RouterConfig,
};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::scenario::{MemberScenario, ScriptedCatalog};

/// One call made into the scripted document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCall {
    CreateRebar {
        id: RebarId,
        request: RebarRequest,
    },
    CreateDuct {
        id: ElementId,
        start: Point3<f64>,
        end: Point3<f64>,
    },
    Attach {
        connector: ConnectorId,
        port: HostPort,
    },
    CreateElbow {
        id: ElementId,
        ports: [HostPort; 2],
    },
    CreateTee {
        id: ElementId,
        run: [HostPort; 2],
        branch: HostPort,
    },
    Delete {
        elements: Vec<ElementId>,
    },
    Rejected {
        call: &'static str,
        reason: String,
    },
}

/// Geometric rules the document enforces on ducts and fittings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuctRules {
    pub min_duct_length: f64,
    pub fitting_length: f64,
}

impl Default for DuctRules {
    /// Only zero-length ducts are rejected.
    fn default() -> Self {
        Self {
            min_duct_length: TOLERANCE,
            fitting_length: 0.0,
        }
    }
}

impl From<&RouterConfig> for DuctRules {
    fn from(config: &RouterConfig) -> Self {
        Self {
            min_duct_length: config.min_duct_length.max(TOLERANCE),
            fitting_length: config.min_fitting_length,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub rebars: usize,
    pub ducts: usize,
    pub fittings: usize,
}

/// Element store of the scripted host.
#[derive(Debug, Default)]
pub struct Document {
    rules: DuctRules,
    next_id: u64,
    calls: Vec<HostCall>,
    connectors: FxHashMap<ConnectorId, Point3<f64>>,
    ducts: FxHashMap<ElementId, DuctRun>,
    fittings: FxHashMap<ElementId, Vec<ElementId>>,
    rebars: usize,
}

impl Document {
    pub fn new(rules: DuctRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Document holding the connectors of a routing request.
    pub fn for_route(request: &RouteRequest, rules: DuctRules) -> Self {
        let mut document = Self::new(rules);
        for connector in request.connectors() {
            document.connectors.insert(connector.id, connector.origin);
        }
        document
    }

    #[cfg(test)]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<HostCall> {
        self.calls
    }

    /// Elements currently in the document.
    pub fn counts(&self) -> ElementCounts {
        ElementCounts {
            rebars: self.rebars,
            ducts: self.ducts.len(),
            fittings: self.fittings.len(),
        }
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Record a refused call, handing the reason back for the error.
    fn reject(&mut self, call: &'static str, reason: String) -> String {
        tracing::debug!(call, %reason, "Host rejected call");
        self.calls.push(HostCall::Rejected {
            call,
            reason: reason.clone(),
        });
        reason
    }

    fn duct(&self, port: &HostPort) -> Option<&DuctRun> {
        self.ducts.get(&port.duct)
    }

    /// Center shared by every port of a fitting, if they agree.
    fn fitting_center(&self, ports: &[HostPort]) -> Result<Point3<f64>, String> {
        let mut center: Option<Point3<f64>> = None;
        for port in ports {
            let duct = self
                .duct(port)
                .ok_or_else(|| format!("duct {} does not exist", port.duct))?;
            let c = duct
                .fitting_center(port.end, self.rules.fitting_length)
                .ok_or_else(|| format!("duct {} has no direction", port.duct))?;
            match center {
                Some(existing) if !points_equal(&existing, &c) => {
                    return Err(format!(
                        "fitting ports do not meet: ({:.3}, {:.3}, {:.3}) vs ({:.3}, {:.3}, {:.3})",
                        existing.x, existing.y, existing.z, c.x, c.y, c.z
                    ));
                }
                Some(_) => {}
                None => center = Some(c),
            }
        }
        center.ok_or_else(|| "fitting without ports".to_string())
    }

    fn create_fitting(
        &mut self,
        call: &'static str,
        ports: &[HostPort],
    ) -> Result<ElementId, HostError> {
        if let Err(reason) = self.fitting_center(ports) {
            return Err(HostError(self.reject(call, reason)));
        }
        let id = self.allocate();
        self.fittings.insert(id, ports.iter().map(|p| p.duct).collect());
        Ok(id)
    }
}

impl RebarFactory for Document {
    fn create_rebar(
        &mut self,
        request: &RebarRequest,
    ) -> Result<RebarId, addin_lite_rebar::HostError> {
        if let Some(curve) = request.geometry.curves.iter().find(|c| c.length() < TOLERANCE) {
            let reason = format!(
                "zero-length bar at ({:.3}, {:.3}, {:.3})",
                curve.start.x, curve.start.y, curve.start.z
            );
            return Err(addin_lite_rebar::HostError(self.reject("create_rebar", reason)));
        }
        let id = RebarId(self.allocate());
        self.rebars += 1;
        self.calls.push(HostCall::CreateRebar {
            id,
            request: request.clone(),
        });
        Ok(id)
    }
}

impl DuctNetworkBuilder for Document {
    fn create_duct(
        &mut self,
        start: &Point3<f64>,
        end: &Point3<f64>,
    ) -> Result<ElementId, HostError> {
        let duct = DuctRun {
            start: *start,
            end: *end,
            role: DuctRole::Trunk,
        };
        let length = duct.length();
        if length < self.rules.min_duct_length - 1e-9 {
            let reason = self.reject("create_duct", format!("duct too short: {length:.3}"));
            return Err(HostError(reason));
        }
        let id = self.allocate();
        self.ducts.insert(id, duct);
        self.calls.push(HostCall::CreateDuct {
            id,
            start: *start,
            end: *end,
        });
        Ok(id)
    }

    fn attach(&mut self, connector: ConnectorId, port: HostPort) -> Result<(), HostError> {
        let at = self.duct(&port).map(|duct| match port.end {
            DuctEnd::Start => duct.start,
            DuctEnd::End => duct.end,
        });
        let origin = self.connectors.get(&connector).copied();
        let reason = match (origin, at) {
            (Some(origin), Some(at)) if points_equal(&origin, &at) => {
                self.calls.push(HostCall::Attach { connector, port });
                return Ok(());
            }
            (None, _) => format!("unknown connector {connector}"),
            _ => format!("connector {connector} is not at the end of duct {}", port.duct),
        };
        Err(HostError(self.reject("attach", reason)))
    }

    fn create_elbow(&mut self, ports: [HostPort; 2]) -> Result<ElementId, HostError> {
        let id = self.create_fitting("create_elbow", &ports)?;
        self.calls.push(HostCall::CreateElbow { id, ports });
        Ok(id)
    }

    fn create_tee(&mut self, run: [HostPort; 2], branch: HostPort) -> Result<ElementId, HostError> {
        let id = self.create_fitting("create_tee", &[run[0], run[1], branch])?;
        self.calls.push(HostCall::CreateTee { id, run, branch });
        Ok(id)
    }

    fn delete(&mut self, elements: &[ElementId]) {
        for id in elements {
            self.ducts.remove(id);
            self.fittings.remove(id);
        }
        self.calls.push(HostCall::Delete {
            elements: elements.to_vec(),
        });
    }
}

/// Options dialog answered from the scenario file.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialog {
    pub beam: Option<BeamRebarOptions>,
    pub column: Option<ColumnRebarOptions>,
}

impl OptionsProvider for ScriptedDialog {
    fn beam_options(
        &mut self,
        bar_types: &[RebarBarType],
        hook_types: &[RebarHookType],
    ) -> Option<BeamRebarOptions> {
        tracing::debug!(
            bar_types = bar_types.len(),
            hook_types = hook_types.len(),
            answered = self.beam.is_some(),
            "Beam options dialog"
        );
        self.beam.clone()
    }

    fn column_options(
        &mut self,
        bar_types: &[RebarBarType],
        hook_types: &[RebarHookType],
    ) -> Option<ColumnRebarOptions> {
        tracing::debug!(
            bar_types = bar_types.len(),
            hook_types = hook_types.len(),
            answered = self.column.is_some(),
            "Column options dialog"
        );
        self.column.clone()
    }
}

/// Host for the reinforcement commands.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub catalog: ScriptedCatalog,
    pub dialog: ScriptedDialog,
    pub document: Document,
}

impl ScriptedHost {
    pub fn for_member(scenario: &MemberScenario) -> Self {
        Self {
            catalog: scenario.catalog.clone(),
            dialog: ScriptedDialog {
                beam: scenario.beam_options.clone(),
                column: scenario.column_options.clone(),
            },
            document: Document::default(),
        }
    }

    pub fn context(&mut self) -> HostContext<'_> {
        HostContext::new(&self.catalog, &mut self.dialog, &mut self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(duct: ElementId, end: DuctEnd) -> HostPort {
        HostPort { duct, end }
    }

    fn document() -> Document {
        Document::new(DuctRules {
            min_duct_length: 1.0,
            fitting_length: 1.0,
        })
    }

    #[test]
    fn short_and_zero_ducts_are_rejected() {
        let mut doc = document();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(doc.create_duct(&p, &p).is_err());
        assert!(doc.create_duct(&p, &Point3::new(1.5, 2.0, 3.0)).is_err());
        assert!(doc.create_duct(&p, &Point3::new(2.0, 2.0, 3.0)).is_ok());
        assert_eq!(doc.counts().ducts, 1);
        assert!(matches!(doc.calls()[0], HostCall::Rejected { call: "create_duct", .. }));
    }

    #[test]
    fn rejected_calls_serialize_with_their_call_name() {
        let mut doc = document();
        let p = Point3::origin();
        assert!(doc.create_duct(&p, &p).is_err());
        let json = serde_json::to_value(&doc.calls()[0]).unwrap();
        assert_eq!(json["type"], "rejected");
        assert_eq!(json["call"], "create_duct");
        assert_eq!(json["reason"], "duct too short: 0.000");

        let id = doc.create_duct(&p, &Point3::new(2.0, 0.0, 0.0)).unwrap();
        let json = serde_json::to_value(&doc.calls()[1]).unwrap();
        assert_eq!(json["type"], "create_duct");
        assert_eq!(json["id"], id);
    }

    #[test]
    fn elbow_ports_must_meet() {
        let mut doc = document();
        // Two ducts ending one fitting length short of (5, 0, 0)
        let a = doc
            .create_duct(&Point3::origin(), &Point3::new(4.0, 0.0, 0.0))
            .unwrap();
        let b = doc
            .create_duct(&Point3::new(5.0, 1.0, 0.0), &Point3::new(5.0, 4.0, 0.0))
            .unwrap();
        assert!(doc
            .create_elbow([port(a, DuctEnd::End), port(b, DuctEnd::End)])
            .is_err());
        assert!(doc
            .create_elbow([port(a, DuctEnd::End), port(b, DuctEnd::Start)])
            .is_ok());
        assert_eq!(doc.counts().fittings, 1);
    }

    #[test]
    fn attach_checks_connector_position() {
        let request: crate::scenario::RouteScenario =
            crate::scenario::parse(include_str!("../scenarios/route.json")).unwrap();
        let mut doc = Document::for_route(&request.request, DuctRules::default());
        let origin = request.request.equipment.origin;
        let duct = doc
            .create_duct(&origin, &(origin + request.request.equipment.direction))
            .unwrap();
        let id = request.request.equipment.id;
        assert!(doc.attach(id, port(duct, DuctEnd::Start)).is_ok());
        assert!(doc.attach(id, port(duct, DuctEnd::End)).is_err());
        assert!(doc.attach(999, port(duct, DuctEnd::Start)).is_err());
    }

    #[test]
    fn delete_removes_elements() {
        let mut doc = document();
        let a = doc
            .create_duct(&Point3::origin(), &Point3::new(3.0, 0.0, 0.0))
            .unwrap();
        doc.delete(&[a]);
        assert_eq!(doc.counts().ducts, 0);
        assert_eq!(doc.calls().last(), Some(&HostCall::Delete { elements: vec![a] }));
    }
}
