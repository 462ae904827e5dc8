// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host element creation and plan emission.

use addin_lite_geometry::Point3;
use serde::{Deserialize, Serialize};

use crate::connector::{ConnectorId, ElementId};
use crate::plan::{DuctEnd, DuctPort, DuctRef, FittingPlan, RoutingPlan};

/// A rejection reported by the host, such as a duct too short to carry its
/// fittings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

/// One end of a duct that exists in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostPort {
    pub duct: ElementId,
    pub end: DuctEnd,
}

/// Duct and fitting creation interface of the host.
pub trait DuctNetworkBuilder {
    fn create_duct(&mut self, start: &Point3<f64>, end: &Point3<f64>)
        -> Result<ElementId, HostError>;

    /// Connect an existing equipment or terminal connector to a duct end.
    fn attach(&mut self, connector: ConnectorId, port: HostPort) -> Result<(), HostError>;

    fn create_elbow(&mut self, ports: [HostPort; 2]) -> Result<ElementId, HostError>;

    fn create_tee(&mut self, run: [HostPort; 2], branch: HostPort)
        -> Result<ElementId, HostError>;

    /// Remove elements created earlier in this command.
    fn delete(&mut self, elements: &[ElementId]);
}

/// Element ids created for one plan, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedPlan {
    pub ducts: Vec<ElementId>,
    pub fittings: Vec<ElementId>,
}

impl EmittedPlan {
    pub fn extend(&mut self, other: EmittedPlan) {
        self.ducts.extend(other.ducts);
        self.fittings.extend(other.fittings);
    }
}

/// Create a plan's ducts, connector attachments and fittings.
///
/// `risers` holds the element ids of stubs emitted earlier, indexed as
/// [`DuctRef::Riser`]. On rejection every element created for this plan is
/// deleted again before the error is returned.
pub fn emit(
    plan: &RoutingPlan,
    risers: &[ElementId],
    builder: &mut dyn DuctNetworkBuilder,
) -> Result<EmittedPlan, HostError> {
    let mut emitted = EmittedPlan::default();
    match emit_into(plan, risers, builder, &mut emitted) {
        Ok(()) => Ok(emitted),
        Err(err) => {
            let created: Vec<ElementId> = emitted
                .fittings
                .iter()
                .chain(emitted.ducts.iter())
                .copied()
                .collect();
            tracing::debug!(deleted = created.len(), error = %err, "Rolling back rejected plan");
            if !created.is_empty() {
                builder.delete(&created);
            }
            Err(err)
        }
    }
}

fn emit_into(
    plan: &RoutingPlan,
    risers: &[ElementId],
    builder: &mut dyn DuctNetworkBuilder,
    emitted: &mut EmittedPlan,
) -> Result<(), HostError> {
    for duct in &plan.ducts {
        let id = builder.create_duct(&duct.start, &duct.end)?;
        emitted.ducts.push(id);
    }

    let resolve = |port: &DuctPort, ducts: &[ElementId]| -> Result<HostPort, HostError> {
        let id = match port.duct {
            DuctRef::Planned(i) => ducts.get(i),
            DuctRef::Riser(i) => risers.get(i),
        };
        id.map(|&duct| HostPort {
            duct,
            end: port.end,
        })
        .ok_or_else(|| HostError(format!("plan references a missing duct {:?}", port.duct)))
    };

    for (connector, port) in &plan.attachments {
        let port = resolve(port, &emitted.ducts)?;
        builder.attach(*connector, port)?;
    }

    for fitting in &plan.fittings {
        let id = match fitting {
            FittingPlan::Elbow { ports } => builder.create_elbow([
                resolve(&ports[0], &emitted.ducts)?,
                resolve(&ports[1], &emitted.ducts)?,
            ])?,
            FittingPlan::Tee { run, branch } => builder.create_tee(
                [
                    resolve(&run[0], &emitted.ducts)?,
                    resolve(&run[1], &emitted.ducts)?,
                ],
                resolve(branch, &emitted.ducts)?,
            )?,
        };
        emitted.fittings.push(id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DuctRole;

    #[derive(Default)]
    struct Recorder {
        next: ElementId,
        live: Vec<ElementId>,
        reject_tees: bool,
    }

    impl Recorder {
        fn create(&mut self) -> ElementId {
            self.next += 1;
            self.live.push(self.next);
            self.next
        }
    }

    impl DuctNetworkBuilder for Recorder {
        fn create_duct(&mut self, _: &Point3<f64>, _: &Point3<f64>) -> Result<ElementId, HostError> {
            Ok(self.create())
        }

        fn attach(&mut self, _: ConnectorId, _: HostPort) -> Result<(), HostError> {
            Ok(())
        }

        fn create_elbow(&mut self, _: [HostPort; 2]) -> Result<ElementId, HostError> {
            Ok(self.create())
        }

        fn create_tee(&mut self, _: [HostPort; 2], _: HostPort) -> Result<ElementId, HostError> {
            if self.reject_tees {
                return Err(HostError("tee does not fit".into()));
            }
            Ok(self.create())
        }

        fn delete(&mut self, elements: &[ElementId]) {
            self.live.retain(|id| !elements.contains(id));
        }
    }

    fn plan() -> RoutingPlan {
        let mut plan = RoutingPlan::new();
        let a = plan.duct(Point3::origin(), Point3::new(4.0, 0.0, 0.0), DuctRole::Trunk);
        let b = plan.duct(Point3::new(5.0, 1.0, 0.0), Point3::new(5.0, 4.0, 0.0), DuctRole::Branch);
        plan.elbow(DuctPort::end(DuctRef::Riser(0)), DuctPort::start(b));
        plan.tee(
            [DuctPort::end(a), DuctPort::start(DuctRef::Riser(1))],
            DuctPort::end(b),
        );
        plan
    }

    #[test]
    fn emits_ducts_then_fittings() {
        let mut host = Recorder {
            next: 100,
            ..Recorder::default()
        };
        let emitted = emit(&plan(), &[7, 8], &mut host).unwrap();
        assert_eq!(emitted.ducts, vec![101, 102]);
        assert_eq!(emitted.fittings, vec![103, 104]);
    }

    #[test]
    fn rejection_removes_partial_plan() {
        let mut host = Recorder {
            reject_tees: true,
            ..Recorder::default()
        };
        let err = emit(&plan(), &[7, 8], &mut host).unwrap_err();
        assert_eq!(err, HostError("tee does not fit".into()));
        assert!(host.live.is_empty());
    }

    #[test]
    fn missing_riser_is_rejected() {
        let mut host = Recorder::default();
        assert!(emit(&plan(), &[7], &mut host).is_err());
        assert!(host.live.is_empty());
    }
}
