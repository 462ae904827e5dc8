// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Duct network router.
//!
//! Routing one equipment outlet to two terminals:
//!
//! 1. plan and emit a vertical stub per connector (host rejection is fatal)
//! 2. walk the ordered [`strategies`], planning each trunk as a value
//! 3. skip infeasible trunks and trunks the host rejects
//! 4. commit the first trunk the host accepts
//! 5. with every strategy exhausted, apply the [`LastResort`] policy

use serde::{Deserialize, Serialize};

use crate::config::{LastResort, RouterConfig};
use crate::connector::{ElementId, RouteRequest};
use crate::error::{Error, Result};
use crate::host::{emit, DuctNetworkBuilder, EmittedPlan};
use crate::riser::{plan_risers, RiserPlan};
use crate::strategy::{candidate_coordinates, last_resort, strategies, Strategy};
use crate::trace::TraceLog;
use crate::trunk::Axis;

/// The committed duct network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOutcome {
    pub strategy: Strategy,
    pub stub_height: f64,
    pub trunk_height: f64,
    /// Riser ducts first, then the trunk network.
    pub ducts: Vec<ElementId>,
    pub fittings: Vec<ElementId>,
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn route(
        &self,
        request: &RouteRequest,
        builder: &mut dyn DuctNetworkBuilder,
    ) -> Result<RouteOutcome> {
        let config = &self.config;
        let mut trace = TraceLog::open(config.trace_path.as_deref());

        let bounds = request.bounds();
        trace.line(format_args!(
            "bounds min ({:.3}, {:.3}, {:.3}) max ({:.3}, {:.3}, {:.3})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        ));
        tracing::info!(
            equipment = request.equipment.id,
            terminals = ?[request.terminals[0].id, request.terminals[1].id],
            "Routing duct network"
        );

        let risers = plan_risers(request, config)?;
        trace.line(format_args!(
            "stub height {:.3}, trunk height {:.3}",
            risers.stub_height, risers.trunk_height
        ));
        for riser in &risers.risers {
            trace.line(format_args!(
                "riser connector {} at ({:.3}, {:.3})",
                riser.connector, riser.top.x, riser.top.y
            ));
        }

        let network = emit(&risers.plan, &[], builder)?;
        let stub_ids: Vec<ElementId> = risers.stubs.iter().map(|&i| network.ducts[i]).collect();

        for axis in [Axis::X, Axis::Y] {
            let [mid, low, high] = candidate_coordinates(&bounds, axis);
            trace.line(format_args!(
                "{axis:?} trunk candidates {mid:.3}, {low:.3}, {high:.3}"
            ));
        }

        for strategy in strategies(&bounds, config) {
            let plan = match strategy.plan(&risers.risers, risers.trunk_height, config) {
                Ok(plan) => plan,
                Err(reason) => {
                    trace.line(format_args!("{strategy}: infeasible, {reason}"));
                    tracing::debug!(%strategy, %reason, "Strategy infeasible");
                    continue;
                }
            };
            match emit(&plan, &stub_ids, builder) {
                Ok(trunk) => {
                    trace.line(format_args!("{strategy}: committed"));
                    return Ok(finish(strategy, &risers, network, trunk));
                }
                Err(e) => {
                    trace.line(format_args!("{strategy}: rejected by host, {e}"));
                    tracing::debug!(%strategy, error = %e, "Host rejected strategy");
                }
            }
        }

        match config.last_resort {
            LastResort::Fail => {
                trace.line(format_args!("no feasible strategy"));
                tracing::warn!("No feasible duct route");
                Err(Error::NoFeasibleRoute)
            }
            LastResort::EmitUnchecked => {
                let strategy = last_resort(&bounds);
                tracing::warn!(%strategy, "No feasible duct route, emitting unchecked trunk");
                let plan = strategy
                    .plan(&risers.risers, risers.trunk_height, config)
                    .map_err(|reason| {
                        trace.line(format_args!("{strategy}: cannot be built, {reason}"));
                        Error::NoFeasibleRoute
                    })?;
                let trunk = emit(&plan, &stub_ids, builder).map_err(|e| {
                    trace.line(format_args!("{strategy}: rejected by host, {e}"));
                    Error::Host(e)
                })?;
                trace.line(format_args!("{strategy}: committed"));
                Ok(finish(strategy, &risers, network, trunk))
            }
        }
    }
}

fn finish(
    strategy: Strategy,
    risers: &RiserPlan,
    mut network: EmittedPlan,
    trunk: EmittedPlan,
) -> RouteOutcome {
    network.extend(trunk);
    tracing::info!(
        %strategy,
        ducts = network.ducts.len(),
        fittings = network.fittings.len(),
        "Duct network committed"
    );
    RouteOutcome {
        strategy,
        stub_height: risers.stub_height,
        trunk_height: risers.trunk_height,
        ducts: network.ducts,
        fittings: network.fittings,
    }
}
