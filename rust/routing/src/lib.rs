// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Addin-Lite Routing
//!
//! Routes a duct network from one equipment outlet to two terminals: a
//! vertical stub per connector, a horizontal trunk joining the stub tops, and
//! elbows or tees wherever ducts meet. Trunk placements are tried in a fixed
//! order and planned as plain values; only the chosen one is sent to the host
//! through [`DuctNetworkBuilder`].
//!
//! ```rust,ignore
//! use addin_lite_routing::{Router, RouterConfig};
//!
//! let router = Router::new(RouterConfig::from_env());
//! let outcome = router.route(&request, &mut document)?;
//! println!("{}", outcome.strategy);
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod host;
pub mod plan;
pub mod riser;
pub mod router;
pub mod strategy;
pub mod trace;
pub mod trunk;

pub use config::{LastResort, RouterConfig};
pub use connector::{Connector, ConnectorId, ElementId, RouteRequest};
pub use error::{Error, Result};
pub use host::{emit, DuctNetworkBuilder, EmittedPlan, HostError, HostPort};
pub use plan::{DuctEnd, DuctPort, DuctRef, DuctRole, DuctRun, FittingPlan, RoutingPlan};
pub use riser::{plan_risers, stub_height, Riser, RiserPlan};
pub use router::{RouteOutcome, Router};
pub use strategy::{
    candidate_coordinates, first_feasible, last_resort, strategies, Strategy, StrategyKind,
};
pub use trace::TraceLog;
pub use trunk::{check_trunk, plan_trunk, plan_trunk_unchecked, Axis, Infeasibility};
