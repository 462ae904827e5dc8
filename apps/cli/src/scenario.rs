// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON scenario files.

use std::path::Path;

use addin_lite_geometry::{DrivingCurve, Point3, Solid, Vector3};
use addin_lite_rebar::{
    BeamRebarOptions, ColumnRebarOptions, ElementId, HostError, RebarBarType, RebarCatalog,
    RebarHookType, ReinforcementConstants, StructuralElement, StructuralKind,
};
use addin_lite_routing::{RouteRequest, RouterConfig};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A framing element given as a prism: a profile swept along a vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedElement {
    pub id: ElementId,
    pub kind: StructuralKind,
    /// Profile corners in loop order.
    pub profile: Vec<Point3<f64>>,
    pub sweep: Vector3<f64>,
    pub driving: DrivingCurve,
}

impl StructuralElement for ScriptedElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> StructuralKind {
        self.kind
    }

    fn solid(&self) -> Result<Solid, HostError> {
        Solid::extruded(&self.profile, &self.sweep)
            .map_err(|e| HostError(format!("element {} has no usable solid: {e}", self.id)))
    }

    fn driving_curve(&self) -> Result<DrivingCurve, HostError> {
        Ok(self.driving)
    }
}

/// Rebar types loaded in the scripted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedCatalog {
    pub bar_types: Vec<RebarBarType>,
    pub hook_types: Vec<RebarHookType>,
}

impl RebarCatalog for ScriptedCatalog {
    fn bar_types(&self) -> Vec<RebarBarType> {
        self.bar_types.clone()
    }

    fn hook_types(&self) -> Vec<RebarHookType> {
        self.hook_types.clone()
    }
}

/// Input of the `beam`, `column` and `reinforce` commands.
///
/// Missing options for the element's kind play the user cancelling the
/// options dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberScenario {
    pub element: ScriptedElement,
    #[serde(default)]
    pub catalog: ScriptedCatalog,
    #[serde(default)]
    pub beam_options: Option<BeamRebarOptions>,
    #[serde(default)]
    pub column_options: Option<ColumnRebarOptions>,
    #[serde(default)]
    pub constants: ReinforcementConstants,
}

/// Input of the `route` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteScenario {
    pub request: RouteRequest,
    /// Router settings; `AUTOROUTE_*` environment variables when absent.
    #[serde(default)]
    pub router: Option<RouterConfig>,
}

/// Read and parse a scenario file.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid scenario {}", path.display()))
}

pub fn parse<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}
