// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host seams for the reinforcement commands.
//!
//! The host application owns the element database, the options dialog and
//! rebar creation. Each of those is a trait here, and everything a command
//! needs is threaded through one [`HostContext`] instead of global state.

use addin_lite_geometry::{DrivingCurve, Solid};
use serde::{Deserialize, Serialize};

use crate::hook::HookOrientation;
use crate::layout::RebarGeometry;
use crate::options::{BeamRebarOptions, ColumnRebarOptions};

/// Host element identifier.
pub type ElementId = u64;

/// Identifier of a rebar element created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RebarId(pub u64);

/// Structural usage of a framing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralKind {
    Beam,
    Column,
    Other,
}

/// A rejection reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

/// Framing element selected by the user.
pub trait StructuralElement {
    fn id(&self) -> ElementId;

    fn kind(&self) -> StructuralKind;

    /// Solid geometry in world coordinates.
    fn solid(&self) -> Result<Solid, HostError>;

    /// Driving curve in world coordinates.
    fn driving_curve(&self) -> Result<DrivingCurve, HostError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarBarType {
    pub name: String,
    pub diameter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarHookType {
    pub name: String,
    /// Bend angle in degrees.
    pub angle: f64,
}

/// Rebar bar and hook types loaded in the document.
pub trait RebarCatalog {
    fn bar_types(&self) -> Vec<RebarBarType>;

    fn hook_types(&self) -> Vec<RebarHookType>;
}

/// Stand-in for the modal options dialog. `None` means the user cancelled.
pub trait OptionsProvider {
    fn beam_options(
        &mut self,
        bar_types: &[RebarBarType],
        hook_types: &[RebarHookType],
    ) -> Option<BeamRebarOptions>;

    fn column_options(
        &mut self,
        bar_types: &[RebarBarType],
        hook_types: &[RebarHookType],
    ) -> Option<ColumnRebarOptions>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebarStyle {
    Standard,
    StirrupTie,
}

/// A hook at one bar end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub hook_type: String,
    pub orientation: HookOrientation,
}

/// One rebar set to be created by the host, laid out as number-with-spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarRequest {
    pub host: ElementId,
    pub style: RebarStyle,
    pub bar_type: String,
    pub start_hook: Option<Hook>,
    pub end_hook: Option<Hook>,
    pub geometry: RebarGeometry,
}

/// Element creation interface for reinforcement.
pub trait RebarFactory {
    fn create_rebar(&mut self, request: &RebarRequest) -> Result<RebarId, HostError>;
}

/// Everything a reinforcement command borrows from the host for one run.
pub struct HostContext<'a> {
    pub catalog: &'a dyn RebarCatalog,
    pub options: &'a mut dyn OptionsProvider,
    pub factory: &'a mut dyn RebarFactory,
}

impl<'a> HostContext<'a> {
    pub fn new(
        catalog: &'a dyn RebarCatalog,
        options: &'a mut dyn OptionsProvider,
        factory: &'a mut dyn RebarFactory,
    ) -> Self {
        Self {
            catalog,
            options,
            factory,
        }
    }
}
