// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Addin-Lite Rebar
//!
//! Reinforcement layout for rectangular beams and columns. Planners turn a
//! [`CrossSection`](addin_lite_geometry::CrossSection) into bar groups, and
//! the [`FramReinMaker`] commands hand those groups to the host through the
//! traits in [`host`].
//!
//! ```rust,ignore
//! use addin_lite_rebar::{make_reinforcement, HostContext, ReinforcementConstants};
//!
//! let mut ctx = HostContext::new(&catalog, &mut dialog, &mut document);
//! let outcome = make_reinforcement(&beam, &mut ctx, &ReinforcementConstants::default())?;
//! ```

pub mod beam;
pub mod beam_maker;
pub mod column;
pub mod column_maker;
pub mod constants;
pub mod error;
pub mod hook;
pub mod host;
pub mod layout;
pub mod maker;
pub mod options;

pub use beam::BeamLayout;
pub use beam_maker::BeamFramReinMaker;
pub use column::{split_vertical_count, ColumnLayout, SideCounts};
pub use column_maker::ColumnFramReinMaker;
pub use constants::{BeamRebarConstants, ColumnRebarConstants, ReinforcementConstants};
pub use error::{Error, Result};
pub use hook::{hook_orientation, stirrup_hook_orientation, HookOrientation};
pub use host::{
    ElementId, Hook, HostContext, HostError, OptionsProvider, RebarBarType, RebarCatalog,
    RebarFactory, RebarHookType, RebarId, RebarRequest, RebarStyle, StructuralElement,
    StructuralKind,
};
pub use layout::{RebarGeometry, TopLocation, TransverseLocation, VerticalSide};
pub use maker::{make_reinforcement, Catalog, FramReinMaker, PlacementOutcome, Stage};
pub use options::{BeamRebarOptions, ColumnRebarOptions};
