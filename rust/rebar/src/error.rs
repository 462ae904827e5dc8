// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for reinforcement layout and placement.

use crate::host::HostError;
use crate::StructuralKind;

/// Result type alias for reinforcement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a reinforcement command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host solid could not be reduced to a rectangular cross-section.
    #[error(transparent)]
    Geometry(#[from] addin_lite_geometry::Error),

    /// A planner was given the wrong kind of framing element.
    #[error("{planner} can only be used for {expected:?} elements, got {actual:?}")]
    WrongStructuralType {
        planner: &'static str,
        expected: StructuralKind,
        actual: StructuralKind,
    },

    /// The element is neither a beam nor a column.
    #[error("element {0} is not a structural beam or column ({1:?})")]
    NotFraming(u64, StructuralKind),

    /// A computed bar group has no length left.
    #[error("{0} group collapsed: computed length {1:.4} is not positive")]
    CollapsedGeometry(&'static str, f64),

    /// Bar count or spacing out of range.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// User options failed validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// No hook orientation matched after a full rotation.
    #[error("can't find the hook orientation for the requested hook direction")]
    HookOrientationUndetermined,

    #[error("rebar bar type not found: {0}")]
    UnknownBarType(String),

    #[error("rebar hook type not found: {0}")]
    UnknownHookType(String),

    /// The host rejected a creation call.
    #[error("host rejected rebar creation: {0}")]
    Host(#[from] HostError),
}
