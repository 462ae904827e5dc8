// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::host::HostError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a routing command.
///
/// A strategy that merely doesn't fit is an
/// [`Infeasibility`](crate::Infeasibility), not an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] addin_lite_geometry::Error),

    #[error("unsupported connector: {0}")]
    UnsupportedConnector(String),

    #[error("host rejected duct network: {0}")]
    Host(#[from] HostError),

    #[error("no routing strategy produced a feasible duct network")]
    NoFeasibleRoute,

    #[error("trace log: {0}")]
    Trace(#[from] std::io::Error),
}
