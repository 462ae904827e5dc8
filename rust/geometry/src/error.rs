// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading host geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Degenerate vector: length is within tolerance of zero")]
    DegenerateVector,

    #[error("Swept profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    #[error("Invalid profile topology: {0}")]
    InvalidTopology(String),
}
