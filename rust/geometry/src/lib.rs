// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Addin-Lite Geometry
//!
//! Tolerance-aware vector helpers, a minimal planar B-rep and the swept
//! cross-section extractor shared by the reinforcement and routing crates.
//! Vector math is nalgebra.

pub mod bounds;
pub mod error;
pub mod line;
pub mod profile;
pub mod solid;
pub mod transform;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use bounds::BoundingBox;
pub use error::{Error, Result};
pub use line::Line;
pub use profile::{extract_cross_section, CrossSection};
pub use solid::{DrivingCurve, Face, Solid};
pub use transform::{placement_matrix, transform_point, transform_vector};
pub use vector::{
    compare_by_height, compare_points_by_height, is_equal, is_opposite_direction,
    is_perpendicular, is_same_direction, offset_point, points_equal, unit_vector,
    vectors_equal, TOLERANCE,
};
