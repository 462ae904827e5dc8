// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Affine transforms for host instance placement
//!
//! Family instances report their geometry in a local frame together with a
//! placement transform. The layout code works in world coordinates, so
//! solids and driving curves are moved through these helpers first.

use crate::error::Result;
use crate::line::Line;
use crate::vector::unit_vector;
use nalgebra::{Matrix4, Point3, Vector3};

/// Apply an affine transform to a point
#[inline]
pub fn transform_point(transform: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
    transform.transform_point(point)
}

/// Apply the linear part of an affine transform to a direction
#[inline]
pub fn transform_vector(transform: &Matrix4<f64>, vector: &Vector3<f64>) -> Vector3<f64> {
    transform.transform_vector(vector)
}

/// Build a local-to-world placement from an origin, a Z axis and a reference X axis
///
/// The X axis is projected onto the plane perpendicular to Z so callers can
/// pass a loosely specified reference direction.
pub fn placement_matrix(
    origin: &Point3<f64>,
    z_axis: &Vector3<f64>,
    ref_direction: &Vector3<f64>,
) -> Result<Matrix4<f64>> {
    let z_axis = unit_vector(z_axis)?;
    let x_hint = unit_vector(ref_direction)?;

    let x_orthogonal = x_hint - z_axis * x_hint.dot(&z_axis);
    let x_axis = if x_orthogonal.norm() > 1e-6 {
        x_orthogonal.normalize()
    } else if z_axis.z.abs() < 0.9 {
        // Reference direction parallel to Z - pick any perpendicular
        Vector3::new(0.0, 0.0, 1.0).cross(&z_axis).normalize()
    } else {
        Vector3::new(1.0, 0.0, 0.0).cross(&z_axis).normalize()
    };
    let y_axis = z_axis.cross(&x_axis).normalize();

    #[rustfmt::skip]
    let matrix = Matrix4::new(
        x_axis.x, y_axis.x, z_axis.x, origin.x,
        x_axis.y, y_axis.y, z_axis.y, origin.y,
        x_axis.z, y_axis.z, z_axis.z, origin.z,
        0.0,      0.0,      0.0,      1.0,
    );
    Ok(matrix)
}

impl Line {
    /// Copy of this line with both endpoints transformed
    pub fn transformed(&self, transform: &Matrix4<f64>) -> Line {
        Line::new(
            transform_point(transform, &self.start),
            transform_point(transform, &self.end),
        )
    }
}
