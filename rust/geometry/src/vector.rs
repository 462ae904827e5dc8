// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerance-aware vector and point helpers
//!
//! Host geometry arrives in feet with accumulated floating point noise, so
//! every comparison in the layout code goes through [`TOLERANCE`].

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};
use std::cmp::Ordering;

/// Absolute tolerance used for all geometric comparisons
pub const TOLERANCE: f64 = 1e-5;

/// Scalar equality within [`TOLERANCE`]
#[inline]
pub fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Component-wise point equality within [`TOLERANCE`]
#[inline]
pub fn points_equal(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    is_equal(a.x, b.x) && is_equal(a.y, b.y) && is_equal(a.z, b.z)
}

/// Component-wise vector equality within [`TOLERANCE`]
#[inline]
pub fn vectors_equal(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    is_equal(a.x, b.x) && is_equal(a.y, b.y) && is_equal(a.z, b.z)
}

/// Normalize a vector, failing on zero length
#[inline]
pub fn unit_vector(v: &Vector3<f64>) -> Result<Vector3<f64>> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(Error::DegenerateVector);
    }
    Ok(v / len)
}

/// True if both vectors point the same way (after normalization)
pub fn is_same_direction(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    match (unit_vector(a), unit_vector(b)) {
        (Ok(ua), Ok(ub)) => vectors_equal(&ua, &ub),
        _ => false,
    }
}

/// True if the vectors are parallel but point opposite ways
pub fn is_opposite_direction(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    match (unit_vector(a), unit_vector(b)) {
        (Ok(ua), Ok(ub)) => vectors_equal(&ua, &(-ub)),
        _ => false,
    }
}

/// True if the vectors are perpendicular (dot product of unit vectors ~ 0)
pub fn is_perpendicular(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    match (unit_vector(a), unit_vector(b)) {
        (Ok(ua), Ok(ub)) => is_equal(ua.dot(&ub), 0.0),
        _ => false,
    }
}

/// Move `point` by `distance` along `direction`
///
/// The direction does not need to be normalized; a zero direction is an error.
#[inline]
pub fn offset_point(
    point: &Point3<f64>,
    direction: &Vector3<f64>,
    distance: f64,
) -> Result<Point3<f64>> {
    let unit = unit_vector(direction)?;
    Ok(point + unit * distance)
}

/// Composite ordering by Z, then Y, then X (ascending, tolerance-aware)
///
/// Gives the swept profile a deterministic corner order: the first two
/// points are the lowest ones, and ties are broken by Y then X.
pub fn compare_by_height(a: &Vector3<f64>, b: &Vector3<f64>) -> Ordering {
    for (lhs, rhs) in [(a.z, b.z), (a.y, b.y), (a.x, b.x)] {
        if !is_equal(lhs, rhs) {
            return lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal);
        }
    }
    Ordering::Equal
}

/// [`compare_by_height`] for points
#[inline]
pub fn compare_points_by_height(a: &Point3<f64>, b: &Point3<f64>) -> Ordering {
    compare_by_height(&a.coords, &b.coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_vector_rejects_zero_length() {
        assert_eq!(
            unit_vector(&Vector3::new(0.0, 1e-7, 0.0)),
            Err(Error::DegenerateVector)
        );
        let u = unit_vector(&Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(u.x, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn direction_predicates() {
        let x = Vector3::new(2.0, 0.0, 0.0);
        assert!(is_same_direction(&x, &Vector3::new(0.5, 0.0, 0.0)));
        assert!(is_opposite_direction(&x, &Vector3::new(-7.0, 0.0, 0.0)));
        assert!(!is_same_direction(&x, &Vector3::new(-1.0, 0.0, 0.0)));
        assert!(is_perpendicular(&x, &Vector3::new(0.0, 3.0, 1.0)));
        assert!(!is_perpendicular(&x, &Vector3::new(1.0, 1.0, 0.0)));
        // Zero vectors never match anything
        assert!(!is_same_direction(&Vector3::zeros(), &x));
    }

    #[test]
    fn offset_point_normalizes_direction() {
        let p = offset_point(&Point3::new(1.0, 1.0, 1.0), &Vector3::new(0.0, 0.0, 10.0), 2.5)
            .unwrap();
        assert!(points_equal(&p, &Point3::new(1.0, 1.0, 3.5)));
        assert!(offset_point(&p, &Vector3::zeros(), 1.0).is_err());
    }

    #[test]
    fn height_ordering_is_z_then_y_then_x() {
        let mut points = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        points.sort_by(compare_points_by_height);
        assert_eq!(points[0], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(points[1], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(points[2], Point3::new(0.0, 0.0, 1.0));
        assert_eq!(points[3], Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn height_ordering_ignores_noise_below_tolerance() {
        let a = Vector3::new(5.0, 0.0, 1.0);
        let b = Vector3::new(0.0, 0.0, 1.0 + 1e-7);
        // Z differs only by noise, so X decides
        assert_eq!(compare_by_height(&a, &b), Ordering::Greater);
    }
}
