// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded line segments

use crate::error::Result;
use crate::vector::{points_equal, unit_vector};
use nalgebra::{Point3, Vector3};

/// Ordered pair of points (start, end)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line {
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Unnormalized direction (end - start)
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Normalized direction; fails for zero-length segments
    #[inline]
    pub fn unit_direction(&self) -> Result<Vector3<f64>> {
        unit_vector(&self.direction())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Same segment traversed end to start
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// True if `point` is one of the two endpoints
    pub fn has_endpoint(&self, point: &Point3<f64>) -> bool {
        points_equal(&self.start, point) || points_equal(&self.end, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn length_and_direction() {
        let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(line.length(), 5.0);
        let dir = line.unit_direction().unwrap();
        assert_relative_eq!(dir.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(dir.y, 0.8, epsilon = 1e-12);
        assert_eq!(line.reversed().start, line.end);
        assert_eq!(line.midpoint(), Point3::new(1.5, 2.0, 0.0));
    }

    #[test]
    fn zero_length_line_has_no_direction() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(Line::new(p, p).unit_direction().is_err());
    }
}
