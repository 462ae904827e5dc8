// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Swept profile (cross-section) extraction
//!
//! Beams and columns are prismatic: a planar profile swept along a straight
//! driving line. The extractor recovers that profile from the solid's
//! boundary so reinforcement can be laid out relative to its corners.
//!
//! Only rectangular profiles are supported. Anything else is reported as
//! [`Error::UnsupportedShape`].

use crate::error::{Error, Result};
use crate::line::Line;
use crate::solid::{DrivingCurve, Face, Solid};
use crate::vector::{
    compare_by_height, compare_points_by_height, is_opposite_direction, is_perpendicular,
    is_same_direction, offset_point, points_equal, unit_vector,
};
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

/// Rectangular cross-section of a swept solid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossSection {
    /// Corners sorted by Z, then Y, then X
    points: [Point3<f64>; 4],
    /// Boundary edges of the profile face
    edges: [Line; 4],
    /// Driving vector (driving line end - start)
    sweep: Vector3<f64>,
}

/// Extract the cross-section of `solid` perpendicular to its driving curve
///
/// 1. An edge parallel to the sweep gives a reference point on the start
///    profile (its start, or its end when the edge runs backwards).
/// 2. The profile face is the face perpendicular to the sweep that contains
///    the reference point.
/// 3. The face must be a four-sided loop.
pub fn extract_cross_section(solid: &Solid, driving: &DrivingCurve) -> Result<CrossSection> {
    let line = match driving {
        DrivingCurve::Line(line) => line,
        DrivingCurve::Arc { .. } => {
            return Err(Error::UnsupportedShape(
                "curved driving path".to_string(),
            ))
        }
    };
    let sweep = line.direction();
    unit_vector(&sweep)?;

    let reference = solid
        .edges()
        .find_map(|edge| {
            let dir = edge.direction();
            if is_same_direction(&dir, &sweep) {
                Some(edge.start)
            } else if is_opposite_direction(&dir, &sweep) {
                Some(edge.end)
            } else {
                None
            }
        })
        .ok_or_else(|| {
            Error::ProfileNotFound("no edge parallel to the driving line".to_string())
        })?;

    let face = solid
        .faces
        .iter()
        .find(|face| is_profile_face(face, &sweep) && face.contains_vertex(&reference))
        .ok_or_else(|| {
            Error::ProfileNotFound(format!(
                "no face perpendicular to the driving line contains ({:.3}, {:.3}, {:.3})",
                reference.x, reference.y, reference.z
            ))
        })?;

    CrossSection::from_face(face, sweep)
}

/// True if every edge of the face is perpendicular to the sweep
fn is_profile_face(face: &Face, sweep: &Vector3<f64>) -> bool {
    !face.edges.is_empty()
        && face
            .edges
            .iter()
            .all(|edge| is_perpendicular(&edge.direction(), sweep))
}

impl CrossSection {
    /// Build from a profile face, validating rectangle topology
    pub fn from_face(face: &Face, sweep: Vector3<f64>) -> Result<Self> {
        let mut vertices = face.vertices();
        if vertices.len() != 4 || face.edges.len() != 4 {
            return Err(Error::UnsupportedShape(format!(
                "profile has {} vertices and {} edges, only rectangles are supported",
                vertices.len(),
                face.edges.len()
            )));
        }
        vertices.sort_by(compare_points_by_height);

        let points = [vertices[0], vertices[1], vertices[2], vertices[3]];
        let edges = [face.edges[0], face.edges[1], face.edges[2], face.edges[3]];
        let section = Self {
            points,
            edges,
            sweep,
        };

        // Every corner must touch exactly two edges
        for p in &section.points {
            section.related_vectors(p).map_err(|_| {
                Error::UnsupportedShape("profile loop is not a simple quadrilateral".to_string())
            })?;
        }

        Ok(section)
    }

    /// Corners sorted by Z, then Y, then X
    pub fn points(&self) -> &[Point3<f64>; 4] {
        &self.points
    }

    pub fn edges(&self) -> &[Line; 4] {
        &self.edges
    }

    /// Driving vector (not normalized)
    pub fn sweep(&self) -> Vector3<f64> {
        self.sweep
    }

    pub fn sweep_direction(&self) -> Result<Vector3<f64>> {
        unit_vector(&self.sweep)
    }

    /// Length of the driving line
    pub fn sweep_length(&self) -> f64 {
        self.sweep.norm()
    }

    /// Distance between the two lowest corners
    pub fn bottom_width(&self) -> f64 {
        (self.points[1] - self.points[0]).norm()
    }

    /// Distance from the first corner to the third (the side edge)
    pub fn side_height(&self) -> f64 {
        (self.points[2] - self.points[0]).norm()
    }

    /// Unit vector pointing from the upper side of the profile to the lower side
    pub fn down_direction(&self) -> Result<Vector3<f64>> {
        unit_vector(&(self.points[0] - self.points[2]))
    }

    /// The two edge vectors leaving `point` along the profile boundary
    pub fn related_vectors(&self, point: &Point3<f64>) -> Result<[Vector3<f64>; 2]> {
        let mut vectors: SmallVec<[Vector3<f64>; 2]> = SmallVec::new();
        for edge in &self.edges {
            if points_equal(point, &edge.start) {
                vectors.push(edge.end - edge.start);
            }
            if points_equal(point, &edge.end) {
                vectors.push(edge.start - edge.end);
            }
        }

        if vectors.len() != 2 {
            return Err(Error::InvalidTopology(format!(
                "a profile corner should have two edges, found {}",
                vectors.len()
            )));
        }
        Ok([vectors[0], vectors[1]])
    }

    /// [`related_vectors`](Self::related_vectors) ordered by Z, then Y, then X
    pub fn related_vectors_by_height(&self, point: &Point3<f64>) -> Result<[Vector3<f64>; 2]> {
        let mut vectors = self.related_vectors(point)?;
        vectors.sort_by(compare_by_height);
        Ok(vectors)
    }

    /// Corners moved inward by `offset` along both adjacent edges, re-sorted
    pub fn offset_points(&self, offset: f64) -> Result<[Point3<f64>; 4]> {
        let mut moved = [Point3::origin(); 4];
        for (slot, point) in moved.iter_mut().zip(self.points.iter()) {
            let [first, second] = self.related_vectors(point)?;
            let p = offset_point(point, &first, offset)?;
            *slot = offset_point(&p, &second, offset)?;
        }
        moved.sort_by(compare_points_by_height);
        Ok(moved)
    }
}
