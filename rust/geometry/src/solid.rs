// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary representation as seen by the layout code
//!
//! The host's solid is reduced to planar faces bounded by straight edges.
//! That is all the cross-section extractor needs: an edge set to find the
//! sweep direction, and faces to find the profile perpendicular to it.

use crate::error::{Error, Result};
use crate::line::Line;
use crate::transform::transform_point;
use crate::vector::points_equal;
use nalgebra::{Matrix4, Point3, Vector3};

/// Planar face with a single outer loop of straight edges
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Face {
    pub edges: Vec<Line>,
}

impl Face {
    pub fn new(edges: Vec<Line>) -> Self {
        Self { edges }
    }

    /// Closed polygon face through `points` in order
    pub fn from_polygon(points: &[Point3<f64>]) -> Self {
        let n = points.len();
        let edges = (0..n)
            .map(|i| Line::new(points[i], points[(i + 1) % n]))
            .collect();
        Self { edges }
    }

    /// Distinct boundary vertices, in the order they are first met
    pub fn vertices(&self) -> Vec<Point3<f64>> {
        let mut vertices: Vec<Point3<f64>> = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            for p in [edge.start, edge.end] {
                if !vertices.iter().any(|v| points_equal(v, &p)) {
                    vertices.push(p);
                }
            }
        }
        vertices
    }

    /// True if `point` is one of the face's vertices
    pub fn contains_vertex(&self, point: &Point3<f64>) -> bool {
        self.edges.iter().any(|e| e.has_endpoint(point))
    }
}

/// Closed solid made of planar faces
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solid {
    pub faces: Vec<Face>,
}

impl Solid {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Prism swept from a closed planar `profile` along `sweep`
    ///
    /// Produces the two caps and one quadrilateral side face per profile edge.
    pub fn extruded(profile: &[Point3<f64>], sweep: &Vector3<f64>) -> Result<Self> {
        if profile.len() < 3 {
            return Err(Error::InvalidTopology(format!(
                "profile needs at least 3 points, got {}",
                profile.len()
            )));
        }

        let top: Vec<Point3<f64>> = profile.iter().map(|p| p + sweep).collect();
        let n = profile.len();

        let mut faces = Vec::with_capacity(n + 2);
        faces.push(Face::from_polygon(profile));
        faces.push(Face::from_polygon(&top));
        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(Face::from_polygon(&[profile[i], profile[j], top[j], top[i]]));
        }

        Ok(Self { faces })
    }

    /// All face edges (shared edges appear once per face)
    pub fn edges(&self) -> impl Iterator<Item = &Line> {
        self.faces.iter().flat_map(|f| f.edges.iter())
    }

    /// Copy of this solid moved by `transform`
    pub fn transformed(&self, transform: &Matrix4<f64>) -> Self {
        let faces = self
            .faces
            .iter()
            .map(|f| Face::new(f.edges.iter().map(|e| e.transformed(transform)).collect()))
            .collect();
        Self { faces }
    }
}

/// Path along which a structural profile is swept
///
/// Only straight driving lines are laid out; curved framing is reported as
/// an unsupported shape by the extractor instead of being guessed at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DrivingCurve {
    Line(Line),
    Arc {
        start: Point3<f64>,
        end: Point3<f64>,
        center: Point3<f64>,
    },
}

impl DrivingCurve {
    pub fn start(&self) -> Point3<f64> {
        match self {
            Self::Line(line) => line.start,
            Self::Arc { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point3<f64> {
        match self {
            Self::Line(line) => line.end,
            Self::Arc { end, .. } => *end,
        }
    }

    pub fn transformed(&self, transform: &Matrix4<f64>) -> Self {
        match self {
            Self::Line(line) => Self::Line(line.transformed(transform)),
            Self::Arc { start, end, center } => Self::Arc {
                start: transform_point(transform, start),
                end: transform_point(transform, end),
                center: transform_point(transform, center),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn extruded_box_has_six_faces() {
        let solid = Solid::extruded(&unit_square(), &Vector3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(solid.faces.len(), 6);
        assert_eq!(solid.edges().count(), 24);
        assert!(solid.faces.iter().all(|f| f.vertices().len() == 4));
    }

    #[test]
    fn face_vertices_are_distinct() {
        let face = Face::from_polygon(&unit_square());
        let vertices = face.vertices();
        assert_eq!(vertices.len(), 4);
        assert!(face.contains_vertex(&Point3::new(1.0, 1.0, 0.0)));
        assert!(!face.contains_vertex(&Point3::new(0.5, 0.5, 0.0)));
    }

    #[test]
    fn degenerate_profile_rejected() {
        let result = Solid::extruded(&unit_square()[..2], &Vector3::new(0.0, 0.0, 1.0));
        assert!(matches!(result, Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn transformed_solid_moves_every_edge() {
        let solid = Solid::extruded(&unit_square(), &Vector3::new(0.0, 0.0, 1.0)).unwrap();
        let moved = solid.transformed(&Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0)));
        assert!(moved.edges().all(|e| e.start.x >= 5.0 && e.end.x >= 5.0));
    }
}
