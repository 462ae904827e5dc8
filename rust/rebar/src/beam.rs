// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Beam reinforcement layout.
//!
//! Bar groups are positioned relative to the sorted corners of the beam's
//! start profile: corners 0 and 1 are the bottom edge, 2 and 3 the top edge.
//! Top bars start from corner 3, bottom bars from corner 0, both running
//! along the driving line and arrayed across the section width.

use addin_lite_geometry::{offset_point, CrossSection, Line, Point3, Vector3};

use crate::constants::BeamRebarConstants;
use crate::error::{Error, Result};
use crate::layout::{RebarGeometry, TopLocation, TransverseLocation};
use crate::StructuralKind;

/// Layout planner for a rectangular beam.
#[derive(Debug, Clone)]
pub struct BeamLayout {
    section: CrossSection,
    direction: Vector3<f64>,
    length: f64,
    width: f64,
    height: f64,
    constants: BeamRebarConstants,
}

impl BeamLayout {
    pub fn new(
        kind: StructuralKind,
        section: CrossSection,
        constants: BeamRebarConstants,
    ) -> Result<Self> {
        if kind != StructuralKind::Beam {
            return Err(Error::WrongStructuralType {
                planner: "BeamLayout",
                expected: StructuralKind::Beam,
                actual: kind,
            });
        }

        let direction = section.sweep_direction()?;
        let length = section.sweep_length();
        let width = section.bottom_width();
        let height = section.side_height();
        Ok(Self {
            section,
            direction,
            length,
            width,
            height,
            constants,
        })
    }

    pub fn section(&self) -> &CrossSection {
        &self.section
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Top bars over the start, middle or end third of the beam.
    ///
    /// The center group overlaps its neighbours by half a unit on each side.
    pub fn top_rebar(&self, location: TopLocation) -> Result<RebarGeometry> {
        let c = &self.constants;
        let third = self.length / 3.0;

        let (offset, start_shift, bar_length) = match location {
            TopLocation::Start => (c.top_end_offset, 0.0, third),
            TopLocation::Center => (c.top_center_offset, third - 0.5, third + 1.0),
            TopLocation::End => (c.top_end_offset, 2.0 * third, third),
        };
        if bar_length <= 0.0 {
            return Err(Error::CollapsedGeometry("top", bar_length));
        }

        let corner = self.section.points()[3];
        let [_, normal] = self.section.related_vectors_by_height(&corner)?;

        let moved = self.section.offset_points(offset)?;
        let start = offset_point(&moved[3], &self.direction, start_shift)?;
        let end = offset_point(&start, &self.direction, bar_length)?;

        let count = c.top_bar_count;
        let spacing = spread_spacing(self.width, offset, count)?;
        RebarGeometry::new(normal, vec![Line::new(start, end)], count, spacing)
    }

    /// Bottom bars along the full beam length.
    pub fn bottom_rebar(&self) -> Result<RebarGeometry> {
        let c = &self.constants;
        let offset = c.bottom_offset;

        let corner = self.section.points()[0];
        let [normal, _] = self.section.related_vectors_by_height(&corner)?;

        let moved = self.section.offset_points(offset)?;
        let start = moved[0];
        let end = offset_point(&start, &self.direction, self.length)?;

        let count = c.bottom_bar_count;
        let spacing = spread_spacing(self.width, offset, count)?;
        RebarGeometry::new(normal, vec![Line::new(start, end)], count, spacing)
    }

    /// Stirrups for one of the three groups along the beam.
    ///
    /// The beam minus both end offsets and the two gaps is split into three
    /// equal groups; the center group sits midway between the other two.
    pub fn transverse_rebar(
        &self,
        location: TransverseLocation,
        spacing: f64,
    ) -> Result<RebarGeometry> {
        check_spacing(spacing)?;
        let c = &self.constants;

        let group_length =
            (self.length - 2.0 * c.transverse_end_offset - 2.0 * c.transverse_gap) / 3.0;
        if group_length <= 0.0 {
            return Err(Error::CollapsedGeometry("transverse", group_length));
        }
        let count = (group_length / spacing).floor() as usize + 1;

        let shift = match location {
            TransverseLocation::Start => c.transverse_end_offset,
            TransverseLocation::Center => (self.length - group_length) / 2.0,
            TransverseLocation::End => self.length - c.transverse_end_offset - group_length,
        };

        let moved = self.section.offset_points(c.transverse_offset)?;
        let curves = closed_loop(&moved, &self.direction, shift)?;
        RebarGeometry::new(self.direction, curves, count, spacing)
    }
}

/// Spacing that spreads `count` bars across `extent` minus cover on both sides.
pub(crate) fn spread_spacing(extent: f64, offset: f64, count: usize) -> Result<f64> {
    let clear = extent - 2.0 * offset;
    if clear <= 0.0 {
        return Err(Error::InvalidLayout(format!(
            "cover {offset} leaves no room in a section {extent} wide"
        )));
    }
    match count {
        0 => Err(Error::InvalidLayout("bar count must be at least 1".into())),
        1 => Ok(0.0),
        n => Ok(clear / (n - 1) as f64),
    }
}

pub(crate) fn check_spacing(spacing: f64) -> Result<()> {
    if spacing.is_finite() && spacing > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidLayout(format!(
            "spacing must be positive, got {spacing}"
        )))
    }
}

/// Rectangular stirrup loop 0 -> 1 -> 3 -> 2 -> 0 shifted along the member.
pub(crate) fn closed_loop(
    corners: &[Point3<f64>; 4],
    direction: &Vector3<f64>,
    shift: f64,
) -> Result<Vec<Line>> {
    let mut moved = [Point3::origin(); 4];
    for (slot, corner) in moved.iter_mut().zip(corners.iter()) {
        *slot = offset_point(corner, direction, shift)?;
    }
    let [first, second, third, fourth] = moved;
    Ok(vec![
        Line::new(first, second),
        Line::new(second, fourth),
        Line::new(fourth, third),
        Line::new(third, first),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use addin_lite_geometry::{extract_cross_section, vectors_equal, DrivingCurve, Solid};
    use approx::assert_relative_eq;

    /// 2.0 wide, 1.5 high, 12 long beam along +X.
    fn section(length: f64) -> CrossSection {
        let profile = [
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.5),
            Point3::new(0.0, -1.0, 1.5),
        ];
        let solid = Solid::extruded(&profile, &Vector3::new(length, 0.0, 0.0)).unwrap();
        let driving = DrivingCurve::Line(Line::new(
            Point3::new(0.0, 0.0, 1.5),
            Point3::new(length, 0.0, 1.5),
        ));
        extract_cross_section(&solid, &driving).unwrap()
    }

    fn layout(length: f64) -> BeamLayout {
        BeamLayout::new(StructuralKind::Beam, section(length), BeamRebarConstants::default())
            .unwrap()
    }

    #[test]
    fn rejects_columns() {
        let err = BeamLayout::new(
            StructuralKind::Column,
            section(12.0),
            BeamRebarConstants::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::WrongStructuralType { .. }));
    }

    #[test]
    fn bottom_rebar_spans_beam() {
        let beam = layout(12.0);
        assert_relative_eq!(beam.width(), 2.0);
        assert_relative_eq!(beam.height(), 1.5);

        let bottom = beam.bottom_rebar().unwrap();
        assert_eq!(bottom.curves.len(), 1);
        assert_relative_eq!(bottom.curves[0].length(), 12.0, epsilon = 1e-9);
        assert_eq!(bottom.bar_count, 5);
        assert_relative_eq!(bottom.spacing, 0.3645, epsilon = 1e-9);

        // First bar at the offset bottom corner, array runs across the width
        let start = bottom.curves[0].start;
        assert_relative_eq!(start.y, -1.0 + 0.271, epsilon = 1e-9);
        assert_relative_eq!(start.z, 0.271, epsilon = 1e-9);
        assert!(vectors_equal(
            &bottom.normal.normalize(),
            &Vector3::new(0.0, 1.0, 0.0)
        ));
    }

    #[test]
    fn top_rebar_thirds() {
        let beam = layout(12.0);

        let start = beam.top_rebar(TopLocation::Start).unwrap();
        let line = start.curves[0];
        assert_relative_eq!(line.start.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(line.end.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(line.start.y, 1.0 - 0.2, epsilon = 1e-9);
        assert_relative_eq!(line.start.z, 1.5 - 0.2, epsilon = 1e-9);
        assert_eq!(start.bar_count, 2);
        assert_relative_eq!(start.spacing, 2.0 - 0.4, epsilon = 1e-9);
        assert!(vectors_equal(
            &start.normal.normalize(),
            &Vector3::new(0.0, -1.0, 0.0)
        ));

        let center = beam.top_rebar(TopLocation::Center).unwrap();
        assert_relative_eq!(center.curves[0].start.x, 3.5, epsilon = 1e-9);
        assert_relative_eq!(center.curves[0].length(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(center.curves[0].start.z, 1.5 - 0.23, epsilon = 1e-9);

        let end = beam.top_rebar(TopLocation::End).unwrap();
        assert_relative_eq!(end.curves[0].start.x, 8.0, epsilon = 1e-9);
        assert_relative_eq!(end.curves[0].end.x, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn transverse_groups_are_evenly_separated() {
        let beam = layout(12.0);
        let group: f64 = (12.0 - 2.4 - 2.0) / 3.0;

        let start = beam.transverse_rebar(TransverseLocation::Start, 0.5).unwrap();
        let center = beam.transverse_rebar(TransverseLocation::Center, 0.5).unwrap();
        let end = beam.transverse_rebar(TransverseLocation::End, 0.5).unwrap();

        assert_eq!(start.bar_count, (group / 0.5).floor() as usize + 1);
        assert_eq!(start.curves.len(), 4);
        assert_relative_eq!(start.curves[0].start.x, 1.2, epsilon = 1e-9);
        assert_relative_eq!(center.curves[0].start.x, (12.0 - group) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(end.curves[0].start.x, 12.0 - 1.2 - group, epsilon = 1e-9);

        // Clear gap of 1.0 between the group extents
        assert_relative_eq!(
            center.curves[0].start.x - (start.curves[0].start.x + group),
            1.0,
            epsilon = 1e-9
        );

        // Loop is closed and lies in the section plane
        let loop_ = &center.curves;
        assert_eq!(loop_[3].end, loop_[0].start);
        assert!(loop_.iter().all(|l| (l.start.x - l.end.x).abs() < 1e-9));
        assert!(vectors_equal(&center.normal, &Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn short_beam_collapses_transverse_groups() {
        let beam = layout(4.0);
        assert!(matches!(
            beam.transverse_rebar(TransverseLocation::Center, 0.5),
            Err(Error::CollapsedGeometry("transverse", _))
        ));
    }

    #[test]
    fn spacing_must_be_positive() {
        let beam = layout(12.0);
        assert!(beam.transverse_rebar(TransverseLocation::Start, 0.0).is_err());
    }

    #[test]
    fn spread_spacing_single_bar() {
        assert_eq!(spread_spacing(2.0, 0.2, 1).unwrap(), 0.0);
        assert!(spread_spacing(0.3, 0.2, 3).is_err());
    }
}
