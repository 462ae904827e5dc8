// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Column reinforcement layout.
//!
//! The column's start profile is its footprint. Sorted by Y then X, corner 0
//! is south-west, 1 south-east, 2 north-west and 3 north-east. Each face
//! carries one vertical bar group that starts at its own corner and stops a
//! spacing short of the next face's corner, so corner bars are never doubled.

use addin_lite_geometry::{offset_point, unit_vector, CrossSection, Line, Vector3};
use serde::{Deserialize, Serialize};

use crate::beam::{check_spacing, closed_loop};
use crate::constants::ColumnRebarConstants;
use crate::error::{Error, Result};
use crate::layout::{RebarGeometry, TransverseLocation, VerticalSide};
use crate::StructuralKind;

/// Layout planner for a rectangular column.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    section: CrossSection,
    direction: Vector3<f64>,
    length: f64,
    constants: ColumnRebarConstants,
}

/// Vertical bar count per column face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCounts {
    pub east: usize,
    pub north: usize,
    pub west: usize,
    pub south: usize,
}

impl SideCounts {
    pub fn get(&self, side: VerticalSide) -> usize {
        match side {
            VerticalSide::East => self.east,
            VerticalSide::North => self.north,
            VerticalSide::West => self.west,
            VerticalSide::South => self.south,
        }
    }

    pub fn total(&self) -> usize {
        self.east + self.north + self.west + self.south
    }
}

/// Split a total vertical bar count over the four faces.
///
/// Every face gets `total / 4`; the remainder goes to East, North and West in
/// that order.
pub fn split_vertical_count(total: usize) -> Result<SideCounts> {
    if total < 4 {
        return Err(Error::InvalidLayout(format!(
            "a column needs at least 4 vertical bars, got {total}"
        )));
    }
    let base = total / 4;
    let remainder = total % 4;
    let extra = |rank: usize| usize::from(remainder > rank);

    Ok(SideCounts {
        east: base + extra(0),
        north: base + extra(1),
        west: base + extra(2),
        south: base,
    })
}

impl ColumnLayout {
    pub fn new(
        kind: StructuralKind,
        section: CrossSection,
        constants: ColumnRebarConstants,
    ) -> Result<Self> {
        if kind != StructuralKind::Column {
            return Err(Error::WrongStructuralType {
                planner: "ColumnLayout",
                expected: StructuralKind::Column,
                actual: kind,
            });
        }
        let direction = section.sweep_direction()?;
        let length = section.sweep_length();
        Ok(Self {
            section,
            direction,
            length,
            constants,
        })
    }

    pub fn section(&self) -> &CrossSection {
        &self.section
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Ties for the bottom quarter, middle half or top quarter of the column.
    ///
    /// The middle group is centered in its range and the top group ends
    /// exactly at the column top; the leftover of `length % spacing` is what
    /// shifts them.
    pub fn transverse_rebar(
        &self,
        location: TransverseLocation,
        spacing: f64,
    ) -> Result<RebarGeometry> {
        check_spacing(spacing)?;
        let length = self.length;

        let (group_length, shift) = match location {
            TransverseLocation::Start => (length / 4.0, 0.0),
            TransverseLocation::Center => {
                let group = length / 2.0;
                (group, length / 4.0 + (group % spacing) / 2.0)
            }
            TransverseLocation::End => {
                let group = length / 4.0;
                (group, length - group + (group % spacing))
            }
        };
        if group_length <= 0.0 {
            return Err(Error::CollapsedGeometry("transverse", group_length));
        }
        let count = (group_length / spacing).floor() as usize + 1;

        let moved = self.section.offset_points(self.constants.transverse_offset)?;
        let curves = closed_loop(&moved, &self.direction, shift)?;
        RebarGeometry::new(self.direction, curves, count, spacing)
    }

    /// Vertical bars along one face.
    pub fn vertical_rebar(&self, side: VerticalSide, count: usize) -> Result<RebarGeometry> {
        if count == 0 {
            return Err(Error::InvalidLayout(format!(
                "{side:?} face needs at least one vertical bar"
            )));
        }
        let c = &self.constants;
        let p = self.section.points();
        let moved = self.section.offset_points(c.vertical_offset)?;

        let width = self.section.bottom_width();
        let depth = self.section.side_height();
        let (start, normal, extent) = match side {
            VerticalSide::East => (moved[1], unit_vector(&(p[2] - p[0]))?, depth),
            VerticalSide::North => (moved[3], unit_vector(&(p[0] - p[1]))?, width),
            VerticalSide::West => (moved[2], unit_vector(&(p[0] - p[2]))?, depth),
            VerticalSide::South => (moved[0], unit_vector(&(p[1] - p[0]))?, width),
        };

        let clear = extent - 2.0 * c.vertical_offset;
        if clear <= 0.0 {
            return Err(Error::CollapsedGeometry("vertical", clear));
        }
        let spacing = clear / count as f64;

        let end = offset_point(&start, &self.direction, self.length + c.vertical_extension)?;
        RebarGeometry::new(normal, vec![Line::new(start, end)], count, spacing)
    }
}
