// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hook orientation relative to the bar's distribution normal.

use addin_lite_geometry::{is_same_direction, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::RebarGeometry;

/// Side a bar end hook bends toward, looking along the bar with the array
/// normal pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookOrientation {
    Left,
    Right,
}

/// Classify the hook that should bend along `hook` at the start of a bar
/// running along `curve`.
///
/// The normal is rotated a quarter turn about the curve at a time (by crossing
/// it with the curve). A match on the first turn means `Right`, on the third
/// `Left`. The second and fourth turns are anti-parallel and along the normal
/// respectively, which a hook can't use.
pub fn hook_orientation(
    curve: &Vector3<f64>,
    normal: &Vector3<f64>,
    hook: &Vector3<f64>,
) -> Result<HookOrientation> {
    let mut rotated = *normal;
    for turn in 0..4 {
        rotated = rotated.cross(curve);
        if is_same_direction(&rotated, hook) {
            match turn {
                0 => return Ok(HookOrientation::Right),
                2 => return Ok(HookOrientation::Left),
                _ => {}
            }
        }
    }
    Err(Error::HookOrientationUndetermined)
}

/// Orientation for stirrup hooks, which bend into the section.
///
/// The inward direction at the loop start is back along the closing segment.
pub fn stirrup_hook_orientation(geometry: &RebarGeometry) -> Result<HookOrientation> {
    let (first, last) = match (geometry.curves.first(), geometry.curves.last()) {
        (Some(first), Some(last)) if geometry.curves.len() > 1 => (first, last),
        _ => return Err(Error::HookOrientationUndetermined),
    };
    hook_orientation(&first.direction(), &geometry.normal, &(-last.direction()))
}
