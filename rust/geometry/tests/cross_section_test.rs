// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-section extraction on placed instances.

use addin_lite_geometry::{
    extract_cross_section, placement_matrix, points_equal, DrivingCurve, Line, Point3, Solid,
    Vector3,
};
use approx::assert_relative_eq;

/// Local-frame column: 1.5 x 1.0 footprint, 10 tall, driving line along local Z.
fn local_column() -> (Solid, DrivingCurve) {
    let footprint = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.5, 0.0, 0.0),
        Point3::new(1.5, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let solid = Solid::extruded(&footprint, &Vector3::new(0.0, 0.0, 10.0)).unwrap();
    let driving = DrivingCurve::Line(Line::new(
        Point3::new(0.75, 0.5, 0.0),
        Point3::new(0.75, 0.5, 10.0),
    ));
    (solid, driving)
}

#[test]
fn column_profile_is_bottom_footprint() {
    let (solid, driving) = local_column();
    let section = extract_cross_section(&solid, &driving).unwrap();

    let p = section.points();
    assert!(points_equal(&p[0], &Point3::new(0.0, 0.0, 0.0)));
    assert!(points_equal(&p[1], &Point3::new(1.5, 0.0, 0.0)));
    assert!(points_equal(&p[2], &Point3::new(0.0, 1.0, 0.0)));
    assert!(points_equal(&p[3], &Point3::new(1.5, 1.0, 0.0)));
    assert_relative_eq!(section.bottom_width(), 1.5);
    assert_relative_eq!(section.side_height(), 1.0);
    assert_relative_eq!(section.sweep_length(), 10.0);
}

#[test]
fn placed_column_extracts_in_world_coordinates() {
    let (solid, driving) = local_column();
    let placement = placement_matrix(
        &Point3::new(100.0, 50.0, 3.0),
        &Vector3::new(0.0, 0.0, 1.0),
        &Vector3::new(1.0, 0.0, 0.0),
    )
    .unwrap();

    let section = extract_cross_section(
        &solid.transformed(&placement),
        &driving.transformed(&placement),
    )
    .unwrap();

    assert!(points_equal(&section.points()[0], &Point3::new(100.0, 50.0, 3.0)));
    assert!(points_equal(&section.points()[3], &Point3::new(101.5, 51.0, 3.0)));
}

#[test]
fn every_corner_offset_moves_inward() {
    let (solid, driving) = local_column();
    let section = extract_cross_section(&solid, &driving).unwrap();
    let moved = section.offset_points(0.25).unwrap();

    assert!(points_equal(&moved[0], &Point3::new(0.25, 0.25, 0.0)));
    assert!(points_equal(&moved[1], &Point3::new(1.25, 0.25, 0.0)));
    assert!(points_equal(&moved[2], &Point3::new(0.25, 0.75, 0.0)));
    assert!(points_equal(&moved[3], &Point3::new(1.25, 0.75, 0.0)));
}
