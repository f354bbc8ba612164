// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Integration tests for snap spans and the trigger broad-phase.

use brick_core::math::{Quat, Vec3};
use brick_core::make_node_id;
use brick_geom::{Aabb, AabbTree, BroadPhase, Pose, SnapSpan};
use core::f32::consts::FRAC_PI_2;

fn cube(center: Vec3) -> Aabb {
    Aabb::from_center_half_extents(center, Vec3::new(0.05, 0.05, 0.05))
}

#[test]
fn span_sample_starts_at_start_and_eases_toward_target() {
    let start = Pose::at(Vec3::new(0.0, 0.9, 0.0));
    let target = Pose::new(
        Vec3::new(0.0, 1.0, 0.0),
        Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2),
    );
    let span = SnapSpan::new(start, target);

    assert_eq!(span.sample(0.0).position(), start.position());
    // Halfway through the window smoothstep is exactly 0.5.
    let mid = span.sample_eased(0.06, 0.12);
    assert!((mid.position().y() - 0.95).abs() < 1e-5);
    let expected = FRAC_PI_2 * 0.5;
    assert!((mid.rotation().angle_to(&start.rotation()) - expected).abs() < 1e-3);
}

#[test]
fn span_with_closed_window_lands_on_target() {
    let span = SnapSpan::new(Pose::identity(), Pose::at(Vec3::new(3.0, 0.0, 0.0)));
    assert_eq!(span.sample_eased(0.0, 0.0), span.target());
    assert_eq!(span.sample_eased(1.0, -1.0), span.target());
}

#[test]
fn broad_phase_pair_order_is_canonical() {
    let a = make_node_id("stud-a");
    let b = make_node_id("tube-b");
    let c = make_node_id("far-c");

    let mut bp = AabbTree::new();
    bp.upsert(c, cube(Vec3::new(100.0, 0.0, 0.0)));
    bp.upsert(b, cube(Vec3::new(0.0, 0.95, 0.0)));
    bp.upsert(a, cube(Vec3::new(0.0, 1.0, 0.0)));

    let pairs = bp.pairs();
    let expected = if a < b { (a, b) } else { (b, a) };
    assert_eq!(pairs, vec![expected]);

    bp.remove(&a);
    assert!(bp.pairs().is_empty());
    assert_eq!(bp.len(), 2);
}

#[test]
fn rotated_volume_bounds_follow_pose() {
    // A flat plate rotated a quarter turn about Z stands upright.
    let local = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(1.0, 0.1, 0.1));
    let pose = Pose::new(
        Vec3::new(0.0, 5.0, 0.0),
        Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2),
    );
    let world = local.transformed(&pose.to_mat4());
    assert!((world.max().y() - 6.0).abs() < 1e-5);
    assert!((world.max().x() - 0.1).abs() < 1e-5);
}
