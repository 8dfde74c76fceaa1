#![allow(dead_code)]

use nalgebra::{Point3, UnitQuaternion, Vector3};
use pandaset::data::{Heading, Pose, Position};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_coordinate() -> impl Strategy<Value = f64> {
    -500.0..500.0f64
}

pub fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    (arb_coordinate(), arb_coordinate(), arb_coordinate())
        .prop_map(|(x, y, z)| Point3::new(x, y, z))
}

pub fn arb_points(max: usize) -> impl Strategy<Value = Vec<Point3<f64>>> {
    prop::collection::vec(arb_point(), 0..max)
}

/// A unit heading built from a random axis and angle.
pub fn arb_heading() -> impl Strategy<Value = Heading> {
    (
        -1.0..1.0f64,
        -1.0..1.0f64,
        -1.0..1.0f64,
        -std::f64::consts::PI..std::f64::consts::PI,
    )
        .prop_filter("axis must not vanish", |(x, y, z, _)| {
            x * x + y * y + z * z > 1e-6
        })
        .prop_map(|(x, y, z, angle)| {
            let axis = nalgebra::Unit::new_normalize(Vector3::new(x, y, z));
            let q = UnitQuaternion::from_axis_angle(&axis, angle);
            Heading::new(q.w, q.i, q.j, q.k)
        })
}

pub fn arb_pose() -> impl Strategy<Value = Pose> {
    (arb_heading(), arb_coordinate(), arb_coordinate(), arb_coordinate())
        .prop_map(|(heading, x, y, z)| Pose::new(Position::new(x, y, z), heading))
}

pub fn close(a: &Point3<f64>, b: &Point3<f64>, eps: f64) -> bool {
    (a - b).norm() <= eps * (1.0 + a.coords.norm().max(b.coords.norm()))
}
