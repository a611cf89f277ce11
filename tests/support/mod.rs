//! Test support library.
//! Bounding-box and float helpers over kernel polygons, plus a known-good
//! configuration stream shared by the integration tests.

use csgrs::mesh::polygon::Polygon;
use tokagen::float_types::Real;

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box(polygons: &[Polygon<()>]) -> [Real; 6] {
    let mut min_x = Real::MAX;
    let mut min_y = Real::MAX;
    let mut min_z = Real::MAX;
    let mut max_x = Real::MIN;
    let mut max_y = Real::MIN;
    let mut max_z = Real::MIN;

    for poly in polygons {
        for v in &poly.vertices {
            let p = v.pos;
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            min_z = min_z.min(p.z);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
            max_z = max_z.max(p.z);
        }
    }

    [min_x, min_y, min_z, max_x, max_y, max_z]
}

/// Quick helper to compare floating-point results with a tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A valid two-layer configuration stream:
/// outer radius 500, height 600, layers (20, 10) and (15, 5), solenoid
/// radius 50 / height 650, four 80 x 80 ports, eight limbs, limiter and
/// divertor sections, plasma setback 30.
pub fn sample_values() -> Vec<Real> {
    vec![
        500.0, 600.0, 2.0, // containment
        20.0, 10.0, // layer 0
        15.0, 5.0, // layer 1
        50.0, 650.0, 50.0, // solenoid
        4.0, 80.0, 80.0, // ports
        8.0, 150.0, 25.0, 100.0, 100.0, 0.0, // limbs
        5.0, 10.0, 20.0, // limiter
        5.0, 50.0, 10.0, 20.0, // divertor
        30.0, // distance from plasma
    ]
}
