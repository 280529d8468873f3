//! Integration tests for modulation to shape to mesh pipeline

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use isoform_core::prelude::*;
use std::sync::Arc;

const LENGTH: f32 = 4.0;

/// Capped tube along Z whose radius follows `radius`
fn tube(radius: impl Into<Arc<LineModulation>>, max_radius: f32) -> ImplicitGeneric {
    let radius = radius.into();
    let bounds = Aabb::new(
        Vec3::new(-max_radius, -max_radius, 0.0),
        Vec3::new(max_radius, max_radius, LENGTH),
    );
    generic(
        move |x, y, z| {
            let ratio = (z / LENGTH).clamp(0.0, 1.0);
            let r = radius.evaluate(ratio).expect("radius profile should evaluate");
            let side = Vec2::new(x, y).length() - r;
            side.max((-z).max(z - LENGTH))
        },
        bounds,
    )
}

/// Every vertex away from the caps sits at the modulated radius
fn assert_follows_profile(mesh: &Mesh, radius: &LineModulation, tolerance: f32) {
    let mut checked = 0;
    for v in &mesh.vertices {
        let p = v.position();
        if p.z < 0.5 || p.z > LENGTH - 0.5 {
            continue;
        }
        let expected = radius.evaluate(p.z / LENGTH).unwrap();
        let actual = Vec2::new(p.x, p.y).length();
        assert!(
            (actual - expected).abs() < tolerance,
            "vertex at z = {} has radius {actual}, expected {expected}",
            p.z
        );
        checked += 1;
    }
    assert!(checked > 0, "no side vertices were checked");
}

#[test]
fn value_table_tube_to_mesh() {
    let radius = LineModulation::from_values(vec![0.5, 1.0, 0.5], vec![0.0, 0.5, 1.0])
        .expect("Table should be valid");
    let kernel = VoxelKernel::new(VoxelConfig::default().with_resolution(32));
    let spacing = LENGTH / 32.0;

    let shape = tube(radius.clone(), 1.0).realized_with(kernel);
    assert!(!shape.is_realized());

    let mesh = shape.mesh().expect("Mesh extraction should succeed");
    assert!(shape.is_realized());
    assert!(mesh.triangle_count() > 100);

    assert_follows_profile(mesh, &radius, 2.0 * spacing);

    let bounds = mesh.bounds().unwrap();
    assert!(bounds.min.z > -spacing && bounds.max.z < LENGTH + spacing);
    assert!(bounds.max.x > 0.8 && bounds.max.x < 1.0 + spacing);
}

#[test]
fn point_table_tube_to_mesh() {
    // Radius (X) read along Z, points given in world units of the ratio
    let points = vec![
        Vec3::new(0.6, 0.0, 0.0),
        Vec3::new(0.9, 0.0, 0.4),
        Vec3::new(0.7, 0.0, 1.0),
    ];
    let radius = LineModulation::from_points(points, Coord::X, Coord::Z)
        .expect("Points should be valid");

    let shape = ImplicitShape::with_kernel(
        tube(radius.clone(), 0.9),
        VoxelKernel::new(VoxelConfig::default().with_resolution(32)),
    );
    let mesh = shape.mesh().unwrap();

    assert_follows_profile(mesh, &radius, 2.0 * LENGTH / 32.0);
}

#[test]
fn composite_radius_shares_operands_between_shapes() {
    let base = Arc::new(
        LineModulation::from_values(vec![0.6, 0.6], vec![0.0, 1.0]).unwrap(),
    );
    let swell = Arc::new(LineModulation::from_fn(|r| 0.3 * (r * std::f32::consts::PI).sin()));

    let wide = LineModulation::sum(Arc::clone(&base), Arc::clone(&swell));
    let narrow = LineModulation::difference(Arc::clone(&base), Arc::clone(&swell));

    let (_, wide_lhs, _) = wide.operands().unwrap();
    let (_, narrow_lhs, _) = narrow.operands().unwrap();
    assert!(Arc::ptr_eq(wide_lhs, narrow_lhs));

    let config = VoxelConfig::default().with_resolution(32);
    let wide_shape = tube(wide.clone(), 0.9).realized_with(VoxelKernel::new(config));
    let narrow_shape = tube(narrow.clone(), 0.9).realized_with(VoxelKernel::new(config));

    let tolerance = 2.0 * LENGTH / 32.0;
    assert_follows_profile(wide_shape.mesh().unwrap(), &wide, tolerance);
    assert_follows_profile(narrow_shape.mesh().unwrap(), &narrow, tolerance);

    let inside = |s: &ImplicitShape<ImplicitGeneric>| s.volume().unwrap().inside_count(0.0);
    assert!(inside(&wide_shape) > inside(&narrow_shape));
}

#[test]
fn artifacts_are_memoized() {
    let shape = sphere(Vec3::new(1.0, 0.0, -1.0), 0.75).realized();

    let first = shape.mesh().unwrap();
    let again = shape.mesh().unwrap();
    assert!(std::ptr::eq(first, again));
    assert!(std::ptr::eq(shape.volume().unwrap(), shape.volume().unwrap()));

    // Sampled box covers the declared bound
    let bounds = shape.bounding_box();
    let sampled = shape.volume().unwrap().bounds();
    assert!(sampled.contains(bounds.min) && sampled.contains(bounds.max));
}

#[test]
fn distinct_shapes_realize_in_parallel() {
    let shapes: Vec<_> = (1..=4)
        .map(|i| {
            sphere(Vec3::ZERO, i as f32 * 0.5)
                .realized_with(VoxelKernel::new(VoxelConfig::default().with_resolution(16)))
        })
        .collect();

    std::thread::scope(|scope| {
        for shape in &shapes {
            scope.spawn(move || {
                assert!(shape.mesh().unwrap().triangle_count() > 0);
            });
        }
    });

    assert!(shapes.iter().all(ImplicitShape::is_meshed));
}

/// Step in the radius: evaluating exactly at ratio 0.5 fails
fn step_radius() -> LineModulation {
    LineModulation::from_values(vec![0.5, 0.5, 0.8, 0.8], vec![0.0, 0.5, 0.5, 1.0]).unwrap()
}

#[test]
fn step_profile_is_rejected_before_realization() {
    let radius = step_radius();

    assert!(matches!(
        radius.evaluate(0.5),
        Err(Error::DegenerateSegment { .. })
    ));
    assert!(matches!(
        radius.validate(),
        Err(Error::DegenerateSegment { .. })
    ));
}

#[test]
#[should_panic(expected = "radius profile should evaluate")]
fn step_profile_failure_reaches_mesh_caller() {
    // Spacing 0.5 from z = -0.5 puts a grid node exactly on z = 2, ratio 0.5
    let shape = tube(step_radius(), 0.8)
        .realized_with(VoxelKernel::new(VoxelConfig::default().with_resolution(8)));

    let _ = shape.mesh();
}
