use super::*;
use crate::cfg::FdCfg;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};

// Intrinsic distances in the embedding models, used as ground truth.
fn model_distance(geom: Geometry, z: Vector2<f64>, w: Vector2<f64>) -> f64 {
    // z * conj(w)
    let zw = vector![z.x * w.x + z.y * w.y, z.y * w.x - z.x * w.y];
    let num = (z - w).norm();
    match geom {
        Geometry::Hyperbolic => 2.0 * (num / (vector![1.0, 0.0] - zw).norm()).atanh(),
        Geometry::Spherical => 2.0 * (num / (vector![1.0, 0.0] + zw).norm()).atan(),
        Geometry::Euclidean => num,
    }
}

#[test]
fn hyperbolic_arc_is_orthogonal_to_unit_circle() {
    let cfg = FdCfg::default();
    let g = geodesic(
        Geometry::Hyperbolic,
        Polar::new(0.8, 0.3),
        Polar::new(1.5, 1.9),
        false,
        &cfg,
    );
    let Geodesic::Arc { circle, .. } = g else {
        panic!("expected arc, got {g:?}");
    };
    let lhs = circle.center.norm_squared();
    let rhs = circle.radius * circle.radius + 1.0;
    assert!((lhs - rhs).abs() < 1e-9);
}

#[test]
fn spherical_arc_meets_equator_antipodally() {
    let cfg = FdCfg::default();
    let g = geodesic(
        Geometry::Spherical,
        Polar::new(0.4, -0.7),
        Polar::new(1.1, 1.2),
        false,
        &cfg,
    );
    let Geodesic::Arc { circle, .. } = g else {
        panic!("expected arc, got {g:?}");
    };
    let lhs = circle.center.norm_squared() + 1.0;
    let rhs = circle.radius * circle.radius;
    assert!((lhs - rhs).abs() < 1e-9);
}

#[test]
fn arc_endpoints_reproduce_inputs() {
    let cfg = FdCfg::default();
    for geom in [Geometry::Hyperbolic, Geometry::Spherical] {
        let a = Polar::new(0.9, 2.0);
        let b = Polar::new(0.6, -2.5);
        let g = geodesic(geom, a, b, false, &cfg);
        assert!(g.is_arc());
        let (p, q) = g.endpoints();
        assert!((p - geom.to_cartesian(a)).norm() < 1e-9);
        assert!((q - geom.to_cartesian(b)).norm() < 1e-9);
    }
}

#[test]
fn collinear_and_origin_cases_degenerate_to_segments() {
    let cfg = FdCfg::default();
    for geom in [Geometry::Hyperbolic, Geometry::Spherical] {
        let same_ray = geodesic(geom, Polar::new(0.3, 1.0), Polar::new(0.9, 1.0), false, &cfg);
        assert!(!same_ray.is_arc());
        let antipodal = geodesic(geom, Polar::new(0.3, 1.0), Polar::new(0.9, 1.0 + PI), false, &cfg);
        assert!(!antipodal.is_arc());
        let origin = geodesic(geom, Polar::new(0.0, 0.0), Polar::new(0.9, 0.4), false, &cfg);
        assert!(!origin.is_arc());
    }
}

#[test]
fn infinite_diameter_reaches_unit_circle() {
    let cfg = FdCfg::default();
    let g = geodesic(
        Geometry::Hyperbolic,
        Polar::new(0.0, 0.0),
        Polar::new(1.0, FRAC_PI_2),
        true,
        &cfg,
    );
    let Geodesic::Segment { from, to } = g else {
        panic!("expected segment");
    };
    assert!((from - vector![0.0, -1.0]).norm() < 1e-9);
    assert!((to - vector![0.0, 1.0]).norm() < 1e-9);
}

#[test]
fn infinite_arc_ends_on_ideal_boundary() {
    let cfg = FdCfg::default();
    let a = Polar::new(0.7, 0.2);
    let b = Polar::new(1.3, 1.4);
    let g = geodesic(Geometry::Hyperbolic, a, b, true, &cfg);
    let (u, v) = g.endpoints();
    assert!((u.norm() - 1.0).abs() < 1e-9);
    assert!((v.norm() - 1.0).abs() < 1e-9);
    // the finite arc's end points lie in the same sweep
    let Geodesic::Arc { circle, start, span } = g else {
        panic!("expected arc");
    };
    for p in [a, b] {
        let rel = geodesic::wrap_angle(circle.angle_of(Geometry::Hyperbolic.to_cartesian(p)) - start);
        assert!(rel * span.signum() >= -1e-12 && rel.abs() <= span.abs() + 1e-12);
    }
}

#[test]
fn euclidean_infinite_segment_extrapolates() {
    let cfg = FdCfg::default();
    let g = geodesic(
        Geometry::Euclidean,
        Polar::new(1.0, 0.0),
        Polar::new(1.0, FRAC_PI_2),
        true,
        &cfg,
    );
    let Geodesic::Segment { from, to } = g else {
        panic!("euclidean geodesics are straight");
    };
    let p = vector![1.0, 0.0];
    let q = vector![0.0, 1.0];
    assert!((from - (p - (q - p) * 100.0)).norm() < 1e-9);
    assert!((to - (q + (q - p) * 100.0)).norm() < 1e-9);
}

#[test]
fn arc_points_split_distance_additively() {
    let cfg = FdCfg::default();
    let mut rng = StdRng::seed_from_u64(7);
    for geom in [Geometry::Hyperbolic, Geometry::Spherical] {
        for _ in 0..50 {
            let a = Polar::new(rng.gen_range(0.1..1.4), rng.gen_range(-PI..PI));
            let b = Polar::new(rng.gen_range(0.1..1.4), rng.gen_range(-PI..PI));
            let g = geodesic(geom, a, b, false, &cfg);
            let (p, q) = g.endpoints();
            let m = g.point_at(rng.gen_range(0.1..0.9));
            let whole = model_distance(geom, p, q);
            let split = model_distance(geom, p, m) + model_distance(geom, m, q);
            assert!((whole - split).abs() < 1e-7, "{geom:?}: {whole} vs {split}");
        }
    }
}

proptest! {
    #[test]
    fn polar_cartesian_round_trip(d in 0.0f64..1.5, a in -3.1f64..3.1) {
        for geom in [Geometry::Hyperbolic, Geometry::Spherical, Geometry::Euclidean] {
            let back = geom.to_polar(geom.to_cartesian(Polar::new(d, a)));
            prop_assert!((back.dist - d).abs() < 1e-9);
            if d > 1e-6 {
                prop_assert!(geodesic::wrap_angle(back.angle - a).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn hyperbolic_geodesics_stay_in_the_disk(
        d1 in 0.05f64..4.0, a1 in -3.1f64..3.1,
        d2 in 0.05f64..4.0, a2 in -3.1f64..3.1,
        t in 0.0f64..1.0,
    ) {
        let cfg = FdCfg::default();
        let g = geodesic(Geometry::Hyperbolic, Polar::new(d1, a1), Polar::new(d2, a2), false, &cfg);
        prop_assert!(g.point_at(t).norm() < 1.0);
    }
}
