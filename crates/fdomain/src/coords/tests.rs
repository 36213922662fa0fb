use super::*;
use crate::error::FdError;
use crate::cfg::FdCfg;
use crate::geom::{Geometry, Polar};
use crate::glue::{glue, Graph};
use crate::radius::solve_radius;
use crate::symbol::DSymbol;
use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};

fn laid_out(sym: &DSymbol) -> (Graph, Coords, f64) {
    let cfg = FdCfg::default();
    let mut g = glue(sym, &cfg).unwrap();
    let mut c = trace_fd(&g).unwrap();
    let r = solve_radius(&mut g, &cfg).radius;
    place_coordinates(&g, &mut c, &cfg);
    (g, c, r)
}

fn kinds(g: &Graph, c: &Coords) -> Vec<usize> {
    c.boundary_corners().map(|o| g.orbit(o.orbit).kind).collect()
}

fn close(geom: Geometry, p: &Point, dist: f64, angle: f64) {
    let want = geom.to_cartesian(Polar::new(dist, angle));
    assert!((p.pos - want).norm() < 1e-9, "{:?} vs {want:?}", p.pos);
}

#[test]
fn rotation_symbol_boundary() {
    let (g, c, r) = laid_out(&"<1.1:2:2,2,2:4,4>".parse().unwrap());
    assert_eq!(r, 0.5);
    assert_eq!(kinds(&g, &c), vec![2, 0, 2, 1]);
    assert_eq!((c.ncr.len(), c.ecr.len(), c.ocr.len()), (2, 5, 4));
    assert_eq!(c.ecr.iter().filter(|e| e.free).count(), 4);

    let ring: Vec<&OrbitCorner> = c.boundary_corners().collect();
    let d_tile = 0.5 / (3.0 * PI / 8.0).cos();
    let geom = Geometry::Euclidean;
    close(geom, &ring[0].at, d_tile, 0.0);
    close(geom, &ring[1].at, FRAC_1_SQRT_2, 5.0 * PI / 8.0);
    close(geom, &ring[2].at, d_tile, 5.0 * PI / 4.0);
    assert!((ring[3].at.polar.dist - 0.5).abs() < 1e-9);
    // The rotation center of order 2 is shared by both triangles.
    assert_eq!(ring[3].nodes.len(), 2);
}

#[test]
fn kaleidoscopic_square() {
    let (g, c, r) = laid_out(&DSymbol::reflection_polygon(4, 4));
    assert_eq!(r, 0.5);
    assert_eq!(kinds(&g, &c), vec![1, 0, 1, 0, 1, 0, 1, 0]);
    let ring: Vec<&OrbitCorner> = c.boundary_corners().collect();
    for (m, corner) in ring.iter().skip(1).step_by(2).enumerate() {
        close(Geometry::Euclidean, &corner.at, FRAC_1_SQRT_2, m as f64 * PI / 2.0);
    }
    for corner in ring.iter().step_by(2) {
        assert!((corner.at.polar.dist - 0.5).abs() < 1e-9);
    }
    let interior: Vec<&OrbitCorner> = c.ocr.iter().filter(|o| !o.boundary).collect();
    assert_eq!(interior.len(), 1);
    assert_eq!(g.orbit(interior[0].orbit).kind, 2);
    assert!(interior[0].at.pos.norm() < 1e-9);
    assert_eq!(interior[0].nodes.len(), 8);
}

#[test]
fn hyperbolic_midpoints_touch_incircle() {
    let (g, c, r) = laid_out(&DSymbol::reflection_polygon(5, 4));
    assert_eq!(g.geometry(), Geometry::Hyperbolic);
    let ring: Vec<&OrbitCorner> = c.boundary_corners().collect();
    let vertices: Vec<&&OrbitCorner> = ring.iter().filter(|o| g.orbit(o.orbit).kind == 0).collect();
    assert_eq!(vertices.len(), 5);
    for w in vertices.windows(2) {
        let gap = (w[1].at.polar.angle - w[0].at.polar.angle).rem_euclid(TAU);
        assert!((gap - TAU / 5.0).abs() < 1e-9);
    }
    for o in ring.iter().filter(|o| g.orbit(o.orbit).kind == 1) {
        assert!((o.at.polar.dist - r).abs() < 1e-9, "{} vs {r}", o.at.polar.dist);
    }
    assert!(c.points().all(|p| p.pos.norm() < 1.0));
}

#[test]
fn regular_polygon_without_constrained_corners() {
    let (g, c, _) = laid_out(&DSymbol::reflection_polygon(3, 2));
    assert_eq!(g.geometry(), Geometry::Spherical);
    let ring: Vec<&OrbitCorner> = c.boundary_corners().collect();
    assert_eq!(ring.len(), 6);
    for (m, o) in ring.iter().enumerate() {
        assert_eq!(o.at.polar.dist, 1.0);
        close(Geometry::Spherical, &o.at, 1.0, TAU * m as f64 / 6.0);
    }
}

#[test]
fn corner_records_match_the_graph() {
    let (g, c, _) = laid_out(&DSymbol::reflection_polygon(6, 4));
    for (d, nc) in c.ncr.iter().enumerate() {
        for k in 0..3 {
            assert_eq!(c.ocr[nc.orbits[k].0].orbit, g.nodes[d].orbits[k]);
            assert_eq!(c.ecr[nc.edges[k].0].edge, g.nodes[d].edges[k]);
        }
    }
    for e in &c.ecr {
        let edge = g.edge(e.edge);
        let (ja, jb) = edge.end_kinds();
        assert_eq!(g.orbit(c.ocr[e.ends[0].0].orbit).kind, ja);
        assert_eq!(g.orbit(c.ocr[e.ends[1].0].orbit).kind, jb);
        assert_eq!(e.free, edge.glue == 0);
    }
    let sides: Vec<EcrId> = c.boundary.iter().map(|s| s.side).collect();
    assert_eq!(sides.len(), c.ecr.iter().filter(|e| e.free).count());
}

#[test]
fn relaxation_reaches_a_fixed_point() {
    let cfg = FdCfg::default();
    let (mut g, mut c, _) = laid_out(&DSymbol::reflection_polygon(4, 4));
    let anchors: Vec<_> = c
        .boundary_corners()
        .filter(|o| g.orbit(o.orbit).is_constrained())
        .map(|o| o.at.pos)
        .collect();
    assert!(relax(&mut g, &mut c, &cfg));
    assert!(!relax_coords(&g, &mut c, &cfg));
    let after: Vec<_> = c
        .boundary_corners()
        .filter(|o| g.orbit(o.orbit).is_constrained())
        .map(|o| o.at.pos)
        .collect();
    assert_eq!(anchors, after);
    let tile = g.orbits.iter().find(|o| o.kind == 2).unwrap();
    assert!(tile.dist < 1e-9);
    assert!(c.bounds.min.x <= -FRAC_1_SQRT_2 + 1e-9 && c.bounds.max.x >= FRAC_1_SQRT_2 - 1e-9);
}

#[test]
fn polar_forms_track_positions_after_relax() {
    let cfg = FdCfg::default();
    let (mut g, mut c, _) = laid_out(&DSymbol::reflection_polygon(5, 4));
    relax(&mut g, &mut c, &cfg);
    let geom = g.geometry();
    for p in c.points() {
        assert!((geom.to_cartesian(p.polar) - p.pos).norm() < 1e-9);
    }
}

#[test]
fn bounds_cover_every_corner() {
    let (_, c, _) = laid_out(&DSymbol::reflection_polygon(5, 4));
    let b = c.bounds;
    assert!(b.min.x < b.max.x && b.min.y < b.max.y);
    for p in c.points() {
        assert!(p.pos.x >= b.min.x && p.pos.x <= b.max.x);
        assert!(p.pos.y >= b.min.y && p.pos.y <= b.max.y);
    }
    assert!(c.points().any(|p| p.pos.x == b.min.x));
    assert!(c.points().any(|p| p.pos.y == b.max.y));

    let mut empty = Coords::default();
    empty.update_bounds();
    assert_eq!(empty.bounds, Bounds::default());
}

#[test]
fn closed_surface_has_nothing_to_trace() {
    let g = glue(&"<1.1:2:2,2,2:1,1>".parse().unwrap(), &FdCfg::default()).unwrap();
    assert!(g.edges.iter().all(|e| e.glue != 0));
    let err = trace_fd(&g).unwrap_err();
    assert!(
        matches!(err, FdError::Structural(ref m) if m.contains("without boundary")),
        "{err:?}"
    );
}
