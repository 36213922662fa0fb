use nalgebra::Vector2;

use crate::geom::{Geometry, Polar};
use crate::glue::{EdgeId, NodeId, OrbitId};

/// Index into [`Coords::ncr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NcrId(pub usize);
/// Index into [`Coords::ecr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EcrId(pub usize);
/// Index into [`Coords::ocr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OcrId(pub usize);

/// Positioned point: Cartesian embedding plus polar form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub pos: Vector2<f64>,
    pub polar: Polar,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            pos: Vector2::zeros(),
            polar: Polar::default(),
        }
    }
}

impl Point {
    pub fn set(&mut self, geom: Geometry, pos: Vector2<f64>) {
        self.pos = pos;
        self.polar = geom.to_polar(pos);
    }
    pub fn set_polar(&mut self, geom: Geometry, polar: Polar) {
        self.pos = geom.to_cartesian(polar);
        self.polar = polar;
    }
}

/// Center of one triangle.
#[derive(Clone, Debug)]
pub struct NodeCorner {
    pub node: NodeId,
    /// Edge corner of the side opposite each corner type.
    pub edges: [EcrId; 3],
    /// Orbit corner at each corner type.
    pub orbits: [OcrId; 3],
    pub at: Point,
}

/// Midpoint of a triangle side. Glued edges get one record shared by both
/// triangles; every appearance of an unglued side on the boundary gets its
/// own `free` record.
#[derive(Clone, Debug)]
pub struct EdgeCorner {
    pub edge: EdgeId,
    pub free: bool,
    /// Orbit corners at the lower- and higher-typed end.
    pub ends: [OcrId; 2],
    pub nodes: [NcrId; 2],
    pub at: Point,
}

/// One appearance of an orbit in the domain: a boundary corner, or the
/// single interior point of a free rotation center.
#[derive(Clone, Debug)]
pub struct OrbitCorner {
    pub orbit: OrbitId,
    pub boundary: bool,
    pub nodes: Vec<NcrId>,
    pub edges: Vec<EcrId>,
    pub at: Point,
}

/// Boundary side followed by the corner it runs into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryStep {
    pub side: EcrId,
    pub corner: OcrId,
}

/// Axis-aligned bounding box of all positioned corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vector2::zeros(),
            max: Vector2::zeros(),
        }
    }
}

/// Coordinate records mirroring the glued graph.
#[derive(Clone, Debug, Default)]
pub struct Coords {
    pub ncr: Vec<NodeCorner>,
    pub ecr: Vec<EdgeCorner>,
    pub ocr: Vec<OrbitCorner>,
    /// Boundary cycle, counter-clockwise.
    pub boundary: Vec<BoundaryStep>,
    pub bounds: Bounds,
}

impl Coords {
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.ncr
            .iter()
            .map(|c| &c.at)
            .chain(self.ecr.iter().map(|c| &c.at))
            .chain(self.ocr.iter().map(|c| &c.at))
    }

    pub(crate) fn update_bounds(&mut self) {
        let bounds = {
            let mut it = self.points().map(|p| p.pos);
            match it.next() {
                None => Bounds::default(),
                Some(first) => {
                    let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)));
                    Bounds { min, max }
                }
            }
        };
        self.bounds = bounds;
    }

    /// Orbit corners on the boundary, in boundary order.
    pub fn boundary_corners(&self) -> impl Iterator<Item = &OrbitCorner> {
        self.boundary.iter().map(|s| &self.ocr[s.corner.0])
    }
}
