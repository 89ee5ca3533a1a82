use crate::math::Point2;

use super::arrangement::Arrangement;
use super::OverlayResult;

/// Boolean operation derived from an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp2D {
    Union,
    Intersect,
    /// A minus B.
    SubtractAB,
    /// B minus A.
    SubtractBA,
    SymmetricDifference,
}

/// A polygonal region: counter-clockwise outer ring plus clockwise hole rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl Region {
    #[must_use]
    pub fn simple(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Region with one hole; `hole` is given counter-clockwise and stored reversed.
    #[must_use]
    pub fn with_hole(outer: Vec<Point2>, hole: &[Point2]) -> Self {
        Self {
            outer,
            holes: vec![hole.iter().rev().copied().collect()],
        }
    }
}

/// Collects the regions `op` keeps.
///
/// `a` and `b` are the input loops in counter-clockwise order; they are used
/// when the polygons do not touch. For an intersecting overlay the regions
/// are the arrangement faces themselves: adjacent faces of the same class
/// are not dissolved into one ring.
///
/// | Result      | Union    | Intersect | A - B    | B - A    | Sym. diff |
/// |-------------|----------|-----------|----------|----------|-----------|
/// | disjoint    | A, B     | -         | A        | B        | A, B      |
/// | A inside B  | B        | A         | -        | B \ A    | B \ A     |
/// | B inside A  | A        | B         | A \ B    | -        | A \ B     |
#[must_use]
pub fn select_regions(
    result: &OverlayResult,
    a: &[Point2],
    b: &[Point2],
    op: BooleanOp2D,
) -> Vec<Region> {
    match result {
        OverlayResult::Disjoint => match op {
            BooleanOp2D::Union | BooleanOp2D::SymmetricDifference => {
                vec![Region::simple(a.to_vec()), Region::simple(b.to_vec())]
            }
            BooleanOp2D::Intersect => Vec::new(),
            BooleanOp2D::SubtractAB => vec![Region::simple(a.to_vec())],
            BooleanOp2D::SubtractBA => vec![Region::simple(b.to_vec())],
        },
        OverlayResult::AInsideB => nested(b, a, op, false),
        OverlayResult::BInsideA => nested(a, b, op, true),
        OverlayResult::Intersecting(arrangement) => from_arrangement(arrangement, op),
    }
}

/// Regions for `inner` strictly inside `outer`; `outer_is_a` tells which
/// input the outer loop came from.
fn nested(outer: &[Point2], inner: &[Point2], op: BooleanOp2D, outer_is_a: bool) -> Vec<Region> {
    let ring = || vec![Region::with_hole(outer.to_vec(), inner)];
    match (op, outer_is_a) {
        (BooleanOp2D::Union, _) => vec![Region::simple(outer.to_vec())],
        (BooleanOp2D::Intersect, _) => vec![Region::simple(inner.to_vec())],
        (BooleanOp2D::SymmetricDifference, _)
        | (BooleanOp2D::SubtractAB, true)
        | (BooleanOp2D::SubtractBA, false) => ring(),
        (BooleanOp2D::SubtractAB | BooleanOp2D::SubtractBA, _) => Vec::new(),
    }
}

fn from_arrangement(arrangement: &Arrangement, op: BooleanOp2D) -> Vec<Region> {
    let faces = |loops: &[Vec<usize>]| -> Vec<Region> {
        loops
            .iter()
            .map(|f| Region::simple(arrangement.loop_points(f)))
            .collect()
    };

    match op {
        BooleanOp2D::Union => {
            // The outer boundary is walked clockwise, holes counter-clockwise.
            let mut outer = arrangement.loop_points(&arrangement.boundary);
            outer.reverse();
            let holes = arrangement
                .holes
                .iter()
                .map(|h| {
                    let mut ring = arrangement.loop_points(h);
                    ring.reverse();
                    ring
                })
                .collect();
            vec![Region { outer, holes }]
        }
        BooleanOp2D::Intersect => faces(&arrangement.intersection),
        BooleanOp2D::SubtractAB => faces(&arrangement.a_only),
        BooleanOp2D::SubtractBA => faces(&arrangement.b_only),
        BooleanOp2D::SymmetricDifference => {
            let mut regions = faces(&arrangement.a_only);
            regions.extend(faces(&arrangement.b_only));
            regions
        }
    }
}
