use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;
use crate::topology::EdgeFlags;

/// Which input polygons a face lies inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceClass {
    /// Inside A, outside B.
    AOnly,
    /// Inside B, outside A.
    BOnly,
    /// Inside both polygons.
    Intersection,
    /// Enclosed by the arrangement but inside neither polygon.
    Hole,
}

impl FaceClass {
    /// Classifies a face from the OR of the flags of the edges walked around it.
    #[must_use]
    pub fn from_flags(flags: EdgeFlags) -> Self {
        let a = flags.contains(EdgeFlags::INSIDE_A);
        let b = flags.contains(EdgeFlags::INSIDE_B);
        match (a, b) {
            (true, true) => Self::Intersection,
            (true, false) => Self::AOnly,
            (false, true) => Self::BOnly,
            (false, false) => Self::Hole,
        }
    }
}

/// The classified overlay of two intersecting polygons.
///
/// All loops are lists of indices into the shared `vertices` table. Bounded
/// faces run counter-clockwise; the outer `boundary` runs clockwise. A vertex
/// where the boundary pinches appears in it more than once.
///
/// A face is classified by the edges around it only. A polygon nested inside
/// the other and touching its boundary at a single vertex therefore yields an
/// `a_only` and a `b_only` face and no `intersection`, although the inner
/// face lies inside both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    pub vertices: Vec<Point2>,
    pub boundary: Vec<usize>,
    pub a_only: Vec<Vec<usize>>,
    pub b_only: Vec<Vec<usize>>,
    pub intersection: Vec<Vec<usize>>,
    pub holes: Vec<Vec<usize>>,
}

impl Arrangement {
    /// Creates an arrangement with an outer boundary and no faces yet.
    #[must_use]
    pub fn new(vertices: Vec<Point2>, boundary: Vec<usize>) -> Self {
        Self {
            vertices,
            boundary,
            ..Self::default()
        }
    }

    /// Files `face` under the class its flags select.
    pub fn push_face(&mut self, face: Vec<usize>, flags: EdgeFlags) {
        match FaceClass::from_flags(flags) {
            FaceClass::AOnly => self.a_only.push(face),
            FaceClass::BOnly => self.b_only.push(face),
            FaceClass::Intersection => self.intersection.push(face),
            FaceClass::Hole => self.holes.push(face),
        }
    }

    /// Faces of one class.
    #[must_use]
    pub fn faces(&self, class: FaceClass) -> &[Vec<usize>] {
        match class {
            FaceClass::AOnly => &self.a_only,
            FaceClass::BOnly => &self.b_only,
            FaceClass::Intersection => &self.intersection,
            FaceClass::Hole => &self.holes,
        }
    }

    /// Total number of bounded faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.a_only.len() + self.b_only.len() + self.intersection.len() + self.holes.len()
    }

    /// Resolves a vertex-index loop to positions.
    #[must_use]
    pub fn loop_points(&self, indices: &[usize]) -> Vec<Point2> {
        indices
            .iter()
            .filter_map(|&i| self.vertices.get(i).copied())
            .collect()
    }

    /// Unsigned area enclosed by a vertex-index loop.
    #[must_use]
    pub fn loop_area(&self, indices: &[usize]) -> f64 {
        signed_area_2d(&self.loop_points(indices)).abs()
    }

    /// Summed area of every face of one class.
    #[must_use]
    pub fn class_area(&self, class: FaceClass) -> f64 {
        self.faces(class).iter().map(|f| self.loop_area(f)).sum()
    }
}
