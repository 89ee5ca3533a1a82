use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Membership bitmask carried by one directed edge.
///
/// A bit is set when the edge, walked in its direction, has the interior of
/// the corresponding input polygon on its left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeFlags(u8);

impl EdgeFlags {
    pub const NONE: Self = Self(0);
    pub const INSIDE_A: Self = Self(0b01);
    pub const INSIDE_B: Self = Self(0b10);
    pub const INSIDE_BOTH: Self = Self(0b11);

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for EdgeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EdgeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for EdgeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.write_str("none"),
            Self::INSIDE_A => f.write_str("A"),
            Self::INSIDE_B => f.write_str("B"),
            _ => f.write_str("AB"),
        }
    }
}

/// Canonical key of an undirected edge: `(min(u, v), max(u, v))`.
///
/// Only a bookkeeping key; it is invalidated by any structural mutation of
/// the graph that renumbers vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub lo: usize,
    pub hi: usize,
}

impl EdgeKey {
    #[must_use]
    pub fn new(u: usize, v: usize) -> Self {
        if u <= v {
            Self { lo: u, hi: v }
        } else {
            Self { lo: v, hi: u }
        }
    }

    /// Returns true if the two edges have an endpoint in common.
    #[must_use]
    pub fn shares_endpoint(&self, other: &Self) -> bool {
        self.lo == other.lo || self.lo == other.hi || self.hi == other.lo || self.hi == other.hi
    }
}
