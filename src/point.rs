/// A site coordinate on the 2D lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    /// Position along the dimer-forming (x) direction.
    pub x: usize,
    /// Position along the perpendicular (y) direction.
    pub y: usize,
}

impl Point {
    /// The point at `(x, y)`.
    pub fn new(x: usize, y: usize) -> Self {
        Point { x, y }
    }

    /// Linearize to a 1D index on an `lx` by `ly` lattice, row by row.
    /// Panics if the point is off the lattice.
    pub fn to_index(self, lx: usize, ly: usize) -> usize {
        assert!(
            self.x < lx && self.y < ly,
            "point ({}, {}) out of bounds on {}x{} lattice",
            self.x,
            self.y,
            lx,
            ly
        );
        self.y * lx + self.x
    }

    /// Inverse of [`to_index`](Self::to_index). Panics if `index` does not
    /// name a site of an `lx` by `ly` lattice.
    pub fn from_index(index: usize, lx: usize, ly: usize) -> Self {
        assert!(
            index < lx * ly,
            "index {} out of bounds on {}x{} lattice",
            index,
            lx,
            ly
        );
        Point {
            x: index % lx,
            y: index / lx,
        }
    }
}
