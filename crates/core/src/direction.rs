/// A line direction through the grid, as a `(depth, height, width)` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub name: &'static str,
    pub dd: isize,
    pub dh: isize,
    pub dw: isize,
}

impl Direction {
    const fn new(name: &'static str, dd: isize, dh: isize, dw: isize) -> Self {
        Self { name, dd, dh, dw }
    }

    pub fn forward(&self) -> (isize, isize, isize) {
        (self.dd, self.dh, self.dw)
    }

    pub fn backward(&self) -> (isize, isize, isize) {
        (-self.dd, -self.dh, -self.dw)
    }
}

/// The 13 canonical line directions of a 3D lattice.
///
/// Each of the 26 neighbour offsets appears here either as itself or as its
/// negation, never both: a line and its reverse are the same line.
pub const DIRECTIONS: [Direction; 13] = [
    // axes
    Direction::new("width", 0, 0, 1),
    Direction::new("height", 0, 1, 0),
    Direction::new("depth", 1, 0, 0),
    // face diagonals
    Direction::new("height+width", 0, 1, 1),
    Direction::new("height-width", 0, 1, -1),
    Direction::new("depth+width", 1, 0, 1),
    Direction::new("depth-width", 1, 0, -1),
    Direction::new("depth+height", 1, 1, 0),
    Direction::new("depth-height", 1, -1, 0),
    // space diagonals
    Direction::new("depth+height+width", 1, 1, 1),
    Direction::new("depth+height-width", 1, 1, -1),
    Direction::new("depth-height+width", 1, -1, 1),
    Direction::new("depth-height-width", 1, -1, -1),
];
