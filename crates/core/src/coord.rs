use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// A cell position as `(depth, height, width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub d: usize,
    pub h: usize,
    pub w: usize,
}

impl Coord {
    pub const fn new(d: usize, h: usize, w: usize) -> Self {
        Self { d, h, w }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.d, self.h, self.w)
    }
}

/// Parses `"d,h,w"`, tolerating whitespace around each component.
///
/// Only the syntax is checked here; whether the coordinate lies on a given
/// board is up to [`crate::Board::coord_to_move`].
impl FromStr for Coord {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [d, h, w] = parts.as_slice() else {
            return Err(BoardError::InvalidCoord(format!(
                "expected 3 comma-separated values, got {s:?}"
            )));
        };

        let parse = |part: &str| {
            part.parse::<usize>()
                .map_err(|e| BoardError::InvalidCoord(format!("{part:?}: {e}")))
        };

        Ok(Coord::new(parse(d)?, parse(h)?, parse(w)?))
    }
}
