use ndarray::{Array4, Axis};
use tracing::debug;

use crate::available::AvailableSet;
use crate::coord::Coord;
use crate::direction::{Direction, DIRECTIONS};
use crate::error::{BoardError, Result};
use crate::player::Player;

/// Edge length of the default cubic board.
pub const DEFAULT_SIZE: usize = 4;
/// Run length needed to win on the default board.
pub const DEFAULT_N_IN_ROW: usize = 4;
/// Number of planes in [`Board::encode_state`].
pub const NUM_PLANES: usize = 4;

/// A 3D n-in-a-row board.
///
/// Cells are indexed by `d * (width * height) + h * width + w`.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    depth: usize,
    n_in_row: usize,
    /// Dense occupancy, `None` marks an empty cell
    cells: Vec<Option<Player>>,
    available: AvailableSet,
    current_player: Player,
    last_move: Option<usize>,
}

impl Board {
    /// Create an empty board with [`Player::One`] to move.
    pub fn new(width: usize, height: usize, depth: usize, n_in_row: usize) -> Result<Self> {
        let num_cells = check_dimensions(width, height, depth, n_in_row)?;

        Ok(Self {
            width,
            height,
            depth,
            n_in_row,
            cells: vec![None; num_cells],
            available: AvailableSet::full(num_cells),
            current_player: Player::One,
            last_move: None,
        })
    }

    /// Reset to an empty board, with `Player::ALL[start_player]` to move.
    pub fn init(&mut self, start_player: usize) -> Result<()> {
        let num_cells = check_dimensions(self.width, self.height, self.depth, self.n_in_row)?;
        let Some(&first) = Player::ALL.get(start_player) else {
            return Err(BoardError::InvalidStartPlayer(start_player));
        };

        self.cells = vec![None; num_cells];
        self.available = AvailableSet::full(num_cells);
        self.current_player = first;
        self.last_move = None;

        debug!(
            width = self.width,
            height = self.height,
            depth = self.depth,
            n_in_row = self.n_in_row,
            first = first.id(),
            "board initialized"
        );
        Ok(())
    }

    /// Rebuild a position from an unordered list of pieces per side.
    ///
    /// The first player moves first, so it must own as many pieces as the
    /// second player or exactly one more. Pieces are replayed alternately in
    /// the order given.
    pub fn from_placements(
        width: usize,
        height: usize,
        depth: usize,
        n_in_row: usize,
        first: &[Coord],
        second: &[Coord],
    ) -> Result<Self> {
        if first.len() < second.len() || first.len() > second.len() + 1 {
            return Err(BoardError::PieceCountMismatch {
                first: first.len(),
                second: second.len(),
            });
        }

        let mut board = Self::new(width, height, depth, n_in_row)?;
        for (i, &coord) in first.iter().enumerate() {
            board.place(coord)?;
            if let Some(&reply) = second.get(i) {
                board.place(reply)?;
            }
        }

        debug!(stones = board.stone_count(), "board rebuilt from placements");
        Ok(board)
    }

    fn place(&mut self, coord: Coord) -> Result<()> {
        let mv = self
            .coord_to_move(coord)
            .ok_or_else(|| BoardError::InvalidCoord(format!("{coord} is off the board")))?;
        self.try_move(mv)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn n_in_row(&self) -> usize {
        self.n_in_row
    }

    pub fn num_cells(&self) -> usize {
        self.width * self.height * self.depth
    }

    pub fn players(&self) -> [Player; 2] {
        Player::ALL
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Currently legal moves, in no particular order.
    pub fn legal_moves(&self) -> &[usize] {
        self.available.as_slice()
    }

    pub fn is_available(&self, mv: usize) -> bool {
        self.available.contains(mv)
    }

    /// Occupant of `mv`, or `None` if it is empty or off the board.
    pub fn cell(&self, mv: usize) -> Option<Player> {
        self.cells.get(mv).copied().flatten()
    }

    pub fn stone_count(&self) -> usize {
        self.num_cells() - self.available.len()
    }

    pub fn coord_to_move(&self, coord: Coord) -> Option<usize> {
        if coord.d < self.depth && coord.h < self.height && coord.w < self.width {
            Some(self.index_of(coord))
        } else {
            None
        }
    }

    /// Like [`Board::coord_to_move`] but accepts untrusted signed input.
    pub fn coord_to_move_signed(&self, d: i64, h: i64, w: i64) -> Option<usize> {
        let coord = Coord::new(
            usize::try_from(d).ok()?,
            usize::try_from(h).ok()?,
            usize::try_from(w).ok()?,
        );
        self.coord_to_move(coord)
    }

    pub fn move_to_coord(&self, mv: usize) -> Option<Coord> {
        (mv < self.num_cells()).then(|| self.coord_of(mv))
    }

    fn index_of(&self, coord: Coord) -> usize {
        coord.d * (self.width * self.height) + coord.h * self.width + coord.w
    }

    fn coord_of(&self, mv: usize) -> Coord {
        let layer = self.width * self.height;
        let rem = mv % layer;
        Coord::new(mv / layer, rem / self.width, rem % self.width)
    }

    /// Place a stone for the current player and pass the turn.
    ///
    /// # Panics
    /// If `mv` is not an available cell. Callers must only pass moves taken
    /// from [`Board::legal_moves`]; use [`Board::try_move`] for untrusted input.
    pub fn do_move(&mut self, mv: usize) {
        assert!(
            self.available.remove(mv),
            "move {mv} is not available (occupied or off the board)"
        );
        self.cells[mv] = Some(self.current_player);
        self.current_player = self.current_player.opponent();
        self.last_move = Some(mv);
    }

    /// Checked variant of [`Board::do_move`].
    pub fn try_move(&mut self, mv: usize) -> Result<()> {
        if mv >= self.num_cells() {
            return Err(BoardError::MoveOutOfRange {
                mv,
                num_cells: self.num_cells(),
            });
        }
        if !self.available.contains(mv) {
            return Err(BoardError::CellOccupied(mv));
        }
        self.do_move(mv);
        Ok(())
    }

    /// Encode the position from the point of view of the player to move.
    ///
    /// Shape is `(4, depth, height, width)`:
    /// - plane 0: stones of the player to move
    /// - plane 1: stones of the opponent
    /// - plane 2: the last move, if any
    /// - plane 3: all ones when an even number of stones has been placed
    pub fn encode_state(&self) -> Array4<f32> {
        let mut state = Array4::<f32>::zeros((NUM_PLANES, self.depth, self.height, self.width));

        for (mv, cell) in self.cells.iter().enumerate() {
            let Some(owner) = *cell else { continue };
            let plane = if owner == self.current_player { 0 } else { 1 };
            let c = self.coord_of(mv);
            state[[plane, c.d, c.h, c.w]] = 1.0;
        }

        if let Some(last) = self.last_move {
            let c = self.coord_of(last);
            state[[2, c.d, c.h, c.w]] = 1.0;
        }

        if self.stone_count() % 2 == 0 {
            state.index_axis_mut(Axis(0), 3).fill(1.0);
        }

        state
    }

    /// The player owning a run of `n_in_row` stones, if any.
    pub fn winner(&self) -> Option<Player> {
        let n = self.n_in_row;
        // The loser has placed at least n - 1 stones by the time the winner has n.
        if self.stone_count() < 2 * n - 1 {
            return None;
        }

        for (mv, cell) in self.cells.iter().enumerate() {
            let Some(player) = *cell else { continue };
            let origin = self.coord_of(mv);
            if DIRECTIONS
                .iter()
                .any(|dir| self.run_length(origin, dir, player) >= n)
            {
                return Some(player);
            }
        }

        None
    }

    /// The player whose most recent move completed a run, if it did.
    ///
    /// Equivalent to [`Board::winner`] for positions reached by play that
    /// stopped at the first win, but only scans the 13 lines through the
    /// last move.
    pub fn last_move_won(&self) -> Option<Player> {
        let mv = self.last_move?;
        let player = self.cells[mv]?;
        let origin = self.coord_of(mv);
        DIRECTIONS
            .iter()
            .any(|dir| self.run_length(origin, dir, player) >= self.n_in_row)
            .then_some(player)
    }

    /// Length of the run of `player` stones through `origin` along `dir`,
    /// capped at `n_in_row`.
    fn run_length(&self, origin: Coord, dir: &Direction, player: Player) -> usize {
        let n = self.n_in_row;
        let mut count = self.walk(Some(origin), dir.forward(), player, n);
        if count < n {
            let behind = self.step(origin, dir.backward());
            count += self.walk(behind, dir.backward(), player, n - count);
        }
        count
    }

    fn walk(
        &self,
        start: Option<Coord>,
        delta: (isize, isize, isize),
        player: Player,
        limit: usize,
    ) -> usize {
        let mut count = 0;
        let mut at = start;
        for _ in 0..limit {
            let Some(coord) = at else { break };
            if self.cells[self.index_of(coord)] != Some(player) {
                break;
            }
            count += 1;
            at = self.step(coord, delta);
        }
        count
    }

    fn step(&self, coord: Coord, (dd, dh, dw): (isize, isize, isize)) -> Option<Coord> {
        let d = coord.d.checked_add_signed(dd)?;
        let h = coord.h.checked_add_signed(dh)?;
        let w = coord.w.checked_add_signed(dw)?;
        let next = Coord::new(d, h, w);
        self.coord_to_move(next).map(|_| next)
    }

    /// `(ended, winner)`; a full board without a winner is a draw.
    pub fn game_end(&self) -> (bool, Option<Player>) {
        if let Some(winner) = self.winner() {
            return (true, Some(winner));
        }
        (self.available.is_empty(), None)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_end().0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            depth: DEFAULT_SIZE,
            n_in_row: DEFAULT_N_IN_ROW,
            cells: vec![None; DEFAULT_SIZE.pow(3)],
            available: AvailableSet::full(DEFAULT_SIZE.pow(3)),
            current_player: Player::One,
            last_move: None,
        }
    }
}

/// Validate the dimensions and return the number of cells.
fn check_dimensions(width: usize, height: usize, depth: usize, n_in_row: usize) -> Result<usize> {
    let invalid = || BoardError::InvalidDimensions {
        width,
        height,
        depth,
        n_in_row,
    };
    if n_in_row == 0 || width.min(height).min(depth) < n_in_row {
        return Err(invalid());
    }
    width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(depth))
        .ok_or_else(invalid)
}
