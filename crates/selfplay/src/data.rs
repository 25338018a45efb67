use std::fmt;

use gomoku3d_core::Player;
use ndarray::Array4;

/// Result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Player),
    Draw,
}

impl GameResult {
    pub fn from_winner(winner: Option<Player>) -> Self {
        winner.map_or(GameResult::Draw, GameResult::Win)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win(p) => Some(*p),
            GameResult::Draw => None,
        }
    }

    /// Outcome label from `mover`'s point of view: +1 win, -1 loss, 0 draw.
    pub fn value_for(&self, mover: Player) -> f32 {
        match self {
            GameResult::Win(p) if *p == mover => 1.0,
            GameResult::Win(_) => -1.0,
            GameResult::Draw => 0.0,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(p) => write!(f, "{p} wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// Record of a single self-play game
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Encoded position before each move
    pub states: Vec<Array4<f32>>,
    /// Move distribution reported by the agent at each move
    pub policies: Vec<Vec<f32>>,
    /// Player who was to move in each recorded position
    pub movers: Vec<Player>,
    /// Move actually played
    pub moves: Vec<usize>,
    /// Final result of the game
    pub result: GameResult,
}

impl GameRecord {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            policies: Vec::new(),
            movers: Vec::new(),
            moves: Vec::new(),
            result: GameResult::Draw,
        }
    }

    pub fn set_result(&mut self, result: GameResult) {
        self.result = result;
    }

    pub fn add_move(&mut self, state: Array4<f32>, policy: Vec<f32>, mover: Player, action: usize) {
        self.states.push(state);
        self.policies.push(policy);
        self.movers.push(mover);
        self.moves.push(action);
    }

    /// Number of recorded moves
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// One (state, policy, outcome) triple for the learner
#[derive(Debug, Clone)]
pub struct TrainingExample {
    /// Encoded position, shape (4, depth, height, width)
    pub state: Array4<f32>,
    /// Target move distribution, one entry per cell
    pub policy: Vec<f32>,
    /// Target value: -1.0, 0.0 or 1.0
    pub value: f32,
}

impl TrainingExample {
    pub fn new(state: Array4<f32>, policy: Vec<f32>, value: f32) -> Self {
        Self {
            state,
            policy,
            value,
        }
    }
}
