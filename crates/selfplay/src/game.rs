use anyhow::{anyhow, Result};
use gomoku3d_core::Board;
use gomoku3d_mcts::{MctsConfig, PolicyValueModel};
use tracing::{debug, info};

use crate::data::{GameRecord, GameResult, TrainingExample};
use crate::mcts_player::MctsPlayer;
use crate::player::{GamePlayer, SelfPlayAgent};
use crate::render::render;

/// Lifecycle of a [`Game`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Ended,
}

/// Drives a board through a full game between players or an agent against itself.
pub struct Game {
    board: Board,
    phase: GamePhase,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            phase: GamePhase::NotStarted,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Play one game between two players.
    ///
    /// `player_a` always controls `Player::One` and `player_b`
    /// `Player::Two`; `start_player` (0 or 1) picks which side moves first.
    /// When `display` is set the board is printed after every move.
    pub fn start_play(
        &mut self,
        player_a: &mut dyn GamePlayer,
        player_b: &mut dyn GamePlayer,
        start_player: usize,
        display: bool,
    ) -> Result<GameResult> {
        self.board.init(start_player)?;
        self.phase = GamePhase::InProgress;

        let [first, second] = self.board.players();
        player_a.set_player(first);
        player_b.set_player(second);
        info!(
            player_a = %player_a.name(),
            player_b = %player_b.name(),
            start_player,
            "game started"
        );

        if display {
            println!("{}", render(&self.board, first, second));
        }

        loop {
            let mover = self.board.current_player();
            let player: &mut dyn GamePlayer = if mover == first {
                &mut *player_a
            } else {
                &mut *player_b
            };

            let mv = player.get_action(&self.board)?;
            self.board
                .try_move(mv)
                .map_err(|e| anyhow!("{} chose an illegal move: {}", player.name(), e))?;
            debug!(player = mover.id(), mv, "move played");

            if display {
                println!("{}", render(&self.board, first, second));
            }

            let (end, winner) = self.board.game_end();
            if end {
                let result = GameResult::from_winner(winner);
                self.phase = GamePhase::Ended;
                info!(result = %result, moves = self.board.stone_count(), "game finished");

                if display {
                    match winner {
                        Some(w) if w == first => {
                            println!("Game end. Winner is {}", player_a.name())
                        }
                        Some(_) => println!("Game end. Winner is {}", player_b.name()),
                        None => println!("Game end. Tie"),
                    }
                }
                return Ok(result);
            }
        }
    }

    /// Play one game of `agent` against itself, recording every position.
    ///
    /// `Player::One` moves first. The agent's state is reset once the game
    /// is over.
    pub fn record_self_play<A: SelfPlayAgent + ?Sized>(
        &mut self,
        agent: &mut A,
        display: bool,
        temperature: f32,
    ) -> Result<GameRecord> {
        self.board.init(0)?;
        self.phase = GamePhase::InProgress;

        let [first, second] = self.board.players();
        let mut record = GameRecord::new();

        loop {
            let mover = self.board.current_player();
            let (mv, probs) = agent.get_action_with_probs(&self.board, temperature)?;
            if probs.len() != self.board.num_cells() {
                anyhow::bail!(
                    "agent returned {} move probabilities for {} cells",
                    probs.len(),
                    self.board.num_cells()
                );
            }

            let state = self.board.encode_state();
            self.board
                .try_move(mv)
                .map_err(|e| anyhow!("self-play agent chose an illegal move: {}", e))?;
            record.add_move(state, probs, mover, mv);
            debug!(player = mover.id(), mv, "self-play move");

            if display {
                println!("{}", render(&self.board, first, second));
            }

            let (end, winner) = self.board.game_end();
            if end {
                record.set_result(GameResult::from_winner(winner));
                self.phase = GamePhase::Ended;
                agent.reset();
                info!(result = %record.result, moves = record.len(), "self-play game finished");

                if display {
                    match winner {
                        Some(w) => println!("Game end. Winner is {}", w),
                        None => println!("Game end. Tie"),
                    }
                }
                return Ok(record);
            }
        }
    }

    /// Self-play one game and label every position with the final outcome
    /// from the point of view of the player who was to move there.
    pub fn start_self_play<A: SelfPlayAgent + ?Sized>(
        &mut self,
        agent: &mut A,
        display: bool,
        temperature: f32,
    ) -> Result<(GameResult, Vec<TrainingExample>)> {
        let record = self.record_self_play(agent, display, temperature)?;
        Ok((record.result, game_to_training_examples(&record)))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

/// Play a single self-play game with a search-backed agent
///
/// # Arguments
/// * `board` - Board with the desired dimensions; it is reset before play
/// * `model` - Model for MCTS evaluation
/// * `config` - MCTS configuration, including temperature and root noise
pub fn play_game<M: PolicyValueModel>(
    board: Board,
    model: &M,
    config: &MctsConfig,
) -> Result<GameRecord> {
    let mut agent = MctsPlayer::for_self_play(model, config.clone());
    let mut game = Game::new(board);
    game.record_self_play(&mut agent, false, config.temperature)
}

/// Convert game record to training examples
///
/// Each position is paired with the policy reported for it and the game
/// outcome from the mover's perspective: +1.0 win, -1.0 loss, 0.0 draw.
pub fn game_to_training_examples(record: &GameRecord) -> Vec<TrainingExample> {
    record
        .states
        .iter()
        .zip(&record.policies)
        .zip(&record.movers)
        .map(|((state, policy), &mover)| {
            TrainingExample::new(state.clone(), policy.clone(), record.result.value_for(mover))
        })
        .collect()
}
