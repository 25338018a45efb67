use std::collections::VecDeque;

use anyhow::Result;
use gomoku3d_core::{Board, Player};
use gomoku3d_mcts::{MctsConfig, UniformModel};
use gomoku3d_selfplay::{
    play_game, Game, GamePhase, GamePlayer, GameResult, MctsPlayer, SelfPlayAgent,
};

/// Full 4x4x4 position without any line of four
const DRAW_PATTERN: &str = "2221212211211211112112122121221222122212221211211212112111222111";

struct ScriptedPlayer {
    name: &'static str,
    moves: VecDeque<usize>,
    side: Option<Player>,
}

impl ScriptedPlayer {
    fn new(name: &'static str, moves: &[usize]) -> Self {
        Self {
            name,
            moves: moves.iter().copied().collect(),
            side: None,
        }
    }
}

impl GamePlayer for ScriptedPlayer {
    fn set_player(&mut self, player: Player) {
        self.side = Some(player);
    }

    fn get_action(&mut self, _board: &Board) -> Result<usize> {
        self.moves
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("{} ran out of moves", self.name))
    }

    fn name(&self) -> String {
        self.name.to_string()
    }
}

/// Plays a fixed move sequence and reports a one-hot distribution.
struct ScriptedAgent {
    moves: VecDeque<usize>,
    resets: usize,
}

impl ScriptedAgent {
    fn new(moves: Vec<usize>) -> Self {
        Self {
            moves: moves.into(),
            resets: 0,
        }
    }
}

impl SelfPlayAgent for ScriptedAgent {
    fn get_action_with_probs(
        &mut self,
        board: &Board,
        _temperature: f32,
    ) -> Result<(usize, Vec<f32>)> {
        let mv = self
            .moves
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))?;
        let mut probs = vec![0.0; board.num_cells()];
        probs[mv] = 1.0;
        Ok((mv, probs))
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

fn draw_sequence() -> Vec<usize> {
    let ones: Vec<usize> = DRAW_PATTERN
        .char_indices()
        .filter(|&(_, c)| c == '1')
        .map(|(i, _)| i)
        .collect();
    let twos: Vec<usize> = DRAW_PATTERN
        .char_indices()
        .filter(|&(_, c)| c == '2')
        .map(|(i, _)| i)
        .collect();
    ones.iter().zip(&twos).flat_map(|(&a, &b)| [a, b]).collect()
}

#[test]
fn first_player_completes_a_row() {
    let mut a = ScriptedPlayer::new("alice", &[0, 1, 2, 3]);
    let mut b = ScriptedPlayer::new("bob", &[4, 5, 6]);
    let mut game = Game::default();

    let result = game.start_play(&mut a, &mut b, 0, false).unwrap();

    assert_eq!(result, GameResult::Win(Player::One));
    assert_eq!(game.phase(), GamePhase::Ended);
    assert_eq!(game.board().stone_count(), 7);
    assert_eq!(a.side, Some(Player::One));
    assert_eq!(b.side, Some(Player::Two));
}

#[test]
fn start_player_one_lets_second_side_open() {
    let mut a = ScriptedPlayer::new("alice", &[0, 1, 2]);
    let mut b = ScriptedPlayer::new("bob", &[4, 5, 6, 7]);
    let mut game = Game::default();

    let result = game.start_play(&mut a, &mut b, 1, false).unwrap();

    // sides stay fixed, only the opening move changes hands
    assert_eq!(a.side, Some(Player::One));
    assert_eq!(result, GameResult::Win(Player::Two));
    assert_eq!(game.board().cell(4), Some(Player::Two));
}

#[test]
fn invalid_start_player_is_rejected() {
    let mut a = ScriptedPlayer::new("alice", &[0]);
    let mut b = ScriptedPlayer::new("bob", &[1]);
    let mut game = Game::default();

    assert!(game.start_play(&mut a, &mut b, 2, false).is_err());
    assert_eq!(game.phase(), GamePhase::NotStarted);
    assert_eq!(a.side, None);
}

#[test]
fn occupied_cell_is_an_error() {
    let mut a = ScriptedPlayer::new("alice", &[0, 1]);
    let mut b = ScriptedPlayer::new("bob", &[0]);
    let mut game = Game::default();

    let err = game.start_play(&mut a, &mut b, 0, false).unwrap_err();
    assert!(err.to_string().contains("bob"));
}

#[test]
fn full_board_without_line_is_a_draw() {
    let sequence = draw_sequence();
    let (ones, twos): (Vec<usize>, Vec<usize>) = sequence
        .chunks(2)
        .map(|pair| (pair[0], pair[1]))
        .unzip();
    let mut a = ScriptedPlayer::new("alice", &ones);
    let mut b = ScriptedPlayer::new("bob", &twos);
    let mut game = Game::default();

    let result = game.start_play(&mut a, &mut b, 0, false).unwrap();

    assert_eq!(result, GameResult::Draw);
    assert_eq!(game.board().stone_count(), 64);
}

#[test]
fn self_play_labels_winner_and_loser() {
    let mut agent = ScriptedAgent::new(vec![0, 4, 1, 5, 2, 6, 3]);
    let mut game = Game::default();

    let (result, examples) = game.start_self_play(&mut agent, false, 1.0).unwrap();

    assert_eq!(result, GameResult::Win(Player::One));
    assert_eq!(agent.resets, 1);
    let values: Vec<f32> = examples.iter().map(|e| e.value).collect();
    assert_eq!(values, vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);

    // positions are recorded before the move is played
    assert_eq!(examples[0].state[[3, 0, 0, 0]], 1.0);
    assert_eq!(examples[0].state.slice(ndarray::s![0..3, .., .., ..]).sum(), 0.0);
    assert_eq!(examples[1].state[[1, 0, 0, 0]], 1.0);
    assert_eq!(examples[1].state[[3, 0, 0, 0]], 0.0);
    assert_eq!(examples[2].policy[4], 0.0);
    assert_eq!(examples[2].policy[1], 1.0);
}

#[test]
fn self_play_draw_labels_zero() {
    let mut agent = ScriptedAgent::new(draw_sequence());
    let mut game = Game::default();

    let (result, examples) = game.start_self_play(&mut agent, false, 1.0).unwrap();

    assert_eq!(result, GameResult::Draw);
    assert_eq!(examples.len(), 64);
    assert!(examples.iter().all(|e| e.value == 0.0));
}

#[test]
fn self_play_with_search_agent_finishes() {
    let config = MctsConfig::default()
        .with_simulations(8)
        .with_dirichlet_noise(0.3, 0.25);
    let board = Board::new(3, 3, 3, 3).unwrap();

    let record = play_game(board, &UniformModel, &config).unwrap();

    assert!(!record.is_empty());
    assert!(record.len() <= 27);
    for (policy, &mv) in record.policies.iter().zip(&record.moves) {
        assert_eq!(policy.len(), 27);
        assert!(policy[mv] > 0.0);
    }
    // movers alternate starting with the first player
    for (i, mover) in record.movers.iter().enumerate() {
        let expected = if i % 2 == 0 { Player::One } else { Player::Two };
        assert_eq!(*mover, expected);
    }
}

#[test]
fn search_player_plays_a_full_match() {
    let config = MctsConfig::default().with_simulations(16);
    let mut a = MctsPlayer::new(UniformModel, config.clone());
    let mut b = MctsPlayer::new(UniformModel, config);
    let mut game = Game::new(Board::new(3, 3, 3, 3).unwrap());

    let result = game.start_play(&mut a, &mut b, 0, false).unwrap();

    assert_eq!(game.phase(), GamePhase::Ended);
    assert_eq!(result.winner(), game.board().winner());
}
