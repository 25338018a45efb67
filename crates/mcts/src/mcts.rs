use gomoku3d_core::Board;
use rand::distributions::{Distribution, WeightedIndex};
use rand::thread_rng;
use rand::Rng;
use tracing::debug;

use crate::config::MctsConfig;
use crate::dirichlet::add_dirichlet_noise_to_root;
use crate::error::{MctsError, Result};
use crate::evaluation::PolicyValueModel;
use crate::expansion::expand_and_evaluate;
use crate::search_result::SearchResult;
use crate::tree::{MctsTree, NodeId};

/// Monte Carlo Tree Search using the AlphaZero (PUCT) algorithm
///
/// The tree is kept between searches. When the next position is one or two
/// moves past the previous root, the matching subtree becomes the new root
/// and its statistics are reused; any other position starts a fresh tree.
pub struct Mcts {
    tree: MctsTree,
    /// Position the current root stands for
    root_board: Option<Board>,
}

impl Mcts {
    pub fn new() -> Self {
        Self {
            tree: MctsTree::new(),
            root_board: None,
        }
    }

    /// Run a search from `board`.
    ///
    /// Returns the chosen move and the visit distribution over all cells.
    pub fn search<M: PolicyValueModel>(
        &mut self,
        board: &Board,
        model: &M,
        config: &MctsConfig,
    ) -> Result<SearchResult> {
        if board.is_game_over() {
            return Err(MctsError::TerminalPosition);
        }

        // 1. Root, reusing the subtree of the moves played since the last search
        let root_id = self.prepare_root(board);
        if !self.tree.nodes[root_id].is_expanded {
            expand_and_evaluate(&mut self.tree, root_id, board, model)?;
        }

        // 2. Root noise (self-play)
        if config.add_dirichlet_noise {
            add_dirichlet_noise_to_root(
                &mut self.tree,
                root_id,
                config.dirichlet_alpha,
                config.dirichlet_epsilon,
                &mut thread_rng(),
            )?;
        }

        // 3. Simulations: select, expand/evaluate, backup
        for _ in 0..config.num_simulations {
            let (leaf_id, leaf_board) = self.tree.select(board, config.c_puct);
            let value = expand_and_evaluate(&mut self.tree, leaf_id, &leaf_board, model)?;
            self.tree.backup(leaf_id, value);
        }

        // 4. Results
        let result =
            self.create_search_result(root_id, board.num_cells(), config, &mut thread_rng())?;
        debug!(
            best_move = result.best_move,
            root_value = result.root_value,
            tree_size = self.tree.size(),
            "search finished"
        );
        self.root_board = Some(board.clone());
        Ok(result)
    }

    fn prepare_root(&mut self, board: &Board) -> NodeId {
        let reused = self
            .root_board
            .take()
            .and_then(|previous| moves_since(&previous, board))
            .and_then(|moves| self.tree.descend(&moves));

        match reused {
            Some(node_id) => {
                self.tree.reroot(node_id);
                debug!(tree_size = self.tree.size(), "reusing search tree");
                self.tree.root_id
            }
            None => self.tree.initialize_root(),
        }
    }

    fn create_search_result<R: Rng + ?Sized>(
        &self,
        root_id: NodeId,
        num_cells: usize,
        config: &MctsConfig,
        rng: &mut R,
    ) -> Result<SearchResult> {
        let root = &self.tree.nodes[root_id];

        let move_visits: Vec<(usize, u32)> = root
            .children
            .iter()
            .filter_map(|&child_id| {
                let child = &self.tree.nodes[child_id];
                child.move_action.map(|m| (m, child.visit_count))
            })
            .collect();

        if move_visits.is_empty() {
            return Err(MctsError::NoLegalMoves);
        }

        let best_move = select_move(&move_visits, config.temperature, rng);

        let mut policy_distribution = vec![0.0f32; num_cells];
        let total_visits: u32 = move_visits.iter().map(|(_, v)| v).sum();
        if total_visits > 0 {
            for &(m, v) in &move_visits {
                policy_distribution[m] = v as f32 / total_visits as f32;
            }
        }

        Ok(SearchResult {
            best_move,
            policy_distribution,
            // the root's statistics belong to the player who moved into it
            root_value: -root.q_value(),
            num_simulations_run: config.num_simulations,
            root_visit_counts: move_visits,
        })
    }

    /// Clear the tree
    pub fn reset(&mut self) {
        self.tree.clear();
        self.root_board = None;
    }

    pub fn tree_size(&self) -> usize {
        self.tree.size()
    }
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves that lead from `previous` to `board`, in play order.
///
/// Only positions one or two moves ahead on a board of the same shape are
/// recognised.
fn moves_since(previous: &Board, board: &Board) -> Option<Vec<usize>> {
    let same_shape = previous.width() == board.width()
        && previous.height() == board.height()
        && previous.depth() == board.depth()
        && previous.n_in_row() == board.n_in_row();
    if !same_shape {
        return None;
    }

    let mut placed = Vec::with_capacity(2);
    for mv in 0..board.num_cells() {
        match (previous.cell(mv), board.cell(mv)) {
            (None, Some(player)) => placed.push((mv, player)),
            (before, after) if before == after => {}
            _ => return None,
        }
    }

    let mover = previous.current_player();
    match placed[..] {
        [(mv, p)] if p == mover => Some(vec![mv]),
        [(a, pa), (b, pb)] if pa != pb => {
            if pa == mover {
                Some(vec![a, b])
            } else {
                Some(vec![b, a])
            }
        }
        _ => None,
    }
}

/// Pick a move from root visit counts.
///
/// - temperature < 0.01: argmax
/// - otherwise: sample proportional to `visits^(1/temperature)`
///
/// `move_visits` must not be empty.
fn select_move<R: Rng + ?Sized>(
    move_visits: &[(usize, u32)],
    temperature: f32,
    rng: &mut R,
) -> usize {
    let argmax = || {
        move_visits
            .iter()
            .max_by_key(|(_, v)| *v)
            .map(|(m, _)| *m)
            .unwrap_or(move_visits[0].0)
    };

    if temperature < 0.01 {
        return argmax();
    }

    let inv_temp = 1.0f64 / temperature as f64;
    let weights: Vec<f64> = move_visits
        .iter()
        .map(|&(_, v)| if v == 0 { 0.0 } else { (v as f64).powf(inv_temp) })
        .collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => move_visits[dist.sample(rng)].0,
        // all weights zero or overflowed to infinity
        Err(_) => argmax(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::UniformModel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_mcts_creation() {
        let mcts = Mcts::new();
        assert_eq!(mcts.tree_size(), 0);
    }

    #[test]
    fn test_search_then_reset() {
        let mut mcts = Mcts::new();
        let board = Board::new(3, 3, 3, 3).unwrap();
        let config = MctsConfig::default().with_simulations(20);

        mcts.search(&board, &UniformModel, &config).unwrap();
        assert!(mcts.tree_size() > 27);

        mcts.reset();
        assert_eq!(mcts.tree_size(), 0);
    }

    #[test]
    fn test_search_reuses_subtree_after_move() {
        let mut mcts = Mcts::new();
        let mut board = Board::new(3, 3, 3, 3).unwrap();
        let config = MctsConfig::default()
            .with_simulations(30)
            .with_temperature(0.0);

        let first = mcts.search(&board, &UniformModel, &config).unwrap();
        let carried = first.visit_count_for_move(first.best_move);
        board.do_move(first.best_move);

        let second = mcts
            .search(&board, &UniformModel, &config.clone().with_simulations(10))
            .unwrap();

        let root = &mcts.tree.nodes[mcts.tree.root_id];
        assert_eq!(root.visit_count, carried + 10);
        assert_eq!(root.parent, None);
        assert_eq!(second.policy_distribution[first.best_move], 0.0);
        assert!(board.is_available(second.best_move));
    }

    #[test]
    fn test_search_reuses_subtree_two_moves_ahead() {
        let mut mcts = Mcts::new();
        let mut board = Board::new(3, 3, 3, 3).unwrap();
        let config = MctsConfig::default()
            .with_simulations(30)
            .with_temperature(0.0);

        let first = mcts.search(&board, &UniformModel, &config).unwrap();
        board.do_move(first.best_move);
        let reply = board.legal_moves()[0];
        board.do_move(reply);

        // the most visited child was expanded, so the reply is in the tree
        let node = mcts.tree.descend(&[first.best_move, reply]).unwrap();
        let carried = mcts.tree.nodes[node].visit_count;

        mcts.search(&board, &UniformModel, &config.clone().with_simulations(10))
            .unwrap();

        assert_eq!(mcts.tree.nodes[mcts.tree.root_id].visit_count, carried + 10);
    }

    #[test]
    fn test_search_starts_fresh_on_unrelated_position() {
        let mut mcts = Mcts::new();
        let config = MctsConfig::default().with_simulations(10);
        let mut board = Board::new(3, 3, 3, 3).unwrap();
        mcts.search(&board, &UniformModel, &config).unwrap();

        for mv in [4, 13, 22] {
            board.do_move(mv);
        }
        mcts.search(&board, &UniformModel, &config).unwrap();

        assert_eq!(mcts.tree.nodes[mcts.tree.root_id].visit_count, 10);
    }

    #[test]
    fn test_moves_since() {
        let start = Board::new(3, 3, 3, 3).unwrap();
        let mut one = start.clone();
        one.do_move(5);
        let mut two = one.clone();
        two.do_move(2);

        assert_eq!(moves_since(&start, &one), Some(vec![5]));
        assert_eq!(moves_since(&start, &two), Some(vec![5, 2]));
        assert_eq!(moves_since(&one, &two), Some(vec![2]));
        assert_eq!(moves_since(&start, &start), None);
        assert_eq!(moves_since(&two, &one), None);
        assert_eq!(moves_since(&start, &Board::default()), None);

        // same cell count, wrong colour
        let mut swapped = Board::new(3, 3, 3, 3).unwrap();
        swapped.init(1).unwrap();
        swapped.do_move(5);
        assert_eq!(moves_since(&start, &swapped), None);
    }

    #[test]
    fn test_select_move_argmax() {
        let mut rng = StdRng::seed_from_u64(0);
        let move_visits = vec![(0, 10), (1, 20), (2, 5)];
        assert_eq!(select_move(&move_visits, 0.0, &mut rng), 1);
    }

    #[test]
    fn test_select_move_single() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(select_move(&[(5, 100)], 1.0, &mut rng), 5);
    }

    #[test]
    fn test_select_move_never_picks_unvisited() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let m = select_move(&[(0, 0), (1, 3), (2, 0)], 1.0, &mut rng);
            assert_eq!(m, 1);
        }
    }

    #[test]
    fn test_select_move_all_zero_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = select_move(&[(4, 0), (9, 0)], 1.0, &mut rng);
        assert!(m == 4 || m == 9);
    }

    #[test]
    fn test_select_move_with_temperature_sampling() {
        let mut rng = StdRng::seed_from_u64(2);
        let move_visits = vec![(0, 10), (1, 10), (2, 10)];

        let picked: HashSet<usize> = (0..50)
            .map(|_| select_move(&move_visits, 1.0, &mut rng))
            .collect();

        assert!(picked.len() > 1);
    }

    #[test]
    fn test_search_on_finished_game_fails() {
        let mut board = Board::new(3, 3, 3, 3).unwrap();
        for m in [0, 9, 1, 10, 2] {
            board.do_move(m);
        }
        let result = Mcts::new().search(&board, &UniformModel, &MctsConfig::default());
        assert!(matches!(result, Err(MctsError::TerminalPosition)));
    }
}
