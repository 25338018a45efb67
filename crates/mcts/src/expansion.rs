use gomoku3d_core::Board;

use crate::error::Result;
use crate::evaluation::{evaluate_with_nn, PolicyValueModel};
use crate::tree::{MctsTree, NodeId};

/// Expand `leaf_id` (whose position is `board`) and return its value for
/// the player to move there.
///
/// Terminal leaves are marked as such and valued from the board; other
/// leaves get one child per legal move, weighted by the evaluator's priors.
pub fn expand_and_evaluate<M: PolicyValueModel>(
    tree: &mut MctsTree,
    leaf_id: NodeId,
    board: &Board,
    model: &M,
) -> Result<f32> {
    if let Some(value) = tree.nodes[leaf_id].terminal_value {
        return Ok(value);
    }

    if let Some(value) = terminal_value(board) {
        let leaf = &mut tree.nodes[leaf_id];
        leaf.terminal_value = Some(value);
        leaf.is_expanded = true;
        return Ok(value);
    }

    let (priors, value) = evaluate_with_nn(board, model)?;
    for (move_idx, prior) in priors {
        tree.add_child(leaf_id, move_idx, prior);
    }
    tree.nodes[leaf_id].is_expanded = true;

    Ok(value)
}

/// Value of a finished position for the player to move, `None` if play goes on.
///
/// A position inside the tree is only ever one move past a non-terminal one,
/// so a win can only have been made by the last move, and it was made by the
/// opponent of the player now to move.
pub(crate) fn terminal_value(board: &Board) -> Option<f32> {
    if board.last_move_won().is_some() {
        Some(-1.0)
    } else if board.legal_moves().is_empty() {
        Some(0.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::UniformModel;
    use gomoku3d_core::Coord;

    fn small_board() -> Board {
        Board::new(3, 3, 3, 3).unwrap()
    }

    #[test]
    fn test_expand_creates_one_child_per_legal_move() {
        let mut board = small_board();
        board.do_move(13);

        let mut tree = MctsTree::new();
        let root = tree.initialize_root();
        let value = expand_and_evaluate(&mut tree, root, &board, &UniformModel).unwrap();

        assert_eq!(value, 0.0);
        assert!(tree.nodes[root].is_expanded);
        assert_eq!(tree.nodes[root].children.len(), 26);
        let prior_sum: f32 = tree
            .nodes
            .iter()
            .skip(1)
            .map(|n| n.prior_probability)
            .sum();
        assert!((prior_sum - 1.0).abs() < 1e-5);
        assert!(
            tree.nodes
                .iter()
                .skip(1)
                .all(|n| n.move_action != Some(13))
        );
    }

    #[test]
    fn test_won_position_is_a_loss_for_player_to_move() {
        let ones = [Coord::new(0, 0, 0), Coord::new(0, 0, 1), Coord::new(0, 0, 2)];
        let twos = [Coord::new(2, 2, 2), Coord::new(2, 2, 1)];
        let board = Board::from_placements(3, 3, 3, 3, &ones, &twos).unwrap();

        assert_eq!(terminal_value(&board), Some(-1.0));

        let mut tree = MctsTree::new();
        let root = tree.initialize_root();
        let value = expand_and_evaluate(&mut tree, root, &board, &UniformModel).unwrap();

        assert_eq!(value, -1.0);
        assert!(tree.nodes[root].is_terminal());
        assert!(tree.nodes[root].children.is_empty());

        // a second visit reuses the cached verdict
        let again = expand_and_evaluate(&mut tree, root, &board, &UniformModel).unwrap();
        assert_eq!(again, -1.0);
    }

    #[test]
    fn test_ongoing_position_has_no_terminal_value() {
        let mut board = small_board();
        board.do_move(0);
        board.do_move(1);
        assert_eq!(terminal_value(&board), None);
    }
}
