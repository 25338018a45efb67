use std::collections::VecDeque;

use gomoku3d_core::Board;

/// Node ID in the arena-style tree
pub type NodeId = usize;

/// A single node in the search tree.
///
/// Nodes do not store positions; [`MctsTree::select`] replays the moves on
/// the path from the root instead.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Move that led here (None for the root)
    pub move_action: Option<usize>,

    pub parent: Option<NodeId>,

    pub children: Vec<NodeId>,

    pub visit_count: u32,

    /// Sum of backed-up values, from the point of view of the player who
    /// played `move_action`
    pub total_value: f32,

    /// Prior probability from the evaluator
    pub prior_probability: f32,

    /// Whether children have been created (or the node found terminal)
    pub is_expanded: bool,

    /// Value for the player to move here, set once the node is known to be terminal
    pub terminal_value: Option<f32>,
}

impl MctsNode {
    pub fn new_root() -> Self {
        Self::new(None, None, 1.0)
    }

    pub fn new_child(move_action: usize, parent: NodeId, prior: f32) -> Self {
        Self::new(Some(move_action), Some(parent), prior)
    }

    fn new(move_action: Option<usize>, parent: Option<NodeId>, prior: f32) -> Self {
        Self {
            move_action,
            parent,
            children: Vec::new(),
            visit_count: 0,
            total_value: 0.0,
            prior_probability: prior,
            is_expanded: false,
            terminal_value: None,
        }
    }

    /// Average backed-up value (0 when unvisited)
    pub fn q_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_value / self.visit_count as f32
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal_value.is_some()
    }
}

/// Search tree using arena allocation
#[derive(Debug, Clone)]
pub struct MctsTree {
    pub nodes: Vec<MctsNode>,
    pub root_id: NodeId,
}

impl MctsTree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(4096),
            root_id: 0,
        }
    }

    /// Discard everything and start over with a fresh root.
    pub fn initialize_root(&mut self) -> NodeId {
        self.nodes.clear();
        self.nodes.push(MctsNode::new_root());
        self.root_id = 0;
        self.root_id
    }

    pub fn add_child(&mut self, parent: NodeId, move_action: usize, prior: f32) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(MctsNode::new_child(move_action, parent, prior));
        self.nodes[parent].children.push(id);
        id
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root_id = 0;
    }

    /// Follow `moves` down from the root.
    ///
    /// Returns `None` if the tree is empty or the path leaves it.
    pub fn descend(&self, moves: &[usize]) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }

        moves.iter().try_fold(self.root_id, |node_id, &mv| {
            self.nodes[node_id]
                .children
                .iter()
                .copied()
                .find(|&child| self.nodes[child].move_action == Some(mv))
        })
    }

    /// Make `new_root` the root, dropping every node outside its subtree.
    ///
    /// The kept nodes are renumbered breadth-first, so the new root is node 0
    /// and children keep their order.
    pub fn reroot(&mut self, new_root: NodeId) {
        let mut old = std::mem::take(&mut self.nodes);
        let mut nodes = Vec::with_capacity(old.len());
        let mut queue = VecDeque::from([(new_root, None::<NodeId>)]);

        while let Some((old_id, parent)) = queue.pop_front() {
            let new_id = nodes.len();
            let mut node = std::mem::replace(&mut old[old_id], MctsNode::new_root());
            let children = std::mem::take(&mut node.children);
            node.parent = parent;
            nodes.push(node);

            if let Some(p) = parent {
                nodes[p].children.push(new_id);
            }
            queue.extend(children.into_iter().map(|c| (c, Some(new_id))));
        }

        nodes[0].move_action = None;
        self.nodes = nodes;
        self.root_id = 0;
    }

    /// Walk from the root to a leaf, always taking the child with the
    /// highest PUCT score.
    ///
    /// Returns the leaf together with the position it stands for.
    pub fn select(&self, root_board: &Board, c_puct: f32) -> (NodeId, Board) {
        let mut board = root_board.clone();
        let mut current_id = self.root_id;

        loop {
            let node = &self.nodes[current_id];
            if !node.is_expanded || node.is_terminal() {
                return (current_id, board);
            }

            let sqrt_parent = (node.visit_count as f32).sqrt();
            let best_child = node.children.iter().copied().max_by(|&a, &b| {
                let puct_a = puct_value(&self.nodes[a], sqrt_parent, c_puct);
                let puct_b = puct_value(&self.nodes[b], sqrt_parent, c_puct);
                puct_a.total_cmp(&puct_b)
            });

            let Some(best_child) = best_child else {
                return (current_id, board);
            };
            if let Some(mv) = self.nodes[best_child].move_action {
                board.do_move(mv);
            }
            current_id = best_child;
        }
    }

    /// Propagate a leaf evaluation back to the root.
    ///
    /// `value` is from the point of view of the player to move at `leaf`.
    /// Each node stores values for the player who moved into it, so the sign
    /// flips at every level, starting with the leaf itself.
    pub fn backup(&mut self, leaf_id: NodeId, value: f32) {
        let mut current_value = -value;
        let mut current_id = Some(leaf_id);

        while let Some(node_id) = current_id {
            let node = &mut self.nodes[node_id];
            node.visit_count += 1;
            node.total_value += current_value;

            current_id = node.parent;
            current_value = -current_value;
        }
    }
}

impl Default for MctsTree {
    fn default() -> Self {
        Self::new()
    }
}

/// PUCT(s, a) = Q(s, a) + c_puct * P(s, a) * sqrt(N(s)) / (1 + N(s, a))
fn puct_value(node: &MctsNode, sqrt_parent: f32, c_puct: f32) -> f32 {
    let u = c_puct * node.prior_probability * sqrt_parent / (1.0 + node.visit_count as f32);
    node.q_value() + u
}
