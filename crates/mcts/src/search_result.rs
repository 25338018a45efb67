/// Result of MCTS search
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move selected at the configured temperature
    pub best_move: usize,

    /// Normalised root visit counts over every cell (zero for illegal cells)
    pub policy_distribution: Vec<f32>,

    /// Expected outcome for the player to move at the root
    pub root_value: f32,

    pub num_simulations_run: u32,

    /// Visit counts for each legal move from the root: (move, visit_count)
    pub root_visit_counts: Vec<(usize, u32)>,
}

impl SearchResult {
    pub fn visit_count_for_move(&self, move_idx: usize) -> u32 {
        self.root_visit_counts
            .iter()
            .find(|(m, _)| *m == move_idx)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    pub fn total_visits(&self) -> u32 {
        self.root_visit_counts.iter().map(|(_, v)| v).sum()
    }

    /// Legal move with the most visits.
    pub fn most_visited(&self) -> Option<usize> {
        self.root_visit_counts
            .iter()
            .max_by_key(|(_, v)| *v)
            .map(|(m, _)| *m)
    }
}
