use anyhow::Result;
use gomoku3d_core::{Board, Player};
use gomoku3d_mcts::{Mcts, MctsConfig, PolicyValueModel};

use crate::player::{GamePlayer, SelfPlayAgent};

/// Search-backed player.
///
/// In match play it always takes the most visited move without root noise.
/// In self-play it follows its [`MctsConfig`] (including Dirichlet noise) and
/// samples with the temperature supplied by the controller.
///
/// The search tree carries over from one move to the next and is cleared by
/// [`SelfPlayAgent::reset`] or when a new match assigns a side.
pub struct MctsPlayer<M: PolicyValueModel> {
    mcts: Mcts,
    model: M,
    config: MctsConfig,
    is_selfplay: bool,
    side: Option<Player>,
}

impl<M: PolicyValueModel> MctsPlayer<M> {
    pub fn new(model: M, config: MctsConfig) -> Self {
        Self {
            mcts: Mcts::new(),
            model,
            config,
            is_selfplay: false,
            side: None,
        }
    }

    /// Player for self-play data generation.
    pub fn for_self_play(model: M, config: MctsConfig) -> Self {
        Self {
            is_selfplay: true,
            ..Self::new(model, config)
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn is_selfplay(&self) -> bool {
        self.is_selfplay
    }
}

impl<M: PolicyValueModel> GamePlayer for MctsPlayer<M> {
    fn set_player(&mut self, player: Player) {
        self.side = Some(player);
        self.mcts.reset();
    }

    fn get_action(&mut self, board: &Board) -> Result<usize> {
        let config = self
            .config
            .clone()
            .with_temperature(0.0)
            .without_dirichlet_noise();
        let result = self.mcts.search(board, &self.model, &config)?;
        Ok(result.best_move)
    }

    fn name(&self) -> String {
        match self.side {
            Some(p) => format!("MCTS {}", p),
            None => "MCTS".to_string(),
        }
    }
}

impl<M: PolicyValueModel> SelfPlayAgent for MctsPlayer<M> {
    fn get_action_with_probs(
        &mut self,
        board: &Board,
        temperature: f32,
    ) -> Result<(usize, Vec<f32>)> {
        let mut config = self.config.clone().with_temperature(temperature);
        if !self.is_selfplay {
            config = config.without_dirichlet_noise();
        }
        let result = self.mcts.search(board, &self.model, &config)?;
        Ok((result.best_move, result.policy_distribution))
    }

    fn reset(&mut self) {
        self.mcts.reset();
    }
}
