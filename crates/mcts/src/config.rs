/// Configuration for MCTS search
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations (playouts) per search
    pub num_simulations: u32,

    /// PUCT exploration constant
    pub c_puct: f32,

    /// Whether to mix Dirichlet noise into the root priors (self-play only)
    pub add_dirichlet_noise: bool,

    /// Dirichlet concentration
    pub dirichlet_alpha: f32,

    /// Weight of the noise in the mixed root prior
    pub dirichlet_epsilon: f32,

    /// Temperature for move selection (1.0 = proportional to visits, ~0 = argmax)
    pub temperature: f32,
}

impl MctsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n.max(1);
        self
    }

    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    /// Enable root noise with the given parameters
    pub fn with_dirichlet_noise(mut self, alpha: f32, epsilon: f32) -> Self {
        self.add_dirichlet_noise = true;
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    pub fn without_dirichlet_noise(mut self) -> Self {
        self.add_dirichlet_noise = false;
        self
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 400,
            c_puct: 5.0,
            add_dirichlet_noise: false,
            dirichlet_alpha: 0.3,
            dirichlet_epsilon: 0.25,
            temperature: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.num_simulations, 400);
        assert_eq!(config.c_puct, 5.0);
        assert_eq!(config.temperature, 1.0);
        assert!(!config.add_dirichlet_noise);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::new()
            .with_simulations(1000)
            .with_c_puct(2.0)
            .with_temperature(0.5)
            .with_dirichlet_noise(0.25, 0.3);

        assert_eq!(config.num_simulations, 1000);
        assert_eq!(config.c_puct, 2.0);
        assert_eq!(config.temperature, 0.5);
        assert!(config.add_dirichlet_noise);
        assert_eq!(config.dirichlet_alpha, 0.25);
        assert_eq!(config.dirichlet_epsilon, 0.3);

        let config = config.without_dirichlet_noise().with_simulations(0);
        assert!(!config.add_dirichlet_noise);
        assert_eq!(config.num_simulations, 1);
    }
}
