//! Q-learning agent
//!
//! The agent is the owning context for everything learned: the Q-table, the
//! exploration schedule, and the discretizer that keys continuous
//! observations into the table. Pipelines borrow it; nothing learned lives in
//! module-level state.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    discretize::Discretizer,
    error::{Error, Result},
    q_learning::q_table::QTable,
};

/// Hyperparameters for creating a Q-learning agent.
///
/// Defaults are the classic-control baseline: α = 0.1, γ = 0.99, ε starting
/// at 1.0 decaying by 0.995 per episode down to 0.01.
///
/// # Examples
///
/// ```
/// use qgrid::AgentConfig;
///
/// let config = AgentConfig::new()
///     .with_learning_rate(0.2)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1)
    pub discount_factor: f64,
    /// Initial exploration rate, in [0, 1]
    pub epsilon: f64,
    /// Multiplicative epsilon decay per episode, in (0, 1]
    pub epsilon_decay: f64,
    /// Exploration floor, in [0, 1] and at most `epsilon`
    pub min_epsilon: f64,
    /// Zero the bootstrap term on terminal transitions instead of reading
    /// the post-terminal state's stored values
    pub zero_terminal_bootstrap: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with the default hyperparameters.
    pub fn new() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.99,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
            zero_terminal_bootstrap: false,
            seed: None,
        }
    }

    /// Set the learning rate α.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the discount factor γ.
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the initial exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the per-episode epsilon decay factor.
    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    /// Set the exploration floor.
    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    /// Zero the bootstrap term on terminal transitions.
    pub fn with_zero_terminal_bootstrap(mut self, enabled: bool) -> Self {
        self.zero_terminal_bootstrap = enabled;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidLearningRate {
                value: self.learning_rate,
            });
        }
        if !(self.discount_factor >= 0.0 && self.discount_factor < 1.0) {
            return Err(Error::InvalidDiscountFactor {
                value: self.discount_factor,
            });
        }
        if !(self.epsilon >= 0.0 && self.epsilon <= 1.0) {
            return Err(Error::InvalidEpsilon {
                value: self.epsilon,
            });
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::InvalidEpsilonDecay {
                value: self.epsilon_decay,
            });
        }
        if !(self.min_epsilon >= 0.0 && self.min_epsilon <= 1.0) {
            return Err(Error::InvalidMinEpsilon {
                value: self.min_epsilon,
            });
        }
        if self.min_epsilon > self.epsilon {
            return Err(Error::MinEpsilonAboveInitial {
                min_epsilon: self.min_epsilon,
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Learns an action-value table over discretized observations by always
/// updating toward the maximum next-state value, regardless of the action
/// actually taken.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    discretizer: Discretizer,
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create a new Q-learning agent.
    ///
    /// The Q-table is sized from the discretizer's per-dimension bin counts
    /// and the environment's action count, and starts at zero.
    ///
    /// # Errors
    ///
    /// Rejects an empty action space and any hyperparameter outside its
    /// domain, before any episode runs.
    pub fn new(discretizer: Discretizer, num_actions: usize, config: AgentConfig) -> Result<Self> {
        config.validate()?;
        if num_actions == 0 {
            return Err(Error::NoActions);
        }
        Ok(Self {
            q_table: QTable::new(
                discretizer.bins(),
                num_actions,
                config.learning_rate,
                config.discount_factor,
                config.zero_terminal_bootstrap,
            ),
            discretizer,
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            rng: build_rng(config.seed),
        })
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of actions the agent selects among.
    pub fn num_actions(&self) -> usize {
        self.q_table.num_actions()
    }

    /// The discretizer keying observations into the table.
    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    /// Read access to the learned table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Mutable access to the table, for seeding values before a run.
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    /// Discretize an observation with the agent's configured bins.
    pub fn discretize(&self, observation: &[f64]) -> Result<Vec<usize>> {
        self.discretizer.discretize(observation)
    }

    /// ε-greedy action selection
    ///
    /// Draws one uniform number; at or below the current epsilon the action
    /// is uniform over the action space, otherwise it is the table's best
    /// action for the state.
    pub fn select_action(&mut self, state: &[usize]) -> usize {
        if self.rng.random::<f64>() <= self.epsilon {
            self.rng.random_range(0..self.q_table.num_actions())
        } else {
            self.q_table.best_action(state).0
        }
    }

    /// Greedy action selection, no exploration. Used by evaluation.
    pub fn greedy_action(&self, state: &[usize]) -> usize {
        self.q_table.best_action(state).0
    }

    /// Apply the Q-learning update for one observed transition.
    pub fn learn(
        &mut self,
        state: &[usize],
        action: usize,
        reward: f64,
        next_state: &[usize],
        terminated: bool,
    ) {
        self.q_table
            .q_learning_update(state, action, reward, next_state, terminated);
    }

    /// Decay epsilon after an episode, floored at the configured minimum.
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Reseed the agent's random source.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
