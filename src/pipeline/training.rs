//! Training pipeline for the Q-learning agent

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Environment, Observer},
    q_learning::QLearningAgent,
    stats,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Maximum steps per episode
    pub max_steps: usize,

    /// Random seed; re-seeds the agent before the first episode
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_steps: 200,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub episodes: usize,

    /// Per-episode total rewards, one entry per episode in order
    pub rewards: Vec<f64>,

    /// Mean episode reward
    pub mean_reward: f64,

    /// Best episode reward
    pub best_reward: f64,

    /// Exploration rate after the final decay
    pub final_epsilon: f64,
}

impl TrainingResult {
    fn new(rewards: Vec<f64>, final_epsilon: f64) -> Self {
        Self {
            episodes: rewards.len(),
            mean_reward: stats::mean(&rewards),
            best_reward: stats::max(&rewards),
            rewards,
            final_epsilon,
        }
    }

    /// Smoothed reward curve with valid-convolution semantics.
    pub fn smoothed_rewards(&self, window: usize) -> Vec<f64> {
        stats::moving_average(&self.rewards, window)
    }
}

/// Training pipeline driving one agent against one environment
///
/// Each episode runs `RESET → STEP*` until the environment terminates or
/// truncates, or the step budget is exhausted. Every step applies the
/// Q-learning update exactly once; epsilon decays exactly once per episode,
/// regardless of episode length. There is no early-stopping criterion.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and environment
    ///
    /// # Errors
    ///
    /// Fails fast if the environment's dimensions disagree with the agent's
    /// setup; environment failures from `reset`/`step` propagate uncaught.
    pub fn run(
        &mut self,
        agent: &mut QLearningAgent,
        env: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        check_compatibility(agent, env)?;

        if let Some(seed) = self.config.seed {
            agent.set_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut rewards = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let total_reward = self.run_episode(episode, agent, env)?;
            rewards.push(total_reward);

            // Decay once per episode; observers see the post-decay rate.
            agent.decay_epsilon();
            for observer in &mut self.observers {
                observer.on_episode_end(episode, total_reward, agent.epsilon())?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(rewards, agent.epsilon()))
    }

    fn run_episode(
        &mut self,
        episode: usize,
        agent: &mut QLearningAgent,
        env: &mut dyn Environment,
    ) -> Result<f64> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let observation = env.reset()?;
        let mut state = agent.discretize(&observation)?;
        let mut total_reward = 0.0;

        for step in 0..self.config.max_steps {
            let action = agent.select_action(&state);
            let transition = env.step(action)?;
            let next_state = agent.discretize(&transition.observation)?;

            agent.learn(
                &state,
                action,
                transition.reward,
                &next_state,
                transition.terminated,
            );

            total_reward += transition.reward;
            state = next_state;

            for observer in &mut self.observers {
                observer.on_step(episode, step, action, transition.reward)?;
            }

            if transition.terminated || transition.truncated {
                break;
            }
        }

        Ok(total_reward)
    }
}

/// Verify that an environment matches the agent's table dimensions.
pub(crate) fn check_compatibility(
    agent: &QLearningAgent,
    env: &dyn Environment,
) -> Result<()> {
    let expected_dims = agent.discretizer().dims();
    if env.observation_dims() != expected_dims {
        return Err(Error::DimensionMismatch {
            expected: expected_dims,
            got: env.observation_dims(),
        });
    }
    if env.num_actions() != agent.num_actions() {
        return Err(Error::ActionCountMismatch {
            expected: agent.num_actions(),
            got: env.num_actions(),
        });
    }
    Ok(())
}
