//! Evaluation pipeline for the learned greedy policy

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::training::check_compatibility,
    ports::{Environment, Observer},
    q_learning::QLearningAgent,
    stats,
};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation episodes, independent of the training count
    pub episodes: usize,

    /// Maximum steps per episode
    pub max_steps: usize,

    /// Request a render from the environment after each step
    pub render: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: 5,
            max_steps: 200,
            render: true,
        }
    }
}

/// Result of an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Total episodes played
    pub episodes: usize,

    /// Per-episode total rewards
    pub rewards: Vec<f64>,

    /// Mean episode reward
    pub mean_reward: f64,

    /// Best episode reward
    pub best_reward: f64,
}

impl EvaluationResult {
    fn new(rewards: Vec<f64>) -> Self {
        Self {
            episodes: rewards.len(),
            mean_reward: stats::mean(&rewards),
            best_reward: stats::max(&rewards),
            rewards,
        }
    }
}

/// Evaluation pipeline running the learned policy without learning
///
/// Same `RESET → STEP*` structure as training, but action selection is
/// always greedy, the update rule is never invoked (the agent is only
/// borrowed immutably), and rendering is requested from the environment
/// after each step when configured. Observers receive the same lifecycle
/// events as in training, with epsilon reported as 0.0.
pub struct EvaluationPipeline {
    config: EvaluationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl EvaluationPipeline {
    /// Create a new evaluation pipeline
    pub fn new(config: EvaluationConfig) -> Self {
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

    /// Run evaluation episodes with the learned policy
    pub fn run(
        &mut self,
        agent: &QLearningAgent,
        env: &mut dyn Environment,
    ) -> Result<EvaluationResult> {
        check_compatibility(agent, env)?;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut rewards = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let total_reward = self.run_episode(episode, agent, env)?;
            rewards.push(total_reward);
            for observer in &mut self.observers {
                observer.on_episode_end(episode, total_reward, 0.0)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(EvaluationResult::new(rewards))
    }

    fn run_episode(
        &mut self,
        episode: usize,
        agent: &QLearningAgent,
        env: &mut dyn Environment,
    ) -> Result<f64> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let observation = env.reset()?;
        let mut state = agent.discretize(&observation)?;
        let mut total_reward = 0.0;

        for step in 0..self.config.max_steps {
            let action = agent.greedy_action(&state);
            let transition = env.step(action)?;
            state = agent.discretize(&transition.observation)?;
            total_reward += transition.reward;

            if self.config.render {
                env.render();
            }

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
