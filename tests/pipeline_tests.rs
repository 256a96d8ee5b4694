//! End-to-end tests for the training and evaluation pipelines

mod common;

use std::sync::{Arc, Mutex};

use common::{FailingEnv, ScriptedEnv};
use qgrid::{
    AgentConfig, Discretizer, Error, EvaluationConfig, EvaluationPipeline, Observer,
    QLearningAgent, Result, TrainingConfig, TrainingPipeline,
};

/// Observer that counts `on_step` notifications through shared state.
struct StepCounter {
    steps: Arc<Mutex<usize>>,
}

impl Observer for StepCounter {
    fn on_step(&mut self, _episode: usize, _step: usize, _action: usize, _reward: f64) -> Result<()> {
        *self.steps.lock().unwrap() += 1;
        Ok(())
    }
}

fn agent_for(dims: usize, actions: usize, config: AgentConfig) -> QLearningAgent {
    let ranges = vec![(0.0, 1.0); dims];
    let discretizer = Discretizer::evenly_spaced(&ranges, 6).unwrap();
    QLearningAgent::new(discretizer, actions, config).unwrap()
}

#[test]
fn test_reward_history_has_one_entry_per_episode() {
    let mut env = ScriptedEnv::new(2, 2, 3);
    let mut agent = agent_for(2, 2, AgentConfig::new().with_seed(42));

    let config = TrainingConfig {
        episodes: 10,
        max_steps: 20,
        seed: None,
    };
    let result = TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap();

    // Every episode terminates early at step 3, but still contributes
    // exactly one history entry.
    assert_eq!(result.episodes, 10);
    assert_eq!(result.rewards.len(), 10);
    assert!(result.rewards.iter().all(|&r| r == 3.0));
    assert_eq!(env.reset_calls, 10);
}

#[test]
fn test_exploit_only_episode_selects_dominant_action() {
    let mut env = ScriptedEnv::new(1, 2, 5);
    let mut agent = agent_for(
        1,
        2,
        AgentConfig::new()
            .with_epsilon(0.0)
            .with_min_epsilon(0.0)
            .with_seed(7),
    );

    // Seed action 1 as dominant for every reachable state.
    for state in 0..6 {
        agent.q_table_mut().set(&[state], 1, 1.0);
    }

    let config = TrainingConfig {
        episodes: 1,
        max_steps: 20,
        seed: None,
    };
    TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap();

    assert_eq!(env.actions_taken.len(), 5);
    assert!(env.actions_taken.iter().all(|&action| action == 1));
}

#[test]
fn test_explore_only_episode_stops_at_terminal_after_three_updates() {
    let mut env = ScriptedEnv::new(2, 3, 3);
    let mut agent = agent_for(
        2,
        3,
        AgentConfig::new()
            .with_epsilon(1.0)
            .with_epsilon_decay(1.0)
            .with_seed(13),
    );

    let steps = Arc::new(Mutex::new(0));
    let config = TrainingConfig {
        episodes: 1,
        max_steps: 200,
        seed: None,
    };
    let result = TrainingPipeline::new(config)
        .with_observer(Box::new(StepCounter {
            steps: Arc::clone(&steps),
        }))
        .run(&mut agent, &mut env)
        .unwrap();

    // Exactly one recorded episode, exactly 3 steps, one update per step.
    assert_eq!(result.rewards, vec![3.0]);
    assert_eq!(env.step_calls, 3);
    assert_eq!(*steps.lock().unwrap(), 3);
}

#[test]
fn test_step_budget_bounds_episode_length() {
    let mut env = ScriptedEnv::new(1, 2, usize::MAX);
    let mut agent = agent_for(1, 2, AgentConfig::new().with_seed(3));

    let config = TrainingConfig {
        episodes: 2,
        max_steps: 7,
        seed: None,
    };
    let result = TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap();

    assert_eq!(result.rewards, vec![7.0, 7.0]);
    assert_eq!(env.step_calls, 14);
}

#[test]
fn test_epsilon_decays_once_per_episode() {
    let mut env = ScriptedEnv::new(1, 2, 2);
    let mut agent = agent_for(
        1,
        2,
        AgentConfig::new()
            .with_epsilon(1.0)
            .with_epsilon_decay(0.9)
            .with_min_epsilon(0.0)
            .with_seed(5),
    );

    let config = TrainingConfig {
        episodes: 5,
        max_steps: 10,
        seed: None,
    };
    let result = TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap();

    // Episode lengths never factor into the schedule: 5 episodes, 5 decays.
    assert!((result.final_epsilon - 0.9f64.powi(5)).abs() < 1e-12);
    assert!((agent.epsilon() - result.final_epsilon).abs() < 1e-12);
}

#[test]
fn test_training_result_statistics() {
    let mut env = ScriptedEnv::new(1, 2, 3);
    let mut agent = agent_for(1, 2, AgentConfig::new().with_seed(1));

    let config = TrainingConfig {
        episodes: 12,
        max_steps: 20,
        seed: None,
    };
    let result = TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap();

    assert_eq!(result.mean_reward, 3.0);
    assert_eq!(result.best_reward, 3.0);
    // Valid-convolution smoothing: 12 episodes, window 10 -> 3 points.
    assert_eq!(result.smoothed_rewards(10).len(), 3);
}

#[test]
fn test_seeded_runs_reproduce_action_sequences() {
    let config = AgentConfig::new().with_epsilon(0.5).with_min_epsilon(0.0);
    let training = TrainingConfig {
        episodes: 20,
        max_steps: 10,
        seed: Some(42),
    };

    let mut first_env = ScriptedEnv::new(1, 3, 4);
    let mut first_agent = agent_for(1, 3, config.clone());
    TrainingPipeline::new(training.clone())
        .run(&mut first_agent, &mut first_env)
        .unwrap();

    let mut second_env = ScriptedEnv::new(1, 3, 4);
    let mut second_agent = agent_for(1, 3, config);
    TrainingPipeline::new(training)
        .run(&mut second_agent, &mut second_env)
        .unwrap();

    assert_eq!(first_env.actions_taken, second_env.actions_taken);
}

#[test]
fn test_evaluation_runs_greedy_and_never_learns() {
    let mut env = ScriptedEnv::new(1, 3, 4);
    let mut agent = agent_for(1, 3, AgentConfig::new().with_seed(9));
    for state in 0..6 {
        agent.q_table_mut().set(&[state], 2, 1.0);
    }
    let table_before = agent.q_table().clone();

    let config = EvaluationConfig {
        episodes: 4,
        max_steps: 20,
        render: true,
    };
    let result = EvaluationPipeline::new(config)
        .run(&agent, &mut env)
        .unwrap();

    assert_eq!(result.episodes, 4);
    assert_eq!(result.rewards, vec![4.0; 4]);
    assert!(env.actions_taken.iter().all(|&action| action == 2));
    // No update rule during evaluation: the table is untouched.
    assert_eq!(agent.q_table(), &table_before);
    // Rendering is requested once per step.
    assert_eq!(env.render_calls, env.step_calls);
}

#[test]
fn test_training_never_renders() {
    let mut env = ScriptedEnv::new(1, 2, 3);
    let mut agent = agent_for(1, 2, AgentConfig::new().with_seed(2));

    let config = TrainingConfig {
        episodes: 4,
        max_steps: 20,
        seed: None,
    };
    TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap();

    assert_eq!(env.render_calls, 0);
}

#[test]
fn test_evaluation_can_skip_rendering() {
    let mut env = ScriptedEnv::new(1, 2, 3);
    let agent = agent_for(1, 2, AgentConfig::new().with_seed(2));

    let config = EvaluationConfig {
        episodes: 2,
        max_steps: 20,
        render: false,
    };
    EvaluationPipeline::new(config)
        .run(&agent, &mut env)
        .unwrap();

    assert_eq!(env.render_calls, 0);
}

#[test]
fn test_environment_failure_propagates() {
    let mut env = FailingEnv;
    let mut agent = agent_for(1, 2, AgentConfig::new().with_seed(8));

    let config = TrainingConfig {
        episodes: 1,
        max_steps: 10,
        seed: None,
    };
    let err = TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap_err();

    assert!(matches!(err, Error::Environment { .. }));
}

#[test]
fn test_mismatched_environment_is_rejected_at_setup() {
    // Wrong observation dimensionality.
    let mut env = ScriptedEnv::new(3, 2, 3);
    let mut agent = agent_for(2, 2, AgentConfig::new());
    let config = TrainingConfig {
        episodes: 1,
        max_steps: 10,
        seed: None,
    };
    let err = TrainingPipeline::new(config.clone())
        .run(&mut agent, &mut env)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 2,
            got: 3
        }
    ));
    assert_eq!(env.reset_calls, 0);

    // Wrong action count.
    let mut env = ScriptedEnv::new(2, 2, 3);
    let mut agent = agent_for(2, 3, AgentConfig::new());
    let err = TrainingPipeline::new(config)
        .run(&mut agent, &mut env)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ActionCountMismatch {
            expected: 3,
            got: 2
        }
    ));
}
