//! Shared stub environments for the qgrid test suite.

use qgrid::{Environment, Error, Observation, Result, Step};

/// Deterministic environment that terminates after a fixed number of steps.
///
/// Observations sweep along `[0, 1]` as the episode progresses; each step is
/// worth one reward unit. The stub records every call the loops make so tests
/// can assert on action choices, step counts, and render requests.
pub struct ScriptedEnv {
    dims: usize,
    actions: usize,
    horizon: usize,
    steps_taken: usize,
    pub reset_calls: usize,
    pub step_calls: usize,
    pub render_calls: usize,
    pub actions_taken: Vec<usize>,
}

impl ScriptedEnv {
    pub fn new(dims: usize, actions: usize, horizon: usize) -> Self {
        Self {
            dims,
            actions,
            horizon,
            steps_taken: 0,
            reset_calls: 0,
            step_calls: 0,
            render_calls: 0,
            actions_taken: Vec::new(),
        }
    }

    fn observation(&self) -> Observation {
        vec![self.steps_taken as f64 * 0.1; self.dims]
    }
}

impl Environment for ScriptedEnv {
    fn reset(&mut self) -> Result<Observation> {
        self.reset_calls += 1;
        self.steps_taken = 0;
        Ok(self.observation())
    }

    fn step(&mut self, action: usize) -> Result<Step> {
        self.step_calls += 1;
        self.actions_taken.push(action);
        self.steps_taken += 1;
        Ok(Step {
            observation: self.observation(),
            reward: 1.0,
            terminated: self.steps_taken >= self.horizon,
            truncated: false,
        })
    }

    fn observation_dims(&self) -> usize {
        self.dims
    }

    fn num_actions(&self) -> usize {
        self.actions
    }

    fn render(&mut self) {
        self.render_calls += 1;
    }
}

/// Environment whose `step` always fails.
pub struct FailingEnv;

impl Environment for FailingEnv {
    fn reset(&mut self) -> Result<Observation> {
        Ok(vec![0.0])
    }

    fn step(&mut self, _action: usize) -> Result<Step> {
        Err(Error::Environment {
            message: "actuator disconnected".to_string(),
        })
    }

    fn observation_dims(&self) -> usize {
        1
    }

    fn num_actions(&self) -> usize {
        2
    }
}
