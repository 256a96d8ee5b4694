//! Tabular Q-learning control for continuous-state, discrete-action
//! environments
//!
//! This crate provides:
//! - Observation discretization onto a fixed per-dimension bin grid
//! - A dense action-value table with the off-policy TD update
//! - An ε-greedy agent with per-episode exploration decay
//! - Training and evaluation pipelines with composable observers
//!
//! The environment itself (physics, rendering) stays outside the crate,
//! behind the [`Environment`] port; reporting sinks implement the
//! [`Observer`] port.

pub mod discretize;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod stats;

pub use discretize::Discretizer;
pub use error::{Error, Result};
pub use pipeline::{
    ConsoleObserver, EpisodeRecord, EvaluationConfig, EvaluationPipeline, EvaluationResult,
    JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver, TrainingConfig,
    TrainingPipeline, TrainingResult,
};
pub use ports::{Environment, Observation, Observer, Step};
pub use q_learning::{AgentConfig, QLearningAgent, QTable};
