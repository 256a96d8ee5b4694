//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training the agent against an environment
//! - Evaluating the learned greedy policy
//! - Recording per-episode rewards during a run

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationConfig, EvaluationPipeline, EvaluationResult};
// Re-export observer implementations (adapters)
pub use observers::{
    ConsoleObserver, EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary,
    ProgressObserver,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Environment, Observer};
