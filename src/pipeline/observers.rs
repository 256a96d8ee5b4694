//! Observer adapters for training and evaluation runs
//!
//! Observers allow composable reporting during a run without coupling the
//! loop logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Result, ports::Observer, stats};

/// Console observer - per-episode text summaries
///
/// Training runs print `Episode i/N, Total Reward: r, Epsilon: e` with the
/// exploration rate to 4 decimal places; evaluation runs print
/// `Test Episode i, Total Reward: r`.
pub struct ConsoleObserver {
    total_episodes: usize,
    evaluation: bool,
}

impl ConsoleObserver {
    /// Create a console observer for a training run
    pub fn new() -> Self {
        Self {
            total_episodes: 0,
            evaluation: false,
        }
    }

    /// Create a console observer for an evaluation run
    pub fn evaluation() -> Self {
        Self {
            total_episodes: 0,
            evaluation: true,
        }
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ConsoleObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.total_episodes = total_episodes;
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, total_reward: f64, epsilon: f64) -> Result<()> {
        if self.evaluation {
            println!("Test Episode {}, Total Reward: {total_reward}", episode + 1);
        } else {
            println!(
                "Episode {}/{}, Total Reward: {total_reward}, Epsilon: {epsilon:.4}",
                episode + 1,
                self.total_episodes
            );
        }
        Ok(())
    }
}

/// Progress bar observer - shows run progress with the best reward so far
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_reward: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            best_reward: f64::NEG_INFINITY,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, total_reward: f64, _epsilon: f64) -> Result<()> {
        if total_reward > self.best_reward {
            self.best_reward = total_reward;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("best: {:.1}", self.best_reward));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("best: {:.1}", self.best_reward));
        }
        Ok(())
    }
}

/// Metrics observer - collects the reward history
pub struct MetricsObserver {
    rewards: Vec<f64>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            rewards: Vec::new(),
        }
    }

    /// Per-episode rewards collected so far, in episode order.
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Mean episode reward
    pub fn mean_reward(&self) -> f64 {
        stats::mean(&self.rewards)
    }

    /// Best episode reward
    pub fn best_reward(&self) -> f64 {
        stats::max(&self.rewards)
    }

    /// Smoothed reward curve (valid-convolution moving average).
    pub fn smoothed_rewards(&self, window: usize) -> Vec<f64> {
        stats::moving_average(&self.rewards, window)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.rewards.len(),
            mean_reward: self.mean_reward(),
            best_reward: self.best_reward(),
        }
    }
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub mean_reward: f64,
    pub best_reward: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, total_reward: f64, _epsilon: f64) -> Result<()> {
        self.rewards.push(total_reward);
        Ok(())
    }
}

/// Record of a single episode in the JSONL log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode number
    pub episode: usize,
    /// Accumulated reward
    pub total_reward: f64,
    /// Exploration rate after the episode's decay
    pub epsilon: f64,
    /// Steps taken before termination, truncation, or budget exhaustion
    pub steps: usize,
}

/// JSONL observer - streams one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    steps_this_episode: usize,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            steps_this_episode: 0,
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.steps_this_episode = 0;
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step: usize, _action: usize, _reward: f64) -> Result<()> {
        self.steps_this_episode += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, total_reward: f64, epsilon: f64) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            total_reward,
            epsilon,
            steps: self.steps_this_episode,
        };

        // One JSON object per line
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
