//! Observer port - abstraction for training observation and reporting
//!
//! This port defines the interface for observing episode lifecycles,
//! allowing composable reporting without coupling the loops to specific
//! output formats.

use crate::Result;

/// Observer trait for monitoring training and evaluation runs
///
/// Observers can be composed to collect different views of the same run:
/// console summaries, progress bars, reward histories, JSONL logs.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - for each environment step
///    - `on_episode_end(episode, total_reward, epsilon)`
/// 3. `on_training_end()` - once at the end
///
/// Evaluation runs emit the same sequence with an epsilon of 0.0.
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each environment step, once learning for the step has
    /// been applied.
    fn on_step(&mut self, _episode: usize, _step: usize, _action: usize, _reward: f64) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends, with the accumulated reward and the
    /// exploration rate in effect for the next episode.
    fn on_episode_end(&mut self, _episode: usize, _total_reward: f64, _epsilon: f64) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode. Use this to finalize outputs,
    /// flush files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
