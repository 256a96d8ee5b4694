//! Q-learning over a discretized state grid
//!
//! This module implements tabular temporal difference (TD) learning for
//! continuous-state control problems. Observations are bucketed by a
//! [`Discretizer`](crate::discretize::Discretizer) and the resulting grid
//! indexes a dense action-value table that bootstraps its estimates from
//! successor states.
//!
//! ## Usage Example
//!
//! ```
//! use qgrid::{AgentConfig, Discretizer, QLearningAgent};
//!
//! # fn main() -> qgrid::Result<()> {
//! let discretizer = Discretizer::evenly_spaced(
//!     &[(-4.8, 4.8), (-4.0, 4.0), (-0.418, 0.418), (-4.0, 4.0)],
//!     24,
//! )?;
//! let agent = QLearningAgent::new(discretizer, 2, AgentConfig::new())?;
//! assert_eq!(agent.num_actions(), 2);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod q_table;

// Public re-exports
pub use agent::{AgentConfig, QLearningAgent};
pub use q_table::QTable;
