//! Ports (trait boundaries) for external collaborators.
//!
//! This module defines the interfaces between the learning core and the
//! outside world. Following hexagonal architecture, these traits are owned by
//! the core and implemented by adapters: concrete environments on one side,
//! reporting sinks on the other.

pub mod environment;
pub mod observer;

pub use environment::{Environment, Observation, Step};
pub use observer::Observer;
