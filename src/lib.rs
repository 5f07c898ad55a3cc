//! Evolve neural-network agents that navigate a bounded 2D arena around
//! circular obstacles toward a fixed goal.
//!
//! Each round, every agent repeatedly senses the world through a fan of
//! vision rays, maps the sensor vector to a steering action with a two-layer
//! perceptron, and moves; fitness tracks its progress toward the goal. At the
//! end of a round the population is replaced by offspring of fitness-biased
//! couples and the obstacle field is regenerated.
//!
//! All randomness flows through one explicit, seedable generator owned by
//! [`engine::Engine`], so a fixed seed reproduces a run bit-for-bit.

pub mod brain;
pub mod config;
pub mod engine;
pub mod field;
pub mod genetics;
pub mod geometry;
pub mod model;
pub mod motion;
pub mod sensor;
pub mod stats;
mod utils;
