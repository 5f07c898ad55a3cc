//! Simulation data types.

use crate::brain::Brain;
use crate::geometry::Point2;
use anyhow::{Result, bail};

/// A mobile agent steered by its neural controller.
///
/// The heading is kept normalized to `[0, 2π)`; fitness accumulates every
/// tick and can go negative when the agent drifts away from the goal.
#[derive(Debug, Clone)]
pub struct Agent {
    pub(crate) location: Point2,
    pub(crate) heading: f64,
    pub(crate) fitness: f64,
    radius: f64,
    goal: Point2,
    init_distance: f64,
    brain: Brain,
}

impl Agent {
    /// Create an agent at its spawn location.
    ///
    /// # Errors
    /// Returns an error if the radius is not positive or the spawn location
    /// coincides with the goal, which would break fitness normalization.
    pub fn new(location: Point2, radius: f64, goal: Point2, brain: Brain) -> Result<Self> {
        if radius <= 0.0 {
            bail!("agent radius must be positive, but is {radius}");
        }

        let init_distance = location.distance(goal);
        if init_distance <= 0.0 {
            bail!("agent must not spawn on the goal");
        }

        Ok(Self {
            location,
            heading: 0.0,
            fitness: 0.0,
            radius,
            goal,
            init_distance,
            brain,
        })
    }

    /// Add this tick's reward: 0 at the spawn distance, 1 exactly at the goal.
    pub fn accumulate_fitness(&mut self) {
        self.fitness += 1.0 - self.distance_to_goal() / self.init_distance;
    }

    pub fn distance_to_goal(&self) -> f64 {
        self.location.distance(self.goal)
    }

    pub fn location(&self) -> Point2 {
        self.location
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn goal(&self) -> Point2 {
        self.goal
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn brain(&self) -> &Brain {
        &self.brain
    }
}

/// A fixed circular obstacle, regenerated wholesale each round.
#[derive(Debug, Clone)]
pub struct Obstacle {
    location: Point2,
    radius: f64,
}

impl Obstacle {
    pub fn new(location: Point2, radius: f64) -> Result<Self> {
        if radius <= 0.0 {
            bail!("obstacle radius must be positive, but is {radius}");
        }
        Ok(Self { location, radius })
    }

    pub fn location(&self) -> Point2 {
        self.location
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// State of the simulation between ticks.
///
/// Agents and obstacles are owned separately; the combined view used by the
/// render collaborator is derived on demand (see `engine::Snapshot`).
#[derive(Debug, Clone)]
pub struct State {
    /// Tick counter within the current round.
    pub t: usize,

    /// Completed round counter.
    pub round: usize,

    /// Current generation of agents.
    pub agents: Vec<Agent>,

    /// Obstacle field for the current round.
    pub obstacles: Vec<Obstacle>,
}
