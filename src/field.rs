//! Obstacle field generation by capped rejection sampling.

use crate::config::Config;
use crate::geometry::Point2;
use crate::model::Obstacle;
use anyhow::{Result, bail};
use rand::prelude::*;
use rand_distr::Uniform;

/// Resampling attempts allowed per obstacle before the density is declared
/// infeasible.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Place the configured number of obstacles.
///
/// Candidates are resampled until they clear the goal region, the spawn
/// point, and every previously accepted obstacle, each by a radius-sum
/// distance test.
///
/// # Errors
/// Returns an error when a candidate cannot be placed within
/// [`MAX_PLACEMENT_ATTEMPTS`] attempts.
pub fn generate<R: Rng>(cfg: &Config, rng: &mut R) -> Result<Vec<Obstacle>> {
    let x_dist = Uniform::new(0.0, cfg.arena.width)?;
    let y_dist = Uniform::new(0.0, cfg.arena.height)?;
    let radius_dist =
        Uniform::new_inclusive(cfg.obstacles.min_radius, cfg.obstacles.max_radius)?;

    let goal = cfg.goal_location();
    let spawn = cfg.spawn_location();

    let mut obstacles = Vec::with_capacity(cfg.obstacles.count);

    for _ in 0..cfg.obstacles.count {
        let mut attempts = 0;

        loop {
            attempts += 1;
            if attempts > MAX_PLACEMENT_ATTEMPTS {
                bail!(
                    "obstacle density infeasible for the given arena and radius bounds \
                     (gave up after {MAX_PLACEMENT_ATTEMPTS} attempts)"
                );
            }

            let location = Point2::new(x_dist.sample(rng), y_dist.sample(rng));
            let radius = radius_dist.sample(rng);

            if location.distance(goal) < radius + cfg.arena.goal_radius {
                continue;
            }
            if location.distance(spawn) < radius + cfg.agents.radius {
                continue;
            }
            if obstacles
                .iter()
                .any(|other: &Obstacle| other.location().distance(location) < other.radius() + radius)
            {
                continue;
            }

            obstacles.push(Obstacle::new(location, radius)?);
            break;
        }
    }

    Ok(obstacles)
}
