//! Motion model: steering to heading change, with guarded translation.

use crate::config::Config;
use crate::geometry::{Point2, wrap_angle};
use crate::model::{Agent, Obstacle};
use ndarray::Array1;
use std::f64::consts::PI;

/// Fitness penalty for a rejected move.
pub const MOVE_PENALTY: f64 = 0.01;

/// Steer and translate one agent.
///
/// The first action component maps `[0, 1]` onto a heading delta of
/// `[-π/6, π/6]`; the heading update always commits. The unit-length
/// translation along the new heading commits only if the candidate location
/// stays clear of every obstacle and inside the arena; a rejected move costs
/// [`MOVE_PENALTY`] fitness instead.
pub fn apply(agent: &mut Agent, action: &Array1<f64>, obstacles: &[Obstacle], cfg: &Config) {
    let steering = action[0];
    let delta = (steering - 0.5) * PI / 3.0;
    agent.heading = wrap_angle(agent.heading + delta);

    let candidate = agent.location() + Point2::from_angle(agent.heading);

    if hits_obstacle(candidate, agent.radius(), obstacles)
        || out_of_bounds(candidate, agent.radius(), cfg)
    {
        agent.fitness -= MOVE_PENALTY;
        return;
    }

    agent.location = candidate;
}

fn hits_obstacle(candidate: Point2, radius: f64, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|obstacle| obstacle.location().distance(candidate) < radius + obstacle.radius())
}

/// The committed band on each axis is `[radius, dimension - radius]`.
fn out_of_bounds(candidate: Point2, radius: f64, cfg: &Config) -> bool {
    candidate.x < radius
        || candidate.x > cfg.arena.width - radius
        || candidate.y < radius
        || candidate.y > cfg.arena.height - radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Brain;
    use crate::config::tests::test_config;
    use ndarray::arr1;
    use rand::prelude::*;
    use rand_chacha::ChaCha12Rng;

    fn test_agent(location: Point2, cfg: &Config) -> Agent {
        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let brain = Brain::seeded(6, 5, 1, &mut rng).unwrap();
        Agent::new(location, cfg.agents.radius, cfg.goal_location(), brain).unwrap()
    }

    #[test]
    fn neutral_steering_moves_straight_ahead() {
        let cfg = test_config();
        let mut agent = test_agent(Point2::new(100.0, 100.0), &cfg);

        apply(&mut agent, &arr1(&[0.5]), &[], &cfg);

        assert_eq!(agent.heading(), 0.0);
        assert!((agent.location().x - 101.0).abs() < 1e-12);
        assert_eq!(agent.location().y, 100.0);
        assert_eq!(agent.fitness(), 0.0);
    }

    #[test]
    fn blocked_move_keeps_location_but_turns_and_pays() {
        let cfg = test_config();
        let mut agent = test_agent(Point2::new(100.0, 100.0), &cfg);

        let obstacle = Obstacle::new(Point2::new(102.0, 100.0), 15.0).unwrap();
        apply(&mut agent, &arr1(&[1.0]), &[obstacle], &cfg);

        assert_eq!(agent.location(), Point2::new(100.0, 100.0));
        assert!((agent.heading() - PI / 6.0).abs() < 1e-12);
        assert_eq!(agent.fitness(), -MOVE_PENALTY);
    }

    #[test]
    fn walls_confine_even_without_obstacles() {
        let cfg = test_config();
        let radius = cfg.agents.radius;
        let mut agent = test_agent(Point2::new(radius + 0.5, 100.0), &cfg);
        agent.heading = PI;

        apply(&mut agent, &arr1(&[0.5]), &[], &cfg);

        assert_eq!(agent.location(), Point2::new(radius + 0.5, 100.0));
        assert_eq!(agent.fitness(), -MOVE_PENALTY);
    }

    #[test]
    fn committed_locations_never_leave_the_arena() {
        let cfg = test_config();
        let mut agent = test_agent(Point2::new(110.0, 110.0), &cfg);
        let mut rng = ChaCha12Rng::seed_from_u64(42);

        for _ in 0..20_000 {
            apply(&mut agent, &arr1(&[rng.random::<f64>()]), &[], &cfg);

            let loc = agent.location();
            let radius = agent.radius();
            assert!(loc.x >= radius && loc.x <= cfg.arena.width - radius);
            assert!(loc.y >= radius && loc.y <= cfg.arena.height - radius);
            assert!((0.0..std::f64::consts::TAU).contains(&agent.heading()));
        }
    }
}
