//! Vision sensor: a fan of rays plus the bearing to the goal.

use crate::config::Config;
use crate::geometry::Point2;
use crate::model::{Agent, Obstacle};
use ndarray::Array1;
use std::f64::consts::{PI, TAU};

/// Build the sensor vector for one agent.
///
/// One feature per ray: `1 - d / max(width, height)` for the nearest obstacle
/// intersection, 0 when the ray is clear. The final feature is the signed goal
/// bearing, normalized to `[-1, 1]`.
pub fn sense(agent: &Agent, obstacles: &[Obstacle], cfg: &Config) -> Array1<f64> {
    let rays = cfg.vision.rays;
    let mut input = Array1::zeros(rays + 1);

    // Obstacles are scanned in ascending straight-line distance from the
    // agent, not along-ray distance. A compatibility detail: the first hit in
    // this order wins even if a later obstacle is nearer along the ray.
    let mut ordered: Vec<&Obstacle> = obstacles.iter().collect();
    ordered.sort_by(|a, b| {
        let dist_a = a.location().distance(agent.location());
        let dist_b = b.location().distance(agent.location());
        dist_a.total_cmp(&dist_b)
    });

    let spacing = 2.0 * cfg.vision.half_spread / (rays - 1) as f64;
    for i in 0..rays {
        let theta = agent.heading() - cfg.vision.half_spread + i as f64 * spacing;
        let ray = Point2::from_angle(theta);

        if let Some(distance) = intersection_distance(agent.location(), ray, &ordered) {
            input[i] = 1.0 - distance / cfg.max_dimension();
        }
    }

    input[rays] = goal_bearing(agent);

    input
}

/// Distance along the ray to the point closest to the first sensed obstacle.
///
/// An obstacle is sensed when its center projects ahead of the agent and the
/// perpendicular projection error is smaller than its radius.
fn intersection_distance(origin: Point2, ray: Point2, ordered: &[&Obstacle]) -> Option<f64> {
    for obstacle in ordered {
        let rel = obstacle.location() - origin;
        let along = ray.dot(rel);

        if along > 0.0 {
            let closest = ray * along;
            if (closest - rel).norm() < obstacle.radius() {
                return Some(along);
            }
        }
    }

    None
}

/// Signed angular offset to the goal, in units of π.
///
/// Positive when the goal is reached by rotating clockwise from the current
/// heading (2D cross-product test).
fn goal_bearing(agent: &Agent) -> f64 {
    let to_goal = agent.goal() - agent.location();
    let bearing = to_goal.y.atan2(to_goal.x);
    let heading = agent.heading();

    let phi = (heading - bearing).abs() % TAU;
    let offset = if phi > PI { TAU - phi } else { phi };

    let clockwise = heading.cos() * bearing.sin() - heading.sin() * bearing.cos() > 0.0;

    (if clockwise { offset } else { -offset }) / PI
}
