//! Genetic reproduction: rank the round's population and breed the next one.

use crate::brain::Brain;
use crate::config::Config;
use crate::model::Agent;
use anyhow::{Result, bail};
use ndarray::Array2;
use rand::prelude::*;
use rand_distr::{Exp, Normal};
use std::f64::consts::LN_2;

/// Breed the offspring brains for the next generation.
///
/// The population is ranked descending by cumulative fitness. For each of the
/// `P / K` couples, both parent ranks are drawn from an exponential
/// distribution whose median is `sqrt(P)`, reduced modulo the current pool
/// size, so fitter agents are exponentially favored. Nothing prevents the same
/// rank serving both roles; this mirrors the historical selection behavior.
/// Bred couples are removed from the pool.
///
/// Returns `(P / K) * K` brains; the caller pads or truncates to exactly `P`.
pub fn breed<R: Rng>(mut pool: Vec<Agent>, cfg: &Config, rng: &mut R) -> Result<Vec<Brain>> {
    if pool.is_empty() {
        bail!("cannot breed an empty population");
    }

    pool.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

    let population = cfg.agents.count;
    let per_couple = cfg.evolution.offspring_per_couple;
    let couples = population / per_couple;

    let rank_dist = Exp::new(LN_2 / (population as f64).sqrt())?;

    let mut brains = Vec::with_capacity(couples * per_couple);

    for _ in 0..couples {
        let first = rank_dist.sample(rng) as usize % pool.len();
        let second = rank_dist.sample(rng) as usize % pool.len();

        let rate = mutation_rate(pool[first].fitness(), pool[second].fitness(), cfg);

        for _ in 0..per_couple {
            brains.push(offspring(pool[first].brain(), pool[second].brain(), rate, rng)?);
        }

        // Remove the couple, higher index first; a duplicated index removes
        // a single agent.
        let (hi, lo) = if first >= second {
            (first, second)
        } else {
            (second, first)
        };
        pool.remove(hi);
        if lo != hi {
            pool.remove(lo);
        }
    }

    Ok(brains)
}

/// Adaptive per-couple mutation rate.
///
/// Deliberately unclamped: fit parents can push it below zero (mutation
/// disabled), hopeless parents can push it past one (mutation guaranteed).
pub fn mutation_rate(fitness_a: f64, fitness_b: f64, cfg: &Config) -> f64 {
    0.5 - cfg.evolution.mutation_dampener
        - (fitness_a + fitness_b) / (4.0 * cfg.evolution.round_ticks as f64)
}

/// Cross two parent brains into one offspring brain.
///
/// Every weight element inherits from either parent with equal probability
/// and, with probability `rate`, receives Gaussian noise of standard
/// deviation `rate / 100`. Exactly one mutation draw per element.
pub fn offspring<R: Rng>(a: &Brain, b: &Brain, rate: f64, rng: &mut R) -> Result<Brain> {
    // A non-positive rate never triggers a draw; the floor only keeps the
    // distribution constructible.
    let noise = Normal::new(0.0, rate.max(0.0) / 100.0)?;

    let w1 = mix(a.w1(), b.w1(), rate, &noise, rng);
    let w2 = mix(a.w2(), b.w2(), rate, &noise, rng);

    Brain::from_weights(w1, w2)
}

fn mix<R: Rng>(
    a: &Array2<f64>,
    b: &Array2<f64>,
    rate: f64,
    noise: &Normal<f64>,
    rng: &mut R,
) -> Array2<f64> {
    debug_assert_eq!(a.dim(), b.dim());

    Array2::from_shape_fn(a.dim(), |idx| {
        let mut weight = if rng.random_bool(0.5) { a[idx] } else { b[idx] };
        if rng.random::<f64>() < rate {
            weight += noise.sample(rng);
        }
        weight
    })
}
