use navigare::config::{
    AgentParams, ArenaParams, Config, EvolutionParams, ObstacleParams, VisionParams,
};
use navigare::engine::Engine;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use std::f64::consts::PI;

fn test_config() -> Config {
    Config {
        arena: ArenaParams {
            width: 1200.0,
            height: 800.0,
            goal_radius: 10.0,
        },
        agents: AgentParams {
            count: 30,
            radius: 10.0,
            hidden_neurons: 5,
        },
        vision: VisionParams {
            rays: 5,
            half_spread: PI / 2.0,
        },
        obstacles: ObstacleParams {
            count: 15,
            min_radius: 10.0,
            max_radius: 30.0,
        },
        evolution: EvolutionParams {
            round_ticks: 40,
            offspring_per_couple: 5,
            mutation_dampener: 0.0,
        },
    }
}

#[test]
fn identical_seeds_reproduce_the_whole_run() {
    let cfg = test_config();
    let mut first = Engine::new(cfg.clone(), ChaCha12Rng::seed_from_u64(123)).unwrap();
    let mut second = Engine::new(cfg.clone(), ChaCha12Rng::seed_from_u64(123)).unwrap();

    // Two full rounds plus a few ticks, compared tick for tick.
    for tick in 0..(2 * cfg.evolution.round_ticks + 7) {
        first.step().unwrap();
        second.step().unwrap();

        let agents_a = &first.state().agents;
        let agents_b = &second.state().agents;
        assert_eq!(agents_a.len(), agents_b.len());

        for (a, b) in agents_a.iter().zip(agents_b) {
            assert_eq!(a.location(), b.location(), "tick {tick}");
            assert_eq!(a.heading(), b.heading(), "tick {tick}");
            assert_eq!(a.fitness(), b.fitness(), "tick {tick}");
        }

        for (a, b) in first.state().obstacles.iter().zip(&second.state().obstacles) {
            assert_eq!(a.location(), b.location(), "tick {tick}");
            assert_eq!(a.radius(), b.radius(), "tick {tick}");
        }
    }
}

#[test]
fn population_size_survives_reproduction() {
    let cfg = test_config();
    let mut engine = Engine::new(cfg.clone(), ChaCha12Rng::seed_from_u64(7)).unwrap();

    for round in 1..=3 {
        for _ in 0..cfg.evolution.round_ticks {
            engine.step().unwrap();
        }
        assert_eq!(engine.state().round, round);
        assert_eq!(engine.state().agents.len(), 30);
    }
}

#[test]
fn agents_never_leave_the_arena() {
    let cfg = test_config();
    let mut engine = Engine::new(cfg.clone(), ChaCha12Rng::seed_from_u64(99)).unwrap();

    for _ in 0..cfg.evolution.round_ticks {
        engine.step().unwrap();

        for agent in &engine.state().agents {
            let loc = agent.location();
            let radius = agent.radius();
            assert!(loc.x >= radius && loc.x <= cfg.arena.width - radius);
            assert!(loc.y >= radius && loc.y <= cfg.arena.height - radius);
        }
    }
}

#[test]
fn different_seeds_diverge() {
    let cfg = test_config();
    let mut first = Engine::new(cfg.clone(), ChaCha12Rng::seed_from_u64(1)).unwrap();
    let mut second = Engine::new(cfg.clone(), ChaCha12Rng::seed_from_u64(2)).unwrap();

    for _ in 0..cfg.evolution.round_ticks {
        first.step().unwrap();
        second.step().unwrap();
    }

    let diverged = first
        .state()
        .agents
        .iter()
        .zip(&second.state().agents)
        .any(|(a, b)| a.location() != b.location() || a.fitness() != b.fitness());
    assert!(diverged);
}
