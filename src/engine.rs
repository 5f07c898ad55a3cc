//! Simulation engine.
//!
//! Owns the configuration, current state, and random number generator, and
//! drives the tick loop and round transitions. All randomness flows through
//! the single generator passed in at construction, so a fixed seed reproduces
//! an entire run bit-for-bit.

use crate::brain::Brain;
use crate::config::Config;
use crate::field;
use crate::genetics;
use crate::geometry::Point2;
use crate::model::{Agent, State};
use crate::motion;
use crate::sensor;
use crate::stats::Accumulator;
use anyhow::{Context, Result};
use rand_chacha::ChaCha12Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Length of the action vector: steering only.
const ACTION_OUTPUTS: usize = 1;

/// An RGB display color.
pub type Color = [u8; 3];

/// Read-only per-tick observer, e.g. a renderer.
pub trait Observer {
    fn observe(&mut self, snapshot: &Snapshot);
}

/// Variant tag of a snapshot entity, carrying the variant-specific payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Agent { heading: f64 },
    Obstacle,
}

/// One world entity as seen by the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotEntity {
    pub location: Point2,
    pub radius: f64,
    pub kind: EntityKind,
}

impl SnapshotEntity {
    /// Display color, selected by the variant tag.
    pub fn color(&self) -> Color {
        match self.kind {
            EntityKind::Agent { .. } => [255, 0, 0],
            EntityKind::Obstacle => [0, 128, 0],
        }
    }
}

/// Read-only view of the world published after each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub entities: Vec<SnapshotEntity>,
    pub goal_location: Point2,
    pub goal_radius: f64,
}

impl Snapshot {
    pub fn goal_color() -> Color {
        [0, 0, 255]
    }
}

/// Simulation engine.
///
/// See [`Engine::step`] for the tick loop and [`Engine::run`] for the outer
/// loop with cancellation and observation.
pub struct Engine {
    cfg: Config,
    state: State,
    rng: ChaCha12Rng,
}

impl Engine {
    /// Create a new `Engine` with a freshly seeded population and obstacle field.
    pub fn new(cfg: Config, mut rng: ChaCha12Rng) -> Result<Self> {
        cfg.validate().context("failed to validate config")?;

        let mut agents = Vec::with_capacity(cfg.agents.count);
        for _ in 0..cfg.agents.count {
            let brain = Brain::seeded(
                cfg.sensor_inputs(),
                cfg.agents.hidden_neurons,
                ACTION_OUTPUTS,
                &mut rng,
            )
            .context("failed to seed brain")?;
            agents.push(spawn_agent(&cfg, brain).context("failed to spawn agent")?);
        }

        let obstacles =
            field::generate(&cfg, &mut rng).context("failed to generate obstacle field")?;

        let state = State {
            t: 0,
            round: 0,
            agents,
            obstacles,
        };

        Ok(Self { cfg, state, rng })
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Advance the simulation by one tick.
    ///
    /// Runs sense, think, move and fitness accumulation for every agent in
    /// order, then increments the tick counter. When the counter reaches the
    /// round length the round transition runs immediately: the population is
    /// replaced by its offspring, the obstacle field is regenerated and the
    /// counter resets.
    pub fn step(&mut self) -> Result<()> {
        for idx in 0..self.state.agents.len() {
            let input = sensor::sense(&self.state.agents[idx], &self.state.obstacles, &self.cfg);
            let action = self.state.agents[idx].brain().think(&input);

            motion::apply(
                &mut self.state.agents[idx],
                &action,
                &self.state.obstacles,
                &self.cfg,
            );
            self.state.agents[idx].accumulate_fitness();
        }

        self.state.t += 1;

        if self.state.t == self.cfg.evolution.round_ticks {
            self.advance_round().context("failed to advance round")?;
        }

        Ok(())
    }

    /// Run the simulation for a number of full rounds.
    ///
    /// The stop flag is checked once per tick boundary, never mid-tick. The
    /// observer, when present, receives a read-only snapshot after each tick.
    pub fn run(
        &mut self,
        rounds: usize,
        stop: &AtomicBool,
        mut observer: Option<&mut dyn Observer>,
    ) -> Result<()> {
        let target = self.state.round + rounds;

        while self.state.round < target {
            if stop.load(Ordering::Relaxed) {
                log::info!("stop requested, halting after tick {}", self.state.t);
                return Ok(());
            }

            self.step().context("failed to perform tick")?;

            if let Some(obs) = observer.as_deref_mut() {
                obs.observe(&self.snapshot());
            }
        }

        Ok(())
    }

    /// Derive the unified, read-only entity view for external collaborators.
    pub fn snapshot(&self) -> Snapshot {
        let agents = self.state.agents.iter().map(|agent| SnapshotEntity {
            location: agent.location(),
            radius: agent.radius(),
            kind: EntityKind::Agent {
                heading: agent.heading(),
            },
        });
        let obstacles = self.state.obstacles.iter().map(|obstacle| SnapshotEntity {
            location: obstacle.location(),
            radius: obstacle.radius(),
            kind: EntityKind::Obstacle,
        });

        Snapshot {
            entities: agents.chain(obstacles).collect(),
            goal_location: self.cfg.goal_location(),
            goal_radius: self.cfg.arena.goal_radius,
        }
    }

    fn advance_round(&mut self) -> Result<()> {
        let mut acc = Accumulator::new();
        for agent in &self.state.agents {
            acc.add(agent.fitness());
        }
        log::info!(
            "round {} finished: best fitness {:.3}, mean {:.3} ± {:.3}",
            self.state.round,
            acc.max(),
            acc.mean(),
            acc.std_dev()
        );

        let pool = std::mem::take(&mut self.state.agents);
        let brains =
            genetics::breed(pool, &self.cfg, &mut self.rng).context("failed to breed offspring")?;

        let count = self.cfg.agents.count;
        let mut agents = Vec::with_capacity(count);
        for brain in brains.into_iter().take(count) {
            agents.push(spawn_agent(&self.cfg, brain).context("failed to spawn offspring")?);
        }

        // When the couple count does not divide the population, the shortfall
        // is filled with freshly seeded agents.
        while agents.len() < count {
            let brain = Brain::seeded(
                self.cfg.sensor_inputs(),
                self.cfg.agents.hidden_neurons,
                ACTION_OUTPUTS,
                &mut self.rng,
            )
            .context("failed to seed padding brain")?;
            agents.push(spawn_agent(&self.cfg, brain).context("failed to spawn padding agent")?);
        }

        self.state.agents = agents;
        self.state.obstacles = field::generate(&self.cfg, &mut self.rng)
            .context("failed to regenerate obstacle field")?;
        self.state.t = 0;
        self.state.round += 1;

        Ok(())
    }
}

fn spawn_agent(cfg: &Config, brain: Brain) -> Result<Agent> {
    Agent::new(
        cfg.spawn_location(),
        cfg.agents.radius,
        cfg.goal_location(),
        brain,
    )
}
