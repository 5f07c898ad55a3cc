use crate::geometry::Point2;
use crate::utils::check_num;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::{fs, path::Path};

/// Distance of the spawn point from the arena origin, on both axes.
pub const SPAWN_OFFSET: f64 = 100.0;

/// Distance of the goal from the arena's far corner, on both axes.
pub const GOAL_OFFSET: f64 = 200.0;

/// Simulation configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    pub arena: ArenaParams,
    pub agents: AgentParams,
    pub vision: VisionParams,
    pub obstacles: ObstacleParams,
    pub evolution: EvolutionParams,
}

/// Arena geometry.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ArenaParams {
    /// Arena width.
    pub width: f64,
    /// Arena height.
    pub height: f64,
    /// Radius of the goal region obstacles must keep clear.
    pub goal_radius: f64,
}

/// Agent population parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AgentParams {
    /// Population size, constant across rounds.
    pub count: usize,
    /// Collision radius of every agent.
    pub radius: f64,
    /// Hidden layer size of the agent brains.
    pub hidden_neurons: usize,
}

/// Vision sensor parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VisionParams {
    /// Number of vision rays per agent.
    pub rays: usize,
    /// Half-spread of the ray fan around the heading (radians).
    pub half_spread: f64,
}

/// Obstacle field parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ObstacleParams {
    /// Number of obstacles regenerated each round.
    pub count: usize,
    /// Minimum obstacle radius.
    pub min_radius: f64,
    /// Maximum obstacle radius.
    pub max_radius: f64,
}

/// Round and reproduction parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct EvolutionParams {
    /// Ticks per round.
    pub round_ticks: usize,
    /// Offspring produced by each mating couple.
    pub offspring_per_couple: usize,
    /// Shift applied to the adaptive mutation rate; raise it to mutate less.
    pub mutation_dampener: f64,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // The arena must fit the spawn and goal margins with room to spare.
        let min_dim = 2.0 * (SPAWN_OFFSET + GOAL_OFFSET);
        check_num(self.arena.width, min_dim..1e6).context("invalid arena width")?;
        check_num(self.arena.height, min_dim..1e6).context("invalid arena height")?;
        check_num(self.arena.goal_radius, 0.1..1e3).context("invalid goal radius")?;

        check_num(self.agents.count, 1..100_000).context("invalid agent count")?;
        check_num(self.agents.radius, 0.1..SPAWN_OFFSET).context("invalid agent radius")?;
        check_num(self.agents.hidden_neurons, 1..1_000).context("invalid hidden layer size")?;

        // Ray directions are spaced by `2 * half_spread / (rays - 1)`.
        check_num(self.vision.rays, 2..1_000).context("invalid vision ray count")?;
        check_num(self.vision.half_spread, 0.01..PI).context("invalid vision half-spread")?;

        check_num(self.obstacles.count, 0..10_000).context("invalid obstacle count")?;
        check_num(self.obstacles.min_radius, 0.1..1e3).context("invalid minimum obstacle radius")?;
        if self.obstacles.max_radius < self.obstacles.min_radius {
            bail!(
                "maximum obstacle radius {} is below the minimum {}",
                self.obstacles.max_radius,
                self.obstacles.min_radius
            );
        }
        check_num(self.obstacles.max_radius, 0.1..1e3).context("invalid maximum obstacle radius")?;

        check_num(self.evolution.round_ticks, 1..10_000_000).context("invalid round length")?;
        check_num(
            self.evolution.offspring_per_couple,
            2..=self.agents.count,
        )
        .context("invalid offspring per couple")?;
        check_num(self.evolution.mutation_dampener, -0.5..=0.5)
            .context("invalid mutation dampener")?;

        Ok(())
    }

    /// Spawn point shared by every agent at the start of a round.
    pub fn spawn_location(&self) -> Point2 {
        Point2::new(SPAWN_OFFSET, SPAWN_OFFSET)
    }

    /// Fixed goal location.
    pub fn goal_location(&self) -> Point2 {
        Point2::new(
            self.arena.width - GOAL_OFFSET,
            self.arena.height - GOAL_OFFSET,
        )
    }

    /// Largest arena dimension, used to normalize sensed distances.
    pub fn max_dimension(&self) -> f64 {
        self.arena.width.max(self.arena.height)
    }

    /// Length of the sensor vector: one feature per ray plus the goal bearing.
    pub fn sensor_inputs(&self) -> usize {
        self.vision.rays + 1
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config() -> Config {
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
                round_ticks: 1500,
                offspring_per_couple: 5,
                mutation_dampener: 0.0,
            },
        }
    }

    #[test]
    fn accepts_reference_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let mut cfg = test_config();
        cfg.agents.radius = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = test_config();
        cfg.obstacles.max_radius = 5.0;
        assert!(cfg.validate().is_err());

        let mut cfg = test_config();
        cfg.vision.rays = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = test_config();
        cfg.evolution.offspring_per_couple = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = test_config();
        cfg.arena.width = 300.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parses_toml_sections() {
        let toml_str = r#"
[arena]
width = 1200.0
height = 800.0
goal_radius = 10.0

[agents]
count = 30
radius = 10.0
hidden_neurons = 5

[vision]
rays = 5
half_spread = 1.5707963267948966

[obstacles]
count = 15
min_radius = 10.0
max_radius = 30.0

[evolution]
round_ticks = 1500
offspring_per_couple = 5
mutation_dampener = 0.0
"#;

        let cfg: Config = toml::from_str(toml_str).expect("failed to parse config");
        assert_eq!(cfg, test_config());
        assert_eq!(cfg.goal_location(), Point2::new(1000.0, 600.0));
        assert_eq!(cfg.sensor_inputs(), 6);
    }
}
