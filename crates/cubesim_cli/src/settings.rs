//! Simulation settings, loaded from YAML layered on top of the defaults.

use cubesim::cubemath::Float;
use cubesim::{AnimationSettings, Dialect};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;

/// Default settings, embedded in the binary.
const DEFAULT_CONFIG_STR: &str = include_str!("default.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SimulationConfig {
    /// Number of layers along each axis.
    pub cube_size: usize,
    /// Notation dialect. If `None`, it is chosen based on the cube size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
    /// Moves to queue when the animation starts.
    #[serde(default)]
    pub commands: Vec<String>,
    pub paused: bool,
    /// Rotation per frame, in radians.
    pub angle_step: Float,
    /// Size of each sticker relative to its piece.
    pub sticker_factor: Float,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::load(None).unwrap_or_else(|e| {
            log::error!("error loading default settings: {e:#}");
            Self {
                cube_size: 3,
                dialect: None,
                commands: vec![],
                paused: false,
                angle_step: cubesim::DEFAULT_ANGLE_STEP,
                sticker_factor: cubesim::geometry::DEFAULT_STICKER_FACTOR,
            }
        })
    }
}

impl SimulationConfig {
    /// Loads settings from the defaults, overridden by the contents of a
    /// user config file if there is one.
    pub fn load(user_config: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG_STR, CONFIG_FILE_FORMAT));
        if let Some(s) = user_config {
            builder = builder.add_source(config::File::from_str(s, CONFIG_FILE_FORMAT));
        }
        let settings: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .context("error loading settings")?;
        settings.validate()?;
        log::debug!("loaded settings: {settings:?}");
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        eyre::ensure!(self.cube_size >= 1, "cube size must be at least 1");
        eyre::ensure!(
            self.sticker_factor > 0.0 && self.sticker_factor <= 1.0,
            "sticker factor must be in the range (0, 1]",
        );
        Ok(())
    }

    /// Overrides settings with values given on the command line.
    pub fn apply_overrides(&mut self, size: Option<usize>, dialect: Option<Dialect>) -> Result<()> {
        if let Some(size) = size {
            self.cube_size = size;
        }
        if dialect.is_some() {
            self.dialect = dialect;
        }
        self.validate()
    }

    /// Returns the dialect to use for moves.
    pub fn dialect(&self) -> Dialect {
        self.dialect.unwrap_or_else(|| Dialect::for_size(self.cube_size))
    }

    pub fn animation_settings(&self) -> AnimationSettings {
        AnimationSettings {
            angle_step: self.angle_step,
            paused: self.paused,
        }
    }

    /// Serializes the settings as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_norway::to_string(self).context("error serializing settings")
    }
}
