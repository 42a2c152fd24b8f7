use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FluidError, Result};
use crate::solver::DEFAULT_ITERATIONS;

/// Physical parameters of the solver. Fixed for the lifetime of a `Fluid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    pub dt: f32,
    pub diffusion: f32,
    pub viscosity: f32,
    /// Gauss-Seidel sweeps per linear solve.
    pub iterations: u32,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            dt: 0.2,
            diffusion: 0.0001,
            viscosity: 0.0001,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl FluidConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("dt", self.dt),
            ("diffusion", self.diffusion),
            ("viscosity", self.viscosity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FluidError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.iterations == 0 {
            return Err(FluidError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Demo scene driven by the binary and the desktop viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: usize,
    pub height: usize,
    /// Pixels per simulation cell.
    pub scale: u32,
    /// Density removed from every cell each frame.
    pub fade: f32,
    pub stars: usize,
    /// Density injected at the source each frame.
    pub source_density: f32,
    /// Velocity injected at the source each frame.
    pub source_velocity: [f32; 2],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 60,
            scale: 8,
            fade: 0.5,
            stars: 128,
            source_density: 400.0,
            source_velocity: [0.0, -0.4],
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FluidError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.scale == 0 {
            return Err(FluidError::InvalidConfig(
                "scale must be at least 1".to_string(),
            ));
        }
        if !self.fade.is_finite() || self.fade < 0.0 {
            return Err(FluidError::InvalidConfig(format!(
                "fade must be finite and non-negative, got {}",
                self.fade
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fluid: FluidConfig,
    pub scene: SceneConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.fluid.validate()?;
        self.scene.validate()
    }
}
