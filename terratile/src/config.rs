use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

// Octave counts past this add no visible detail and blow up sampling cost.
const MAX_OCTAVES: u32 = 32;

// Immutable parameters for one generation run.
//
// `size` is the chunk edge length in grid cells and `chunks_per_side` the
// number of chunks along each axis, so the dense grid covers
// `chunks_per_side * size` samples per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    pub seed: u32,

    // Lower corner and edge length of the continuous noise window. The
    // window is stretched by `chunks_per_side`, so adding chunks adds
    // terrain features instead of zooming into the same ones.
    pub clip_x: f64,
    pub clip_y: f64,
    pub clip_size: f64,

    // Fractal oracle parameters.
    pub frequency: f64,
    pub lacunarity: f64,
    pub persistence: f64,
    pub octaves: u32,

    // Vertical remap applied to every raw noise sample before terracing.
    pub scaling: f64,
    pub scale_bias: f64,

    // Strictly ascending elevation levels for the terrace curve.
    // Empty disables terracing.
    pub terrace_levels: Vec<f64>,

    pub size: u32,
    pub chunks_per_side: u32,

    // Water proxy constants; independent of the sampled elevations.
    pub water_level: f32,
    pub water_depth: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            clip_x: 0.0,
            clip_y: 0.0,
            clip_size: 1.0,
            frequency: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
            octaves: 6,
            scaling: 15.0,
            scale_bias: 0.0,
            terrace_levels: (0..40).step_by(10).map(f64::from).collect(),
            size: 64,
            chunks_per_side: 1,
            water_level: 4.7,
            water_depth: 10.0,
        }
    }
}

impl TerrainConfig {
    // Samples per axis of the dense grid. Only meaningful for a validated
    // configuration.
    pub fn total_size(&self) -> u32 {
        self.chunks_per_side * self.size
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.size == 0 {
            return Err(TerrainError::Configuration(
                "chunk size must be positive".into(),
            ));
        }
        if self.chunks_per_side == 0 {
            return Err(TerrainError::Configuration(
                "chunks_per_side must be positive".into(),
            ));
        }
        if self.size.checked_mul(self.chunks_per_side).is_none() {
            return Err(TerrainError::Configuration(format!(
                "{} chunks of size {} overflow the grid span",
                self.chunks_per_side, self.size
            )));
        }

        for (name, value) in [
            ("clip_size", self.clip_size),
            ("frequency", self.frequency),
            ("lacunarity", self.lacunarity),
            ("persistence", self.persistence),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TerrainError::Configuration(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.clip_x.is_finite() || !self.clip_y.is_finite() {
            return Err(TerrainError::Configuration(
                "clip origin must be finite".into(),
            ));
        }
        if !self.scaling.is_finite() || !self.scale_bias.is_finite() {
            return Err(TerrainError::Configuration(
                "scaling and scale_bias must be finite".into(),
            ));
        }
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(TerrainError::Configuration(format!(
                "octaves must be in 1..={MAX_OCTAVES}, got {}",
                self.octaves
            )));
        }

        if self.terrace_levels.len() == 1 {
            return Err(TerrainError::Configuration(
                "terrace curve needs at least two levels".into(),
            ));
        }
        for pair in self.terrace_levels.windows(2) {
            if !(pair[0] < pair[1]) {
                return Err(TerrainError::Configuration(format!(
                    "terrace levels must be strictly ascending, got {} before {}",
                    pair[0], pair[1]
                )));
            }
        }
        if self.terrace_levels.iter().any(|l| !l.is_finite()) {
            return Err(TerrainError::Configuration(
                "terrace levels must be finite".into(),
            ));
        }

        if !self.water_level.is_finite() || !self.water_depth.is_finite() {
            return Err(TerrainError::Configuration(
                "water constants must be finite".into(),
            ));
        }

        Ok(())
    }
}
