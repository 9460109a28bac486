use log::info;

use crate::NoiseSource;
use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::fractal::FractalSource;
use crate::grid::HeightGrid;
use crate::mesh::{MeshChunk, build_chunks};
use crate::sampler::sample_height_field;
use crate::water::{WaterTransform, fit_water_plane};

// One complete generation run: the authoritative grid, the chunk meshes
// derived from it, and the fitted water placement. Built whole or not at
// all, so a failed regeneration never leaves the caller holding a torn
// terrain; the caller drops its previous value only after this exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub grid: HeightGrid,
    pub chunks: Vec<MeshChunk>,
    pub water: WaterTransform,
}

// Run the full pipeline with the default fractal oracle.
pub fn generate(config: &TerrainConfig) -> Result<Terrain, TerrainError> {
    config.validate()?;
    let source = FractalSource::from_config(config);
    generate_with(config, &source)
}

// Run the full pipeline with a caller-supplied noise oracle. Phases run to
// completion in order: the grid is fully populated before any chunk reads
// it, and the water fit uses only the overall extent.
pub fn generate_with(
    config: &TerrainConfig,
    source: &dyn NoiseSource,
) -> Result<Terrain, TerrainError> {
    let grid = sample_height_field(config, source)?;
    let chunks = build_chunks(&grid, config)?;
    let water = fit_water_plane(config);
    info!(
        "generated {0}x{0} terrain as {1} chunks",
        grid.size(),
        chunks.len()
    );
    Ok(Terrain {
        grid,
        chunks,
        water,
    })
}
