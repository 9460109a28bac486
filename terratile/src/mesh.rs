use std::fmt;

use glam::{Vec2, Vec3};
use log::debug;

use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::grid::HeightGrid;

// Stable chunk identifier used for diagnostics and host-side attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId {
    pub x: u32,
    pub z: u32,
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk [{}:{}]", self.x, self.z)
    }
}

// One independently attachable piece of the terrain surface. Vertex
// positions are chunk-local; `offset` carries the chunk into the parent
// space. The host owns whatever render/collision objects the data feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshChunk {
    pub id: ChunkId,
    pub offset: Vec3,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshChunk {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

// Build every chunk of the layout, row by row.
pub fn build_chunks(
    grid: &HeightGrid,
    config: &TerrainConfig,
) -> Result<Vec<MeshChunk>, TerrainError> {
    check_grid(grid, config)?;

    let per_side = config.chunks_per_side as usize;
    let mut chunks = Vec::with_capacity(per_side * per_side);
    for cz in 0..config.chunks_per_side {
        for cx in 0..config.chunks_per_side {
            chunks.push(build_unchecked(grid, config, cx, cz)?);
        }
    }
    debug!("built {} mesh chunks", chunks.len());
    Ok(chunks)
}

// Build a single chunk of the layout.
pub fn build_chunk(
    grid: &HeightGrid,
    config: &TerrainConfig,
    cx: u32,
    cz: u32,
) -> Result<MeshChunk, TerrainError> {
    check_grid(grid, config)?;
    if cx >= config.chunks_per_side || cz >= config.chunks_per_side {
        return Err(TerrainError::Precondition(format!(
            "chunk ({cx}, {cz}) outside the {n}x{n} layout",
            n = config.chunks_per_side
        )));
    }
    build_unchecked(grid, config, cx, cz)
}

// The grid must have been sampled for this exact configuration; a stale or
// foreign grid would silently misalign every chunk.
fn check_grid(grid: &HeightGrid, config: &TerrainConfig) -> Result<(), TerrainError> {
    config.validate()?;
    let total = config.total_size();
    if grid.size() != total {
        return Err(TerrainError::Precondition(format!(
            "height grid is {0}x{0}, configuration needs {total}x{total}",
            grid.size()
        )));
    }
    Ok(())
}

fn build_unchecked(
    grid: &HeightGrid,
    config: &TerrainConfig,
    cx: u32,
    cz: u32,
) -> Result<MeshChunk, TerrainError> {
    let size = config.size;
    let last = config.chunks_per_side - 1;

    // Every chunk except the last along an axis samples one extra
    // row/column. That trailing edge reads the same grid samples the next
    // chunk reads as its leading edge, so both meshes place vertices at
    // identical world positions along the shared boundary.
    let curr_x = if cx < last { size + 1 } else { size };
    let curr_z = if cz < last { size + 1 } else { size };

    let vert_count = curr_x as usize * curr_z as usize;
    let cell_count = (curr_x as usize - 1) * (curr_z as usize - 1);
    let mut positions = Vec::with_capacity(vert_count);
    let mut uvs = Vec::with_capacity(vert_count);
    let mut indices = Vec::with_capacity(6 * cell_count);

    for z in 0..curr_z {
        for x in 0..curr_x {
            let height = grid.height_at(cx * size + x, cz * size + z)?;
            positions.push(Vec3::new(x as f32, height, z as f32));
            uvs.push(Vec2::new(x as f32, z as f32));

            // Two triangles per cell, anchored at the cell's low corner.
            // Winding is the same for every chunk so the accumulated
            // normals all face up.
            if x + 1 < curr_x && z + 1 < curr_z {
                let i = z * curr_x + x;
                indices.extend_from_slice(&[
                    i,
                    i + curr_x,
                    i + curr_x + 1,
                    i + curr_x + 1,
                    i + 1,
                    i,
                ]);
            }
        }
    }

    let normals = smooth_normals(&positions, &indices);

    Ok(MeshChunk {
        id: ChunkId { x: cx, z: cz },
        offset: Vec3::new((cx * size) as f32, 0.0, (cz * size) as f32),
        positions,
        normals,
        uvs,
        indices,
    })
}

// Smooth per-vertex normals from face-normal accumulation. Elevation is
// sampled, not analytic, so this runs after triangulation.
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for normal in &mut normals {
        *normal = normal.try_normalize().unwrap_or(Vec3::Y);
    }
    normals
}
