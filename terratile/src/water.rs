use glam::Vec3;

use crate::config::TerrainConfig;

// Placement for the flat water proxy covering the generated extent. There
// is no owned geometry; the host scales its own plane with this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterTransform {
    pub position: Vec3,
    pub scale: Vec3,
}

// The proxy tracks only the overall footprint, never the sampled
// elevations: position centers the plane on the grid, scale stretches it
// across `total_size - 1` cells on both horizontal axes.
pub fn fit_water_plane(config: &TerrainConfig) -> WaterTransform {
    let total = config.total_size();
    let center = (total / 2) as f32 - 0.5;
    WaterTransform {
        position: Vec3::new(center, config.water_level, center),
        scale: Vec3::new(
            (total - 1) as f32,
            config.water_depth,
            (total - 1) as f32,
        ),
    }
}
