use log::debug;

use crate::NoiseSource;
use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::grid::HeightGrid;
use crate::pipeline::NoisePipeline;

// Populate the dense elevation grid by driving the noise pipeline over the
// clipped window.
//
// Grid coordinate (x, y) maps linearly onto the continuous span
// [clip, clip + clip_size * chunks_per_side) per axis. Stretching the window
// by the chunk count ties the visible feature density to the number of
// chunks: more chunks mean more terrain, not a zoomed-in view of the same
// terrain.
pub fn sample_height_field(
    config: &TerrainConfig,
    source: &dyn NoiseSource,
) -> Result<HeightGrid, TerrainError> {
    config.validate()?;

    let total = config.total_size();
    let extent = config.clip_size * f64::from(config.chunks_per_side);
    let pipeline = NoisePipeline::new(
        source,
        config.scaling,
        config.scale_bias,
        &config.terrace_levels,
    );

    let mut data = Vec::with_capacity(total as usize * total as usize);
    for y in 0..total {
        for x in 0..total {
            let fx = config.clip_x + extent * f64::from(x) / f64::from(total);
            let fy = config.clip_y + extent * f64::from(y) / f64::from(total);
            data.push(pipeline.sample(fx, fy) as f32);
        }
    }

    debug!("sampled {total}x{total} height field over a {extent}x{extent} window");
    HeightGrid::from_samples(total, data)
}

#[cfg(test)]
mod tests {
    use super::sample_height_field;
    use crate::NoiseSource;
    use crate::config::TerrainConfig;
    use crate::fractal::FractalSource;

    // Oracle that exposes the continuous coordinates it was asked for.
    struct CoordSum;

    impl NoiseSource for CoordSum {
        fn sample(&self, x: f64, y: f64) -> f64 {
            x + 10.0 * y
        }
    }

    fn plain_config() -> TerrainConfig {
        TerrainConfig {
            size: 2,
            chunks_per_side: 2,
            scaling: 1.0,
            scale_bias: 0.0,
            terrace_levels: Vec::new(),
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn grid_covers_total_size_squared() {
        let config = plain_config();
        let grid = sample_height_field(&config, &CoordSum).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.len(), 16);
    }

    #[test]
    fn coordinates_span_the_stretched_window() {
        // clip_size 1 with two chunks per side => continuous span of 2,
        // so grid step is 2/4 = 0.5 per cell.
        let config = plain_config();
        let grid = sample_height_field(&config, &CoordSum).unwrap();
        assert_eq!(grid.height_at(0, 0).unwrap(), 0.0);
        assert_eq!(grid.height_at(1, 0).unwrap(), 0.5);
        assert_eq!(grid.height_at(3, 0).unwrap(), 1.5);
        assert_eq!(grid.height_at(0, 1).unwrap(), 5.0);
        assert_eq!(grid.height_at(2, 3).unwrap(), 16.0);
    }

    #[test]
    fn clip_origin_offsets_the_window() {
        let config = TerrainConfig {
            clip_x: 3.0,
            clip_y: -2.0,
            ..plain_config()
        };
        let grid = sample_height_field(&config, &CoordSum).unwrap();
        assert_eq!(grid.height_at(0, 0).unwrap(), 3.0 + 10.0 * -2.0);
    }

    #[test]
    fn sampling_is_deterministic() {
        let config = TerrainConfig {
            size: 8,
            chunks_per_side: 2,
            ..TerrainConfig::default()
        };
        let a = sample_height_field(&config, &FractalSource::from_config(&config)).unwrap();
        let b = sample_height_field(&config, &FractalSource::from_config(&config)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_config_produces_no_grid() {
        let config = TerrainConfig {
            size: 0,
            ..TerrainConfig::default()
        };
        assert!(sample_height_field(&config, &CoordSum).is_err());
    }

    #[test]
    fn remap_and_terrace_apply_to_samples() {
        let config = TerrainConfig {
            scaling: 20.0,
            scale_bias: 0.0,
            terrace_levels: vec![0.0, 10.0],
            clip_size: 1.0,
            size: 2,
            chunks_per_side: 1,
            ..TerrainConfig::default()
        };
        // CoordSum at grid (1, 0) sees x = 0.5 => 0.5 * 20 = 10 => level 10.
        let grid = sample_height_field(&config, &CoordSum).unwrap();
        assert_eq!(grid.height_at(1, 0).unwrap(), 10.0);
    }
}
