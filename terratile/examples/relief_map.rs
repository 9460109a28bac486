// Renders a hillshaded relief map of one terrain run: elevation tinted
// through a color gradient, lit from the north-west.

use std::path::Path;

use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use terratile::{HeightGrid, TerrainConfig, generate};

// Compute simple hillshade for the height grid
// `z_scale` adjusts vertical exaggeration
fn hillshade(grid: &HeightGrid, z_scale: f32) -> Vec<f32> {
    let size = grid.size() as usize;
    let mut shade = vec![0.0f32; size * size];
    let azimuth = std::f32::consts::PI / 4.0; // 45°
    let altitude = std::f32::consts::PI / 4.0; // 45°
    let (sin_alt, cos_alt) = altitude.sin_cos();

    let heights = grid.as_slice();
    for y in 1..size - 1 {
        for x in 1..size - 1 {
            // 3×3 neighborhood finite differences
            let dzdx = ((heights[y * size + x + 1] - heights[y * size + x - 1]) / 2.0) * z_scale;
            let dzdy = ((heights[(y + 1) * size + x] - heights[(y - 1) * size + x]) / 2.0) * z_scale;
            // Surface normal
            let nx = -dzdx;
            let ny = -dzdy;
            let nz = 1.0;
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let (nx, ny, nz) = (nx / len, ny / len, nz / len);
            // Light vector from azimuth/altitude
            let lx = azimuth.cos() * cos_alt;
            let ly = azimuth.sin() * cos_alt;
            let lz = sin_alt;
            // Lambertian dot
            shade[y * size + x] = (nx * lx + ny * ly + nz * lz).max(0.0);
        }
    }
    shade
}

fn main() {
    let config = TerrainConfig {
        size: 128,
        chunks_per_side: 4,
        ..TerrainConfig::default()
    };
    let terrain = generate(&config).expect("terrain generation failed");
    let grid = &terrain.grid;
    let size = grid.size() as usize;

    let shade = hillshade(grid, 1.0);

    // Color gradient - deep water to beach to grass to rock to snow
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
        (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
        (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
        (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
    ]);

    // Normalize heights to 0.0..1.0 for coloring
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in grid.as_slice() {
        min = min.min(v);
        max = max.max(v);
    }

    let mut img = RgbImage::new(size as u32, size as u32);
    for y in 0..size {
        for x in 0..size {
            let h = grid.as_slice()[y * size + x];
            let norm = if (max - min).abs() < f32::EPSILON {
                0.5
            } else {
                (h - min) / (max - min)
            };
            let col: LinSrgb = gradient.get(norm);
            let rgb = col.into_format::<u8>();
            let light = (shade[y * size + x] * 0.5 + 0.5).clamp(0.0, 1.0);
            img.put_pixel(
                x as u32,
                y as u32,
                Rgb([
                    (rgb.red as f32 * light) as u8,
                    (rgb.green as f32 * light) as u8,
                    (rgb.blue as f32 * light) as u8,
                ]),
            );
        }
    }

    let path = Path::new("terrain_relief.png");
    img.save(path).unwrap();
    println!("Saved relief map to {:?}", path);
}
