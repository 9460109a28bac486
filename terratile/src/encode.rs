use glam::Vec3;
use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::grid::HeightGrid;

// Elevation bands for the colorized encoding, over normalized heights.
const WATER_THRESHOLD: f32 = 0.3;
const SAND_THRESHOLD: f32 = 0.4;
const GRASS_THRESHOLD: f32 = 0.6;
const ROCK_THRESHOLD: f32 = 0.8;

// The encodings below are derived artifacts for the host's texturing
// pipeline. They are pure functions of a finished grid: regenerate the
// grid, regenerate the images. The grid itself stays authoritative.

// Grayscale elevation encoding, normalized over the grid's own range.
pub fn height_image(grid: &HeightGrid) -> GrayImage {
    let size = grid.size();
    let (min, max) = height_range(grid);
    let mut img = GrayImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let norm = normalized(grid.at(x, y), min, max);
            img.put_pixel(x, y, Luma([(norm * 255.0).round() as u8]));
        }
    }
    img
}

// Tangent-space normal-map encoding from height differences; `strength`
// exaggerates the slope response. Edge samples fall back to forward/backward
// differences.
pub fn normal_image(grid: &HeightGrid, strength: f32) -> RgbImage {
    let size = grid.size();
    let mut img = RgbImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(size - 1);
            let y0 = y.saturating_sub(1);
            let y1 = (y + 1).min(size - 1);
            let dx = (grid.at(x1, y) - grid.at(x0, y)) / (x1 - x0).max(1) as f32;
            let dy = (grid.at(x, y1) - grid.at(x, y0)) / (y1 - y0).max(1) as f32;
            let n = Vec3::new(-dx * strength, -dy * strength, 1.0).normalize();
            img.put_pixel(
                x,
                y,
                Rgb([
                    ((n.x * 0.5 + 0.5) * 255.0) as u8,
                    ((n.y * 0.5 + 0.5) * 255.0) as u8,
                    ((n.z * 0.5 + 0.5) * 255.0) as u8,
                ]),
            );
        }
    }
    img
}

// Banded terrain colors over normalized heights: water, sand, grass, rock,
// snow.
pub fn color_image(grid: &HeightGrid) -> RgbImage {
    let size = grid.size();
    let (min, max) = height_range(grid);
    let mut img = RgbImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let norm = normalized(grid.at(x, y), min, max);
            img.put_pixel(x, y, Rgb(height_to_rgb(norm)));
        }
    }
    img
}

fn height_range(grid: &HeightGrid) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in grid.as_slice() {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

fn normalized(value: f32, min: f32, max: f32) -> f32 {
    if (max - min).abs() < f32::EPSILON {
        0.5
    } else {
        (value - min) / (max - min)
    }
}

// Linearly interpolate between two RGB triples
fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

// Map a normalized height to a terrain color
fn height_to_rgb(h: f32) -> [u8; 3] {
    match h {
        x if x < WATER_THRESHOLD => {
            let t = x / WATER_THRESHOLD;
            lerp_color([0, 0, 128], [0, 128, 255], t) // deep to shallow water
        }
        x if x < SAND_THRESHOLD => {
            let t = (x - WATER_THRESHOLD) / (SAND_THRESHOLD - WATER_THRESHOLD);
            lerp_color([194, 178, 128], [220, 200, 160], t) // sand
        }
        x if x < GRASS_THRESHOLD => {
            let t = (x - SAND_THRESHOLD) / (GRASS_THRESHOLD - SAND_THRESHOLD);
            lerp_color([34, 139, 34], [50, 205, 50], t) // grass
        }
        x if x < ROCK_THRESHOLD => {
            let t = (x - GRASS_THRESHOLD) / (ROCK_THRESHOLD - GRASS_THRESHOLD);
            lerp_color([128, 128, 128], [192, 192, 192], t) // rock
        }
        x => {
            let t = (x - ROCK_THRESHOLD) / (1.0 - ROCK_THRESHOLD);
            lerp_color([220, 220, 220], [255, 255, 255], t) // snow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{color_image, height_image, normal_image};
    use crate::grid::HeightGrid;

    fn ramp_grid() -> HeightGrid {
        let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
        HeightGrid::from_samples(4, data).unwrap()
    }

    #[test]
    fn images_match_grid_dimensions() {
        let grid = ramp_grid();
        assert_eq!(height_image(&grid).dimensions(), (4, 4));
        assert_eq!(normal_image(&grid, 1.0).dimensions(), (4, 4));
        assert_eq!(color_image(&grid).dimensions(), (4, 4));
    }

    #[test]
    fn grayscale_normalizes_to_full_range() {
        let grid = ramp_grid();
        let img = height_image(&grid);
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(3, 3).0, [255]);
    }

    #[test]
    fn flat_grid_encodes_mid_gray_and_straight_up() {
        let grid = HeightGrid::from_samples(4, vec![3.0; 16]).unwrap();
        let gray = height_image(&grid);
        assert_eq!(gray.get_pixel(1, 1).0, [128]);

        let normals = normal_image(&grid, 1.0);
        // No slope anywhere: every texel points straight out of the map.
        assert_eq!(normals.get_pixel(2, 2).0, [127, 127, 255]);
    }

    #[test]
    fn normal_map_leans_against_the_slope() {
        let grid = ramp_grid();
        let normals = normal_image(&grid, 1.0);
        let px = normals.get_pixel(1, 1).0;
        // Heights grow with +x and +y, so the normal leans toward -x/-y.
        assert!(px[0] < 127);
        assert!(px[1] < 127);
    }
}
