// Generates one terrain run and saves its derived encodings:
// grayscale elevation, tangent-space normal map, banded color map.
// Pass a path to a JSON TerrainConfig to override the built-in defaults.

use std::env;
use std::fs;

use terratile::{TerrainConfig, encode, generate};

fn main() {
    let config: TerrainConfig = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).expect("read config file");
            serde_json::from_str(&text).expect("parse config file")
        }
        None => TerrainConfig {
            size: 64,
            chunks_per_side: 4,
            ..TerrainConfig::default()
        },
    };

    let terrain = generate(&config).expect("terrain generation failed");

    encode::height_image(&terrain.grid)
        .save("terrain_height.png")
        .unwrap();
    println!("Saved terrain_height.png");

    encode::normal_image(&terrain.grid, 1.0)
        .save("terrain_normal.png")
        .unwrap();
    println!("Saved terrain_normal.png");

    encode::color_image(&terrain.grid)
        .save("terrain_color.png")
        .unwrap();
    println!("Saved terrain_color.png");

    println!(
        "{} chunks over a {}x{} grid (seed {})",
        terrain.chunks.len(),
        terrain.grid.size(),
        terrain.grid.size(),
        config.seed
    );
}
