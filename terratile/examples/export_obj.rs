// Writes each mesh chunk to its own Wavefront OBJ file with the placement
// offset applied, so the tiled set can be opened together in any mesh
// viewer and inspected for seams.

use std::fs::File;
use std::io::{BufWriter, Write};

use terratile::{TerrainConfig, generate};

fn main() {
    let config = TerrainConfig {
        size: 16,
        chunks_per_side: 2,
        ..TerrainConfig::default()
    };
    let terrain = generate(&config).expect("terrain generation failed");

    for chunk in &terrain.chunks {
        let name = format!("terrain_{}_{}.obj", chunk.id.x, chunk.id.z);
        let file = File::create(&name).expect("create obj file");
        let mut out = BufWriter::new(file);

        writeln!(out, "o {}", chunk.id).unwrap();
        for p in &chunk.positions {
            let world = *p + chunk.offset;
            writeln!(out, "v {} {} {}", world.x, world.y, world.z).unwrap();
        }
        for uv in &chunk.uvs {
            writeln!(out, "vt {} {}", uv.x, uv.y).unwrap();
        }
        for n in &chunk.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z).unwrap();
        }
        for tri in chunk.indices.chunks_exact(3) {
            // OBJ indices are 1-based.
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}").unwrap();
        }

        println!(
            "Saved {name} ({} vertices, {} triangles)",
            chunk.positions.len(),
            chunk.triangle_count()
        );
    }

    let water = &terrain.water;
    println!(
        "water plane at ({}, {}, {}) scaled ({}, {}, {})",
        water.position.x,
        water.position.y,
        water.position.z,
        water.scale.x,
        water.scale.y,
        water.scale.z
    );
}
