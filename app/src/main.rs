use std::time::Instant;

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle};
use image::{GrayImage, RgbImage};
use terratile::{Terrain, TerrainConfig, encode, generate};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum MapView {
    Height,
    Normal,
    Color,
}

// Derived encodings of the current run, both as image buffers (for PNG
// export) and as uploaded textures (for display).
struct Maps {
    height_img: GrayImage,
    normal_img: RgbImage,
    color_img: RgbImage,
    height_tex: TextureHandle,
    normal_tex: TextureHandle,
    color_tex: TextureHandle,
}

struct ViewerApp {
    config: TerrainConfig,
    view: MapView,

    // Last successful run; replaced only when a new run completes, so a
    // failed generation keeps the previous terrain on screen.
    terrain: Option<Terrain>,
    maps: Option<Maps>,

    // timing & status
    last_duration: Option<f32>,
    status_message: String,
}

impl Default for ViewerApp {
    fn default() -> Self {
        Self {
            config: TerrainConfig {
                size: 64,
                chunks_per_side: 2,
                ..TerrainConfig::default()
            },
            view: MapView::Color,
            terrain: None,
            maps: None,
            last_duration: None,
            status_message: String::new(),
        }
    }
}

impl ViewerApp {
    fn upload_maps(&self, ctx: &egui::Context, terrain: &Terrain) -> Maps {
        let size = terrain.grid.size() as usize;

        let height_img = encode::height_image(&terrain.grid);
        let normal_img = encode::normal_image(&terrain.grid, 1.0);
        let color_img = encode::color_image(&terrain.grid);

        // egui wants RGB bytes; widen the grayscale buffer.
        let gray_rgb: Vec<u8> = height_img.pixels().flat_map(|p| [p.0[0]; 3]).collect();
        let height_tex = ctx.load_texture(
            "height",
            ColorImage::from_rgb([size, size], &gray_rgb),
            egui::TextureOptions::NEAREST,
        );
        let normal_tex = ctx.load_texture(
            "normal",
            ColorImage::from_rgb([size, size], normal_img.as_raw()),
            egui::TextureOptions::NEAREST,
        );
        let color_tex = ctx.load_texture(
            "color",
            ColorImage::from_rgb([size, size], color_img.as_raw()),
            egui::TextureOptions::NEAREST,
        );

        Maps {
            height_img,
            normal_img,
            color_img,
            height_tex,
            normal_tex,
            color_tex,
        }
    }
}

impl App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Terratile");
            ui.separator();

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.config.seed).speed(1.0));

            ui.label("Chunk size");
            ui.add(egui::Slider::new(&mut self.config.size, 8..=128));

            ui.label("Chunks per side");
            ui.add(egui::Slider::new(&mut self.config.chunks_per_side, 1..=8));

            ui.separator();

            ui.label("Noise window");
            ui.horizontal(|ui| {
                ui.add(egui::DragValue::new(&mut self.config.clip_x).speed(0.1));
                ui.add(egui::DragValue::new(&mut self.config.clip_y).speed(0.1));
            });
            ui.add(egui::Slider::new(&mut self.config.clip_size, 0.1..=8.0).text("Clip size"));

            ui.label("Frequency");
            ui.add(egui::Slider::new(&mut self.config.frequency, 0.1..=10.0));

            ui.label("Lacunarity");
            ui.add(egui::Slider::new(&mut self.config.lacunarity, 1.0..=4.0));

            ui.label("Persistence");
            ui.add(egui::Slider::new(&mut self.config.persistence, 0.01..=1.0));

            ui.label("Octaves");
            ui.add(egui::Slider::new(&mut self.config.octaves, 1..=8));

            ui.separator();

            ui.label("Vertical scaling");
            ui.add(egui::Slider::new(&mut self.config.scaling, 1.0..=50.0));

            ui.label("Scale bias");
            ui.add(egui::Slider::new(&mut self.config.scale_bias, -20.0..=20.0));

            let mut terracing = !self.config.terrace_levels.is_empty();
            if ui.checkbox(&mut terracing, "Terracing").changed() {
                self.config.terrace_levels = if terracing {
                    TerrainConfig::default().terrace_levels
                } else {
                    Vec::new()
                };
            }

            ui.label("Water level");
            ui.add(egui::Slider::new(&mut self.config.water_level, -10.0..=20.0));

            ui.separator();

            ui.label("Map");
            egui::ComboBox::from_label("View")
                .selected_text(format!("{:?}", self.view))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.view, MapView::Height, "Height");
                    ui.selectable_value(&mut self.view, MapView::Normal, "Normal");
                    ui.selectable_value(&mut self.view, MapView::Color, "Color");
                });

            ui.separator();

            // Generate & measure
            if ui.button("Generate Terrain").clicked() {
                let start = Instant::now();
                match generate(&self.config) {
                    Ok(terrain) => {
                        let maps = self.upload_maps(ctx, &terrain);
                        self.last_duration = Some(start.elapsed().as_secs_f32() * 1000.0);
                        self.status_message = format!(
                            "Generated {} chunks in {:.2} ms (seed {})",
                            terrain.chunks.len(),
                            self.last_duration.unwrap_or(0.0),
                            self.config.seed
                        );
                        // Swap in the finished run; only now does the old
                        // one get dropped.
                        self.terrain = Some(terrain);
                        self.maps = Some(maps);
                    }
                    Err(err) => {
                        // Previous terrain and textures stay untouched.
                        self.status_message = format!("Generation failed: {err}");
                    }
                }
                ctx.request_repaint();
            }

            // Save to PNG
            if ui.button("Save PNGs…").clicked() {
                if let Some(maps) = &self.maps {
                    let seed = self.config.seed;
                    let result = maps
                        .height_img
                        .save(format!("terrain_{seed}_height.png"))
                        .and_then(|_| maps.normal_img.save(format!("terrain_{seed}_normal.png")))
                        .and_then(|_| maps.color_img.save(format!("terrain_{seed}_color.png")));
                    self.status_message = match result {
                        Ok(_) => format!("Saved terrain_{seed}_*.png"),
                        Err(err) => format!("Save failed: {err}"),
                    };
                } else {
                    self.status_message = "Nothing to save yet".into();
                }
            }

            ui.separator();

            if let Some(terrain) = &self.terrain {
                let vertices: usize = terrain.chunks.iter().map(|c| c.positions.len()).sum();
                let triangles: usize = terrain.chunks.iter().map(|c| c.triangle_count()).sum();
                ui.label(format!(
                    "{}x{} grid, {} chunks",
                    terrain.grid.size(),
                    terrain.grid.size(),
                    terrain.chunks.len()
                ));
                ui.label(format!("{vertices} vertices, {triangles} triangles"));
                ui.label(format!(
                    "water at y {:.1}, footprint {:.0}x{:.0}",
                    terrain.water.position.y, terrain.water.scale.x, terrain.water.scale.z
                ));
            }

            ui.label(&self.status_message);
        });

        // central display
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(maps) = &self.maps {
                let tex = match self.view {
                    MapView::Height => &maps.height_tex,
                    MapView::Normal => &maps.normal_tex,
                    MapView::Color => &maps.color_tex,
                };
                let available = ui.available_size();
                ui.image((tex.id(), available));
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate Terrain” to start");
                });
            }
        });
    }
}

fn main() {
    env_logger::init();
    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Terratile Viewer",
        opts,
        Box::new(|_cc| Ok(Box::new(ViewerApp::default()))),
    )
    .unwrap();
}
