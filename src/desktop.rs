use std::path::PathBuf;

use eframe::egui;
use glam::Vec2;
use image::RgbImage;

use crate::config::{Config, SceneConfig};
use crate::error::Result;
use crate::export::ImageExporter;
use crate::fluid::Fluid;
use crate::render::{Renderer, VisualizerMode};
use crate::starfield::{Starfield, Viewport};

const STAR_STRIP_HEIGHT: u32 = 96;
/// Velocity added per pixel of pointer drag.
const DRAG_VELOCITY_GAIN: f32 = 0.02;
const DRAG_DENSITY: f32 = 200.0;

pub struct DesktopApp {
    fluid: Fluid,
    scene: SceneConfig,
    renderer: Renderer,
    exporter: ImageExporter,
    starfield: Starfield,
    mode: VisualizerMode,
    paused: bool,
    source_enabled: bool,
    warp: bool,
    frame_count: u64,
    star_frame: RgbImage,
    canvas: RgbImage,
    fluid_texture: Option<egui::TextureHandle>,
    star_texture: Option<egui::TextureHandle>,
}

impl DesktopApp {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let scene = config.scene;
        let fluid = Fluid::new(config.fluid, scene.width, scene.height)?;
        let canvas_width = scene.width as u32 * scene.scale;

        Ok(Self {
            fluid,
            scene,
            renderer: Renderer::new(scene.scale),
            exporter: ImageExporter::new(scene.scale),
            starfield: Starfield::new(scene.stars, 0x5eed),
            mode: VisualizerMode::Density,
            paused: false,
            source_enabled: true,
            warp: false,
            frame_count: 0,
            star_frame: RgbImage::new(canvas_width, STAR_STRIP_HEIGHT),
            canvas: RgbImage::new(0, 0),
            fluid_texture: None,
            star_texture: None,
        })
    }

    fn inject_source(&mut self) {
        let x = self.scene.width / 2;
        let y = self.scene.height - self.scene.height / 8;
        let [vx, vy] = self.scene.source_velocity;
        self.fluid.add_density(x, y, self.scene.source_density);
        self.fluid.add_velocity(x, y, Vec2::new(vx, vy));
    }

    fn handle_canvas(&mut self, rect: egui::Rect, response: &egui::Response) {
        if !response.dragged() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let scale = self.scene.scale as f32;
        let local = pos - rect.min;
        if local.x < 0.0 || local.y < 0.0 {
            return;
        }
        // Interior cell (0, 0) is stored at (1, 1).
        let x = (local.x / scale) as usize + 1;
        let y = (local.y / scale) as usize + 1;
        let delta = response.drag_delta();

        self.fluid.add_density(x, y, DRAG_DENSITY);
        self.fluid.add_velocity(
            x,
            y,
            Vec2::new(delta.x * DRAG_VELOCITY_GAIN, delta.y * DRAG_VELOCITY_GAIN),
        );
    }

    fn export_current(&self) {
        let path = PathBuf::from(format!("stablefluid_{:05}.png", self.frame_count));
        match self.exporter.export_mode_png(&self.fluid, self.mode, &path) {
            Ok(()) => log::info!("exported {}", path.display()),
            Err(e) => log::warn!("failed to export {}: {}", path.display(), e),
        }
    }
}

fn upload(
    ctx: &egui::Context,
    slot: &mut Option<egui::TextureHandle>,
    name: &str,
    img: &RgbImage,
) -> egui::TextureId {
    let size = [img.width() as usize, img.height() as usize];
    let color = egui::ColorImage::from_rgb(size, img.as_raw());
    match slot {
        Some(handle) => {
            handle.set(color, egui::TextureOptions::NEAREST);
            handle.id()
        }
        None => {
            let handle = ctx.load_texture(name, color, egui::TextureOptions::NEAREST);
            let id = handle.id();
            *slot = Some(handle);
            id
        }
    }
}

fn full_uv() -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Pause/Resume").clicked() {
                    self.paused = !self.paused;
                }
                if ui.button("Reset").clicked() {
                    self.fluid.reset();
                    self.renderer.reset_cache(&self.fluid);
                    self.frame_count = 0;
                }
                if ui.button("Export PNG").clicked() {
                    self.export_current();
                }
                ui.checkbox(&mut self.source_enabled, "Source");
                ui.checkbox(&mut self.warp, "Warp");
            });

            ui.horizontal(|ui| {
                ui.label("View:");
                for mode in VisualizerMode::ALL {
                    ui.selectable_value(&mut self.mode, mode, mode.label());
                }
                ui.add(egui::Slider::new(&mut self.scene.fade, 0.0..=5.0).text("Fade"));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let strip_size = egui::vec2(self.star_frame.width() as f32, STAR_STRIP_HEIGHT as f32);
            let (strip_rect, strip_response) =
                ui.allocate_exact_size(strip_size, egui::Sense::click());
            if strip_response.clicked() {
                if let Some(pos) = strip_response.interact_pointer_pos() {
                    self.mode = self
                        .mode
                        .on_tap(pos.x - strip_rect.left(), strip_rect.width() / 2.0);
                }
            }

            let viewport = Viewport {
                x: 0,
                y: 0,
                width: self.star_frame.width() as i32,
                height: self.star_frame.height() as i32,
            };
            self.starfield.draw(&mut self.star_frame, self.warp, viewport);
            let star_id = upload(ctx, &mut self.star_texture, "stars", &self.star_frame);
            ui.painter()
                .image(star_id, strip_rect, full_uv(), egui::Color32::WHITE);

            self.renderer
                .render(self.mode, &self.fluid, &mut self.canvas);
            let canvas_size = egui::vec2(self.canvas.width() as f32, self.canvas.height() as f32);
            let (rect, response) =
                ui.allocate_exact_size(canvas_size, egui::Sense::click_and_drag());
            self.handle_canvas(rect, &response);

            let fluid_id = upload(ctx, &mut self.fluid_texture, "fluid", &self.canvas);
            ui.painter()
                .image(fluid_id, rect, full_uv(), egui::Color32::WHITE);

            if !self.paused {
                if self.source_enabled {
                    self.inject_source();
                }
                self.fluid.fade_density(self.scene.fade);
                self.fluid.step();
                self.frame_count += 1;
            }

            ui.label(format!(
                "Frame: {} | {} | drag to stir | tap the stars to switch view",
                self.frame_count,
                self.mode.label()
            ));
        });

        ctx.request_repaint();
    }
}
