use std::fs;
use std::path::Path;

use crate::FluidSimulation;
use crate::error::Result;
use crate::render::{Renderer, VisualizerMode};

/// Read-only access to solver state for consumers.
///
/// Dimensions include the ghost ring. Consumers that think in zero-based
/// interior coordinates go through [`interior_index`](Self::interior_index).
pub trait FluidData {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn density(&self) -> &[f32];
    fn velocity_x(&self) -> &[f32];
    fn velocity_y(&self) -> &[f32];

    fn inner_width(&self) -> usize {
        self.width() - 2
    }

    fn inner_height(&self) -> usize {
        self.height() - 2
    }

    /// Storage index of interior cell `(x, y)`, `x < inner_width()`.
    fn interior_index(&self, x: usize, y: usize) -> usize {
        x + 1 + (y + 1) * self.width()
    }
}

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(scale: u32) -> Self {
        Self {
            renderer: Renderer::new(scale),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn export_density_png(&self, simulation: &impl FluidData, path: &Path) -> Result<()> {
        let img = self.renderer.render_density(simulation);
        img.save(path)?;
        Ok(())
    }

    pub fn export_velocity_png(&self, simulation: &impl FluidData, path: &Path) -> Result<()> {
        let img = self.renderer.render_velocity(simulation);
        img.save(path)?;
        Ok(())
    }

    /// Writes whatever `mode` shows. Density-debug has no tile history here,
    /// so it exports as plain density.
    pub fn export_mode_png(
        &self,
        simulation: &impl FluidData,
        mode: VisualizerMode,
        path: &Path,
    ) -> Result<()> {
        match mode {
            VisualizerMode::Velocity => self.export_velocity_png(simulation, path),
            VisualizerMode::Density | VisualizerMode::DensityDebug => {
                self.export_density_png(simulation, path)
            }
        }
    }

    /// Steps `simulation` `steps` times, writing a density PNG after each.
    pub fn export_frame_sequence(
        &self,
        simulation: &mut (impl FluidData + FluidSimulation),
        steps: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<()> {
        fs::create_dir_all(output_dir)?;
        for i in 0..steps {
            FluidSimulation::step(&mut *simulation);

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            let path = output_dir.join(filename);
            self.export_density_png(&*simulation, &path)?;
        }
        log::info!("exported {} frames to {}", steps, output_dir.display());
        Ok(())
    }
}
