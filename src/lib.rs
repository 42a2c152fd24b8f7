//! Two-dimensional stable fluids on a fixed grid with a ghost-cell ring.

pub mod analysis;
pub mod boundary;
pub mod config;
pub mod desktop;
pub mod error;
pub mod export;
pub mod fluid;
pub mod grid;
pub mod render;
pub mod solver;
pub mod starfield;

/// Stimulus surface shared by the desktop viewer and the frame exporter.
pub trait FluidSimulation {
    fn step(&mut self);
    fn add_density(&mut self, x: usize, y: usize, amount: f32);
    fn add_velocity(&mut self, x: usize, y: usize, amount: glam::Vec2);
    fn fade_density(&mut self, fade: f32);
    fn width(&self) -> usize;
    fn height(&self) -> usize;
}

pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use boundary::BoundaryKind;
pub use config::{Config, FluidConfig, SceneConfig};
pub use desktop::DesktopApp;
pub use error::FluidError;
pub use export::{FluidData, ImageExporter};
pub use fluid::{Fluid, FluidView};
pub use grid::GridLayout;
pub use render::{Renderer, VisualizerMode};
pub use starfield::{PixelSink, Starfield, Viewport};
