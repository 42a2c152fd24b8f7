use glam::Vec2;

use crate::FluidSimulation;
use crate::boundary::BoundaryKind;
use crate::config::FluidConfig;
use crate::error::Result;
use crate::export::FluidData;
use crate::grid::GridLayout;
use crate::solver::{advect, diffuse, project};

/// Fixed-resolution stable fluids solver.
///
/// Fields are stored with a one-cell ghost ring, so `width()` and
/// `height()` are two larger than the requested domain.
#[derive(Debug, Clone)]
pub struct Fluid {
    layout: GridLayout,
    config: FluidConfig,
    steps: u64,
    velocity_x: Vec<f32>,
    velocity_y: Vec<f32>,
    velocity_x0: Vec<f32>,
    velocity_y0: Vec<f32>,
    density: Vec<f32>,
    prev_density: Vec<f32>,
}

impl Fluid {
    pub fn new(config: FluidConfig, width: usize, height: usize) -> Result<Self> {
        config.validate()?;
        let layout = GridLayout::new(width, height)?;
        let size = layout.len();

        log::debug!(
            "fluid grid {}x{} ({} cells with ghost ring), dt={} diffusion={} viscosity={} iterations={}",
            width,
            height,
            size,
            config.dt,
            config.diffusion,
            config.viscosity,
            config.iterations
        );

        Ok(Self {
            layout,
            config,
            steps: 0,
            velocity_x: vec![0.0; size],
            velocity_y: vec![0.0; size],
            velocity_x0: vec![0.0; size],
            velocity_y0: vec![0.0; size],
            density: vec![0.0; size],
            prev_density: vec![0.0; size],
        })
    }

    /// Advances the simulation by one `dt`.
    pub fn step(&mut self) {
        let layout = &self.layout;
        let FluidConfig {
            dt,
            diffusion,
            viscosity,
            iterations,
        } = self.config;

        diffuse(
            layout,
            BoundaryKind::VelocityX,
            &mut self.velocity_x0,
            &self.velocity_x,
            viscosity,
            dt,
            iterations,
        );
        diffuse(
            layout,
            BoundaryKind::VelocityY,
            &mut self.velocity_y0,
            &self.velocity_y,
            viscosity,
            dt,
            iterations,
        );

        // velocity_x / velocity_y serve as pressure / divergence here.
        project(
            layout,
            &mut self.velocity_x0,
            &mut self.velocity_y0,
            &mut self.velocity_x,
            &mut self.velocity_y,
            iterations,
        );

        advect(
            layout,
            BoundaryKind::VelocityX,
            &mut self.velocity_x,
            &self.velocity_x0,
            &self.velocity_x0,
            &self.velocity_y0,
            dt,
        );
        advect(
            layout,
            BoundaryKind::VelocityY,
            &mut self.velocity_y,
            &self.velocity_y0,
            &self.velocity_x0,
            &self.velocity_y0,
            dt,
        );

        project(
            layout,
            &mut self.velocity_x,
            &mut self.velocity_y,
            &mut self.velocity_x0,
            &mut self.velocity_y0,
            iterations,
        );

        diffuse(
            layout,
            BoundaryKind::Scalar,
            &mut self.prev_density,
            &self.density,
            diffusion,
            dt,
            iterations,
        );
        advect(
            layout,
            BoundaryKind::Scalar,
            &mut self.density,
            &self.prev_density,
            &self.velocity_x,
            &self.velocity_y,
            dt,
        );

        self.steps += 1;
        log::trace!("fluid step {} done", self.steps);
    }

    /// Adds `amount` of density at `(x, y)`, clamped onto the grid.
    pub fn add_density(&mut self, x: usize, y: usize, amount: f32) {
        let idx = self.layout.ix_clamped(x, y);
        self.density[idx] += amount;
    }

    /// Adds `amount` to the velocity at `(x, y)`, clamped onto the grid.
    pub fn add_velocity(&mut self, x: usize, y: usize, amount: Vec2) {
        let idx = self.layout.ix_clamped(x, y);
        self.velocity_x[idx] += amount.x;
        self.velocity_y[idx] += amount.y;
    }

    /// Subtracts `fade` from every density cell, flooring at zero.
    pub fn fade_density(&mut self, fade: f32) {
        for d in self.density.iter_mut() {
            *d = (*d - fade).max(0.0);
        }
    }

    /// Zeroes every field in place.
    pub fn reset(&mut self) {
        for field in [
            &mut self.velocity_x,
            &mut self.velocity_y,
            &mut self.velocity_x0,
            &mut self.velocity_y0,
            &mut self.density,
            &mut self.prev_density,
        ] {
            field.fill(0.0);
        }
        self.steps = 0;
        log::debug!("fluid state reset");
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Number of completed steps since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn density(&self) -> &[f32] {
        &self.density
    }

    pub fn velocity_x(&self) -> &[f32] {
        &self.velocity_x
    }

    pub fn velocity_y(&self) -> &[f32] {
        &self.velocity_y
    }

    pub fn view(&self) -> FluidView<'_> {
        FluidView {
            layout: &self.layout,
            density: &self.density,
            velocity_x: &self.velocity_x,
            velocity_y: &self.velocity_y,
        }
    }
}

/// Read-only borrow of the fields a renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct FluidView<'a> {
    layout: &'a GridLayout,
    density: &'a [f32],
    velocity_x: &'a [f32],
    velocity_y: &'a [f32],
}

impl FluidView<'_> {
    pub fn layout(&self) -> &GridLayout {
        self.layout
    }
}

impl FluidData for FluidView<'_> {
    fn width(&self) -> usize {
        self.layout.width()
    }
    fn height(&self) -> usize {
        self.layout.height()
    }
    fn density(&self) -> &[f32] {
        self.density
    }
    fn velocity_x(&self) -> &[f32] {
        self.velocity_x
    }
    fn velocity_y(&self) -> &[f32] {
        self.velocity_y
    }
}

impl FluidData for Fluid {
    fn width(&self) -> usize {
        self.layout.width()
    }
    fn height(&self) -> usize {
        self.layout.height()
    }
    fn density(&self) -> &[f32] {
        &self.density
    }
    fn velocity_x(&self) -> &[f32] {
        &self.velocity_x
    }
    fn velocity_y(&self) -> &[f32] {
        &self.velocity_y
    }
}

impl FluidSimulation for Fluid {
    fn step(&mut self) {
        self.step()
    }

    fn add_density(&mut self, x: usize, y: usize, amount: f32) {
        self.add_density(x, y, amount)
    }

    fn add_velocity(&mut self, x: usize, y: usize, amount: Vec2) {
        self.add_velocity(x, y, amount)
    }

    fn fade_density(&mut self, fade: f32) {
        self.fade_density(fade)
    }

    fn width(&self) -> usize {
        self.width()
    }

    fn height(&self) -> usize {
        self.height()
    }
}
