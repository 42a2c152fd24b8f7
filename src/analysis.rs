use serde::Serialize;

use crate::error::Result;
use crate::export::FluidData;

/// Sum over interior cells of `|du/dx + dv/dy|` by central differences,
/// unscaled.
pub fn interior_divergence(simulation: &impl FluidData) -> f32 {
    let w = simulation.width();
    let vx = simulation.velocity_x();
    let vy = simulation.velocity_y();
    let mut total = 0.0;
    for y in 1..simulation.height() - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            total += (vx[idx + 1] - vx[idx - 1] + vy[idx + w] - vy[idx - w]).abs();
        }
    }
    total
}

/// Sum of density over interior cells.
pub fn interior_mass(simulation: &impl FluidData) -> f32 {
    let w = simulation.width();
    let density = simulation.density();
    (1..simulation.height() - 1)
        .flat_map(|y| (1..w - 1).map(move |x| y * w + x))
        .map(|idx| density[idx])
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct FluidMetrics {
    pub frame: u64,
    pub total_mass: f32,
    pub min_density: f32,
    pub max_density: f32,
    pub total_kinetic_energy: f32,
    pub max_velocity: f32,
    /// Mean absolute divergence per interior cell.
    pub velocity_divergence: f32,
    /// Mean absolute vorticity per interior cell.
    pub vorticity: f32,
}

impl FluidMetrics {
    pub fn analyze(simulation: &impl FluidData, frame: u64) -> Self {
        let w = simulation.width();
        let vx = simulation.velocity_x();
        let vy = simulation.velocity_y();
        let density = simulation.density();

        let mut total_mass: f32 = 0.0;
        let mut min_density = f32::INFINITY;
        let mut max_density = f32::NEG_INFINITY;
        let mut total_kinetic_energy: f32 = 0.0;
        let mut max_velocity: f32 = 0.0;
        let mut total_vorticity = 0.0;

        for y in 1..simulation.height() - 1 {
            for x in 1..w - 1 {
                let idx = y * w + x;
                let d = density[idx];
                total_mass += d;
                min_density = min_density.min(d);
                max_density = max_density.max(d);

                let speed_sq = vx[idx] * vx[idx] + vy[idx] * vy[idx];
                total_kinetic_energy += 0.5 * d * speed_sq;
                max_velocity = max_velocity.max(speed_sq.sqrt());

                // dv/dx - du/dy
                let curl = (vy[idx + 1] - vy[idx - 1] - vx[idx + w] + vx[idx - w]) / 2.0;
                total_vorticity += curl.abs();
            }
        }

        let cells = (simulation.inner_width() * simulation.inner_height()) as f32;

        Self {
            frame,
            total_mass,
            min_density,
            max_density,
            total_kinetic_energy,
            max_velocity,
            velocity_divergence: interior_divergence(simulation) / 2.0 / cells,
            vorticity: total_vorticity / cells,
        }
    }

    pub fn log_summary(&self) {
        log::info!(
            "frame {}: mass={:.4} density=[{:.4}, {:.4}] kinetic={:.6} max_speed={:.4} divergence={:.6} vorticity={:.6}",
            self.frame,
            self.total_mass,
            self.min_density,
            self.max_density,
            self.total_kinetic_energy,
            self.max_velocity,
            self.velocity_divergence,
            self.vorticity
        );
    }
}

#[derive(Debug, Default, Serialize)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, simulation: &impl FluidData, frame: u64) -> &FluidMetrics {
        self.metrics_history
            .push(FluidMetrics::analyze(simulation, frame));
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    /// Relative mass change between the first and last recorded frames.
    pub fn mass_change(&self) -> Option<f32> {
        let first = self.metrics_history.first()?;
        let last = self.metrics_history.last()?;
        if first.total_mass == 0.0 {
            return None;
        }
        Some((last.total_mass - first.total_mass) / first.total_mass)
    }

    pub fn log_trends(&self) {
        let (Some(first), Some(last)) = (self.metrics_history.first(), self.metrics_history.last())
        else {
            return;
        };
        if self.metrics_history.len() < 2 {
            return;
        }

        log::info!(
            "mass {:.4} -> {:.4} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            self.mass_change().unwrap_or(0.0) * 100.0
        );
        log::info!(
            "kinetic energy {:.6} -> {:.6}",
            first.total_kinetic_energy,
            last.total_kinetic_energy
        );
        log::info!(
            "mean divergence {:.6} -> {:.6}",
            first.velocity_divergence,
            last.velocity_divergence
        );
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.metrics_history)?)
    }
}
