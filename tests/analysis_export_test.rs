use std::fs;
use std::path::Path;

use glam::Vec2;
use stablefluid::analysis::{interior_divergence, interior_mass};
use stablefluid::{AnalysisRecorder, Fluid, FluidConfig, FluidMetrics, ImageExporter};

#[test]
fn test_metrics_of_still_fluid() {
    let mut sim = Fluid::new(FluidConfig::default(), 8, 8).unwrap();
    sim.add_density(3, 3, 10.0);
    sim.add_density(5, 6, 6.0);

    let metrics = FluidMetrics::analyze(&sim, 0);
    assert_eq!(metrics.total_mass, 16.0);
    assert_eq!(metrics.max_density, 10.0);
    assert_eq!(metrics.min_density, 0.0);
    assert_eq!(metrics.total_kinetic_energy, 0.0);
    assert_eq!(metrics.max_velocity, 0.0);
    assert_eq!(metrics.velocity_divergence, 0.0);
    assert_eq!(interior_mass(&sim), 16.0);
}

#[test]
fn test_divergence_of_point_source() {
    let mut sim = Fluid::new(FluidConfig::default(), 8, 8).unwrap();
    sim.add_velocity(4, 4, Vec2::new(1.0, 0.0));
    // +1 at (3, 4), -1 at (5, 4).
    assert_eq!(interior_divergence(&sim), 2.0);
    assert!(FluidMetrics::analyze(&sim, 0).vorticity > 0.0);
}

#[test]
fn test_recorder_history_and_json() {
    let mut sim = Fluid::new(FluidConfig::default(), 4, 4).unwrap();
    sim.add_density(2, 2, 100.0);
    let mut recorder = AnalysisRecorder::new();
    assert_eq!(recorder.mass_change(), None);

    recorder.record_frame(&sim, sim.steps());
    for _ in 0..3 {
        sim.step();
        recorder.record_frame(&sim, sim.steps());
    }
    recorder.log_trends();

    assert_eq!(recorder.metrics_history.len(), 4);
    assert_eq!(recorder.metrics_history[3].frame, 3);
    let change = recorder.mass_change().unwrap();
    assert!(change <= 0.0 && change > -0.01, "mass change {change}");

    let json: serde_json::Value = serde_json::from_str(&recorder.to_json().unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 4);
    assert_eq!(json[0]["total_mass"], 100.0);
}

#[test]
fn test_export_frame_sequence() {
    let out = Path::new("test_output/sequence");
    let _ = fs::remove_dir_all(out);

    let mut sim = Fluid::new(FluidConfig::default(), 10, 10).unwrap();
    sim.add_density(5, 5, 500.0);
    sim.add_velocity(5, 5, Vec2::new(0.1, 0.0));

    let exporter = ImageExporter::new(3);
    exporter.export_frame_sequence(&mut sim, 3, out, "drop").unwrap();
    assert_eq!(sim.steps(), 3);

    for i in 0..3 {
        let path = out.join(format!("drop_frame_{:04}.png", i));
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (30, 30));
    }

    let velocity = out.join("velocity.png");
    exporter.export_velocity_png(&sim.view(), &velocity).unwrap();
    assert!(velocity.exists());
}
