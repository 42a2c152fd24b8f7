use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use stablefluid::{AnalysisRecorder, Config, DesktopApp, Fluid, ImageExporter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = match take_flag(&mut args, "--config") {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };

    if args.first().map(String::as_str) == Some("headless") {
        let frames = match args.get(1) {
            Some(n) => n.parse()?,
            None => 60,
        };
        let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("frames"));
        run_headless(config, frames, &out_dir)?;
    } else {
        run_gui_app(config)?;
    }

    Ok(())
}

/// Removes `name <value>` from `args`, returning the value.
fn take_flag(args: &mut Vec<String>, name: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == name)?;
    if pos + 1 >= args.len() {
        args.remove(pos);
        return None;
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Some(value)
}

fn run_headless(
    config: Config,
    frames: u64,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let scene = config.scene;
    let mut fluid = Fluid::new(config.fluid, scene.width, scene.height)?;
    let exporter = ImageExporter::new(scene.scale);
    let mut recorder = AnalysisRecorder::new();
    fs::create_dir_all(out_dir)?;

    log::info!(
        "running {} headless frames on a {}x{} grid into {}",
        frames,
        scene.width,
        scene.height,
        out_dir.display()
    );

    let source_x = scene.width / 2;
    let source_y = scene.height - scene.height / 8;
    let [vx, vy] = scene.source_velocity;

    for frame in 0..frames {
        fluid.add_density(source_x, source_y, scene.source_density);
        fluid.add_velocity(source_x, source_y, Vec2::new(vx, vy));
        fluid.fade_density(scene.fade);
        fluid.step();

        exporter.export_density_png(&fluid, &out_dir.join(format!("density_{:04}.png", frame)))?;
        exporter
            .export_velocity_png(&fluid, &out_dir.join(format!("velocity_{:04}.png", frame)))?;

        let metrics = recorder.record_frame(&fluid, fluid.steps());
        if frame % 5 == 0 {
            metrics.log_summary();
        }
    }

    recorder.log_trends();
    fs::write(out_dir.join("metrics.json"), recorder.to_json()?)?;
    log::info!("wrote {} frames and metrics.json", frames);
    Ok(())
}

fn run_gui_app(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = DesktopApp::new(config)?;
    let scene = config.scene;
    let width = (scene.width as u32 * scene.scale) as f32 + 32.0;
    let height = (scene.height as u32 * scene.scale) as f32 + 200.0;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_title("stablefluid"),
        ..Default::default()
    };

    eframe::run_native("stablefluid", options, Box::new(|_cc| Box::new(app)))?;
    Ok(())
}
