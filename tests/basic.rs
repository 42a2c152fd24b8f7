use glam::Vec2;
use stablefluid::{Fluid, FluidConfig, FluidError};

fn fluid(width: usize, height: usize) -> Fluid {
    Fluid::new(FluidConfig::default(), width, height).unwrap()
}

#[test]
fn test_fluid_creation() {
    for (w, h) in [(1, 1), (4, 4), (10, 3), (60, 40)] {
        let sim = fluid(w, h);
        assert_eq!(sim.width(), w + 2);
        assert_eq!(sim.height(), h + 2);

        let size = (w + 2) * (h + 2);
        for field in [sim.density(), sim.velocity_x(), sim.velocity_y()] {
            assert_eq!(field.len(), size);
            assert!(field.iter().all(|&v| v == 0.0));
        }
        assert_eq!(sim.steps(), 0);
    }
}

#[test]
fn test_zero_dimensions_rejected() {
    for (w, h) in [(0, 5), (5, 0), (0, 0)] {
        let err = Fluid::new(FluidConfig::default(), w, h).unwrap_err();
        assert!(
            matches!(err, FluidError::ZeroDimension { width, height } if width == w && height == h),
            "unexpected error {err:?}"
        );
    }
}

#[test]
fn test_invalid_config_rejected() {
    let config = FluidConfig {
        iterations: 0,
        ..FluidConfig::default()
    };
    assert!(matches!(
        Fluid::new(config, 4, 4),
        Err(FluidError::InvalidConfig(_))
    ));

    let config = FluidConfig {
        dt: f32::NAN,
        ..FluidConfig::default()
    };
    assert!(Fluid::new(config, 4, 4).is_err());
}

#[test]
fn test_density_accumulates() {
    let mut sim = fluid(8, 8);
    sim.add_density(3, 4, 1.5);
    sim.add_density(3, 4, 2.25);

    let idx = sim.layout().ix(3, 4);
    assert_eq!(sim.density()[idx], 3.75);
    assert_eq!(sim.density().iter().filter(|&&d| d != 0.0).count(), 1);
}

#[test]
fn test_velocity_accumulates() {
    let mut sim = fluid(8, 8);
    sim.add_velocity(2, 5, Vec2::new(1.0, -2.0));
    sim.add_velocity(2, 5, Vec2::new(0.5, 0.5));

    let idx = sim.layout().ix(2, 5);
    assert_eq!(sim.velocity_x()[idx], 1.5);
    assert_eq!(sim.velocity_y()[idx], -1.5);
}

#[test]
fn test_out_of_range_stimulus_is_clamped() {
    let mut sim = fluid(4, 3);
    let last = sim.density().len() - 1;

    sim.add_density(1000, 1000, 7.0);
    assert_eq!(sim.density()[last], 7.0);

    sim.add_density(usize::MAX, 0, 1.0);
    assert_eq!(sim.density()[sim.width() - 1], 1.0);

    sim.add_velocity(0, usize::MAX, Vec2::new(3.0, 4.0));
    let idx = sim.layout().ix(0, sim.height() - 1);
    assert_eq!(sim.velocity_x()[idx], 3.0);
    assert_eq!(sim.velocity_y()[idx], 4.0);
}

#[test]
fn test_fade_never_goes_negative() {
    let mut sim = fluid(6, 6);
    sim.add_density(1, 1, 10.0);
    sim.add_density(2, 2, 0.25);
    sim.add_density(3, 3, -5.0);

    sim.fade_density(1.0);
    let layout = *sim.layout();
    assert_eq!(sim.density()[layout.ix(1, 1)], 9.0);
    assert_eq!(sim.density()[layout.ix(2, 2)], 0.0);
    assert_eq!(sim.density()[layout.ix(3, 3)], 0.0);

    sim.fade_density(1.0e9);
    assert!(sim.density().iter().all(|&d| d >= 0.0));
    assert!(sim.density().iter().all(|&d| d == 0.0));
}

#[test]
fn test_reset_clears_state() {
    let mut sim = fluid(6, 6);
    sim.add_density(3, 3, 50.0);
    sim.add_velocity(3, 3, Vec2::new(0.2, 0.1));
    sim.step();
    assert_eq!(sim.steps(), 1);

    sim.reset();
    assert_eq!(sim.steps(), 0);
    assert!(sim.density().iter().all(|&d| d == 0.0));
    assert!(sim.velocity_x().iter().all(|&v| v == 0.0));
    assert!(sim.velocity_y().iter().all(|&v| v == 0.0));
}
