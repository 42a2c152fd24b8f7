use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stablefluid::boundary::set_boundary;
use stablefluid::{BoundaryKind, GridLayout};

fn random_field(layout: &GridLayout, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..layout.len()).map(|_| rng.gen_range(-10.0..10.0)).collect()
}

#[test]
fn test_layout_addressing() {
    let layout = GridLayout::new(5, 3).unwrap();
    assert_eq!(layout.width(), 7);
    assert_eq!(layout.height(), 5);
    assert_eq!(layout.inner_width(), 5);
    assert_eq!(layout.inner_height(), 3);
    assert_eq!(layout.len(), 35);

    assert_eq!(layout.ix(0, 0), 0);
    assert_eq!(layout.ix(3, 2), 3 + 2 * 7);
    assert_eq!(layout.ix_clamped(100, 2), layout.ix(6, 2));
    assert_eq!(layout.ix_clamped(3, 100), layout.ix(3, 4));
    assert_eq!(layout.ix_checked(6, 4), Some(34));
    assert_eq!(layout.ix_checked(7, 0), None);
    assert_eq!(layout.ix_checked(0, 5), None);

    assert!(layout.is_boundary(0, 2));
    assert!(layout.is_boundary(6, 2));
    assert!(layout.is_boundary(3, 0));
    assert!(layout.is_boundary(3, 4));
    assert!(!layout.is_boundary(1, 1));
    assert!(!layout.is_boundary(5, 3));
}

#[test]
fn test_interior_is_row_major() {
    let layout = GridLayout::new(3, 2).unwrap();
    let cells: Vec<_> = layout.interior().collect();
    assert_eq!(
        cells,
        vec![(1, 1), (2, 1), (3, 1), (1, 2), (2, 2), (3, 2)]
    );
    assert!(cells.iter().all(|&(x, y)| !layout.is_boundary(x, y)));
}

#[test]
fn test_zero_dimension_layout() {
    assert!(GridLayout::new(0, 3).is_err());
    assert!(GridLayout::new(3, 0).is_err());

    let smallest = GridLayout::new(1, 1).unwrap();
    assert_eq!(smallest.len(), 9);
    assert!(!smallest.is_empty());
}

fn check_mirror_law(layout: &GridLayout, kind: BoundaryKind, field: &[f32]) {
    let w = layout.width();
    let h = layout.height();
    let lr = if kind == BoundaryKind::VelocityX { -1.0 } else { 1.0 };
    let tb = if kind == BoundaryKind::VelocityY { -1.0 } else { 1.0 };

    for j in 1..h - 1 {
        assert_eq!(field[layout.ix(0, j)], lr * field[layout.ix(1, j)]);
        assert_eq!(field[layout.ix(w - 1, j)], lr * field[layout.ix(w - 2, j)]);
    }
    for i in 1..w - 1 {
        assert_eq!(field[layout.ix(i, 0)], tb * field[layout.ix(i, 1)]);
        assert_eq!(field[layout.ix(i, h - 1)], tb * field[layout.ix(i, h - 2)]);
    }

    let corner = |x: usize, y: usize, nx: usize, ny: usize| {
        assert_eq!(
            field[layout.ix(x, y)],
            0.5 * (field[layout.ix(nx, y)] + field[layout.ix(x, ny)])
        );
    };
    corner(0, 0, 1, 1);
    corner(0, h - 1, 1, h - 2);
    corner(w - 1, 0, w - 2, 1);
    corner(w - 1, h - 1, w - 2, h - 2);
}

#[test]
fn test_boundary_mirror_law() {
    let layout = GridLayout::new(6, 4).unwrap();
    for (seed, kind) in [
        BoundaryKind::Scalar,
        BoundaryKind::VelocityX,
        BoundaryKind::VelocityY,
    ]
    .into_iter()
    .enumerate()
    {
        let mut field = random_field(&layout, seed as u64);
        let interior: Vec<f32> = layout.interior().map(|(x, y)| field[layout.ix(x, y)]).collect();

        set_boundary(&layout, kind, &mut field);
        check_mirror_law(&layout, kind, &field);

        let after: Vec<f32> = layout.interior().map(|(x, y)| field[layout.ix(x, y)]).collect();
        assert_eq!(interior, after, "interior must not be touched");
    }
}

#[test]
fn test_boundary_on_single_cell_grid() {
    let layout = GridLayout::new(1, 1).unwrap();
    let mut field = vec![0.0; layout.len()];
    field[layout.ix(1, 1)] = 2.0;

    set_boundary(&layout, BoundaryKind::VelocityX, &mut field);
    assert_eq!(field[layout.ix(0, 1)], -2.0);
    assert_eq!(field[layout.ix(2, 1)], -2.0);
    assert_eq!(field[layout.ix(1, 0)], 2.0);
    assert_eq!(field[layout.ix(1, 2)], 2.0);
    // Corner mixes a negated and a mirrored edge.
    assert_eq!(field[layout.ix(0, 0)], 0.0);
}
