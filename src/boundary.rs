use crate::grid::GridLayout;

/// How a field behaves at the walls of the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Density, pressure, divergence: zero-gradient copy of the interior.
    Scalar,
    /// Horizontal velocity: negated on the left and right walls.
    VelocityX,
    /// Vertical velocity: negated on the top and bottom walls.
    VelocityY,
}

impl BoundaryKind {
    fn sign_left_right(self) -> f32 {
        if self == BoundaryKind::VelocityX { -1.0 } else { 1.0 }
    }

    fn sign_top_bottom(self) -> f32 {
        if self == BoundaryKind::VelocityY { -1.0 } else { 1.0 }
    }
}

/// Rewrites the ghost ring of `field` from its interior neighbours.
///
/// Left/right edges are written first, then top/bottom. Corners take the
/// mean of their two edge neighbours once every edge is final.
pub fn set_boundary(layout: &GridLayout, kind: BoundaryKind, field: &mut [f32]) {
    let w = layout.width();
    let h = layout.height();
    let lr = kind.sign_left_right();
    let tb = kind.sign_top_bottom();

    for j in 1..h - 1 {
        field[layout.ix(0, j)] = lr * field[layout.ix(1, j)];
        field[layout.ix(w - 1, j)] = lr * field[layout.ix(w - 2, j)];
    }
    for i in 1..w - 1 {
        field[layout.ix(i, 0)] = tb * field[layout.ix(i, 1)];
        field[layout.ix(i, h - 1)] = tb * field[layout.ix(i, h - 2)];
    }

    field[layout.ix(0, 0)] = 0.5 * (field[layout.ix(1, 0)] + field[layout.ix(0, 1)]);
    field[layout.ix(0, h - 1)] = 0.5 * (field[layout.ix(1, h - 1)] + field[layout.ix(0, h - 2)]);
    field[layout.ix(w - 1, 0)] = 0.5 * (field[layout.ix(w - 2, 0)] + field[layout.ix(w - 1, 1)]);
    field[layout.ix(w - 1, h - 1)] =
        0.5 * (field[layout.ix(w - 2, h - 1)] + field[layout.ix(w - 1, h - 2)]);
}
