//! The four stages of the stable fluids update.
//!
//! Each stage works on plain slices laid out by a [`GridLayout`] and never
//! allocates. Buffers passed as `&mut` are written, buffers passed as `&`
//! are only read, so no stage sees a field as both its input and output.

use crate::boundary::{BoundaryKind, set_boundary};
use crate::grid::GridLayout;

/// Default number of Gauss-Seidel sweeps per solve.
pub const DEFAULT_ITERATIONS: u32 = 4;

/// Gauss-Seidel relaxation of `x = (x0 + a * sum(neighbours of x)) / c`.
///
/// Sweeps run row-major and read neighbours already updated in the same
/// sweep. The ghost ring is refreshed after every sweep. There is no
/// convergence test; `iterations` sweeps are always performed.
pub fn linear_solve(
    layout: &GridLayout,
    kind: BoundaryKind,
    x: &mut [f32],
    x0: &[f32],
    a: f32,
    c: f32,
    iterations: u32,
) {
    let w = layout.width();
    let h = layout.height();
    let c_recip = 1.0 / c;

    for _ in 0..iterations {
        for j in 1..h - 1 {
            for i in 1..w - 1 {
                let idx = layout.ix(i, j);
                x[idx] = (x0[idx]
                    + a * (x[idx + 1] + x[idx - 1] + x[idx + w] + x[idx - w]))
                    * c_recip;
            }
        }
        set_boundary(layout, kind, x);
    }
}

/// Implicit diffusion of `x0` into `x` at `rate` over `dt`.
pub fn diffuse(
    layout: &GridLayout,
    kind: BoundaryKind,
    x: &mut [f32],
    x0: &[f32],
    rate: f32,
    dt: f32,
    iterations: u32,
) {
    let a = dt * rate * layout.inner_width() as f32 * layout.inner_height() as f32;
    linear_solve(layout, kind, x, x0, a, 1.0 + 6.0 * a, iterations);
}

/// Removes the divergent part of `(velocity_x, velocity_y)`.
///
/// `pressure` and `divergence` are scratch fields; both are overwritten.
pub fn project(
    layout: &GridLayout,
    velocity_x: &mut [f32],
    velocity_y: &mut [f32],
    pressure: &mut [f32],
    divergence: &mut [f32],
    iterations: u32,
) {
    let w = layout.width();
    let h = layout.height();
    let scale = (w + h) as f32 * 0.5;

    for j in 1..h - 1 {
        for i in 1..w - 1 {
            let idx = layout.ix(i, j);
            divergence[idx] = -0.5
                * (velocity_x[idx + 1] - velocity_x[idx - 1] + velocity_y[idx + w]
                    - velocity_y[idx - w])
                / scale;
            pressure[idx] = 0.0;
        }
    }

    set_boundary(layout, BoundaryKind::Scalar, divergence);
    set_boundary(layout, BoundaryKind::Scalar, pressure);
    linear_solve(
        layout,
        BoundaryKind::Scalar,
        pressure,
        divergence,
        1.0,
        6.0,
        iterations,
    );

    let wf = w as f32;
    let hf = h as f32;
    for j in 1..h - 1 {
        for i in 1..w - 1 {
            let idx = layout.ix(i, j);
            velocity_x[idx] -= 0.5 * (pressure[idx + 1] - pressure[idx - 1]) * wf;
            velocity_y[idx] -= 0.5 * (pressure[idx + w] - pressure[idx - w]) * hf;
        }
    }

    set_boundary(layout, BoundaryKind::VelocityX, velocity_x);
    set_boundary(layout, BoundaryKind::VelocityY, velocity_y);
}

/// Semi-Lagrangian transport of `src` into `dest` along the velocity field.
///
/// The backtraced position is clamped to `[0.5, width + 0.5]` and
/// `[0.5, height + 0.5]` using the ring-inclusive dimensions.
pub fn advect(
    layout: &GridLayout,
    kind: BoundaryKind,
    dest: &mut [f32],
    src: &[f32],
    velocity_x: &[f32],
    velocity_y: &[f32],
    dt: f32,
) {
    let w = layout.width();
    let h = layout.height();
    let dtx = dt * layout.inner_width() as f32;
    let dty = dt * layout.inner_height() as f32;
    let max_x = w as f32 + 0.5;
    let max_y = h as f32 + 0.5;

    for j in 1..h - 1 {
        let jf = j as f32;
        for i in 1..w - 1 {
            let idx = layout.ix(i, j);
            let x = (i as f32 - dtx * velocity_x[idx]).clamp(0.5, max_x);
            let y = (jf - dty * velocity_y[idx]).clamp(0.5, max_y);

            let i0 = x.floor();
            let j0 = y.floor();
            let s1 = x - i0;
            let s0 = 1.0 - s1;
            let t1 = y - j0;
            let t0 = 1.0 - t1;

            let i0 = i0 as usize;
            let j0 = j0 as usize;
            let i1 = i0 + 1;
            let j1 = j0 + 1;

            dest[idx] = s0 * (t0 * src[layout.lattice(i0, j0)] + t1 * src[layout.lattice(i0, j1)])
                + s1 * (t0 * src[layout.lattice(i1, j0)] + t1 * src[layout.lattice(i1, j1)]);
        }
    }

    set_boundary(layout, kind, dest);
}
