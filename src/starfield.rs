//! Decorative fly-through starfield drawn next to the fluid view.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything single pixels can be plotted on. Coordinates may fall outside
/// the target; implementations clip.
pub trait PixelSink {
    fn put(&mut self, x: i32, y: i32, shade: u8);
}

impl PixelSink for RgbImage {
    fn put(&mut self, x: i32, y: i32, shade: u8) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.put_pixel(x as u32, y as u32, Rgb([shade, shade, shade]));
        }
    }
}

/// Screen rectangle the stars are projected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Star {
    pub x: u8,
    pub y: u8,
    /// Remaining depth; the star is projected further out as it shrinks.
    pub life: u8,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    rng: StdRng,
}

impl Starfield {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            stars: vec![Star::default(); count],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Moves every star one frame closer and plots it.
    ///
    /// Without `warp` the previous position is erased first, so stars leave
    /// no trail on a persistent target.
    pub fn draw(&mut self, sink: &mut impl PixelSink, warp: bool, view: Viewport) {
        let half_w = view.width / 2;
        let half_h = view.height / 2;
        let mut spawn_depth: u8 = 255;

        for star in self.stars.iter_mut() {
            if star.life <= 1 {
                star.x = (half_w - half_h + self.rng.gen_range(0..=255_i32)) as u8;
                star.y = self.rng.gen_range(0..=255_u8);
                star.life = spawn_depth;
                spawn_depth = spawn_depth.wrapping_sub(1);
                continue;
            }

            if !warp {
                let (old_x, old_y) = project(star, half_w, half_h, view);
                sink.put(old_x, old_y, 0);
            }

            star.life -= 2;
            if star.life > 1 {
                let (x, y) = project(star, half_w, half_h, view);
                if view.contains(x, y) {
                    sink.put(x, y, 255 - star.life);
                } else {
                    star.life = 0;
                }
            }
        }
    }
}

fn project(star: &Star, half_w: i32, half_h: i32, view: Viewport) -> (i32, i32) {
    let life = star.life as i32;
    (
        (star.x as i32 - half_w) * 256 / life + half_w + view.x,
        (star.y as i32 - half_h) * 256 / life + half_h + view.y,
    )
}
