use image::{ImageBuffer, Rgb, RgbImage};

use crate::export::FluidData;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Velocity lines are drawn this many pixels long per unit of velocity per
/// pixel of tile scale.
const VELOCITY_LINE_GAIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizerMode {
    #[default]
    Density,
    DensityDebug,
    Velocity,
}

impl VisualizerMode {
    pub const ALL: [VisualizerMode; 3] = [
        VisualizerMode::Density,
        VisualizerMode::DensityDebug,
        VisualizerMode::Velocity,
    ];

    pub fn next(self) -> Self {
        match self {
            VisualizerMode::Density => VisualizerMode::DensityDebug,
            VisualizerMode::DensityDebug => VisualizerMode::Velocity,
            VisualizerMode::Velocity => VisualizerMode::Density,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            VisualizerMode::Density => VisualizerMode::Velocity,
            VisualizerMode::DensityDebug => VisualizerMode::Density,
            VisualizerMode::Velocity => VisualizerMode::DensityDebug,
        }
    }

    /// A tap left of `split` advances the mode, anything else goes back.
    pub fn on_tap(self, x: f32, split: f32) -> Self {
        if x < split { self.next() } else { self.previous() }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisualizerMode::Density => "Density",
            VisualizerMode::DensityDebug => "Density (debug)",
            VisualizerMode::Velocity => "Velocity",
        }
    }
}

/// Grey level used for a density value.
pub fn density_shade(density: f32) -> u8 {
    ((density / 4.0) as i32).clamp(0, 255) as u8
}

/// Draws solver state into images, one `scale x scale` tile per interior
/// cell.
#[derive(Debug, Clone)]
pub struct Renderer {
    scale: u32,
    tile_cache: Vec<u8>,
    cache_dims: (usize, usize),
    /// Mode that last wrote the canvas passed to [`Renderer::render`].
    last_mode: Option<VisualizerMode>,
}

impl Renderer {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            tile_cache: Vec::new(),
            cache_dims: (0, 0),
            last_mode: None,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn image_size(&self, simulation: &impl FluidData) -> (u32, u32) {
        (
            simulation.inner_width() as u32 * self.scale,
            simulation.inner_height() as u32 * self.scale,
        )
    }

    /// Draws `mode` into `canvas`, which persists between frames.
    ///
    /// Density redraws only the tiles the cache reports as changed, sharing
    /// the cache with the debug view. The first density frame after another
    /// mode repaints every tile, since the canvas holds that mode's output.
    pub fn render(
        &mut self,
        mode: VisualizerMode,
        simulation: &impl FluidData,
        canvas: &mut RgbImage,
    ) {
        match mode {
            VisualizerMode::Density if self.last_mode == Some(VisualizerMode::Density) => {
                self.render_density_incremental(simulation, canvas);
            }
            VisualizerMode::Density => self.repaint_density(simulation, canvas),
            VisualizerMode::DensityDebug => *canvas = self.render_density_debug(simulation),
            VisualizerMode::Velocity => *canvas = self.render_velocity(simulation),
        }
        self.last_mode = Some(mode);
    }

    pub fn render_density(&self, simulation: &impl FluidData) -> RgbImage {
        let (w, h) = self.image_size(simulation);
        let mut img = ImageBuffer::new(w, h);
        for j in 0..simulation.inner_height() {
            for i in 0..simulation.inner_width() {
                let shade = density_shade(simulation.density()[simulation.interior_index(i, j)]);
                self.fill_tile(&mut img, i, j, Rgb([shade, shade, shade]));
            }
        }
        img
    }

    /// Redraws only tiles whose shade moved by more than one grey level
    /// since they were last drawn. Returns how many tiles were redrawn.
    ///
    /// `img` is replaced by a blank image of the right size (and the tile
    /// cache cleared) when its dimensions do not match the simulation.
    pub fn render_density_incremental(
        &mut self,
        simulation: &impl FluidData,
        img: &mut RgbImage,
    ) -> usize {
        let (w, h) = self.image_size(simulation);
        if img.dimensions() != (w, h) {
            *img = ImageBuffer::new(w, h);
            self.reset_cache(simulation);
        }
        self.ensure_cache(simulation);

        let mut redrawn = 0;
        for j in 0..simulation.inner_height() {
            for i in 0..simulation.inner_width() {
                let shade = density_shade(simulation.density()[simulation.interior_index(i, j)]);
                if self.update_tile_cache(i, j, shade) {
                    self.fill_tile(img, i, j, Rgb([shade, shade, shade]));
                    redrawn += 1;
                }
            }
        }
        redrawn
    }

    /// Paints every tile into `img` and records each shade in the cache.
    fn repaint_density(&mut self, simulation: &impl FluidData, img: &mut RgbImage) {
        let (w, h) = self.image_size(simulation);
        if img.dimensions() != (w, h) {
            *img = ImageBuffer::new(w, h);
        }
        self.ensure_cache(simulation);

        let stride = self.cache_dims.0;
        for j in 0..simulation.inner_height() {
            for i in 0..simulation.inner_width() {
                let shade = density_shade(simulation.density()[simulation.interior_index(i, j)]);
                self.tile_cache[i + j * stride] = shade;
                self.fill_tile(img, i, j, Rgb([shade, shade, shade]));
            }
        }
    }

    /// Full density redraw with tiles that changed since the last cached
    /// frame outlined in red.
    pub fn render_density_debug(&mut self, simulation: &impl FluidData) -> RgbImage {
        self.ensure_cache(simulation);
        let (w, h) = self.image_size(simulation);
        let mut img = ImageBuffer::new(w, h);
        for j in 0..simulation.inner_height() {
            for i in 0..simulation.inner_width() {
                let shade = density_shade(simulation.density()[simulation.interior_index(i, j)]);
                self.fill_tile(&mut img, i, j, Rgb([shade, shade, shade]));
                if self.update_tile_cache(i, j, shade) {
                    self.outline_tile(&mut img, i, j, RED);
                }
            }
        }
        img
    }

    pub fn render_velocity(&self, simulation: &impl FluidData) -> RgbImage {
        let (w, h) = self.image_size(simulation);
        let mut img = ImageBuffer::from_pixel(w, h, BLACK);
        let scale = i64::from(self.scale);
        let gain = self.scale as f32 * VELOCITY_LINE_GAIN;

        for j in 0..simulation.inner_height() {
            for i in 0..simulation.inner_width() {
                let idx = simulation.interior_index(i, j);
                let x = i as i64 * scale + (scale >> 1);
                let y = j as i64 * scale + (scale >> 1);
                // Saturates at the i32 range, so the endpoint fits an i64.
                let vx = i64::from((simulation.velocity_x()[idx] * gain) as i32);
                let vy = i64::from((simulation.velocity_y()[idx] * gain) as i32);
                if vx.abs() >= 1 || vy.abs() >= 1 {
                    draw_line(&mut img, (x, y), (x + vx, y + vy), WHITE);
                }
            }
        }
        img
    }

    /// Forgets every cached tile shade. The next density frame through
    /// [`Renderer::render`] repaints the whole canvas.
    pub fn reset_cache(&mut self, simulation: &impl FluidData) {
        self.last_mode = None;
        self.tile_cache.clear();
        self.tile_cache
            .resize(simulation.inner_width() * simulation.inner_height(), 0);
        self.cache_dims = (simulation.inner_width(), simulation.inner_height());
    }

    fn ensure_cache(&mut self, simulation: &impl FluidData) {
        if self.cache_dims != (simulation.inner_width(), simulation.inner_height()) {
            self.reset_cache(simulation);
        }
    }

    fn update_tile_cache(&mut self, i: usize, j: usize, shade: u8) -> bool {
        let cached = &mut self.tile_cache[i + j * self.cache_dims.0];
        if (*cached as i32 - shade as i32).abs() > 1 {
            *cached = shade;
            true
        } else {
            false
        }
    }

    fn fill_tile(&self, img: &mut RgbImage, i: usize, j: usize, color: Rgb<u8>) {
        let x0 = i as u32 * self.scale;
        let y0 = j as u32 * self.scale;
        for y in y0..y0 + self.scale {
            for x in x0..x0 + self.scale {
                img.put_pixel(x, y, color);
            }
        }
    }

    fn outline_tile(&self, img: &mut RgbImage, i: usize, j: usize, color: Rgb<u8>) {
        let x0 = i as u32 * self.scale;
        let y0 = j as u32 * self.scale;
        let x1 = x0 + self.scale - 1;
        let y1 = y0 + self.scale - 1;
        for x in x0..=x1 {
            img.put_pixel(x, y0, color);
            img.put_pixel(x, y1, color);
        }
        for y in y0..=y1 {
            img.put_pixel(x0, y, color);
            img.put_pixel(x1, y, color);
        }
    }
}

/// Bresenham line from `from` towards `to`, stopping where it leaves the
/// image. Nothing is drawn when `from` lies outside.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    let inside = |x: i64, y: i64| x >= 0 && y >= 0 && x < w && y < h;
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    // A segment crosses the image boundary at most once on the way out.
    while inside(x, y) {
        img.put_pixel(x as u32, y as u32, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
