use image::{Rgba, RgbaImage};
use log::debug;

use crate::{
    constants::{MAX_CANVAS_SIZE, MAX_SHAPE_PERCENT, MIN_SHAPE_PERCENT, RING_INNER_RATIO},
    structures::{DrawInstruction, ShapeKind, VisualParameters},
};

/// Opaque RGBA pixel buffer the pattern is painted onto.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Dimensions are clamped into `1..=MAX_CANVAS_SIZE`.
    pub fn new(width: u32, height: u32, fill: [u8; 3]) -> Self {
        let width = width.clamp(1, MAX_CANVAS_SIZE);
        let height = height.clamp(1, MAX_CANVAS_SIZE);

        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([fill[0], fill[1], fill[2], 0xff])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn fill_vertical_gradient(&mut self, top: [u8; 3], bottom: [u8; 3]) {
        let last_row = (self.height() - 1).max(1);

        for y in 0..self.height() {
            let t = y * 255 / last_row;
            let color = Rgba([
                blend_channel(bottom[0], top[0], t as u8),
                blend_channel(bottom[1], top[1], t as u8),
                blend_channel(bottom[2], top[2], t as u8),
                0xff,
            ]);

            for x in 0..self.width() {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Source-over blend of `color` at `alpha` onto the pixel. Out of bounds
    /// coordinates are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 3], alpha: u8) {
        if x >= self.width() || y >= self.height() {
            return;
        }

        let pixel = self.image.get_pixel_mut(x, y);
        for channel in 0..3 {
            pixel[channel] = blend_channel(color[channel], pixel[channel], alpha);
        }
    }

    /// The color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let pixel = self.image.get_pixel(x, y);
        Some([pixel[0], pixel[1], pixel[2]])
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let alpha = alpha as u32;
    ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
}

pub fn render_square(parameters: &VisualParameters, size: u32) -> Canvas {
    render(parameters, size, size)
}

/// Paints the background and then every instruction in order, later shapes
/// over earlier ones.
pub fn render(parameters: &VisualParameters, width: u32, height: u32) -> Canvas {
    let background = parameters.background();
    let mut canvas = Canvas::new(width, height, background.top);
    canvas.fill_vertical_gradient(background.top, background.bottom);

    for instruction in parameters.instructions() {
        draw_instruction(&mut canvas, instruction);
    }

    debug!(
        "rendered {} shapes onto a {}x{} canvas",
        parameters.len(),
        canvas.width(),
        canvas.height()
    );

    canvas
}

fn draw_instruction(canvas: &mut Canvas, instruction: &DrawInstruction) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;

    let center_x = instruction.x as f32 / u16::MAX as f32 * width;
    let center_y = instruction.y as f32 / u16::MAX as f32 * height;

    let radius_x = half_extent(instruction.width_percent, width);
    let radius_y = half_extent(instruction.height_percent, height);

    let angle = ((instruction.rotation_degrees % 360) as f32).to_radians();
    let (sin, cos) = angle.sin_cos();

    // Rotation never moves a point further than this from the center
    let reach = (radius_x * radius_x + radius_y * radius_y).sqrt();
    let min_x = (center_x - reach).floor().max(0.0) as u32;
    let max_x = (center_x + reach).ceil().min(width - 1.0) as u32;
    let min_y = (center_y - reach).floor().max(0.0) as u32;
    let max_y = (center_y + reach).ceil().min(height - 1.0) as u32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center_x;
            let dy = y as f32 + 0.5 - center_y;

            // Into the shape's own frame
            let u = dx * cos + dy * sin;
            let v = dy * cos - dx * sin;

            if contains(instruction.kind, u / radius_x, v / radius_y) {
                canvas.blend_pixel(x, y, instruction.color, instruction.alpha);
            }
        }
    }
}

fn half_extent(percent: u8, side: f32) -> f32 {
    let percent = percent.clamp(MIN_SHAPE_PERCENT, MAX_SHAPE_PERCENT) as f32;
    (side * percent / 200.0).max(0.5)
}

/// Point-in-shape test in unit coordinates, where the shape spans `-1..=1` on
/// both axes.
fn contains(kind: ShapeKind, u: f32, v: f32) -> bool {
    match kind {
        ShapeKind::Ellipse => u * u + v * v <= 1.0,
        ShapeKind::Rectangle => u.abs() <= 1.0 && v.abs() <= 1.0,
        ShapeKind::Triangle => (-1.0..=1.0).contains(&v) && u.abs() <= (v + 1.0) / 2.0,
        ShapeKind::Ring => {
            let distance = u * u + v * v;
            distance <= 1.0 && distance >= RING_INNER_RATIO * RING_INNER_RATIO
        }
    }
}
