use std::{fs, path::Path};

use ab_glyph::{point, Font, FontArc, Glyph, PxScale, ScaleFont};

use crate::{
    errors::{Result, VizHashError},
    pattern_renderer::Canvas,
};

/// A parsed TrueType/OpenType font, cheap to clone and share between threads.
#[derive(Clone)]
pub struct FontAsset {
    font: FontArc,
}

impl FontAsset {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|err| {
            VizHashError::FontLoad(format!("could not read {}: {}", path.display(), err))
        })?;

        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        match FontArc::try_from_vec(data) {
            Ok(font) => Ok(Self { font }),
            Err(err) => Err(VizHashError::FontLoad(err.to_string())),
        }
    }

    /// Glyphs for `text` laid out on one line, with the top of the line at y = 0.
    fn layout(&self, text: &str, scale: f32) -> Vec<Glyph> {
        let scaled = self.font.as_scaled(PxScale::from(scale));
        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0;
        let mut previous = None;

        for c in text.chars() {
            let mut glyph = scaled.scaled_glyph(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, glyph.id);
            }
            glyph.position = point(caret, scaled.ascent());
            caret += scaled.h_advance(glyph.id);
            previous = Some(glyph.id);
            glyphs.push(glyph);
        }

        glyphs
    }

    pub fn text_width(&self, text: &str, scale: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(scale));

        match self.layout(text, scale).last() {
            Some(glyph) => glyph.position.x + scaled.h_advance(glyph.id),
            None => 0.0,
        }
    }

    /// Height of one line of text, ascent to descent.
    pub fn line_height(&self, scale: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(scale));
        scaled.ascent() - scaled.descent()
    }

    /// Draws `text` with its top-left corner at `(x, y)`, blending glyph
    /// coverage onto the canvas.
    pub fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        scale: f32,
        x: f32,
        y: f32,
        color: [u8; 3],
    ) {
        for mut glyph in self.layout(text, scale) {
            glyph.position.x += x;
            glyph.position.y += y;

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                // whitespace
                continue;
            };

            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 {
                    return;
                }

                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                canvas.blend_pixel(px as u32, py as u32, color, alpha);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::FontAsset;
    use crate::{errors::VizHashError, pattern_renderer::Canvas};

    fn font() -> FontAsset {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/DejaVuSans-Bold.ttf");
        FontAsset::load(&path).unwrap()
    }

    #[test]
    fn missing_font_file() {
        let result = FontAsset::load(Path::new("/nonexistent/font.ttf"));

        assert!(matches!(result, Err(VizHashError::FontLoad(_))));
    }

    #[test]
    fn corrupt_font_data() {
        let result = FontAsset::from_bytes(b"definitely not a font".to_vec());

        assert!(matches!(result, Err(VizHashError::FontLoad(_))));
    }

    #[test]
    fn text_width_grows_with_text_and_scale() {
        let font = font();

        assert_eq!(font.text_width("", 20.0), 0.0);
        assert!(font.text_width("WW", 20.0) > font.text_width("W", 20.0));
        assert!(font.text_width("W", 40.0) > font.text_width("W", 20.0));
    }

    #[test]
    fn draw_text_marks_pixels() {
        let font = font();
        let mut canvas = Canvas::new(100, 40, [0, 0, 0]);

        font.draw_text(&mut canvas, "HI", 30.0, 5.0, 5.0, [255, 255, 255]);

        let lit = (0..100)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y).unwrap()[0] > 200)
            .count();
        assert!(lit > 50, "only {} pixels lit", lit);
    }

    #[test]
    fn draw_text_clips_at_canvas_edges() {
        let font = font();
        let mut canvas = Canvas::new(10, 10, [0, 0, 0]);

        font.draw_text(&mut canvas, "CLIPPED", 30.0, -15.0, -5.0, [255, 255, 255]);
    }
}
