use std::io::Cursor;

use image::{
    error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind},
    imageops::{self, FilterType},
    DynamicImage, ImageError, ImageFormat, ImageOutputFormat,
};
use log::debug;

use crate::{
    constants::{
        CAPTION_BAND_ALPHA, CAPTION_BAND_FRACTION, CAPTION_MAX_WIDTH_FRACTION,
        CAPTION_TEXT_FRACTION,
    },
    errors::{Result, VizHashError},
    font::FontAsset,
    pattern_renderer::Canvas,
};

/// Decodes photo bytes. Only JPEG and PNG are accepted.
pub fn decode_photo(bytes: &[u8]) -> Result<DynamicImage> {
    let format = image::guess_format(bytes).map_err(VizHashError::Decode)?;

    match format {
        ImageFormat::Jpeg | ImageFormat::Png => {
            image::load_from_memory_with_format(bytes, format).map_err(VizHashError::Decode)
        }
        other => Err(VizHashError::Decode(ImageError::Unsupported(
            UnsupportedError::from_format_and_kind(
                ImageFormatHint::Exact(other),
                UnsupportedErrorKind::Format(ImageFormatHint::Exact(other)),
            ),
        ))),
    }
}

/// Centers `photo` on the pattern, optionally adds a caption band, and encodes
/// the result as JPEG.
///
/// The photo is scaled to fit a square of `photo_size_percent` of the shorter
/// canvas side, so a ring of the pattern stays visible around it.
pub fn compose(
    mut background: Canvas,
    photo: &[u8],
    caption: Option<&str>,
    font: &FontAsset,
    photo_size_percent: u32,
    jpeg_quality: u8,
) -> Result<Vec<u8>> {
    let photo = decode_photo(photo)?;

    let (width, height) = (background.width(), background.height());
    let box_size = (width.min(height) * photo_size_percent.clamp(1, 100) / 100).max(1);
    let resized = photo
        .resize(box_size, box_size, FilterType::Triangle)
        .into_rgba8();

    let x = width.saturating_sub(resized.width()) / 2;
    let y = height.saturating_sub(resized.height()) / 2;
    imageops::overlay(background.image_mut(), &resized, x as i64, y as i64);

    debug!(
        "placed {}x{} photo at ({}, {}) on {}x{} canvas",
        resized.width(),
        resized.height(),
        x,
        y,
        width,
        height
    );

    if let Some(caption) = caption {
        draw_caption(&mut background, caption, font);
    }

    encode_jpeg(background, jpeg_quality)
}

/// Dark translucent band across the bottom with the caption centered on it in
/// white.
fn draw_caption(canvas: &mut Canvas, caption: &str, font: &FontAsset) {
    let (width, height) = (canvas.width(), canvas.height());
    let band_height = ((height as f32 * CAPTION_BAND_FRACTION).round() as u32).clamp(1, height);
    let band_top = height - band_height;

    for y in band_top..height {
        for x in 0..width {
            canvas.blend_pixel(x, y, [0, 0, 0], CAPTION_BAND_ALPHA);
        }
    }

    let mut scale = band_height as f32 * CAPTION_TEXT_FRACTION;
    let max_width = width as f32 * CAPTION_MAX_WIDTH_FRACTION;
    let text_width = font.text_width(caption, scale);
    if text_width > max_width {
        scale *= max_width / text_width;
    }

    let text_x = (width as f32 - font.text_width(caption, scale)) / 2.0;
    let text_y = band_top as f32 + (band_height as f32 - font.line_height(scale)) / 2.0;
    font.draw_text(canvas, caption, scale, text_x, text_y, [255, 255, 255]);
}

fn encode_jpeg(canvas: Canvas, quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(canvas.into_image()).into_rgb8();

    let mut buf = Vec::new();
    // needs a seekable writer
    rgb.write_to(
        &mut Cursor::new(&mut buf),
        ImageOutputFormat::Jpeg(quality.clamp(1, 100)),
    )
    .map_err(VizHashError::Encode)?;

    Ok(buf)
}
