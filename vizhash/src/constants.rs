/// Prefix for every block of the parameter byte stream, so the stream can never
/// collide with a plain SHA-256 of the input.
pub const PARAMETER_STREAM_DOMAIN: &[u8] = b"GREENLIGHT_VIZHASH_V1";

pub const BACKGROUND_BYTES: usize = 6;
pub const INSTRUCTION_BYTES: usize = 14;

// Shape extents, in percent of the canvas side
pub const MIN_SHAPE_PERCENT: u8 = 8;
pub const MAX_SHAPE_PERCENT: u8 = 45;

pub const MIN_SHAPE_ALPHA: u8 = 96;
pub const MAX_SHAPE_ALPHA: u8 = 200;

pub const MIN_SATURATION: u8 = 45;
pub const MAX_SATURATION: u8 = 95;
pub const MIN_LIGHTNESS: u8 = 30;
pub const MAX_LIGHTNESS: u8 = 70;

/// Inner radius of a ring, relative to its outer radius.
pub const RING_INNER_RATIO: f32 = 0.55;

pub const MAX_CANVAS_SIZE: u32 = 4096;

pub const DEFAULT_SHAPE_COUNT: usize = 80;
pub const DEFAULT_PHOTO_SIZE_PERCENT: u32 = 80;
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
pub const REFERENCE_CAPTION: &str = "REFERENCE TICKET";

pub const DEFAULT_FONT_FILE: &str = "DejaVuSans-Bold.ttf";
pub const DEFAULT_MISSING_PHOTO_FILE: &str = "missing_photo.png";
pub const DEFAULT_EXAMPLE_PHOTO_FILE: &str = "example_photo.png";

// Caption band across the bottom of the image
pub const CAPTION_BAND_FRACTION: f32 = 0.14;
pub const CAPTION_BAND_ALPHA: u8 = 170;
pub const CAPTION_TEXT_FRACTION: f32 = 0.7;
pub const CAPTION_MAX_WIDTH_FRACTION: f32 = 0.9;

/// The rolling input changes on the hour and this many minutes past it.
pub const WINDOW_BOUNDARY_MINUTE: u32 = 20;
