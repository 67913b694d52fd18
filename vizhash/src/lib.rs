//! Visual hashes for permit photos.
//!
//! An input string (usually the rolling input from [`rolling_input`]) is
//! expanded into a deterministic set of shapes, painted onto a canvas, and
//! the person's photo is placed in the middle. A verifier compares the ring of
//! pattern around the photo with a freshly rendered reference.

mod assets;
mod config;
mod constants;
mod errors;
mod font;
pub mod hash_encoder;
pub mod pattern_renderer;
pub mod photo_compositor;
mod provider;
pub mod rolling_input;
pub mod structures;

pub use crate::assets::Assets;
pub use crate::config::VizHashConfig;
pub use crate::constants::{DEFAULT_SHAPE_COUNT, REFERENCE_CAPTION};
pub use crate::errors::{Result, VizHashError};
pub use crate::font::FontAsset;
pub use crate::provider::VizHashProvider;
