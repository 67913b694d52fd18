use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizHashError {
    #[error("could not decode photo: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not load font: {0}")]
    FontLoad(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("could not read asset {}: {source}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),
}

pub type Result<T, E = VizHashError> = std::result::Result<T, E>;
