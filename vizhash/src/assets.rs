use std::{fs, path::Path};

use log::info;

use crate::{
    config::VizHashConfig,
    errors::{Result, VizHashError},
    font::FontAsset,
    photo_compositor::decode_photo,
};

static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");
static EMBEDDED_MISSING_PHOTO: &[u8] = include_bytes!("../assets/missing_photo.png");
static EMBEDDED_EXAMPLE_PHOTO: &[u8] = include_bytes!("../assets/example_photo.png");

/// Font and stand-in photos, loaded once and shared read-only.
#[derive(Clone)]
pub struct Assets {
    pub font: FontAsset,
    pub missing_photo: Vec<u8>,
    pub example_photo: Vec<u8>,
}

impl Assets {
    /// Loads the assets for `config`: from `assets_dir` when one is set,
    /// otherwise the ones built into the crate.
    pub fn load(config: &VizHashConfig) -> Result<Self> {
        match &config.assets_dir {
            Some(dir) => Self::from_dir(dir, config),
            None => Self::embedded(),
        }
    }

    /// The font and photos shipped with the crate. Touches no files.
    pub fn embedded() -> Result<Self> {
        let font = FontAsset::from_bytes(EMBEDDED_FONT.to_vec())?;
        let missing_photo = checked_photo(EMBEDDED_MISSING_PHOTO.to_vec())?;
        let example_photo = checked_photo(EMBEDDED_EXAMPLE_PHOTO.to_vec())?;

        info!("loaded built-in vizhash assets");

        Ok(Self {
            font,
            missing_photo,
            example_photo,
        })
    }

    /// Reads every asset file named by `config` from `dir`. The stand-in
    /// photos are decoded once here so a broken asset is reported at startup.
    fn from_dir(dir: &Path, config: &VizHashConfig) -> Result<Self> {
        let font = FontAsset::load(&dir.join(&config.font_file))?;
        let missing_photo = read_photo(&dir.join(&config.missing_photo_file))?;
        let example_photo = read_photo(&dir.join(&config.example_photo_file))?;

        info!("loaded vizhash assets from {}", dir.display());

        Ok(Self {
            font,
            missing_photo,
            example_photo,
        })
    }
}

fn read_photo(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).map_err(|source| VizHashError::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;

    checked_photo(data)
}

fn checked_photo(data: Vec<u8>) -> Result<Vec<u8>> {
    decode_photo(&data)?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use super::Assets;
    use crate::{config::VizHashConfig, errors::VizHashError};

    fn shipped_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
    }

    fn from_dir(dir: &Path) -> VizHashConfig {
        VizHashConfig {
            assets_dir: Some(dir.to_path_buf()),
            ..VizHashConfig::default()
        }
    }

    #[test]
    fn defaults_need_no_files() {
        let config = VizHashConfig {
            font_file: "nope.ttf".to_string(),
            missing_photo_file: "nope.png".to_string(),
            ..VizHashConfig::default()
        };

        let assets = Assets::load(&config).unwrap();

        assert!(!assets.missing_photo.is_empty());
        assert!(!assets.example_photo.is_empty());
    }

    #[test]
    fn built_in_assets_match_shipped_files() {
        let embedded = Assets::embedded().unwrap();
        let on_disk = Assets::load(&from_dir(&shipped_dir())).unwrap();

        assert_eq!(embedded.missing_photo, on_disk.missing_photo);
        assert_eq!(embedded.example_photo, on_disk.example_photo);
    }

    #[test]
    fn missing_placeholder() {
        let config = VizHashConfig {
            missing_photo_file: "nope.png".to_string(),
            ..from_dir(&shipped_dir())
        };

        assert!(matches!(
            Assets::load(&config),
            Err(VizHashError::AssetLoad { .. })
        ));
    }

    #[test]
    fn missing_font() {
        let config = VizHashConfig {
            font_file: "nope.ttf".to_string(),
            ..from_dir(&shipped_dir())
        };

        assert!(matches!(
            Assets::load(&config),
            Err(VizHashError::FontLoad(_))
        ));
    }

    #[test]
    fn corrupt_example_photo() {
        let dir = tempfile::tempdir().unwrap();
        let config = from_dir(dir.path());
        fs::copy(
            shipped_dir().join(&config.font_file),
            dir.path().join(&config.font_file),
        )
        .unwrap();
        fs::copy(
            shipped_dir().join(&config.missing_photo_file),
            dir.path().join(&config.missing_photo_file),
        )
        .unwrap();
        fs::write(dir.path().join(&config.example_photo_file), b"Test").unwrap();

        assert!(matches!(
            Assets::load(&config),
            Err(VizHashError::Decode(_))
        ));
    }
}
