use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde_derive::Deserialize;

use crate::{
    constants::{
        DEFAULT_EXAMPLE_PHOTO_FILE, DEFAULT_FONT_FILE, DEFAULT_JPEG_QUALITY,
        DEFAULT_MISSING_PHOTO_FILE, DEFAULT_PHOTO_SIZE_PERCENT, DEFAULT_SHAPE_COUNT,
        REFERENCE_CAPTION,
    },
    errors::{Result, VizHashError},
};

/// Settings for [`crate::VizHashProvider`]. Built once at startup and never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VizHashConfig {
    /// Server secret mixed into the rolling input
    pub secret: Option<String>,
    /// Directory to read the asset files from. Without one the assets built
    /// into the crate are used and the file names below are ignored.
    pub assets_dir: Option<PathBuf>,
    pub font_file: String,
    pub missing_photo_file: String,
    pub example_photo_file: String,
    pub shape_count: usize,
    pub photo_size_percent: u32,
    pub jpeg_quality: u8,
    pub reference_caption: String,
}

impl Default for VizHashConfig {
    fn default() -> Self {
        Self {
            secret: None,
            assets_dir: None,
            font_file: DEFAULT_FONT_FILE.to_string(),
            missing_photo_file: DEFAULT_MISSING_PHOTO_FILE.to_string(),
            example_photo_file: DEFAULT_EXAMPLE_PHOTO_FILE.to_string(),
            shape_count: DEFAULT_SHAPE_COUNT,
            photo_size_percent: DEFAULT_PHOTO_SIZE_PERCENT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            reference_caption: REFERENCE_CAPTION.to_string(),
        }
    }
}

// Keeps the secret out of logs
impl fmt::Debug for VizHashConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VizHashConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("assets_dir", &self.assets_dir)
            .field("font_file", &self.font_file)
            .field("missing_photo_file", &self.missing_photo_file)
            .field("example_photo_file", &self.example_photo_file)
            .field("shape_count", &self.shape_count)
            .field("photo_size_percent", &self.photo_size_percent)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("reference_caption", &self.reference_caption)
            .finish()
    }
}

impl VizHashConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            VizHashError::Config(format!("could not read {}: {}", path.display(), err))
        })?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|err| VizHashError::Config(err.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.shape_count == 0 {
            return Err(VizHashError::Config(
                "shape_count must be at least 1".to_string(),
            ));
        }

        if !(1..=100).contains(&self.photo_size_percent) {
            return Err(VizHashError::Config(format!(
                "photo_size_percent must be within 1..=100, got {}",
                self.photo_size_percent
            )));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(VizHashError::Config(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }

        Ok(())
    }

    /// The configured secret. A missing or empty secret is a misconfiguration.
    pub fn secret(&self) -> Result<&str> {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ => Err(VizHashError::Config("no secret configured".to_string())),
        }
    }

    pub fn font_path(&self) -> Option<PathBuf> {
        self.assets_dir.as_ref().map(|dir| dir.join(&self.font_file))
    }

    pub fn missing_photo_path(&self) -> Option<PathBuf> {
        self.assets_dir
            .as_ref()
            .map(|dir| dir.join(&self.missing_photo_file))
    }

    pub fn example_photo_path(&self) -> Option<PathBuf> {
        self.assets_dir
            .as_ref()
            .map(|dir| dir.join(&self.example_photo_file))
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::Path};

    use super::VizHashConfig;
    use crate::errors::VizHashError;

    #[test]
    fn defaults_use_built_in_assets() {
        let config = VizHashConfig::default();

        assert_eq!(config.assets_dir, None);
        assert_eq!(config.font_path(), None);
        assert_eq!(config.missing_photo_path(), None);
        assert_eq!(config.example_photo_path(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = VizHashConfig::from_toml_str(
            r#"
            secret = "topsecret"
            shape_count = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.secret().unwrap(), "topsecret");
        assert_eq!(config.shape_count, 12);
        assert_eq!(config.jpeg_quality, VizHashConfig::default().jpeg_quality);
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "assets_dir = \"/srv/assets\"").unwrap();
        writeln!(file, "font_file = \"other.ttf\"").unwrap();

        let config = VizHashConfig::from_file(file.path()).unwrap();

        assert_eq!(
            config.font_path().as_deref(),
            Some(Path::new("/srv/assets/other.ttf"))
        );
        assert_eq!(
            config.missing_photo_path().as_deref(),
            Some(Path::new("/srv/assets/missing_photo.png"))
        );
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = VizHashConfig::from_file(Path::new("/nonexistent/vizhash.toml"));

        assert!(matches!(result, Err(VizHashError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = VizHashConfig::from_toml_str("shapes = 12");

        assert!(matches!(result, Err(VizHashError::Config(_))));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for contents in ["shape_count = 0", "jpeg_quality = 0", "photo_size_percent = 101"] {
            assert!(
                matches!(
                    VizHashConfig::from_toml_str(contents),
                    Err(VizHashError::Config(_))
                ),
                "{}",
                contents
            );
        }
    }

    #[test]
    fn secret_is_required() {
        assert!(matches!(
            VizHashConfig::default().secret(),
            Err(VizHashError::Config(_))
        ));
        assert!(matches!(
            VizHashConfig::default().with_secret("").secret(),
            Err(VizHashError::Config(_))
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let config = VizHashConfig::default().with_secret("topsecret");

        assert!(!format!("{:?}", config).contains("topsecret"));
    }
}
