use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    assets::Assets, config::VizHashConfig, errors::Result, hash_encoder::derive_parameters,
    pattern_renderer::render_square, photo_compositor::compose, rolling_input,
};

/// Entry point for rendering permit images. Cheap to clone; clones share the
/// configuration and loaded assets.
#[derive(Clone)]
pub struct VizHashProvider {
    config: Arc<VizHashConfig>,
    assets: Arc<Assets>,
}

impl VizHashProvider {
    /// Validates `config` and loads the assets it names.
    pub fn new(config: VizHashConfig) -> Result<Self> {
        config.validate()?;
        let assets = Assets::load(&config)?;

        Ok(Self::with_assets(config, assets))
    }

    pub fn with_assets(config: VizHashConfig, assets: Assets) -> Self {
        Self {
            config: Arc::new(config),
            assets: Arc::new(assets),
        }
    }

    pub fn config(&self) -> &VizHashConfig {
        &self.config
    }

    /// JPEG with the given photo in the middle.
    pub fn create_image_with_photo(&self, input: &str, photo: &[u8], size: u32) -> Result<Vec<u8>> {
        self.create(input, photo, size, None)
    }

    /// JPEG with the placeholder shown when a person has no photo.
    pub fn create_image_missing_photo(&self, input: &str, size: u32) -> Result<Vec<u8>> {
        self.create(input, &self.assets.missing_photo, size, None)
    }

    /// Watermarked JPEG with the example photo, for showing verifiers what a
    /// genuine image looks like.
    pub fn create_reference_image(&self, input: &str, size: u32) -> Result<Vec<u8>> {
        self.create(
            input,
            &self.assets.example_photo,
            size,
            Some(self.config.reference_caption.as_str()),
        )
    }

    /// Rolling input for `now`, to be passed as `input` to the image functions.
    pub fn current_input(&self, now: DateTime<Utc>) -> Result<String> {
        rolling_input::current_input(self.config.secret()?, now)
    }

    fn create(
        &self,
        input: &str,
        photo: &[u8],
        size: u32,
        caption: Option<&str>,
    ) -> Result<Vec<u8>> {
        let parameters = derive_parameters(input, self.config.shape_count);
        let canvas = render_square(&parameters, size);

        let jpeg = compose(
            canvas,
            photo,
            caption,
            &self.assets.font,
            self.config.photo_size_percent,
            self.config.jpeg_quality,
        )?;
        debug!("created {} byte vizhash image", jpeg.len());

        Ok(jpeg)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use image::{DynamicImage, ImageFormat};
    use log::{log_enabled, Level};

    use super::VizHashProvider;
    use crate::{config::VizHashConfig, errors::VizHashError};

    struct TestHelpers {}

    impl TestHelpers {
        pub fn provider() -> VizHashProvider {
            VizHashProvider::new(VizHashConfig::default().with_secret("topsecret")).unwrap()
        }

        pub fn decode(test_name: &str, jpeg: &[u8]) -> DynamicImage {
            assert_eq!(image::guess_format(jpeg).unwrap(), ImageFormat::Jpeg);

            env_logger::try_init().ok();

            if log_enabled!(Level::Debug) {
                std::fs::write(format!("{}.jpg", test_name), jpeg).unwrap();
            }

            image::load_from_memory(jpeg).unwrap()
        }
    }

    #[test]
    fn reference_image() {
        let provider = TestHelpers::provider();

        let jpeg = provider.create_reference_image("abc123", 200).unwrap();
        let image = TestHelpers::decode("reference_image", &jpeg).into_luma8();

        assert_eq!((image.width(), image.height()), (200, 200));

        // Watermark text shows up as bright pixels inside the dark band
        let bright = (176..200)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y)[0] > 200)
            .count();
        assert!(bright > 50, "only {} bright pixels", bright);

        assert_eq!(provider.create_reference_image("abc123", 200).unwrap(), jpeg);
    }

    #[test]
    fn missing_photo_image() {
        let provider = TestHelpers::provider();

        let jpeg = provider.create_image_missing_photo("abc123", 150).unwrap();
        let image = TestHelpers::decode("missing_photo_image", &jpeg);

        assert_eq!((image.width(), image.height()), (150, 150));
        assert_ne!(jpeg, provider.create_image_missing_photo("abc124", 150).unwrap());
    }

    #[test]
    fn photo_image() {
        let provider = TestHelpers::provider();
        let photo = provider.assets.example_photo.clone();

        let jpeg = provider.create_image_with_photo("abc123", &photo, 120).unwrap();
        let image = TestHelpers::decode("photo_image", &jpeg);

        assert_eq!((image.width(), image.height()), (120, 120));
        // Same photo, no caption
        assert_ne!(jpeg, provider.create_reference_image("abc123", 120).unwrap());
    }

    #[test]
    fn broken_photo_is_an_error() {
        let provider = TestHelpers::provider();

        assert!(matches!(
            provider.create_image_with_photo("abc123", b"Test", 120),
            Err(VizHashError::Decode(_))
        ));
    }

    #[test]
    fn current_input_uses_configured_secret() {
        let provider = TestHelpers::provider();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 5, 0).unwrap();

        assert_eq!(
            provider.current_input(now).unwrap(),
            crate::rolling_input::current_input("topsecret", now).unwrap()
        );
    }

    #[test]
    fn current_input_without_secret() {
        let provider = VizHashProvider::new(VizHashConfig::default()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 5, 0).unwrap();

        assert!(matches!(
            provider.current_input(now),
            Err(VizHashError::Config(_))
        ));
    }

    #[test]
    fn provider_is_shareable_across_threads() {
        let provider = TestHelpers::provider();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let provider = provider.clone();
                std::thread::spawn(move || {
                    provider
                        .create_image_missing_photo(&format!("input {}", i), 64)
                        .unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let jpeg = handle.join().unwrap();
            assert_eq!(
                jpeg,
                provider
                    .create_image_missing_photo(&format!("input {}", i), 64)
                    .unwrap()
            );
        }
    }
}
