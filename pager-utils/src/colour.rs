//! Dominant-colour sampling used to tint selection prompts.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::embed::BLURPLE;

/// Longest edge images are shrunk to before counting colours.
const SAMPLE_EDGE: u32 = 64;
/// Pixels at or below this alpha are ignored.
const MIN_ALPHA: u8 = 128;

#[derive(Debug, Error)]
pub enum ColourError {
    #[error("image download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
    #[error("colour sampling task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("image has no opaque pixels")]
    Transparent,
}

/// Picks a representative colour for an optional image.
#[async_trait]
pub trait ColourSampler: Send + Sync {
    /// Dominant colour of the image at `url` as `0xRRGGBB`, or [`BLURPLE`]
    /// when there is no image or it cannot be sampled.
    async fn dominant_colour(&self, url: Option<&str>) -> u32;
}

/// Samples colours from images fetched over HTTP.
#[derive(Clone, Debug)]
pub struct HttpColourSampler {
    client: reqwest::Client,
}

impl Default for HttpColourSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpColourSampler {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Download and sample `url`, reporting why sampling failed.
    pub async fn sample(&self, url: &str) -> Result<u32, ColourError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        tokio::task::spawn_blocking(move || dominant_colour_of(&bytes)).await?
    }
}

#[async_trait]
impl ColourSampler for HttpColourSampler {
    async fn dominant_colour(&self, url: Option<&str>) -> u32 {
        let Some(url) = url else {
            return BLURPLE;
        };

        match self.sample(url).await {
            Ok(colour) => colour,
            Err(source) => {
                debug!(%source, url, "colour sampling failed, using default");
                BLURPLE
            }
        }
    }
}

/// Dominant colour of an encoded image as `0xRRGGBB`.
///
/// Pixels are grouped into coarse buckets (4 bits per channel); the most
/// populated bucket wins and its pixels are averaged.
pub fn dominant_colour_of(bytes: &[u8]) -> Result<u32, ColourError> {
    let decoded = image::load_from_memory(bytes)?;
    let pixels = if decoded.width() > SAMPLE_EDGE || decoded.height() > SAMPLE_EDGE {
        decoded.thumbnail(SAMPLE_EDGE, SAMPLE_EDGE).to_rgba8()
    } else {
        decoded.to_rgba8()
    };

    let mut buckets: HashMap<(u8, u8, u8), (u64, [u64; 3])> = HashMap::new();
    for pixel in pixels.pixels() {
        let [r, g, b, a] = pixel.0;
        if a <= MIN_ALPHA {
            continue;
        }

        let (count, sums) = buckets.entry((r >> 4, g >> 4, b >> 4)).or_default();
        *count += 1;
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
    }

    let (count, sums) = buckets
        .into_values()
        .max_by_key(|(count, _)| *count)
        .ok_or(ColourError::Transparent)?;

    let [r, g, b] = sums.map(|sum| (sum / count) as u32);
    Ok((r << 16) | (g << 8) | b)
}

/// Render a solid PNG swatch of `colour`.
pub fn swatch_png(colour: u32, edge: u32) -> Result<Vec<u8>, ColourError> {
    let [_, r, g, b] = colour.to_be_bytes();
    let swatch = image::RgbImage::from_pixel(edge, edge, image::Rgb([r, g, b]));

    let mut encoded = std::io::Cursor::new(Vec::new());
    swatch.write_to(&mut encoded, image::ImageFormat::Png)?;

    Ok(encoded.into_inner())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn two_tone_png() -> Vec<u8> {
        let mut img = image::RgbImage::from_pixel(10, 10, image::Rgb([0x20, 0x40, 0xF0]));
        for x in 0..3 {
            for y in 0..10 {
                img.put_pixel(x, y, image::Rgb([0xFF, 0xFF, 0xFF]));
            }
        }

        let mut encoded = std::io::Cursor::new(Vec::new());
        img.write_to(&mut encoded, image::ImageFormat::Png).unwrap();
        encoded.into_inner()
    }

    #[test]
    fn solid_swatch_samples_back_to_its_colour() {
        let png = swatch_png(0xFF_00_00, 16).unwrap();
        assert_eq!(dominant_colour_of(&png).unwrap(), 0xFF_00_00);
    }

    #[test]
    fn majority_colour_wins() {
        assert_eq!(dominant_colour_of(&two_tone_png()).unwrap(), 0x20_40_F0);
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        assert!(matches!(
            dominant_colour_of(b"definitely not an image"),
            Err(ColourError::Image(_))
        ));
    }

    #[test]
    fn fully_transparent_images_have_no_colour() {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 0]));
        let mut encoded = std::io::Cursor::new(Vec::new());
        img.write_to(&mut encoded, image::ImageFormat::Png).unwrap();

        assert!(matches!(
            dominant_colour_of(&encoded.into_inner()),
            Err(ColourError::Transparent)
        ));
    }

    #[tokio::test]
    async fn http_sampler_reads_remote_image() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/avatar.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(two_tone_png()))
            .mount(&server)
            .await;

        let sampler = HttpColourSampler::new();
        let url = format!("{}/avatar.png", server.uri());

        assert_eq!(sampler.dominant_colour(Some(&url)).await, 0x20_40_F0);
    }

    #[tokio::test]
    async fn http_sampler_falls_back_on_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"nope".to_vec()))
            .mount(&server)
            .await;

        let sampler = HttpColourSampler::new();

        assert_eq!(sampler.dominant_colour(None).await, BLURPLE);
        for name in ["missing.png", "broken.png"] {
            let url = format!("{}/{name}", server.uri());
            assert_eq!(sampler.dominant_colour(Some(&url)).await, BLURPLE);
        }
    }
}
