use crate::error::ImageError;
use crate::fetchers::RequestFetcher;
use image::ImageFormat;
use log::debug;
use std::io::Cursor;

/// Re-encodes remote pictures as PNG
pub struct ImageNormalizer {
    fetcher: RequestFetcher,
}

impl ImageNormalizer {
    pub fn new(fetcher: RequestFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch `image_url` and return it encoded as PNG.
    ///
    /// The downloaded bytes only live in memory for the duration of the call.
    pub async fn normalize(&self, image_url: &str) -> Result<Vec<u8>, ImageError> {
        let source = self.fetcher.fetch(image_url).await?;
        debug!(
            "ImageNormalizer: converting {} bytes from {}",
            source.len(),
            image_url
        );

        let png = tokio::task::spawn_blocking(move || to_png(&source)).await??;
        debug!("ImageNormalizer: produced {} PNG bytes", png.len());
        Ok(png)
    }
}

/// Decode `source` in whatever format it is in and encode it as PNG
pub fn to_png(source: &[u8]) -> Result<Vec<u8>, ImageError> {
    let format = image::guess_format(source)
        .map_err(|e| ImageError::UnsupportedOrCorruptSource(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(source, format)
        .map_err(|e| ImageError::UnsupportedOrCorruptSource(e.to_string()))?;

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;
    Ok(png)
}
