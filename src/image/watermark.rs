use super::WatermarkService;
use crate::data_uri::DataUri;
use crate::models::WatermarkKind;
use crate::{assets, Error, Result};
use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

/// Mark width as a fraction of the image width.
const MARK_SCALE: f64 = 0.25;
/// Edge padding as a fraction of the image width (both axes).
const PADDING_SCALE: f64 = 0.05;

pub struct WatermarkCompositor;

impl WatermarkCompositor {
    pub fn new() -> Self {
        Self
    }

    fn mark_bytes(kind: WatermarkKind) -> Option<&'static [u8]> {
        match kind {
            WatermarkKind::None => None,
            WatermarkKind::Icon => Some(assets::LOGO_ICON_PNG),
            WatermarkKind::Full => Some(assets::LOGO_FULL_PNG),
        }
    }

    fn composite_sync(source: DataUri, mark_bytes: &[u8]) -> Result<String> {
        let base = image::load_from_memory(&source.data)?;
        let mark = image::load_from_memory(mark_bytes)?;

        let (width, height) = (base.width(), base.height());

        let mark_width = (width as f64 * MARK_SCALE).round().max(1.0) as u32;
        let mark_height = (mark_width as f64 * mark.height() as f64 / mark.width() as f64)
            .round()
            .max(1.0) as u32;
        let padding = (width as f64 * PADDING_SCALE).round() as i64;

        let scaled = mark.resize_exact(mark_width, mark_height, FilterType::Lanczos3);

        // Bottom-right anchor; padding comes from the image width on both axes.
        let x = width as i64 - mark_width as i64 - padding;
        let y = height as i64 - mark_height as i64 - padding;

        let mut canvas = base.to_rgba8();
        image::imageops::overlay(&mut canvas, &scaled.to_rgba8(), x, y);

        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)?;

        Ok(DataUri::encode("image/png", &bytes))
    }
}

impl Default for WatermarkCompositor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WatermarkService for WatermarkCompositor {
    async fn apply(&self, image_data_uri: &str, kind: WatermarkKind) -> Result<String> {
        let mark_bytes = match Self::mark_bytes(kind) {
            // Identity: no decode/re-encode round trip.
            None => return Ok(image_data_uri.to_string()),
            Some(bytes) => bytes,
        };

        let source = DataUri::parse(image_data_uri)?;
        tokio::task::spawn_blocking(move || Self::composite_sync(source, mark_bytes))
            .await
            .map_err(|e| Error::Invariant(format!("Watermark task join error: {}", e)))?
    }
}
