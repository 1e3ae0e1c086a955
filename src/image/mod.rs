//! Watermark compositing
//!
//! Overlays the brand mark onto generated images without changing their
//! pixel dimensions.

pub mod mock;
pub mod watermark;

pub use mock::MockWatermarker;
pub use watermark::WatermarkCompositor;

use crate::models::WatermarkKind;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait WatermarkService: Send + Sync {
    /// Composite the selected mark onto an image data URI, returning a new
    /// data URI. `WatermarkKind::None` is the identity.
    async fn apply(&self, image_data_uri: &str, kind: WatermarkKind) -> Result<String>;
}
