use super::WatermarkService;
use crate::models::WatermarkKind;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Pass-through watermark mock that records how it was called.
#[derive(Clone)]
pub struct MockWatermarker {
    apply_count: Arc<Mutex<usize>>,
    last_kind: Arc<Mutex<Option<WatermarkKind>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockWatermarker {
    pub fn new() -> Self {
        Self {
            apply_count: Arc::new(Mutex::new(0)),
            last_kind: Arc::new(Mutex::new(None)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_apply_count(&self) -> usize {
        *self.apply_count.lock().unwrap()
    }

    pub fn get_last_kind(&self) -> Option<WatermarkKind> {
        *self.last_kind.lock().unwrap()
    }
}

impl Default for MockWatermarker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WatermarkService for MockWatermarker {
    async fn apply(&self, image_data_uri: &str, kind: WatermarkKind) -> Result<String> {
        if *self.should_fail.lock().unwrap() {
            return Err(Error::Image(image::ImageError::IoError(
                std::io::Error::other("Mock watermark failure"),
            )));
        }

        *self.apply_count.lock().unwrap() += 1;
        *self.last_kind.lock().unwrap() = Some(kind);

        Ok(format!("{}#watermarked", image_data_uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_watermarker_records_calls() {
        let watermarker = MockWatermarker::new();

        let output = watermarker
            .apply("data:image/png;base64,AA==", WatermarkKind::Icon)
            .await
            .unwrap();

        assert_eq!(output, "data:image/png;base64,AA==#watermarked");
        assert_eq!(watermarker.get_apply_count(), 1);
        assert_eq!(watermarker.get_last_kind(), Some(WatermarkKind::Icon));
    }

    #[tokio::test]
    async fn test_mock_watermarker_failure() {
        let watermarker = MockWatermarker::new().with_failure(true);

        let result = watermarker
            .apply("data:image/png;base64,AA==", WatermarkKind::Full)
            .await;
        assert!(result.is_err());
        assert_eq!(watermarker.get_apply_count(), 0);
    }
}
