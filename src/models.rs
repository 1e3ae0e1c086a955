//! Data models and structures
//!
//! Defines the core domain types for generation requests, results, and the
//! studio state machine, plus environment configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-supplied reference image, already base64-encoded for the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Requested width:height proportion for generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Square,
    Landscape,
    Portrait,
    Widescreen,
    Vertical,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Vertical => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "1:1" => Ok(AspectRatio::Square),
            "4:3" => Ok(AspectRatio::Landscape),
            "3:4" => Ok(AspectRatio::Portrait),
            "16:9" => Ok(AspectRatio::Widescreen),
            "9:16" => Ok(AspectRatio::Vertical),
            other => Err(format!(
                "Unknown aspect ratio '{}'. Expected one of: 1:1, 4:3, 3:4, 16:9, 9:16",
                other
            )),
        }
    }
}

/// Supported image generation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    FlashImage,
    ProImagePreview,
}

impl GeminiModel {
    /// The bare model ID used in the request path.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeminiModel::FlashImage => "gemini-2.5-flash-image",
            GeminiModel::ProImagePreview => "gemini-3-pro-image-preview",
        }
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeminiModel {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "flash" | "gemini-2.5-flash-image" => Ok(GeminiModel::FlashImage),
            "pro" | "gemini-3-pro-image-preview" => Ok(GeminiModel::ProImagePreview),
            other => Err(format!(
                "Unknown model '{}'. Expected 'flash' or 'pro'",
                other
            )),
        }
    }
}

/// Which brand mark to composite onto a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkKind {
    None,
    Icon,
    Full,
}

impl FromStr for WatermarkKind {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "none" => Ok(WatermarkKind::None),
            "icon" => Ok(WatermarkKind::Icon),
            "full" => Ok(WatermarkKind::Full),
            other => Err(format!(
                "Unknown watermark '{}'. Expected 'none', 'icon' or 'full'",
                other
            )),
        }
    }
}

/// Normalized output of a generation call.
///
/// Both fields absent means the model produced no usable output; that is a
/// valid return here, and the studio converts it into an error state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GeneratedContent {
    pub fn is_empty(&self) -> bool {
        self.image_url.is_none() && self.text.is_none()
    }
}

/// Single source of truth for the main submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Loading,
    Success(GeneratedContent),
    Error(String),
}

/// Separately-scoped state for the idea generator sub-feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaState {
    Idle,
    Loading,
    Ready(Vec<String>),
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| crate::Error::Generic("GEMINI_API_KEY not set".to_string()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_round_trip() {
        for token in ["1:1", "4:3", "3:4", "16:9", "9:16"] {
            let ratio: AspectRatio = token.parse().unwrap();
            assert_eq!(ratio.as_str(), token);
        }
    }

    #[test]
    fn test_aspect_ratio_rejects_unknown() {
        let err = "2:1".parse::<AspectRatio>().unwrap_err();
        assert!(err.contains("2:1"));
    }

    #[test]
    fn test_model_aliases() {
        assert_eq!("flash".parse::<GeminiModel>().unwrap(), GeminiModel::FlashImage);
        assert_eq!(
            "pro".parse::<GeminiModel>().unwrap(),
            GeminiModel::ProImagePreview
        );
        assert_eq!(
            "gemini-2.5-flash-image".parse::<GeminiModel>().unwrap(),
            GeminiModel::FlashImage
        );
    }

    #[test]
    fn test_watermark_kind_parsing() {
        assert_eq!("none".parse::<WatermarkKind>().unwrap(), WatermarkKind::None);
        assert_eq!("icon".parse::<WatermarkKind>().unwrap(), WatermarkKind::Icon);
        assert_eq!("full".parse::<WatermarkKind>().unwrap(), WatermarkKind::Full);
        assert!("logo".parse::<WatermarkKind>().is_err());
    }

    #[test]
    fn test_generated_content_is_empty() {
        assert!(GeneratedContent::default().is_empty());
        assert!(!GeneratedContent {
            image_url: Some("data:image/png;base64,AA==".to_string()),
            text: None,
        }
        .is_empty());
        assert!(!GeneratedContent {
            image_url: None,
            text: Some("a caption".to_string()),
        }
        .is_empty());
    }

    #[test]
    fn test_generated_content_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&GeneratedContent::default()).unwrap();
        assert_eq!(json, "{}");

        let content = GeneratedContent {
            image_url: Some("data:image/png;base64,AA==".to_string()),
            text: Some("hello".to_string()),
        };
        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"text\""));
    }
}
