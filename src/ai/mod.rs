//! AI service integration for image and idea generation
//!
//! Provides interfaces to Gemini's generateContent API for creating or
//! editing images from prompts plus reference images, and for brainstorming
//! prompt ideas.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiIdeaClient, GeminiImageClient};
pub use mock::{MockIdeaClient, MockImageGenerationClient};

use crate::models::{AspectRatio, GeminiModel, GeneratedContent, ReferenceImage};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate or edit an image from a prompt plus ordered reference images.
    ///
    /// An empty [`GeneratedContent`] is a valid return; callers decide how to
    /// surface "no content" to the user.
    async fn generate(
        &self,
        prompt: &str,
        reference_images: &[ReferenceImage],
        aspect_ratio: AspectRatio,
        model: GeminiModel,
    ) -> Result<GeneratedContent>;
}

#[async_trait]
pub trait IdeaService: Send + Sync {
    /// Suggest creative prompts for a topic.
    ///
    /// Degrades to an empty list on any failure instead of returning an
    /// error; the idea generator is a best-effort side feature.
    async fn creative_prompts(&self, topic: &str) -> Vec<String>;
}
