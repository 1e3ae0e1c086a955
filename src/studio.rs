//! Studio orchestration: one submission pipeline from prompt to displayable
//! result, plus the idea-generator side feature.

use crate::ai::{GeminiIdeaClient, GeminiImageClient, IdeaService, ImageGenerationService};
use crate::image::{WatermarkCompositor, WatermarkService};
use crate::models::{
    AspectRatio, Config, GeminiModel, GeneratedContent, GenerationState, IdeaState, ReferenceImage,
    WatermarkKind,
};
use crate::Result;
use tracing::{info, warn};

const EMPTY_CONTENT_MESSAGE: &str =
    "The model didn't return any content. Please try a different prompt.";

/// One studio submission: prompt, optional references, and options.
///
/// The content image precedes the style image in the request part order.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub content_image: Option<ReferenceImage>,
    pub style_image: Option<ReferenceImage>,
    pub aspect_ratio: AspectRatio,
    pub model: GeminiModel,
    pub watermark: WatermarkKind,
}

/// Injectable service bundle used to construct [`Studio`] in tests/harnesses.
pub struct StudioServices {
    pub image_gen: Box<dyn ImageGenerationService>,
    pub ideas: Box<dyn IdeaService>,
    pub watermark: Box<dyn WatermarkService>,
}

/// Coordinates generation, watermarking, and idea brainstorming, and owns
/// the state machine the front end renders from.
pub struct Studio {
    image_gen: Box<dyn ImageGenerationService>,
    ideas: Box<dyn IdeaService>,
    watermark: Box<dyn WatermarkService>,
    state: GenerationState,
    idea_state: IdeaState,
}

impl Studio {
    /// Build a studio from concrete service dependencies.
    ///
    /// This is primarily useful for tests and harnesses that need to inject
    /// mocks; production construction goes through [`Studio::new`].
    pub fn with_services(services: StudioServices) -> Self {
        Self {
            image_gen: services.image_gen,
            ideas: services.ideas,
            watermark: services.watermark,
            state: GenerationState::Idle,
            idea_state: IdeaState::Idle,
        }
    }

    /// Construct a studio from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;

        // Reuse one HTTP connection pool across both Gemini clients.
        let http_client = reqwest::Client::new();

        Ok(Self::with_services(StudioServices {
            image_gen: Box::new(GeminiImageClient::new_with_client(
                config.gemini_api_key.clone(),
                http_client.clone(),
            )),
            ideas: Box::new(GeminiIdeaClient::new_with_client(
                config.gemini_api_key,
                http_client,
            )),
            watermark: Box::new(WatermarkCompositor::new()),
        }))
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn idea_state(&self) -> &IdeaState {
        &self.idea_state
    }

    /// Run one submission through generation and optional watermarking.
    ///
    /// A blank prompt leaves the current state untouched (the UI disables
    /// submission, this is the backstop). Every other outcome lands in
    /// `Success` or `Error`; failures are terminal for the submission and a
    /// resubmit simply starts over at `Loading`.
    pub async fn generate(&mut self, request: GenerationRequest) -> &GenerationState {
        if request.prompt.trim().is_empty() {
            return &self.state;
        }

        self.state = GenerationState::Loading;

        self.state = match self.run_generation(&request).await {
            Ok(content) if content.is_empty() => {
                warn!("Model returned no content for prompt");
                GenerationState::Error(EMPTY_CONTENT_MESSAGE.to_string())
            }
            Ok(content) => GenerationState::Success(content),
            Err(e) => GenerationState::Error(e.to_string()),
        };

        &self.state
    }

    async fn run_generation(&self, request: &GenerationRequest) -> Result<GeneratedContent> {
        let mut reference_images = Vec::new();
        if let Some(content_image) = &request.content_image {
            reference_images.push(content_image.clone());
        }
        if let Some(style_image) = &request.style_image {
            reference_images.push(style_image.clone());
        }

        info!(
            "Generating image (model: {}, aspect ratio: {}, references: {})",
            request.model,
            request.aspect_ratio,
            reference_images.len()
        );

        let mut content = self
            .image_gen
            .generate(
                &request.prompt,
                &reference_images,
                request.aspect_ratio,
                request.model,
            )
            .await?;

        if let Some(image_url) = &content.image_url {
            if request.watermark != WatermarkKind::None {
                content.image_url = Some(self.watermark.apply(image_url, request.watermark).await?);
            }
        }

        Ok(content)
    }

    /// Brainstorm prompt ideas for a topic.
    ///
    /// The idea path never reaches `Error`: service-level failures already
    /// degraded to an empty list, and a blank topic is a no-op.
    pub async fn generate_ideas(&mut self, topic: &str) -> &IdeaState {
        if topic.trim().is_empty() {
            return &self.idea_state;
        }

        self.idea_state = IdeaState::Loading;
        let ideas = self.ideas.creative_prompts(topic).await;
        info!("Idea generation produced {} suggestions", ideas.len());
        self.idea_state = IdeaState::Ready(ideas);

        &self.idea_state
    }
}
