use super::{IdeaService, ImageGenerationService};
use crate::models::{AspectRatio, GeminiModel, GeneratedContent, ReferenceImage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockImageGenerationClient {
    responses: Arc<Mutex<Vec<GeneratedContent>>>,
    call_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_response(self, response: GeneratedContent) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate(
        &self,
        prompt: &str,
        _reference_images: &[ReferenceImage],
        _aspect_ratio: AspectRatio,
        _model: GeminiModel,
    ) -> Result<GeneratedContent> {
        if *self.should_fail.lock().unwrap() {
            return Err(Error::AiProvider("Mock generation failure".to_string()));
        }

        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response: a 1x1 PNG data URI plus a caption.
            Ok(GeneratedContent {
                image_url: Some(
                    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR4nGP4z8DwHwAFAAH/q842iQAAAABJRU5ErkJggg=="
                        .to_string(),
                ),
                text: Some(format!("Mock render of: {}", prompt)),
            })
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[derive(Clone)]
pub struct MockIdeaClient {
    responses: Arc<Mutex<Vec<Vec<String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockIdeaClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_ideas(self, ideas: Vec<String>) -> Self {
        self.responses.lock().unwrap().push(ideas);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockIdeaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdeaService for MockIdeaClient {
    async fn creative_prompts(&self, topic: &str) -> Vec<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            vec![
                format!("A cinematic take on {}", topic),
                format!("A watercolor study of {}", topic),
                format!("A macro photograph of {}", topic),
            ]
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone()
        }
    }
}
