use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part, Schema};
use crate::ai::IdeaService;
use crate::{prompts, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Text model used for brainstorming; not user-selectable.
const IDEA_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
struct IdeaRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: IdeaGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdeaGenerationConfig {
    response_mime_type: &'static str,
    response_schema: Schema,
}

pub struct GeminiIdeaClient {
    http: GeminiHttpClient,
}

impl GeminiIdeaClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_client(api_key, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, Duration::from_secs(30), client),
        }
    }

    async fn request_ideas(&self, topic: &str) -> Result<Vec<String>> {
        let request = IdeaRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: prompts::render(prompts::IDEA_INSTRUCTION, &[("topic", topic)]),
                }],
            }],
            generation_config: IdeaGenerationConfig {
                response_mime_type: "application/json",
                response_schema: Schema::string_array(),
            },
        };

        let response: GenerateContentResponse =
            self.http.generate_content(IDEA_MODEL, &request).await?;

        let text = response
            .candidates
            .first()
            .and_then(|c| {
                c.content.parts.iter().find_map(|p| match p {
                    Part::Text { text } => Some(text.clone()),
                    Part::InlineData { .. } => None,
                })
            })
            .unwrap_or_default();

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiIdeaClient);

#[async_trait]
impl IdeaService for GeminiIdeaClient {
    async fn creative_prompts(&self, topic: &str) -> Vec<String> {
        match self.request_ideas(topic).await {
            Ok(ideas) => ideas,
            Err(e) => {
                // Best-effort feature: swallow the failure and return nothing.
                tracing::warn!("Idea generation failed: {}", e);
                Vec::new()
            }
        }
    }
}
