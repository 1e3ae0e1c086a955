use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageGenerationService;
use crate::models::{AspectRatio, GeminiModel, GeneratedContent, ReferenceImage};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_client(api_key, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, Duration::from_secs(120), client),
        }
    }

    /// Ordered request payload: reference images first, text prompt last.
    fn build_parts(prompt: &str, reference_images: &[ReferenceImage]) -> Vec<Part> {
        let mut parts: Vec<Part> = reference_images
            .iter()
            .map(|img| Part::InlineData {
                inline_data: InlineData {
                    mime_type: img.mime_type.clone(),
                    data: img.data.clone(),
                },
            })
            .collect();
        parts.push(Part::Text {
            text: prompt.to_string(),
        });
        parts
    }

    /// Scan the first candidate's parts in order, keeping the last value of
    /// each kind. Matches the original scanning behavior exactly; a later
    /// part of the same kind overwrites an earlier one rather than merging.
    fn collect_content(response: &GenerateContentResponse) -> GeneratedContent {
        let mut content = GeneratedContent::default();

        if let Some(candidate) = response.candidates.first() {
            for part in &candidate.content.parts {
                match part {
                    Part::InlineData { inline_data } => {
                        let mime_type = if inline_data.mime_type.is_empty() {
                            "image/png"
                        } else {
                            inline_data.mime_type.as_str()
                        };
                        content.image_url =
                            Some(format!("data:{};base64,{}", mime_type, inline_data.data));
                    }
                    Part::Text { text } => {
                        content.text = Some(text.clone());
                    }
                }
            }
        }

        content
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate(
        &self,
        prompt: &str,
        reference_images: &[ReferenceImage],
        aspect_ratio: AspectRatio,
        model: GeminiModel,
    ) -> Result<GeneratedContent> {
        let request = ImageRequest {
            contents: vec![Content {
                role: None,
                parts: Self::build_parts(prompt, reference_images),
            }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                },
            },
        };

        let response: GenerateContentResponse =
            self.http.generate_content(model.as_str(), &request).await?;

        let content = Self::collect_content(&response);
        tracing::debug!(
            "Gemini returned content (image: {}, text: {})",
            content.image_url.is_some(),
            content.text.is_some()
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use wiremock::{MockServer, ResponseTemplate};

    fn make_client(server: &MockServer, api_key: &str) -> GeminiImageClient {
        GeminiImageClient::new(api_key.to_string()).with_base_url(server.uri())
    }

    fn reference(data: &str, mime_type: &str) -> ReferenceImage {
        ReferenceImage {
            data: data.to_string(),
            mime_type: mime_type.to_string(),
        }
    }

    #[test]
    fn test_build_parts_orders_images_before_text() {
        let parts = GeminiImageClient::build_parts(
            "a castle",
            &[reference("AAAA", "image/png"), reference("BBBB", "image/jpeg")],
        );

        assert_eq!(parts.len(), 3);
        assert!(
            matches!(&parts[0], Part::InlineData { inline_data } if inline_data.data == "AAAA")
        );
        assert!(
            matches!(&parts[1], Part::InlineData { inline_data } if inline_data.data == "BBBB")
        );
        assert!(matches!(&parts[2], Part::Text { text } if text == "a castle"));
    }

    #[test]
    fn test_build_parts_without_references_is_a_single_text_part() {
        let parts = GeminiImageClient::build_parts("A futuristic city", &[]);

        assert_eq!(parts.len(), 1);
        assert!(matches!(&parts[0], Part::Text { text } if text == "A futuristic city"));
    }

    #[test]
    fn test_collect_content_keeps_last_binary_part() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "c2Vjb25k" } }
                    ]
                }
            }]
        }))
        .unwrap();

        let content = GeminiImageClient::collect_content(&response);
        assert_eq!(
            content.image_url.as_deref(),
            Some("data:image/jpeg;base64,c2Vjb25k")
        );
        assert_eq!(content.text, None);
    }

    #[test]
    fn test_collect_content_defaults_mime_type_to_png() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "inlineData": { "data": "AA==" } }]
                }
            }]
        }))
        .unwrap();

        let content = GeminiImageClient::collect_content(&response);
        assert_eq!(content.image_url.as_deref(), Some("data:image/png;base64,AA=="));
    }

    #[test]
    fn test_collect_content_empty_parts_yields_empty_content() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [] } }]
        }))
        .unwrap();

        assert!(GeminiImageClient::collect_content(&response).is_empty());
    }

    #[tokio::test]
    async fn test_generate_parses_image_and_text_parts() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [
                            { "inlineData": { "mimeType": "image/png", "data": "iVBORw0=" } },
                            { "text": "A moody skyline at dusk" }
                        ]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, "key");
        let content = client
            .generate(
                "A futuristic city",
                &[],
                AspectRatio::Widescreen,
                GeminiModel::FlashImage,
            )
            .await
            .unwrap();

        assert_eq!(
            content.image_url.as_deref(),
            Some("data:image/png;base64,iVBORw0=")
        );
        assert_eq!(content.text.as_deref(), Some("A moody skyline at dusk"));
    }

    #[tokio::test]
    async fn test_generate_sends_aspect_ratio_and_prompt() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(wiremock::matchers::body_string_contains(
                "\"aspectRatio\":\"16:9\"",
            ))
            .and(wiremock::matchers::body_string_contains("A futuristic city"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AA==" } }]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "key");
        let content = client
            .generate(
                "A futuristic city",
                &[],
                AspectRatio::Widescreen,
                GeminiModel::FlashImage,
            )
            .await
            .unwrap();

        assert!(content.image_url.is_some());
    }

    #[tokio::test]
    async fn test_generate_routes_to_selected_model() {
        let server = MockServer::start().await;

        test_support::post_path_regex(r"/v1beta/models/gemini-3-pro-image-preview:generateContent")
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AA==" } }]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "key");
        client
            .generate(
                "test",
                &[],
                AspectRatio::Square,
                GeminiModel::ProImagePreview,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_generate_returns_empty_content_for_empty_response() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server, "key");
        let content = client
            .generate("test", &[], AspectRatio::Square, GeminiModel::FlashImage)
            .await
            .unwrap();

        // Not an error here; the studio maps empty content to an error state.
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = make_client(&server, "key");
        let err = client
            .generate("test", &[], AspectRatio::Square, GeminiModel::FlashImage)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AiProvider(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
