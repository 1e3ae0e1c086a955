//! Shared Gemini payload types used by the image and idea modules.

use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload used for image parts.
///
/// Responses do not always declare a MIME type, so it defaults to empty on
/// decode and the image client falls back to `image/png`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// Minimal structured-output schema (enough for an array of strings).
#[derive(Debug, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    pub fn string_array() -> Self {
        Self {
            schema_type: "ARRAY",
            items: Some(Box::new(Schema {
                schema_type: "STRING",
                items: None,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_deserializes_text_and_inline_data() {
        let parts: Vec<Part> = serde_json::from_str(
            r#"[{"text": "hello"}, {"inlineData": {"mimeType": "image/png", "data": "AA=="}}]"#,
        )
        .unwrap();

        assert!(matches!(&parts[0], Part::Text { text } if text == "hello"));
        assert!(
            matches!(&parts[1], Part::InlineData { inline_data } if inline_data.mime_type == "image/png")
        );
    }

    #[test]
    fn test_inline_data_mime_type_defaults_to_empty() {
        let part: Part = serde_json::from_str(r#"{"inlineData": {"data": "AA=="}}"#).unwrap();
        match part {
            Part::InlineData { inline_data } => assert!(inline_data.mime_type.is_empty()),
            Part::Text { .. } => panic!("expected inline data"),
        }
    }

    #[test]
    fn test_string_array_schema_serialization() {
        let json = serde_json::to_string(&Schema::string_array()).unwrap();
        assert_eq!(json, r#"{"type":"ARRAY","items":{"type":"STRING"}}"#);
    }
}
