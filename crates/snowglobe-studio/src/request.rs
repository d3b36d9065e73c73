//! Request and response payloads.

use serde::{Deserialize, Serialize};

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A short Christmas song (text).
    Song,
    /// An illustration of the description (image).
    Drawing,
    /// A single cinematic frame (image).
    Video,
}

impl ContentKind {
    /// Whether the gateway answers with an image.
    pub const fn is_image(self) -> bool {
        matches!(self, Self::Drawing | Self::Video)
    }
}

/// One generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text description from the user.
    pub description: String,
    /// What to generate. Defaults to a drawing.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: ContentKind,
}

const fn default_kind() -> ContentKind {
    ContentKind::Drawing
}

/// Generated content, serialized as `{"text": ...}` or `{"imageUrl": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedContent {
    /// Song lyrics.
    Text {
        /// The generated text.
        text: String,
    },
    /// A generated image.
    Image {
        /// URL or data URI of the image.
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
}

/// Pull `choices[0].message.content` out of a chat completion.
///
/// # Errors
///
/// Returns the missing path when the field is absent or not a string.
pub fn extract_text(json: &serde_json::Value) -> Result<String, &'static str> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .ok_or("choices[0].message.content")
}

/// Pull `choices[0].message.images[0].image_url.url` out of a chat completion.
///
/// # Errors
///
/// Returns the missing path when the field is absent or not a string.
pub fn extract_image_url(json: &serde_json::Value) -> Result<String, &'static str> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("images"))
        .and_then(|i| i.get(0))
        .and_then(|i| i.get("image_url"))
        .and_then(|u| u.get("url"))
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .ok_or("choices[0].message.images[0].image_url.url")
}
