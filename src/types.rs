use serde::{Deserialize, Serialize};

// Inbound WhatsApp Cloud API message, parsed one change at a time.

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub from: Option<String>,
    pub text: Option<TextBody>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: String,
}

/// The sender and body of the one message we act on per change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender_id: String,
    pub body_text: String,
}

// Outbound WhatsApp message

#[derive(Debug, Serialize)]
pub struct OutgoingMessage {
    pub messaging_product: &'static str,
    pub to: String,
    #[serde(flatten)]
    pub content: OutgoingContent,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingContent {
    Text { text: TextBody },
    Image { image: ImageLink },
}

#[derive(Debug, Serialize)]
pub struct ImageLink {
    pub link: String,
}

impl OutgoingMessage {
    pub fn text(to: &str, body: &str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to: to.to_owned(),
            content: OutgoingContent::Text {
                text: TextBody {
                    body: body.to_owned(),
                },
            },
        }
    }

    pub fn image(to: &str, link: &str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to: to.to_owned(),
            content: OutgoingContent::Image {
                image: ImageLink {
                    link: link.to_owned(),
                },
            },
        }
    }
}

// Gemini text generation (generateContent)

#[derive(Debug, Serialize)]
pub struct GeminiTextRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiTextResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
}

impl GeminiTextRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_owned()),
                }],
            }],
        }
    }
}

impl GeminiTextResponse {
    /// First text part of the first candidate.
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

// Gemini image generation (generateImage)

#[derive(Debug, Serialize)]
pub struct GeminiImageRequest {
    pub prompt: GeminiImagePrompt,
}

#[derive(Debug, Serialize)]
pub struct GeminiImagePrompt {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GeminiImageResponse {
    #[serde(rename = "generatedImages", default)]
    pub generated_images: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: Option<String>,
}

impl GeminiImageResponse {
    pub fn first_url(self) -> Option<String> {
        self.generated_images.into_iter().next()?.url
    }
}

/// Result of one generation call, discarded when the request finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Text(String),
    Image(String),
    Failed,
}
