use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::utils::now_millis;

pub const MAX_CHAR_LIMIT: usize = 500;
pub const MAX_HISTORY_ITEMS: usize = 5;

/// Category of content the user wants generated. Serialized as its label so
/// stored history stays readable.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Debug)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    SocialMedia,
    BlogIdea,
    ProductDesc,
    EmailTemplate,
    /// A label this build does not know about, kept as stored.
    Other(String),
}

impl ContentType {
    pub fn label(&self) -> &str {
        match self {
            ContentType::SocialMedia => "Social Media Caption",
            ContentType::BlogIdea => "Blog Idea",
            ContentType::ProductDesc => "Product Description",
            ContentType::EmailTemplate => "Email Template",
            ContentType::Other(label) => label,
        }
    }

    /// Label shown in the selector and history list.
    pub fn display_label(&self) -> &str {
        CONTENT_OPTIONS
            .iter()
            .find(|opt| opt.id == *self)
            .map(|opt| opt.label)
            .unwrap_or_else(|| self.label())
    }
}

impl From<String> for ContentType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Social Media Caption" => ContentType::SocialMedia,
            "Blog Idea" => ContentType::BlogIdea,
            "Product Description" => ContentType::ProductDesc,
            "Email Template" => ContentType::EmailTemplate,
            _ => ContentType::Other(label),
        }
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl Default for ContentType {
    fn default() -> Self {
        CONTENT_OPTIONS[0].id.clone()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OptionIcon {
    Share,
    FileText,
    ShoppingBag,
    Mail,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ContentOption {
    pub id: ContentType,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: OptionIcon,
}

pub const CONTENT_OPTIONS: [ContentOption; 4] = [
    ContentOption {
        id: ContentType::SocialMedia,
        label: "Social Media Caption",
        description: "Engaging captions for Instagram, Twitter, or LinkedIn posts.",
        icon: OptionIcon::Share,
    },
    ContentOption {
        id: ContentType::BlogIdea,
        label: "Blog Idea & Outline",
        description: "Creative topics and structured outlines for your next article.",
        icon: OptionIcon::FileText,
    },
    ContentOption {
        id: ContentType::ProductDesc,
        label: "Product Description",
        description: "Persuasive copy to highlight features and benefits.",
        icon: OptionIcon::ShoppingBag,
    },
    ContentOption {
        id: ContentType::EmailTemplate,
        label: "Email Template",
        description: "Professional email drafts for newsletters or outreach.",
        icon: OptionIcon::Mail,
    },
];

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ContentRequest {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub prompt: String,
}

impl ContentRequest {
    pub fn new(content_type: ContentType, prompt: impl Into<String>) -> Self {
        Self {
            content_type,
            prompt: prompt.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(flatten)]
    pub request: ContentRequest,
    pub result: String,
    // Epoch milliseconds, as reported by `Date.now()`.
    #[serde(rename = "timestamp")]
    pub created_at: f64,
}

impl HistoryEntry {
    pub fn new(request: ContentRequest, result: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            request,
            result,
            created_at: now_millis(),
        }
    }
}

/// Stored as the bare strings `light` / `dark`, not JSON.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

// Gemini API DTOs
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, empty if there are none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorEnvelope {
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub status: Option<String>,
    pub code: Option<i64>,
}
