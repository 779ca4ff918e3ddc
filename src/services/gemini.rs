use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::GeneratorConfig;
use crate::error::{GenerationError, MISSING_API_KEY};
use crate::models::{
    ApiErrorEnvelope, Content, ContentType, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig,
};

pub const FALLBACK_INSTRUCTION: &str = "You are a helpful AI writing assistant.";

const FINISH_REASON_SAFETY: &str = "SAFETY";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub fn system_instruction(content_type: &ContentType) -> &'static str {
    match content_type {
        ContentType::SocialMedia => {
            "You are a social media manager. Create catchy, engaging captions with relevant hashtags."
        }
        ContentType::BlogIdea => {
            "You are a professional content strategist. Provide a catchy blog title and a detailed outline with key points."
        }
        ContentType::ProductDesc => {
            "You are a copywriter. Write persuasive, benefit-driven product descriptions that convert."
        }
        ContentType::EmailTemplate => {
            "You are a professional communication expert. Write clear, polite, and effective email templates."
        }
        ContentType::Other(_) => FALLBACK_INSTRUCTION,
    }
}

/// The instruction block sent as the user turn. The prompt is embedded verbatim.
pub fn compose_prompt(content_type: &ContentType, prompt: &str) -> String {
    format!(
        "Task: Generate content for {}.\n\
         Context/Topic: {}\n\
         \n\
         Requirements:\n\
         - Use professional yet engaging tone.\n\
         - Format with clear paragraphs or bullet points where appropriate.\n\
         - Keep it concise but comprehensive.\n",
        content_type.label(),
        prompt
    )
}

/// Anything that can turn a content request into text.
#[async_trait(?Send)]
pub trait ContentGenerator {
    async fn generate(
        &self,
        content_type: &ContentType,
        prompt: &str,
    ) -> Result<String, GenerationError>;
}

/// One raw call to the remote model.
#[async_trait(?Send)]
pub trait RemoteModel {
    async fn generate_content(
        &self,
        prompt: &str,
        system_instruction: &str,
        temperature: f32,
    ) -> Result<GenerateContentResponse>;
}

pub struct GeminiApi {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiApi {
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, String> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| MISSING_API_KEY.to_string())?;
        Ok(Self {
            http: Client::new(),
            endpoint: config.endpoint(),
            api_key,
        })
    }
}

fn extract_api_error(body: &str) -> Option<String> {
    let envelope: ApiErrorEnvelope = serde_json::from_str(body).ok()?;
    let err = envelope.error?;
    debug!(
        "Gemini error status={} code={}",
        err.status.as_deref().unwrap_or("unknown"),
        err.code.map(|c| c.to_string()).unwrap_or_else(|| "none".into())
    );
    err.message.filter(|m| !m.trim().is_empty())
}

#[async_trait(?Send)]
impl RemoteModel for GeminiApi {
    async fn generate_content(
        &self,
        prompt: &str,
        system_instruction: &str,
        temperature: f32,
    ) -> Result<GenerateContentResponse> {
        let url = reqwest::Url::parse(&self.endpoint)
            .with_context(|| "failed to parse Gemini endpoint URL")?;

        let request = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: Content::text(None, system_instruction),
            generation_config: GenerationConfig { temperature },
        };

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = resp.status();
        let payload = resp
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to read Gemini response body")?;
        if !status.is_success() {
            return Err(match extract_api_error(&payload) {
                Some(message) => anyhow!(message),
                None => anyhow!("Gemini API error ({})", status),
            });
        }

        serde_json::from_str(&payload).with_context(|| "failed to parse Gemini response JSON")
    }
}

/// The error chain on one line. Causes whose text an outer message already
/// carries are skipped.
fn describe(e: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in e.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

enum ClientState<R> {
    Uninitialized,
    Failed(String),
    Ready(Rc<R>),
}

type Initializer<R> = Box<dyn Fn() -> Result<R, String>>;

/// Lazily builds its remote handle on first use. A failed initialization is
/// remembered and every later call fails the same way.
pub struct GenerationClient<R: RemoteModel = GeminiApi> {
    state: RefCell<ClientState<R>>,
    init: Initializer<R>,
    temperature: f32,
}

impl GenerationClient<GeminiApi> {
    pub fn new(config: GeneratorConfig) -> Self {
        let temperature = config.temperature;
        Self::with_initializer(temperature, move || GeminiApi::from_config(&config))
    }
}

impl<R: RemoteModel> GenerationClient<R> {
    pub fn with_initializer<F>(temperature: f32, init: F) -> Self
    where
        F: Fn() -> Result<R, String> + 'static,
    {
        Self {
            state: RefCell::new(ClientState::Uninitialized),
            init: Box::new(init),
            temperature,
        }
    }

    fn remote(&self) -> Result<Rc<R>, GenerationError> {
        let mut state = self.state.borrow_mut();
        if let ClientState::Uninitialized = *state {
            *state = match (self.init)() {
                Ok(remote) => ClientState::Ready(Rc::new(remote)),
                Err(reason) => {
                    error!("Failed to initialize Gemini: {}", reason);
                    ClientState::Failed(reason)
                }
            };
        }
        match &*state {
            ClientState::Ready(remote) => Ok(Rc::clone(remote)),
            ClientState::Failed(reason) => Err(GenerationError::Configuration(reason.clone())),
            ClientState::Uninitialized => {
                Err(GenerationError::Configuration(MISSING_API_KEY.to_string()))
            }
        }
    }
}

#[async_trait(?Send)]
impl<R: RemoteModel> ContentGenerator for GenerationClient<R> {
    async fn generate(
        &self,
        content_type: &ContentType,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let remote = self.remote()?;
        let instruction = system_instruction(content_type);
        let composed = compose_prompt(content_type, prompt);

        debug!(
            "generating {} ({} chars of prompt)",
            content_type,
            prompt.chars().count()
        );

        let response = remote
            .generate_content(&composed, instruction, self.temperature)
            .await
            .map_err(|e| {
                let message = describe(&e);
                error!("Gemini API Error: {}", message);
                GenerationError::transport(message)
            })?;

        let text = response.text();
        if !text.is_empty() {
            return Ok(text);
        }

        let blocked = response.finish_reason() == Some(FINISH_REASON_SAFETY)
            || response.block_reason().is_some();
        if blocked {
            Err(GenerationError::SafetyBlock)
        } else {
            Err(GenerationError::EmptyResult)
        }
    }
}
