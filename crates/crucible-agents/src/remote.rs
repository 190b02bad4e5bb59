//! Remote model-backed evaluators.
//!
//! One `RemoteEvaluator` covers every provider; the differences are the wire
//! shape (Anthropic messages vs. OpenAI-style chat completions), the API key
//! environment variable, and the role prompt. Transport and parse failures
//! surface as `EvaluatorError` so the panel runner can degrade them.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use consensus::{Dimension, Evaluator, EvaluatorError, ModelEvaluation};

use crate::prompts;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 2048;
const MAX_FAILURE_MODES: usize = 5;
const MAX_PIVOTS: usize = 3;
const MAX_REASONING_CHARS: usize = 500;

/// Supported model providers, each bound to one registry evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAi,
    XAi,
    DeepSeek,
    Google,
}

impl Provider {
    pub fn all() -> &'static [Provider] {
        &[
            Provider::Anthropic,
            Provider::OpenAi,
            Provider::XAi,
            Provider::DeepSeek,
            Provider::Google,
        ]
    }

    pub fn env_key(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::XAi => "XAI_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::Google => "GEMINI_API_KEY",
        }
    }

    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com/v1/messages",
            Self::OpenAi => "https://api.openai.com/v1/chat/completions",
            Self::XAi => "https://api.x.ai/v1/chat/completions",
            Self::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
            Self::Google => {
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
            }
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude-opus-4-5",
            Self::OpenAi => "o3",
            Self::XAi => "grok-beta",
            Self::DeepSeek => "deepseek-reasoner",
            Self::Google => "gemini-2.0-flash",
        }
    }

    /// Registry evaluator name this provider speaks for.
    pub fn evaluator_name(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude_opus",
            Self::OpenAi => "gpt_o3",
            Self::XAi => "grok",
            Self::DeepSeek => "deepseek_r1",
            Self::Google => "gemini_flash",
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Self::Anthropic => "deep_reasoning_critic",
            Self::OpenAi => "vc_skeptic",
            Self::XAi => "contrarian",
            Self::DeepSeek => "technical_auditor",
            Self::Google => "speed_analyst",
        }
    }

    pub fn key_configured(&self) -> bool {
        std::env::var(self.env_key()).map(|k| !k.is_empty()).unwrap_or(false)
    }
}

pub struct RemoteEvaluator {
    provider: Provider,
    model: String,
    api_key: String,
    client: reqwest::Client,
    prompt: &'static str,
}

impl RemoteEvaluator {
    /// Build an evaluator for the provider. Fails when the API key is not
    /// configured; a missing key is the caller's cue to fall back to the
    /// heuristic member.
    pub fn new(provider: Provider) -> Result<Self, EvaluatorError> {
        let api_key = std::env::var(provider.env_key())
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| EvaluatorError::MissingApiKey(provider.env_key().to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EvaluatorError::Unavailable(e.to_string()))?;

        // Built-in providers always have a prompt.
        let prompt = prompts::prompt_for(provider.evaluator_name())
            .ok_or_else(|| EvaluatorError::Unavailable("no prompt for provider".to_string()))?;

        Ok(Self {
            provider,
            model: provider.default_model().to_string(),
            api_key,
            client,
            prompt,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Every provider with a configured key, as panel members.
    pub fn available_panel() -> Vec<Arc<dyn Evaluator>> {
        Provider::all()
            .iter()
            .filter(|p| p.key_configured())
            .filter_map(|p| RemoteEvaluator::new(*p).ok())
            .map(|e| Arc::new(e) as Arc<dyn Evaluator>)
            .collect()
    }

    async fn request_anthropic(&self, concept: &str) -> Result<String, EvaluatorError> {
        let user_message = format!(
            "Evaluate this startup concept:\n\n\"{concept}\"\n\n{}\n\nProvide your evaluation \
             in JSON format as specified in the prompt.",
            self.prompt
        );
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: user_message,
            }],
        };

        let response = self
            .client
            .post(self.provider.api_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(|e| EvaluatorError::RequestFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| EvaluatorError::RequestFailed(e.to_string()))?
            .json::<AnthropicResponse>()
            .await
            .map_err(|e| EvaluatorError::ParseError(e.to_string()))?;

        response
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| EvaluatorError::ParseError("empty response content".to_string()))
    }

    async fn request_chat(&self, concept: &str) -> Result<String, EvaluatorError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Evaluate this startup concept:\n\n\"{concept}\"\n\nProvide your \
                         evaluation in JSON format as specified."
                    ),
                },
            ],
            temperature: 0.8,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.provider.api_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EvaluatorError::RequestFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| EvaluatorError::RequestFailed(e.to_string()))?
            .json::<ChatResponse>()
            .await
            .map_err(|e| EvaluatorError::ParseError(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| EvaluatorError::ParseError("empty choices in response".to_string()))
    }
}

#[async_trait]
impl Evaluator for RemoteEvaluator {
    fn name(&self) -> &str {
        self.provider.evaluator_name()
    }

    fn role(&self) -> &str {
        self.provider.role()
    }

    async fn evaluate(
        &self,
        concept: &str,
        dimensions: &[Dimension],
    ) -> Result<ModelEvaluation, EvaluatorError> {
        info!(
            evaluator = %self.name(),
            model = %self.model,
            "requesting remote evaluation"
        );

        let content = match self.provider {
            Provider::Anthropic => self.request_anthropic(concept).await?,
            _ => self.request_chat(concept).await?,
        };
        debug!(evaluator = %self.name(), bytes = content.len(), "response received");

        parse_evaluation(self.name(), self.role(), &content, dimensions)
    }
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// ── Response parsing ────────────────────────────────────────────────

/// JSON shape every role prompt asks the model to produce.
#[derive(Deserialize)]
struct RawEvaluation {
    #[serde(default)]
    scores: BTreeMap<String, f64>,
    #[serde(default)]
    failure_modes: Vec<String>,
    #[serde(default)]
    pivots: Vec<String>,
    confidence: Option<f64>,
    #[serde(default)]
    reasoning: String,
    dissenting_opinion: Option<String>,
}

/// Strip a markdown code fence if the model wrapped its JSON in one.
fn strip_fences(content: &str) -> &str {
    for opener in ["```json", "```"] {
        if let Some(start) = content.find(opener) {
            let body = &content[start + opener.len()..];
            if let Some(end) = body.find("```") {
                return body[..end].trim();
            }
        }
    }
    content.trim()
}

/// Parse a model's JSON evaluation, clamping scores to [1, 10], capping the
/// list fields, and truncating reasoning. Dimensions the model did not score
/// (or named unrecognizably) are simply absent; the synthesizer handles that.
pub fn parse_evaluation(
    name: &str,
    role: &str,
    content: &str,
    dimensions: &[Dimension],
) -> Result<ModelEvaluation, EvaluatorError> {
    let raw: RawEvaluation = serde_json::from_str(strip_fences(content))
        .map_err(|e| EvaluatorError::ParseError(e.to_string()))?;

    let mut scores = BTreeMap::new();
    for (key, value) in &raw.scores {
        if let Ok(dimension) = key.parse::<Dimension>() {
            if dimensions.contains(&dimension) {
                scores.insert(dimension, (value.round() as i64).clamp(1, 10) as u8);
            }
        }
    }

    let mut failure_modes = raw.failure_modes;
    failure_modes.truncate(MAX_FAILURE_MODES);
    let mut pivots = raw.pivots;
    pivots.truncate(MAX_PIVOTS);

    Ok(ModelEvaluation {
        evaluator: name.to_string(),
        role: role.to_string(),
        scores,
        failure_modes,
        pivots_suggested: pivots,
        confidence: raw.confidence.unwrap_or(0.8).clamp(0.0, 1.0),
        dissenting_opinion: raw.dissenting_opinion,
        reasoning: raw.reasoning.chars().take(MAX_REASONING_CHARS).collect(),
    })
}
