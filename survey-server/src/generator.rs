//! Follow-up question generation
//!
//! Two backends sit behind [`QuestionGenerator`]:
//! - [`TemplateGenerator`]: built-in question sets per domain, no network
//! - [`LlamaGenerator`]: a llama.cpp-compatible `/completion` server

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use survey_common::config::{GeneratorBackend, GeneratorConfig};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

/// Produces follow-up questions for a piece of feedback
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, domain: &str, feedback: &str) -> ApiResult<Vec<String>>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Pick the backend named in `[generator]`
pub fn from_config(config: &GeneratorConfig) -> ApiResult<Box<dyn QuestionGenerator>> {
    match config.backend {
        GeneratorBackend::Template => Ok(Box::new(TemplateGenerator)),
        GeneratorBackend::Llama => Ok(Box::new(LlamaGenerator::new(config)?)),
    }
}

/// Prompt sent to the language model
pub fn build_prompt(domain: &str, feedback: &str) -> String {
    format!(
        "A user gave feedback in the domain: '{}'.\n\
         Feedback: \"{}\"\n\
         Generate 5-6 follow-up questions to better understand the user's experience and improve the service.\n\
         Format as a numbered list (e.g., 1. Question text).\n",
        domain, feedback
    )
}

/// Split model output into questions, dropping list numbering and blank lines
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
                .trim()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Template backend
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

const HEALTHCARE: &[&str] = &[
    "How easy was it to book an appointment with {domain} services?",
    "How long did you wait before being seen?",
    "How clearly did staff explain your diagnosis or treatment?",
    "Did you feel your concerns were listened to?",
    "How clean and comfortable were the facilities?",
    "What one change would most improve your {domain} experience?",
];

const EDUCATION: &[&str] = &[
    "How well did the course material match what you expected to learn?",
    "How approachable were the instructors when you needed help?",
    "Were the assignments and assessments fair?",
    "How useful were the learning resources provided?",
    "What would make your {domain} experience more engaging?",
];

const TECHNOLOGY: &[&str] = &[
    "Which feature do you use most often?",
    "Have you run into bugs or crashes? If so, when?",
    "How fast and responsive does the product feel?",
    "How easy was it to get started without help?",
    "Which missing feature would you most like to see?",
    "How likely are you to recommend this {domain} product to a colleague?",
];

const FINANCE: &[&str] = &[
    "How clear were the fees and charges explained to you?",
    "How confident do you feel that your money and data are secure?",
    "How quickly were your transactions or requests processed?",
    "How helpful was customer support with your {domain} questions?",
    "What would make managing your finances with us easier?",
];

const CUSTOMER_SATISFACTION: &[&str] = &[
    "What was the main reason for your rating?",
    "How well did we meet your expectations?",
    "How would you rate the friendliness of our staff?",
    "Was your issue resolved on the first contact?",
    "How likely are you to use our service again?",
    "What is one thing we should start doing?",
];

const GENERIC: &[&str] = &[
    "What did you like most about your {domain} experience?",
    "What was the most frustrating part of your {domain} experience?",
    "How does this compare with similar {domain} services you have used?",
    "What one improvement would make the biggest difference to you?",
    "How likely are you to recommend us to a friend?",
];

impl TemplateGenerator {
    fn templates(domain: &str) -> &'static [&'static str] {
        let domain = domain.to_lowercase();
        if domain.contains("health") || domain.contains("medical") || domain.contains("hospital") {
            HEALTHCARE
        } else if domain.contains("educat") || domain.contains("school") || domain.contains("course") {
            EDUCATION
        } else if domain.contains("tech") || domain.contains("software") || domain.contains("app") {
            TECHNOLOGY
        } else if domain.contains("financ") || domain.contains("bank") {
            FINANCE
        } else if domain.contains("customer") || domain.contains("satisfaction") || domain.contains("service") {
            CUSTOMER_SATISFACTION
        } else {
            GENERIC
        }
    }
}

#[async_trait]
impl QuestionGenerator for TemplateGenerator {
    async fn generate(&self, domain: &str, _feedback: &str) -> ApiResult<Vec<String>> {
        let domain = domain.trim();
        Ok(Self::templates(domain)
            .iter()
            .map(|t| t.replace("{domain}", domain))
            .collect())
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

// ============================================================================
// llama.cpp backend
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
    temperature: f32,
    stop: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
}

pub struct LlamaGenerator {
    client: reqwest::Client,
    url: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlamaGenerator {
    pub fn new(config: &GeneratorConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}/completion", config.endpoint.trim_end_matches('/')),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl QuestionGenerator for LlamaGenerator {
    async fn generate(&self, domain: &str, feedback: &str) -> ApiResult<Vec<String>> {
        let prompt = build_prompt(domain, feedback);
        let request = CompletionRequest {
            prompt: &prompt,
            n_predict: self.max_tokens,
            temperature: self.temperature,
            stop: ["\n\n"],
        };

        debug!(url = %self.url, "Requesting completion");
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApiError::Upstream(format!("Error generating questions: {}", e)))?;

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("Error generating questions: {}", e)))?;

        let questions = parse_numbered_list(completion.content.trim());
        info!(count = questions.len(), "Model returned questions");
        Ok(questions)
    }

    fn name(&self) -> &'static str {
        "llama"
    }
}
