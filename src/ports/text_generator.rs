//! Text-Generation Port - Interface for LLM provider integrations.
//!
//! This port abstracts all interactions with text-generation providers
//! (OpenAI, OpenRouter, etc.), enabling the intake loop to request
//! completions without coupling to a specific provider.
//!
//! # Design
//!
//! - A request optionally carries a JSON-Schema-like `ResponseSchema`; when
//!   present, the provider is expected to return content conforming to it
//! - The port is injected explicitly (`Arc<dyn TextGenerator>`), never held
//!   as ambient global state
//! - Non-streaming only; the intake loop consumes whole responses
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct MockGenerator;
//!
//! #[async_trait]
//! impl TextGenerator for MockGenerator {
//!     async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
//!         Ok(GenerationResponse::new("Hello!", "mock"))
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for text-generation provider interactions.
///
/// Implementations connect to external LLM services and translate between
/// the provider-specific API and our domain types.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a single completion for the given request.
    ///
    /// When the request carries a `ResponseSchema`, the returned content is
    /// expected to be a JSON document conforming to that schema; callers
    /// validate on receipt and treat a violation as a generation failure.
    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResponse, GenerationError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for text generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The full prompt to send.
    pub prompt: String,
    /// Optional schema the response must conform to.
    pub response_schema: Option<ResponseSchema>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Creates a new free-text generation request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the response schema, making this a structured request.
    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A JSON-Schema-like description of a structured response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Schema name (used by providers that label response formats).
    pub name: String,
    /// The schema body.
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    /// Creates a new response schema.
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Response from text generation.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Generated content. For structured requests this is a JSON document.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

impl GenerationResponse {
    /// Creates a new generation response.
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "openrouter").
    pub name: String,
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Text-generation provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response did not conform to the requested schema.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl GenerationError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a schema violation error.
    pub fn schema_violation(message: impl Into<String>) -> Self {
        Self::SchemaViolation(message.into())
    }

    /// Returns true if this error is transient and safe to retry at the
    /// adapter layer. The intake core itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}
