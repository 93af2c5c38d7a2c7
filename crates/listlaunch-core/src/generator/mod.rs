//! Text-generation boundary.
//!
//! Submission packs are written by an external model. This module defines
//! the [`TextGenerator`] trait every provider implements, plus the
//! OpenAI-backed implementation used in production.
//!
//! ```text
//! pack::generate_pack
//!     |
//!     v
//! &dyn TextGenerator --generate(GenerationRequest)--> raw text
//!                                                    (JSON, maybe wrapped in prose)
//! ```

pub mod openai;

use async_trait::async_trait;

pub use openai::{GeneratorConfig, OpenAiGenerator};

/// One prompt for the generator: a system instruction and a user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
}

/// Failure reported by a text-generation provider.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The request never produced an HTTP response, or the body could not be read.
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// The provider answered but produced no text.
    #[error("{provider} returned no output text")]
    EmptyOutput { provider: String },

    /// Any other provider-specific failure.
    #[error("{provider}: {message}")]
    Provider { provider: String, message: String },
}

/// A single-shot text generator: prompt in, raw text out.
///
/// Implementations make exactly one attempt per call. The trait is
/// object-safe so callers can hold `&dyn TextGenerator`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name used in logs and error messages.
    fn name(&self) -> &str;

    /// Generate text for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}

// Compile-time assertion: TextGenerator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn TextGenerator) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
            Ok(request.prompt.clone())
        }
    }

    #[tokio::test]
    async fn generator_is_object_safe() {
        let generator: Box<dyn TextGenerator> = Box::new(EchoGenerator);
        let request = GenerationRequest {
            system: "sys".to_string(),
            prompt: "hello".to_string(),
        };
        assert_eq!(generator.name(), "echo");
        assert_eq!(generator.generate(&request).await.unwrap(), "hello");
    }

    #[test]
    fn error_messages_name_the_provider() {
        let err = GeneratorError::Status {
            provider: "openai".to_string(),
            status: 429,
            body: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "openai returned HTTP 429: slow down");
    }
}
