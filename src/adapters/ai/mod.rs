//! AI adapters - implementations of the TextGenerator port.

pub mod mock_provider;
pub mod openai_provider;

pub use mock_provider::{MockError, MockOutcome, MockTextGenerator};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
