//! Ports - boundary traits the domain depends on.
//!
//! Adapters implement these; the domain and application layers only ever see
//! the traits, injected as `Arc<dyn Trait>`.

mod session_store;
mod text_generator;

pub use session_store::{SessionStore, StoreError};
pub use text_generator::{
    GenerationError, GenerationRequest, GenerationResponse, ProviderInfo, ResponseSchema,
    TextGenerator,
};
