//! Question Round Controller.
//!
//! Decides, once per round, whether more clarifying questions are needed.
//! Enforces the iteration ceiling as a hard termination guarantee: when the
//! incremented round count reaches the ceiling, readiness is forced without
//! consulting the provider at all.
//!
//! The controller is pure with respect to the session: it reads the state,
//! optionally calls the Text-Generation Port, and returns a delta. Failures
//! from the port are carried in the delta's `error` field; the orchestrator
//! never retries a failed round.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::ports::{GenerationRequest, ResponseSchema, TextGenerator};

use super::prompts;
use super::state::{IntakeDelta, IntakeState};

/// Default maximum number of question rounds before forced finalization.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

/// Structured response expected from a question round.
///
/// All fields are required; a missing or mistyped field fails
/// deserialization and the round is treated as a generation failure,
/// never silently defaulted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionBatch {
    /// Why these questions are being asked.
    pub reasoning: String,
    /// 1-3 new questions (length is expected, not enforced).
    pub questions: Vec<String>,
    /// True when enough information exists to finalize.
    pub is_complete: bool,
}

impl QuestionBatch {
    /// Parses a batch from the provider's JSON content.
    pub fn parse(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// The JSON-Schema description sent alongside structured requests.
    pub fn response_schema() -> ResponseSchema {
        ResponseSchema::new(
            "question_batch",
            json!({
                "type": "object",
                "properties": {
                    "reasoning": {
                        "type": "string",
                        "description": "Brief explanation of why these questions are being asked"
                    },
                    "questions": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "1-3 specific, relevant questions for the client"
                    },
                    "is_complete": {
                        "type": "boolean",
                        "description": "True if enough information exists to write the final case description"
                    }
                },
                "required": ["reasoning", "questions", "is_complete"],
                "additionalProperties": false
            }),
        )
    }
}

/// Controller for one clarifying-question round.
pub struct QuestionRoundController {
    generator: Arc<dyn TextGenerator>,
    max_rounds: u32,
    temperature: f32,
}

impl QuestionRoundController {
    /// Creates a controller with the given ceiling.
    pub fn new(generator: Arc<dyn TextGenerator>, max_rounds: u32, temperature: f32) -> Self {
        Self {
            generator,
            max_rounds,
            temperature,
        }
    }

    /// Runs one question round against the current state.
    ///
    /// Returns an empty delta if the session is already ready or complete.
    /// Returns a forced-ready delta without a port call once the incremented
    /// round count reaches the ceiling. Otherwise asks the provider for a
    /// `QuestionBatch` and merges its questions in.
    pub async fn generate_round(&self, state: &IntakeState) -> IntakeDelta {
        if state.is_ready || state.is_complete {
            return IntakeDelta::empty();
        }

        let iteration = state.iteration_count + 1;
        if iteration >= self.max_rounds {
            info!(iteration, "iteration ceiling reached, forcing readiness");
            return IntakeDelta {
                is_ready: Some(true),
                iteration_count: Some(iteration),
                ..Default::default()
            };
        }

        let request = GenerationRequest::new(prompts::question_round_prompt(state))
            .with_schema(QuestionBatch::response_schema())
            .with_temperature(self.temperature);

        let response = match self.generator.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(iteration, error = %e, "question generation failed");
                return IntakeDelta::from_error(format!("question generation failed: {}", e))
                    .with_iteration_count(iteration);
            }
        };

        let batch = match QuestionBatch::parse(&response.content) {
            Ok(batch) => batch,
            Err(e) => {
                warn!(iteration, error = %e, "question batch failed schema validation");
                return IntakeDelta::from_error(format!("question generation failed: {}", e))
                    .with_iteration_count(iteration);
            }
        };

        if batch.is_complete {
            info!(iteration, "questions complete, session ready to finalize");
        } else {
            info!(iteration, count = batch.questions.len(), "asking more questions");
        }

        IntakeDelta {
            questions: batch.questions,
            iteration_count: Some(iteration),
            is_ready: Some(batch.is_complete),
            // only finalization may complete a session
            is_complete: Some(false),
            ..Default::default()
        }
    }

    /// The configured iteration ceiling.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }
}
