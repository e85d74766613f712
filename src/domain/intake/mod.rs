//! Intake Domain Module
//!
//! The bounded question/answer orchestration loop. One `IntakeState` per
//! session accumulates the initial description, clarifying questions, and
//! answers; controllers return deltas; the orchestrator applies them and
//! advances a four-state machine until it suspends for answers or
//! terminates with a final case description.
//!
//! # Architecture
//!
//! - **IntakeState / IntakeDelta**: persisted state and additive merges
//! - **QuestionRoundController**: decides per round whether to ask more
//!   questions, enforcing the iteration ceiling
//! - **FinalizationController**: synthesizes the final case description once
//! - **IntakeOrchestrator**: ties the two together and drives transitions

pub mod errors;
pub mod finalizer;
pub mod orchestrator;
pub mod prompts;
pub mod question_round;
pub mod state;

pub use errors::*;
pub use finalizer::*;
pub use orchestrator::*;
pub use question_round::*;
pub use state::*;
