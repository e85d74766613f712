//! Intake use-case handlers.

pub mod get_status;
pub mod start_intake;
pub mod submit_answers;
pub mod view;

pub use get_status::{GetIntakeStatusHandler, GetIntakeStatusQuery};
pub use start_intake::{StartIntakeCommand, StartIntakeHandler};
pub use submit_answers::{SubmitAnswersCommand, SubmitAnswersHandler};
pub use view::IntakeView;
