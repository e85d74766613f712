//! HTTP adapters - REST API implementations.

pub mod intake;

pub use intake::{intake_routes, IntakeHandlers};
