//! Domain layer - pure business logic with no I/O dependencies.

pub mod foundation;
pub mod intake;
