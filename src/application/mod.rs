//! Application layer - use-case orchestration over domain and ports.

pub mod handlers;
pub mod session_locks;

pub use session_locks::SessionLocks;
