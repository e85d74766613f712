//! Storage adapters - implementations of the SessionStore port.

pub mod in_memory_store;
pub mod postgres_store;

pub use in_memory_store::InMemorySessionStore;
pub use postgres_store::PostgresSessionStore;
