//! Case Sherpa - Conversational Legal Intake Assistant
//!
//! This crate implements a bounded question/answer intake loop: a client
//! describes a legal situation, a text-generation provider asks clarifying
//! questions round by round, and a finalization step synthesizes the
//! collected answers into a lawyer-ready case description.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
