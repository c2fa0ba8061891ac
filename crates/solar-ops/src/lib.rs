//! Core engines and service facades for the solar sales platform.
//!
//! The two deterministic engines — lead qualification and proposal
//! calculation — live under [`workflows`] together with the repositories,
//! provider seams, and HTTP routers that expose them. Persistence and
//! transport adapters are supplied by the binary crate.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
