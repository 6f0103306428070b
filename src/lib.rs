//! Study Gate - usage quotas and admission control for AI study tooling.
//!
//! Decides, before any call to the generative-AI backend is made, whether a
//! subscriber may perform an action (create a study guide, chat, run a web
//! lookup, ingest a video, derive a quiz or flashcards) and estimates how many
//! tokens the action will cost.
//!
//! # Layers
//!
//! - `domain` - plan catalog, usage counters and the pure admission engine
//! - `ports` - contracts for usage persistence, plan resolution and rate limiting
//! - `adapters` - in-memory implementations of the ports
//! - `application` - handlers that wire ports and engine together
//! - `config` - environment/file driven configuration and logging setup
//!
//! # Concurrency
//!
//! The engine only reads a [`domain::usage::UsageSnapshot`]. Two actions admitted
//! concurrently against the same stale snapshot can both pass and together
//! overspend the period budget until the next snapshot read reflects both
//! writes. Estimates are always rounded up, which bounds but does not remove
//! this over-admission. Stores should serialize increments per subscriber.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
