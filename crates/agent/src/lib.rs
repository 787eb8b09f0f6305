//! Assistant boundary - deterministic question parsing and reply rendering
//!
//! This crate turns plain-English questions about UK property transaction
//! tax into calculator calls and renders the answers back as text:
//! - Extracts price, regions, and buyer category from free text (`intent`)
//! - Decides which calculation the question is asking for (`runtime`)
//! - Renders results and comparisons as readable replies (`reply`)
//!
//! # Safety Principle
//!
//! The parser is strictly a translator. It NEVER produces a tax figure of
//! its own; every number in a reply comes out of the `stampy-core`
//! calculator, and a question it cannot parse gets a clarification request
//! rather than a guess.

pub mod intent;
pub mod reply;
pub mod runtime;

pub use intent::{IntentExtractor, QueryIntent};
pub use runtime::{AgentReply, AgentRuntime, ReplyOutcome};
