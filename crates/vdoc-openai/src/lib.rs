//! OpenAI REST client for documentary generation.
//!
//! Three call shapes: a multimodal chat completion that turns ordered
//! video frames into a narrative, a text-only completion that titles
//! it, and a text-to-speech call that voices it. Chat completions are
//! only accepted when the model reports a normal stop condition.

pub mod client;
pub mod error;
pub mod types;

pub use client::{OpenAiClient, OpenAiConfig};
pub use error::{OpenAiError, OpenAiResult};
