//! External completion service integration
//!
//! - `client`: OpenAI-compatible chat completion client
//! - `prompt`: race summaries and instruction templates
//! - `decoder`: best-effort extraction of structured picks from reply text

pub mod client;
pub mod decoder;
pub mod prompt;

pub use client::{AiError, CompletionClient, CompletionRequest, CompletionService};
pub use decoder::{decode_prediction, json_blocks, AiPick, DecodedReply};
pub use prompt::{build_insight_prompt, build_prediction_prompt, summarize_horses};
