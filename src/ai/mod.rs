//! AI tutoring assistant
//!
//! Prompt assembly is pure ([`prompts`], [`insights`]); the Gemini HTTP call
//! lives in [`gateway`]; [`stream`] re-frames the upstream SSE byte stream
//! for the browser.

pub mod gateway;
pub mod insights;
pub mod prompts;
pub mod stream;

pub use gateway::{AiError, GeminiClient, ModelTier};
pub use prompts::ConversationTurn;
