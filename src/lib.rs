//! Kling Prompt — compresses cinematic scene text into structured prompts.
//!
//! Extracts visual attributes (character, props, setting, lighting, camera,
//! mood, style) from free-form prose by controlled-vocabulary matching, and
//! reassembles them into short, capped, labeled sections that a video
//! generation model with a tight prompt budget can follow.

pub mod core;
pub mod schema;

pub use crate::core::pipeline::{PipelineError, PromptOutput, PromptPerfecter, PromptRequest};
pub use crate::schema::options::PromptOptions;
