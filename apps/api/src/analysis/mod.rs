// Resume analysis: prompt construction, the model call, and recovery of a typed
// result from the model's free-text reply. All model calls go through
// llm_client; nothing here talks to the Gemini API directly.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod report;
