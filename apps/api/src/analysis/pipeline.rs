//! Prompt → completion → parse. One model call per analysis, no retries.

use tracing::{debug, warn};

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::parser::parse_analysis;
use crate::analysis::prompts::{build_analysis_prompt, system_instruction};
use crate::errors::AppError;
use crate::llm_client::CompletionClient;

/// Runs one analysis against the given completion backend.
pub async fn run_analysis(
    llm: &dyn CompletionClient,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    let prompt = build_analysis_prompt(request);

    let raw_reply = llm
        .complete(&prompt, &system_instruction())
        .await
        .inspect_err(|e| warn!("Completion via {} failed: {e}", llm.model()))?;

    debug!("Model reply received: {} chars", raw_reply.len());

    parse_analysis(&raw_reply)
        .inspect_err(|_| warn!("Model reply was not decodable as an analysis"))
        .map_err(AppError::from)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{CompletionClient, LlmError};

    /// Completion backend that returns a canned reply and records the prompt it saw.
    pub struct StubCompletion {
        reply: Result<String, u16>,
        pub last_prompt: Mutex<Option<String>>,
    }

    impl StubCompletion {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                last_prompt: Mutex::new(None),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for StubCompletion {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "quota exceeded".to_string(),
                }),
            }
        }

        fn model(&self) -> &str {
            "stub"
        }
    }
}
