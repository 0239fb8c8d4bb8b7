use async_trait::async_trait;

use crate::types::GroundedResponse;
use crate::Result;

/// A hosted generative model queried with web-search grounding enabled.
/// Prompt in, answer text plus ordered citations out; no retries, no
/// pagination.
#[async_trait]
pub trait GroundedModel: Send + Sync {
    /// Returns the name of the model backend
    fn name(&self) -> &str;

    /// Run one grounded generation for the given prompt
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedResponse>;
}
