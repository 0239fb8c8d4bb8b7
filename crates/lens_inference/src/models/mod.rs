use std::sync::Arc;

use lens_core::{GroundedModel, Result};

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Build a grounded model by backend name. `dummy` needs no credentials;
/// `gemini` requires an API key.
pub fn create_model(name: &str, api_key: Option<String>) -> Result<Arc<dyn GroundedModel>> {
    match name {
        "dummy" => Ok(Arc::new(DummyModel)),
        "gemini" => Ok(Arc::new(GeminiModel::new(api_key)?)),
        other => Err(lens_core::Error::Inference(format!(
            "Unknown model backend: {}",
            other
        ))),
    }
}
