pub mod models;

pub use models::{create_model, DummyModel, GeminiModel};

pub mod prelude {
    pub use super::models::create_model;
    pub use lens_core::{Error, GroundedModel, GroundedResponse, Result};
}
