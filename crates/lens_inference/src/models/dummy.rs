use std::fmt;

use async_trait::async_trait;
use lens_core::{GroundedModel, GroundedResponse, GroundingChunk, Result, WebSource};

/// Offline stand-in for the hosted model. Returns a fixed set of
/// citations shaped like real grounding output, including a homepage
/// link and a chunk without a web payload, so the extraction heuristics
/// are exercised end to end without the network.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

fn chunk(uri: &str, title: Option<&str>) -> GroundingChunk {
    GroundingChunk {
        web: Some(WebSource {
            uri: uri.to_string(),
            title: title.map(|t| t.to_string()),
        }),
    }
}

#[async_trait]
impl GroundedModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate_grounded(&self, _prompt: &str) -> Result<GroundedResponse> {
        Ok(GroundedResponse {
            text: "Here are the latest stories from Nepal's news portals.".to_string(),
            chunks: vec![
                chunk(
                    "https://ekantipur.com/news/2081/04/23/hydropower-output-rises.html",
                    Some("Hydropower output rises - Kantipur"),
                ),
                chunk(
                    "https://www.onlinekhabar.com/2081/04/melamchi-water-supply-resumes",
                    Some("Melamchi water supply resumes | OnlineKhabar"),
                ),
                chunk(
                    "https://www.setopati.com/politics/340129",
                    Some("Coalition talks continue in Kathmandu"),
                ),
                // Homepage link, dropped by the article predicate
                chunk("https://ratopati.com", Some("Ratopati")),
                chunk(
                    "https://myrepublica.nagariknetwork.com/news/tourism-arrivals-up?ref=search",
                    None,
                ),
                GroundingChunk { web: None },
                chunk(
                    "https://kathmandupost.com/money/2081/04/22/remittance-inflow-hits-record",
                    Some("Remittance inflow hits record - The Kathmandu Post"),
                ),
            ],
        })
    }
}
