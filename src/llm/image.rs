use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;

/// Image generation capability: prompt in, raster bytes out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
}

/// Calls the OpenAI-compatible `images/generations` endpoint.
pub struct OpenAiImageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(config: &LlmConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.image_model.clone(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let url = format!("{}/images/generations", self.base_url);
        debug!("Requesting image from {} with model {}", url, self.model);

        let response: ImageGenerationResponse = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ImageGenerationRequest {
                model: &self.model,
                prompt,
                n: 1,
                response_format: "b64_json",
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let encoded = response
            .data
            .into_iter()
            .find_map(|image| image.b64_json)
            .ok_or_else(|| Error::llm("image generation returned no image data"))?;

        Ok(STANDARD.decode(encoded.trim())?)
    }
}
