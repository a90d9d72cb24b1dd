use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// An uploaded picture of ingredients, held in memory for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    /// Builds a payload from upload bytes and the part's declared content type.
    pub fn new(bytes: Vec<u8>, mime_type: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::invalid_input("uploaded image is empty"));
        }

        let mime_type = match mime_type.map(str::trim).filter(|m| !m.is_empty()) {
            None | Some("application/octet-stream") => DEFAULT_IMAGE_MIME.to_string(),
            Some(m) if m.starts_with("image/") => m.to_string(),
            Some(other) => {
                return Err(Error::invalid_input(format!(
                    "expected an image upload, got content type '{}'",
                    other
                )));
            }
        };

        Ok(Self { bytes, mime_type })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageGenerationRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub n: u8,
    pub response_format: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedImage {
    #[serde(default)]
    pub b64_json: Option<String>,
}
