use crate::{llm::ImagePayload, recipe::RecipeRecord};
use serde::Serialize;

/// What the caller gave us to cook with.
#[derive(Debug, Clone)]
pub enum IngredientQuery {
    Text(String),
    Image(ImagePayload),
}

/// Everything returned for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    pub recipe: RecipeRecord,
    pub images: Vec<String>,
    #[serde(rename = "yt_videos")]
    pub videos: Vec<String>,
    /// Generated illustration, base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}
