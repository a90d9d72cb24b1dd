use serde::{Deserialize, Serialize};

/// A recipe as produced by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeRecord {
    #[serde(rename = "recipe_name")]
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Instructions,
}

/// Models return either one Markdown block or a list of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Text(String),
    Steps(Vec<String>),
}

impl Instructions {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Steps(steps) => steps.iter().all(|s| s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThumbnailDescription {
    pub dish_name: String,
    pub visual_cues: String,
}
