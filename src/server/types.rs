use serde::{Deserialize, Serialize};

/// Query string of a text request: `?text=potato, onion`.
#[derive(Debug, Default, Deserialize)]
pub struct TextQuery {
    pub text: Option<String>,
}

/// Object form of a text request body.
#[derive(Debug, Default, Deserialize)]
pub struct FromTextRequest {
    pub text: Option<String>,
    /// Recipes the user already knows; the model is asked to avoid them.
    #[serde(default)]
    pub recipe_history: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
