use serde::de::DeserializeOwned;

/// Result of one strict parse attempt over model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    Failed(String),
}

impl<T> ParseOutcome<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Parsed(value) => Ok(value),
            Self::Failed(reason) => Err(reason),
        }
    }
}

/// Parses `raw` as a JSON object of type `T`.
///
/// Surrounding whitespace and a single Markdown code fence are tolerated;
/// anything else that `serde_json` rejects is a failure carrying the parser's
/// own message, which is what the repair prompt needs.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> ParseOutcome<T> {
    match serde_json::from_str::<T>(strip_code_fence(raw)) {
        Ok(value) => ParseOutcome::Parsed(value),
        Err(e) => ParseOutcome::Failed(e.to_string()),
    }
}

pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}
