use super::types::{ErrorResponse, FromTextRequest, TextQuery};
use crate::{
    Error,
    chef::{Chef, IngredientQuery, ResultBundle},
    llm::ImagePayload,
};
use axum::{
    body::Bytes,
    extract::{
        Multipart, Query, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub const KEEP_ALIVE_MESSAGE: &str = "Successfully activated the PocketChef API!";

#[derive(Clone)]
pub struct AppState {
    pub chef: Arc<Chef>,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn from_text(
    State(state): State<AppState>,
    query: Result<Query<TextQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ResultBundle>, HandlerError> {
    let Query(query) = query.map_err(|e| rejection(e.status(), e.body_text()))?;
    let body = body.map_err(|e| rejection(e.status(), e.body_text()))?;

    let (text, recipe_history) = text_request(query, &body).map_err(error_response)?;

    info!(
        "Received text request ({} history entries)",
        recipe_history.len()
    );

    let bundle = state
        .chef
        .cook(IngredientQuery::Text(text), &recipe_history)
        .await
        .map_err(error_response)?;

    info!("Returning recipe '{}'", bundle.recipe.name);
    Ok(Json(bundle))
}

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn from_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultBundle>, HandlerError> {
    let mut multipart = multipart.map_err(|e| rejection(e.status(), e.body_text()))?;
    let (image, recipe_history) = read_upload(&mut multipart).await?;

    info!(
        "Received {} image of {} bytes ({} history entries)",
        image.mime_type,
        image.bytes.len(),
        recipe_history.len()
    );

    let bundle = state
        .chef
        .cook(IngredientQuery::Image(image), &recipe_history)
        .await
        .map_err(error_response)?;

    info!("Returning recipe '{}'", bundle.recipe.name);
    Ok(Json(bundle))
}

pub async fn keep_alive() -> Json<&'static str> {
    info!("{}", KEEP_ALIVE_MESSAGE);
    Json(KEEP_ALIVE_MESSAGE)
}

/// Reads the `file` part and any `recipe_history` parts.
async fn read_upload(
    multipart: &mut Multipart,
) -> Result<(ImagePayload, Vec<String>), HandlerError> {
    let mut image = None;
    let mut recipe_history = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                let payload = ImagePayload::new(bytes.to_vec(), content_type.as_deref())
                    .map_err(error_response)?;
                image = Some(payload);
            }
            Some("recipe_history") => {
                let value = field.text().await.map_err(multipart_error)?;
                recipe_history.extend(parse_history_field(&value));
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let image = image.ok_or_else(|| {
        error_response(Error::invalid_input("multipart body has no 'file' part"))
    })?;

    Ok((image, recipe_history))
}

/// Resolves ingredient text and history for a text request.
///
/// The body is either `{"text": .., "recipe_history": [..]}` or a bare JSON
/// array of history names, with `text` then taken from the query string. An
/// empty body is allowed. A `text` in the query wins over one in the body.
pub fn text_request(query: TextQuery, body: &[u8]) -> crate::Result<(String, Vec<String>)> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        FromTextRequest::default()
    } else {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::invalid_input(format!("request body is not valid JSON: {e}")))?;

        match value {
            Value::Object(_) => serde_json::from_value::<FromTextRequest>(value)
                .map_err(|e| Error::invalid_input(format!("invalid request body: {e}")))?,
            Value::Array(_) => FromTextRequest {
                text: None,
                recipe_history: serde_json::from_value(value).map_err(|_| {
                    Error::invalid_input("recipe_history must be a list of recipe names")
                })?,
            },
            Value::Null => FromTextRequest::default(),
            _ => {
                return Err(Error::invalid_input(
                    "request body must be a JSON object or a list of recipe names",
                ));
            }
        }
    };

    let text = query
        .text
        .or(body.text)
        .map(|text| text.trim().to_string())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(Error::invalid_input(
            "text must list at least one ingredient",
        ));
    }

    Ok((text, clean_history(body.recipe_history)))
}

/// A history part holds either one recipe name or a JSON array of names.
pub fn parse_history_field(value: &str) -> Vec<String> {
    let value = value.trim();

    if value.starts_with('[') {
        if let Ok(names) = serde_json::from_str::<Vec<String>>(value) {
            return clean_history(names);
        }
    }

    if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}

fn clean_history(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn multipart_error(e: MultipartError) -> HandlerError {
    warn!("Multipart read error: {}", e);
    rejection(e.status(), format!("Failed to read upload: {}", e.body_text()))
}

/// Wraps an extractor rejection in the usual error body.
fn rejection(status: StatusCode, message: String) -> HandlerError {
    warn!("Rejected request ({}): {}", status, message);
    (status, Json(ErrorResponse { error: message }))
}

pub fn error_response(e: Error) -> HandlerError {
    let status = match &e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("Request failed: {}", e);
    } else {
        warn!("Rejected request: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
