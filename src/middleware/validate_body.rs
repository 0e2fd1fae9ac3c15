use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::config::config;
use crate::error::ApiError;
use crate::validation::{validation_handler, ValidationChain};

/// Sanitized request body that passed the route's validation chain
#[derive(Clone, Debug)]
pub struct ValidatedBody(pub Map<String, Value>);

/// Runs `chain` over the request body before the route handler. A failing body ends the
/// request with 400 and every field error; a passing one is handed on as [`ValidatedBody`].
pub async fn validate_body_middleware(
    State(chain): State<&'static ValidationChain>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let kind = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(BodyKind::from_content_type)
        .unwrap_or(BodyKind::Other);

    let bytes = to_bytes(body, config().api.max_request_size_bytes)
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {}", e)))?;

    // Bodies of any other type are left unparsed and validate as `{}`
    let fields = match kind {
        BodyKind::Json => parse_json(&bytes)?,
        BodyKind::Form => parse_form(&bytes),
        BodyKind::Other => Map::new(),
    };

    let sanitized = validation_handler(chain.run(&fields))?;
    parts.extensions.insert(ValidatedBody(sanitized));

    Ok(next.run(Request::from_parts(parts, Body::empty())).await)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn from_content_type(content_type: &str) -> Self {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence == "application/x-www-form-urlencoded" {
            BodyKind::Form
        } else if essence == "application/json" || essence.ends_with("+json") {
            BodyKind::Json
        } else {
            BodyKind::Other
        }
    }
}

fn parse_json(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::invalid_json("Request body must be a JSON object")),
        Err(e) => Err(ApiError::invalid_json(format!("Invalid JSON body: {}", e))),
    }
}

/// Last value wins for repeated keys
fn parse_form(bytes: &[u8]) -> Map<String, Value> {
    url::form_urlencoded::parse(bytes)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}
