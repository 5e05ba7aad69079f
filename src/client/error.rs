use derive_more::Display;
use reqwest::StatusCode;
use serde_json::Value;

/// Failure talking to the remote API, classified by HTTP status only.
#[derive(Debug, Clone, Display, PartialEq)]
pub enum ApiError {
    #[display(fmt = "Your session has expired, please sign in again")]
    Unauthorized,
    #[display(fmt = "{}", _0)]
    Forbidden(String),
    #[display(fmt = "{}", message)]
    Status { status: u16, message: String },
    #[display(fmt = "Network error: {}", _0)]
    Network(String),
    #[display(fmt = "Unexpected response from server: {}", _0)]
    Decode(String),
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden(
                extract_message(body).unwrap_or_else(|| {
                    "You do not have permission to perform this action".to_string()
                }),
            ),
            _ => ApiError::Status {
                status: status.as_u16(),
                message: extract_message(body)
                    .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16())),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Best-effort human readable message from an error body.
///
/// Looks at `detail`, `error`, `message` and `non_field_errors` first, then
/// the first field error (`{"email": ["already taken"]}` becomes
/// `email: already taken`). Plain-text bodies are used as they are.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        // html error pages are not worth showing
        Err(_) if trimmed.starts_with('<') => return None,
        Err(_) => return Some(trimmed.to_string()),
    };

    match &value {
        Value::String(s) => return Some(s.clone()),
        Value::Array(items) => return items.iter().find_map(first_text),
        Value::Object(_) => {}
        _ => return None,
    }

    for key in ["detail", "error", "message", "non_field_errors"] {
        if let Some(text) = value.get(key).and_then(first_text) {
            return Some(text);
        }
    }

    value.as_object().and_then(|fields| {
        fields
            .iter()
            .find_map(|(field, v)| first_text(v).map(|text| format!("{field}: {text}")))
    })
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}
