use crate::errors::AppError;
use serde_json::Value;

/// Check a partial-update body before it is forwarded: a non-empty JSON object
/// whose keys are all in `allowed` and whose values are scalars.
pub fn validate_patch(payload: &Value, allowed: &[&str]) -> Result<(), AppError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Payload must be a JSON object".into()))?;

    if obj.is_empty() {
        return Err(AppError::BadRequest("No fields provided for update".into()));
    }

    for (key, value) in obj {
        if !allowed.contains(&key.as_str()) {
            return Err(AppError::BadRequest(format!("Field `{key}` cannot be updated")));
        }
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Unsupported value for `{key}`"
                )));
            }
        }
    }

    Ok(())
}
