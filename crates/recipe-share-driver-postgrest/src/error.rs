use recipe_share_core::Error;

use reqwest::StatusCode;
use serde::Deserialize;

/// The relationship named in `select` is not in the schema cache.
pub const JOIN_UNAVAILABLE: &str = "PGRST200";

/// A single-object read matched zero or several rows.
pub const NOT_SINGULAR: &str = "PGRST116";

/// Error body PostgREST sends with every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
    details: Option<String>,
}

/// Maps a failed response to a store error.
pub(crate) fn from_response(status: StatusCode, body: &str) -> Error {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body.trim().to_string()
        };
        return Error::store(status.as_str(), message);
    };

    let code = parsed.code.unwrap_or_else(|| status.as_str().to_string());
    let message = match &parsed.details {
        Some(details) if !details.is_empty() => format!("{}; {details}", parsed.message),
        _ => parsed.message,
    };

    match code.as_str() {
        JOIN_UNAVAILABLE => Error::join_unavailable(code, message),
        NOT_SINGULAR if is_zero_rows(parsed.details.as_deref()) => Error::record_not_found(message),
        NOT_SINGULAR => Error::invalid_result(message),
        _ => Error::store(code, message),
    }
}

fn is_zero_rows(details: Option<&str>) -> bool {
    details.is_some_and(|details| details.contains(" 0 rows"))
}
