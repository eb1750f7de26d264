use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Malformed participant data: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "missing"),
            ApiError::NotFound(body) if body == "missing"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_other_client_errors_carry_status() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "login required");
        assert_eq!(err.to_string(), "Invalid response: Status 401 Unauthorized: login required");

        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, ApiError::InvalidResponse(msg) if msg.starts_with("Status 429")));
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "Not Found");
        assert_eq!(err.to_string(), "Resource not found: Not Found");

        let err = ApiError::from_status(StatusCode::IM_A_TEAPOT, "tea");
        assert_eq!(err.to_string(), "Invalid response: Status 418 I'm a teapot: tea");
    }

    #[test]
    fn test_truncate_body() {
        let short = "x".repeat(MAX_ERROR_BODY_LENGTH);
        assert_eq!(ApiError::truncate_body(&short), short);

        let long = "y".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"y".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with("(truncated, 520 total bytes)"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // Each 'é' is two bytes, so byte 500 falls mid-character for an odd offset
        let body = format!("a{}", "é".repeat(MAX_ERROR_BODY_LENGTH));
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.contains("... (truncated"));
    }
}
