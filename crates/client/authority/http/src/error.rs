//! Mapping of HTTP failures onto [`AuthorityError`].
use runtime::AuthorityError;
use serde_json::Value;

/// Failures constructing an [`crate::HttpAuthority`].
#[derive(Debug, thiserror::Error)]
pub enum HttpAuthorityError {
    #[error("invalid API base URL {url:?}")]
    InvalidBaseUrl { url: String },

    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

/// Classify a non-success response.
///
/// A 400 whose detail mentions the game being over is the reconciliation
/// signal; the engine refetches state instead of reporting it.
pub fn classify_failure(status: u16, body: &str) -> AuthorityError {
    let detail = extract_detail(body);
    match status {
        401 | 403 => AuthorityError::Unauthorized,
        400 if detail.to_lowercase().contains("over") => AuthorityError::GameOver(detail),
        500..=599 => AuthorityError::Server { status, detail },
        _ => AuthorityError::Rejected { status, detail },
    }
}

/// Human readable `detail` from an error body.
///
/// Plain string details are returned as is; validation error lists are
/// flattened to their messages.
pub fn extract_detail(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    match parsed.as_ref().and_then(|value| value.get("detail")) {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Value::Array(items.clone()).to_string()
            } else {
                messages.join("; ")
            }
        }
        Some(other) => other.to_string(),
        None if body.trim().is_empty() => "no details".to_string(),
        None => body.trim().to_string(),
    }
}

pub(crate) fn network(error: reqwest::Error) -> AuthorityError {
    AuthorityError::Network(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_detail_is_reconciliation_signal() {
        let error = classify_failure(
            400,
            r#"{"detail":"User has no more questions left or game is over!"}"#,
        );
        assert!(error.is_reconciliation_signal());
    }

    #[test]
    fn other_bad_requests_are_visible() {
        let error = classify_failure(400, r#"{"detail":"Question is empty"}"#);
        assert_eq!(
            error,
            AuthorityError::Rejected {
                status: 400,
                detail: "Question is empty".into()
            }
        );
        assert!(error.is_user_visible());
    }

    #[test]
    fn validation_lists_are_flattened() {
        let body = r#"{"detail":[{"loc":["body","question"],"msg":"String should have at most 50 characters","type":"string_too_long"}]}"#;
        match classify_failure(422, body) {
            AuthorityError::Rejected { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail, "String should have at most 50 characters");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn auth_and_server_statuses() {
        assert_eq!(classify_failure(401, ""), AuthorityError::Unauthorized);
        assert_eq!(
            classify_failure(502, "Bad Gateway"),
            AuthorityError::Server {
                status: 502,
                detail: "Bad Gateway".into()
            }
        );
        assert_eq!(extract_detail(""), "no details");
    }
}
