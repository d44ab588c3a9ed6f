use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::response::ERROR_CODE_HEADER;

/// Log every request together with the outcome code the handler packed
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = %sanitize_query(&query),
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();
    let outcome = outcome_code(&response);

    match outcome {
        Some(code) if code != 0 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = %status.as_u16(),
                code = code,
                duration_ms = %duration.as_millis(),
                "Request completed with error outcome"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = %status.as_u16(),
                duration_ms = %duration.as_millis(),
                "Request completed"
            );
        }
    }

    response
}

fn outcome_code(response: &Response) -> Option<i16> {
    response
        .headers()
        .get(ERROR_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Mask credentials that end up in query strings
fn sanitize_query(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut result = query.to_string();
    for (key, replacement) in [
        ("token", "token=***"),
        ("password", "password=***"),
        ("secret", "secret=***"),
    ] {
        let pattern = format!("{}=", key);
        if let Some(start) = result.find(&pattern) {
            let value_start = start + pattern.len();
            let value_end = result[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result.replace_range(start..value_end, replacement);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_sanitize_query() {
        assert_eq!(sanitize_query(""), "");
        assert_eq!(sanitize_query("name=ann"), "name=ann");
        assert_eq!(sanitize_query("token=abc123"), "token=***");
        assert_eq!(
            sanitize_query("name=ann&password=hunter2&x=1"),
            "name=ann&password=***&x=1"
        );
    }

    #[test]
    fn test_outcome_code() {
        let response = Response::builder()
            .header(ERROR_CODE_HEADER, "102")
            .body(Body::empty())
            .unwrap();
        assert_eq!(outcome_code(&response), Some(102));

        let bare = Response::new(Body::empty());
        assert_eq!(outcome_code(&bare), None);
    }
}
