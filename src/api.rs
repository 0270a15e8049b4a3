// api.rs — Client for the remote feature-extraction endpoint.
//
// One POST per run, no retry. Failures are classified into four groups
// (HTTP status, connection, timeout, everything else); each group gets its
// own log line before the error is handed back to the caller.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("status {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Request(String),
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    inputs: &'a [String],
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

pub fn feature_extraction_url(model_id: &str) -> String {
    format!("{}/{}", config::api::INFERENCE_BASE_URL, model_id)
}

/// Send the input batch to the inference API and return the parsed JSON
/// response. The response shape is the server's business; no validation
/// happens here.
pub fn run_feature_extraction(
    model_id: &str,
    hf_token: &str,
    texts: &[String],
) -> Result<Value, ApiError> {
    request_embeddings(&feature_extraction_url(model_id), hf_token, texts)
}

/// POST `texts` to `api_url`. `wait_for_model` asks the server to block
/// while the model is still loading instead of answering 503.
///
/// No timeout override is applied: the client library's defaults decide how
/// long we wait, so a stalled remote host stalls the whole run.
pub fn request_embeddings(
    api_url: &str,
    hf_token: &str,
    texts: &[String],
) -> Result<Value, ApiError> {
    let payload = EmbeddingRequest {
        inputs: texts,
        options: RequestOptions { wait_for_model: true },
    };

    log::debug!("POST {} ({} inputs)", api_url, texts.len());

    let response = ureq::post(api_url)
        .set("Authorization", &format!("Bearer {hf_token}"))
        .set("Content-Type", "application/json")
        .send_json(&payload)
        .map_err(|e| {
            let classified = classify(api_url, e);
            log_api_error(&classified);
            classified
        })?;

    response.into_json::<Value>().map_err(|e| {
        let classified = ApiError::Request(format!("failed to parse response body: {e}"));
        log_api_error(&classified);
        classified
    })
}

fn classify(url: &str, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::Status {
                status,
                url: url.to_string(),
                body: truncate_chars(&body, config::api::ERROR_BODY_MAX_CHARS),
            }
        }
        ureq::Error::Transport(t) => match t.kind() {
            ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed => {
                ApiError::Connection(t.to_string())
            }
            ureq::ErrorKind::Io if io_timed_out(&t) => ApiError::Timeout(t.to_string()),
            _ => ApiError::Request(t.to_string()),
        },
    }
}

// Timeouts surface as io errors somewhere down the source chain.
fn io_timed_out(t: &ureq::Transport) -> bool {
    let mut source = std::error::Error::source(t);
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            );
        }
        source = err.source();
    }
    false
}

fn log_api_error(err: &ApiError) {
    match err {
        ApiError::Status { .. } => log::error!("HTTP Error: {err}"),
        ApiError::Connection(_) => log::error!("Error Connecting: {err}"),
        ApiError::Timeout(_) => log::error!("Timeout Error: {err}"),
        ApiError::Request(_) => log::error!("Request Exception: {err}"),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Minimal one-shot HTTP server: answers the first connection with a
    /// canned response, then goes away.
    fn serve_once(raw_response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                // Drain at least the request head before answering.
                let mut request = Vec::new();
                let mut chunk = [0u8; 4096];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }
                let _ = stream.write_all(raw_response);
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_request_body_shape() {
        let inputs = vec!["a".to_string(), "b".to_string()];
        let payload = EmbeddingRequest {
            inputs: &inputs,
            options: RequestOptions { wait_for_model: true },
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"inputs": ["a", "b"], "options": {"wait_for_model": true}})
        );
    }

    #[test]
    fn test_feature_extraction_url() {
        assert_eq!(
            feature_extraction_url("sentence-transformers/all-MiniLM-L6-v2"),
            "https://api-inference.huggingface.co/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2"
        );
    }

    #[test]
    fn test_success_returns_parsed_json() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 11\r\nconnection: close\r\n\r\n[[1.0,2.0]]",
        );
        let value = request_embeddings(&url, "token", &["hi".to_string()]).unwrap();
        assert_eq!(value, serde_json::json!([[1.0, 2.0]]));
    }

    #[test]
    fn test_server_error_is_classified_as_status() {
        let url = serve_once(
            b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 5\r\nconnection: close\r\n\r\noops!",
        );
        let err = request_embeddings(&url, "token", &["hi".to_string()]).unwrap_err();
        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops!");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_unreachable_host_is_classified_as_connection() {
        // Bind then drop, so nothing listens on the port.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = request_embeddings(&format!("http://{addr}"), "token", &[]).unwrap_err();
        assert!(matches!(err, ApiError::Connection(_)), "got {err:?}");
    }

    #[test]
    fn test_error_body_is_truncated() {
        let long = "x".repeat(config::api::ERROR_BODY_MAX_CHARS + 50);
        assert_eq!(
            truncate_chars(&long, config::api::ERROR_BODY_MAX_CHARS).len(),
            config::api::ERROR_BODY_MAX_CHARS
        );
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
