use reqwest::Client;
use serde::Serialize;
use std::fmt;

use super::debug::{HttpDebugConfig, redact_json_text, redact_url, truncate_for_log};
use crate::trace::SessionTrace;

/// Thin wrapper over `reqwest::Client` that can mirror raw traffic to the
/// session trace and log a redacted copy to stderr when `--verbose` is on.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    debug: HttpDebugConfig,
    trace: Option<SessionTrace>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("debug", &self.debug)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseData {
    pub status: u16,
    pub body: String,
}

impl HttpClient {
    pub fn new(inner: Client, debug: HttpDebugConfig) -> Self {
        Self {
            inner,
            debug,
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: SessionTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        payload: &T,
    ) -> Result<HttpResponseData, reqwest::Error> {
        let body_json = serde_json::to_string(payload)
            .unwrap_or_else(|err| format!("{{\"_serialization_error\":\"{err}\"}}"));

        let request = self.inner.post(url).query(query).json(payload).build()?;
        if self.debug.enabled {
            for line in request_log_lines(self.debug, request.url(), &body_json) {
                eprintln!("{line}");
            }
        }
        if let Some(trace) = &self.trace {
            trace.log_http_request(request.method().as_str(), request.url().as_str(), &body_json);
        }

        let response = match self.inner.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                if let Some(trace) = &self.trace {
                    trace.log_http_error(&err.to_string());
                }
                return Err(err);
            }
        };
        let status = response.status().as_u16();
        let body = response.text().await?;

        if self.debug.enabled {
            for line in response_log_lines(self.debug, status, &body) {
                eprintln!("{line}");
            }
        }
        if let Some(trace) = &self.trace {
            trace.log_http_response(status, &body);
        }

        Ok(HttpResponseData { status, body })
    }
}

fn request_log_lines(debug: HttpDebugConfig, url: &reqwest::Url, body_json: &str) -> Vec<String> {
    let url = redact_url(url, debug.redact_secrets);
    let body = redact_json_text(body_json, debug.redact_secrets);
    let body = truncate_for_log(&body, debug.max_body_chars);

    let mut lines = vec![format!("[http-debug] > POST {url}")];
    append_body_lines(&mut lines, '>', &body);
    lines
}

fn response_log_lines(debug: HttpDebugConfig, status: u16, body: &str) -> Vec<String> {
    let body = redact_json_text(body, debug.redact_secrets);
    let body = truncate_for_log(&body, debug.max_body_chars);

    let mut lines = vec![format!("[http-debug] < HTTP {status}")];
    append_body_lines(&mut lines, '<', &body);
    lines
}

fn append_body_lines(lines: &mut Vec<String>, direction: char, body: &str) {
    if body.is_empty() {
        lines.push(format!("[http-debug] {direction} <empty body>"));
        return;
    }

    for line in body.lines() {
        lines.push(format!("[http-debug] {direction} {line}"));
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpClient, HttpResponseData, request_log_lines, response_log_lines};
    use crate::http::debug::HttpDebugConfig;
    use crate::trace::SessionTrace;
    use reqwest::{Client, Url};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn post_json_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/test"))
            .and(query_param("key", "super-secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_json(json!({"ok": true})),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(Client::new(), HttpDebugConfig::from_verbose(false));
        let response = client
            .post_json(
                &format!("{}/v1/test", server.uri()),
                &[("key", "super-secret")],
                &json!({"message": "hello"}),
            )
            .await
            .expect("request should succeed");

        assert_eq!(
            response,
            HttpResponseData {
                status: 200,
                body: "{\"ok\":true}".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn post_json_writes_full_raw_traffic_to_the_trace() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": 42})))
            .mount(&server)
            .await;

        let dir = tempdir().expect("tempdir");
        let trace = SessionTrace::create_in_temp_dir("test-session", dir.path()).expect("trace");
        let trace_path = trace.file_path().to_path_buf();

        let client = HttpClient::new(Client::new(), HttpDebugConfig::from_verbose(false))
            .with_trace(trace);
        let response = client
            .post_json(
                &format!("{}/v1/test", server.uri()),
                &[("key", "super-secret")],
                &json!({"token": "request-secret"}),
            )
            .await
            .expect("request should succeed");
        assert_eq!(response.status, 200);

        // The trace is deliberately unredacted; it is written 0o600.
        let trace_text = fs::read_to_string(trace_path).expect("read trace file");
        assert!(trace_text.contains("key=super-secret"));
        assert!(trace_text.contains("\"token\":\"request-secret\""));
        assert!(trace_text.contains("HTTP 200"));
        assert!(trace_text.contains("\"answer\":42"));
    }

    #[test]
    fn request_log_lines_redact_url_and_body() {
        let debug = HttpDebugConfig::from_verbose(true);
        let url = Url::parse("https://example.com/v1/test?key=secret&view=full").expect("url");

        let lines = request_log_lines(debug, &url, r#"{"token":"abc","message":"hello"}"#);
        let joined = lines.join("\n");
        assert!(joined.contains("[http-debug] > POST"));
        assert!(joined.contains("***REDACTED***"));
        assert!(joined.contains("view=full"));
        assert!(joined.contains("\"message\":\"hello\""));
        assert!(!joined.contains("secret"));
        assert!(!joined.contains("abc"));
    }

    #[test]
    fn response_log_lines_cover_status_and_each_body_line() {
        let debug = HttpDebugConfig::from_verbose(true);
        let lines = response_log_lines(debug, 401, "{\"error\":\"invalid\"}\n{\"hint\":\"retry\"}");
        assert_eq!(lines[0], "[http-debug] < HTTP 401");
        assert_eq!(lines[1], "[http-debug] < {\"error\":\"invalid\"}");
        assert_eq!(lines[2], "[http-debug] < {\"hint\":\"retry\"}");
    }

    #[test]
    fn empty_bodies_are_marked_explicitly() {
        let debug = HttpDebugConfig::from_verbose(true);
        let lines = response_log_lines(debug, 204, "");
        assert_eq!(lines[1], "[http-debug] < <empty body>");
    }
}
