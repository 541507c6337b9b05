use std::time::Duration;
use log::{debug, error};
use serde_json::Value;
use thiserror::Error;

/// Error types that can occur when interacting with HTTP clients
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("HTTP request error: {0}")]
    RequestError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Empty response from server")]
    EmptyResponse,
}

/// A trait for HTTP client implementations
/// This version avoids generic methods to enable dynamic dispatch
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Send a GET request with additional headers
    fn get_with_headers(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, HttpClientError>;

    /// Send a form-encoded POST request and parse the JSON response
    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Value, HttpClientError>;

    /// Send a GET request
    fn get(&self, url: &str) -> Result<String, HttpClientError> {
        self.get_with_headers(url, &[])
    }

    /// Clone the client as a boxed trait object
    fn clone_box(&self) -> Box<dyn HttpClient>;
}

/// Send a GET request and parse the body as JSON
pub fn get_json(
    client: &dyn HttpClient,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<Value, HttpClientError> {
    let text = client.get_with_headers(url, headers)?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Value, HttpClientError> {
    if text.trim().is_empty() {
        return Err(HttpClientError::EmptyResponse);
    }
    serde_json::from_str::<Value>(text).map_err(|e| {
        error!("Failed to parse JSON response: {}", e);
        debug!("Response text: {}", text);
        HttpClientError::ParseError(e.to_string())
    })
}

impl Clone for Box<dyn HttpClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An HTTP client implementation using ureq
#[derive(Clone, Debug)]
pub struct UreqHttpClient {
    timeout: Duration,
}

impl UreqHttpClient {
    /// Create a new HTTP client with the specified timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for UreqHttpClient {
    /// HTTP client with the default timeout (10 seconds)
    fn default() -> Self {
        Self::new(10)
    }
}

fn map_ureq_error(e: ureq::Error) -> HttpClientError {
    match e {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            if code >= 500 {
                HttpClientError::ServerError(format!("HTTP {}: {}", code, body))
            } else {
                HttpClientError::RequestError(format!("HTTP {}: {}", code, body))
            }
        }
        ureq::Error::Transport(transport) => HttpClientError::RequestError(transport.to_string()),
    }
}

impl HttpClient for UreqHttpClient {
    fn get_with_headers(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, HttpClientError> {
        debug!("GET request to {}", url);

        let mut request = ureq::get(url).timeout(self.timeout);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = match request.call() {
            Ok(resp) => resp,
            Err(e) => {
                error!("GET request failed: {}", e);
                return Err(map_ureq_error(e));
            }
        };

        match response.into_string() {
            Ok(text) => Ok(text),
            Err(e) => {
                error!("Failed to read response body: {}", e);
                Err(HttpClientError::ParseError(format!("Failed to read response body: {}", e)))
            }
        }
    }

    fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Value, HttpClientError> {
        debug!("POST form request to {}", url);

        let response = match ureq::post(url).timeout(self.timeout).send_form(fields) {
            Ok(resp) => resp,
            Err(e) => {
                error!("POST request failed: {}", e);
                return Err(map_ureq_error(e));
            }
        };

        let response_text = match response.into_string() {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read response body: {}", e);
                return Err(HttpClientError::ParseError(format!("Failed to read response body: {}", e)));
            }
        };

        parse_json(&response_text)
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

/// Create a new HTTP client using the default implementation
pub fn new_http_client(timeout_secs: u64) -> Box<dyn HttpClient> {
    Box::new(UreqHttpClient::new(timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct CannedClient {
        body: String,
    }

    impl HttpClient for CannedClient {
        fn get_with_headers(&self, _url: &str, _headers: &[(&str, &str)]) -> Result<String, HttpClientError> {
            Ok(self.body.clone())
        }

        fn post_form(&self, _url: &str, _fields: &[(&str, &str)]) -> Result<Value, HttpClientError> {
            parse_json(&self.body)
        }

        fn clone_box(&self) -> Box<dyn HttpClient> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_get_json() {
        let client = CannedClient { body: r#"{"ok": true}"#.to_string() };
        let value = get_json(&client, "http://localhost/", &[]).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_get_json_empty_body() {
        let client = CannedClient { body: "  ".to_string() };
        assert!(matches!(get_json(&client, "http://localhost/", &[]), Err(HttpClientError::EmptyResponse)));
    }

    #[test]
    fn test_get_json_invalid_body() {
        let client = CannedClient { body: "<html>".to_string() };
        assert!(matches!(get_json(&client, "http://localhost/", &[]), Err(HttpClientError::ParseError(_))));
    }

    #[test]
    fn test_boxed_clone() {
        let boxed: Box<dyn HttpClient> = Box::new(CannedClient { body: "x".to_string() });
        let cloned = boxed.clone();
        assert_eq!(cloned.get("http://localhost/").unwrap(), "x");
    }
}
