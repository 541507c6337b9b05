use log::{debug, warn};
use serde_json::Value;

use crate::data::PREVIEW_NOT_FOUND;
use crate::helpers::http_client::{self, HttpClient};
use crate::helpers::retry::RetryPolicy;
use crate::helpers::PreviewLookup;

pub const DEFAULT_PREVIEW_URL: &str = "https://radio.markwasley.net.nz/lookup/appleMusic.php";

/// Preview lookup configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    pub lookup_url: String,
    pub retry: RetryPolicy,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            lookup_url: DEFAULT_PREVIEW_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl PreviewConfig {
    pub fn from_json(preview_config: &Value) -> Self {
        let defaults = PreviewConfig::default();
        let lookup_url = preview_config
            .get("url")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
            .unwrap_or(defaults.lookup_url);
        let attempts = preview_config
            .get("attempts")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(defaults.retry.attempts);
        let delay_ms = preview_config
            .get("delay_ms")
            .and_then(|v| v.as_u64())
            .unwrap_or(defaults.retry.delay.as_millis() as u64);
        Self {
            lookup_url,
            retry: RetryPolicy::new(attempts, std::time::Duration::from_millis(delay_ms)),
        }
    }
}

/// Looks up audio previews by title and artist
///
/// The service answers with a JSON array, the first element carries the
/// `preview_url`. Empty answers and request failures are retried according to
/// the retry policy.
pub struct PreviewClient {
    http: Box<dyn HttpClient>,
    config: PreviewConfig,
}

impl PreviewClient {
    pub fn new(http: Box<dyn HttpClient>, config: PreviewConfig) -> Self {
        Self { http, config }
    }

    fn lookup_url(&self, title: &str, artist: &str) -> String {
        format!(
            "{}?title={}&artist={}",
            self.config.lookup_url,
            urlencoding::encode(title),
            urlencoding::encode(artist)
        )
    }

    fn lookup_once(&self, url: &str) -> Option<String> {
        match http_client::get_json(self.http.as_ref(), url, &[]) {
            Ok(response) => extract_preview_url(&response),
            Err(e) => {
                warn!("Preview lookup request failed: {}", e);
                None
            }
        }
    }
}

/// Get the preview URL from the first result of a lookup response
pub fn extract_preview_url(response: &Value) -> Option<String> {
    response
        .get(0)
        .and_then(|first| first.get("preview_url"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

impl PreviewLookup for PreviewClient {
    fn lookup_preview(&self, title: &str, artist: &str) -> String {
        let url = self.lookup_url(title, artist);
        let operation = format!("preview lookup for '{}' by '{}'", title, artist);
        match self.config.retry.execute(&operation, |_| self.lookup_once(&url)) {
            Some(preview) => {
                debug!("Found preview for '{}' by '{}': {}", title, artist, preview);
                preview
            }
            None => PREVIEW_NOT_FOUND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use crate::helpers::http_client::HttpClientError;

    /// Replays a list of canned responses, repeating the last one
    #[derive(Clone, Debug)]
    struct ScriptedHttp {
        responses: Arc<Mutex<Vec<Result<String, String>>>>,
        urls: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedHttp {
        fn new(responses: Vec<Result<&str, &str>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(
                    responses.into_iter().map(|r| r.map(str::to_string).map_err(str::to_string)).collect(),
                )),
                urls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl HttpClient for ScriptedHttp {
        fn get_with_headers(&self, url: &str, _headers: &[(&str, &str)]) -> Result<String, HttpClientError> {
            self.urls.lock().unwrap().push(url.to_string());
            let mut responses = self.responses.lock().unwrap();
            let next = if responses.len() > 1 { responses.remove(0) } else { responses[0].clone() };
            next.map_err(HttpClientError::RequestError)
        }

        fn post_form(&self, _url: &str, _fields: &[(&str, &str)]) -> Result<Value, HttpClientError> {
            Err(HttpClientError::RequestError("not supported".to_string()))
        }

        fn clone_box(&self) -> Box<dyn HttpClient> {
            Box::new(self.clone())
        }
    }

    fn test_config() -> PreviewConfig {
        PreviewConfig {
            lookup_url: "http://preview.test/lookup".to_string(),
            retry: RetryPolicy::immediate(3),
        }
    }

    #[test]
    fn test_extract_preview_url() {
        assert_eq!(
            extract_preview_url(&json!([{"preview_url": "https://a/1.m4a"}, {"preview_url": "https://a/2.m4a"}])),
            Some("https://a/1.m4a".to_string())
        );
        assert_eq!(extract_preview_url(&json!([])), None);
        assert_eq!(extract_preview_url(&json!([{"preview_url": ""}])), None);
        assert_eq!(extract_preview_url(&json!({"preview_url": "x"})), None);
    }

    #[test]
    fn test_lookup_found_first_attempt() {
        let http = ScriptedHttp::new(vec![Ok(r#"[{"preview_url": "https://p/1.m4a"}]"#)]);
        let urls = http.urls.clone();
        let client = PreviewClient::new(Box::new(http), test_config());
        assert_eq!(client.lookup_preview("Fly Over States", "Jason Aldean"), "https://p/1.m4a");

        let urls = urls.lock().unwrap();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0], "http://preview.test/lookup?title=Fly%20Over%20States&artist=Jason%20Aldean");
    }

    #[test]
    fn test_lookup_retries_after_errors() {
        let http = ScriptedHttp::new(vec![
            Err("timeout"),
            Ok("[]"),
            Ok(r#"[{"preview_url": "https://p/3.m4a"}]"#),
        ]);
        let urls = http.urls.clone();
        let client = PreviewClient::new(Box::new(http), test_config());
        assert_eq!(client.lookup_preview("Song", "Artist"), "https://p/3.m4a");
        assert_eq!(urls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_lookup_not_found_sentinel() {
        let http = ScriptedHttp::new(vec![Ok("[]")]);
        let urls = http.urls.clone();
        let client = PreviewClient::new(Box::new(http), test_config());
        assert_eq!(client.lookup_preview("Song", "Artist"), PREVIEW_NOT_FOUND);
        assert_eq!(urls.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_config_from_json() {
        let config = PreviewConfig::from_json(&json!({"attempts": 5, "delay_ms": 0}));
        assert_eq!(config.lookup_url, DEFAULT_PREVIEW_URL);
        assert_eq!(config.retry, RetryPolicy::new(5, Duration::ZERO));

        let config = PreviewConfig::from_json(&json!({}));
        assert_eq!(config, PreviewConfig::default());
    }
}
