//! Construction of outbound HTTP requests.

use std::fmt;

use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};

use crate::error::ConnectorError;

/// Product identifier sent as `User-Agent` on every request
pub const HTTP_USER_AGENT: &str = "Semantic-Kernel";
/// Header carrying the connector version
pub const HTTP_VERSION_HEADER_NAME: &str = "Semantic-Kernel-Version";

/// Builds the HTTP requests sent to a Gemini endpoint.
pub trait HttpRequestFactory: Send + Sync + fmt::Debug {
    /// Creates a JSON `POST` request carrying `body`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or a header value is invalid.
    fn create_post(
        &self,
        client: &reqwest::Client,
        url: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Request, ConnectorError>;
}

/// Starts a request with the product headers set.
pub(crate) fn request_builder(
    client: &reqwest::Client,
    method: reqwest::Method,
    url: &str,
) -> reqwest::RequestBuilder {
    client
        .request(method, url)
        .header(USER_AGENT, HeaderValue::from_static(HTTP_USER_AGENT))
        .header(
            HTTP_VERSION_HEADER_NAME,
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        )
}

fn json_post(client: &reqwest::Client, url: &str, body: Vec<u8>) -> reqwest::RequestBuilder {
    request_builder(client, reqwest::Method::POST, url)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(body)
}

/// Request factory for the Google AI API. Authentication lives in the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleAIGeminiHttpRequestFactory;

impl HttpRequestFactory for GoogleAIGeminiHttpRequestFactory {
    fn create_post(
        &self,
        client: &reqwest::Client,
        url: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Request, ConnectorError> {
        Ok(json_post(client, url, body).build()?)
    }
}

/// Request factory for Vertex AI, authenticating with a bearer token.
#[derive(Clone)]
pub struct VertexAIGeminiHttpRequestFactory {
    bearer_key: String,
}

impl VertexAIGeminiHttpRequestFactory {
    /// Creates a factory that authenticates with `bearer_key`.
    pub fn new(bearer_key: impl Into<String>) -> Self {
        Self {
            bearer_key: bearer_key.into(),
        }
    }
}

impl fmt::Debug for VertexAIGeminiHttpRequestFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexAIGeminiHttpRequestFactory")
            .finish_non_exhaustive()
    }
}

impl HttpRequestFactory for VertexAIGeminiHttpRequestFactory {
    fn create_post(
        &self,
        client: &reqwest::Client,
        url: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Request, ConnectorError> {
        Ok(json_post(client, url, body)
            .bearer_auth(&self.bearer_key)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn google_ai_post_has_product_headers_and_no_auth() {
        let client = reqwest::Client::new();
        let request = GoogleAIGeminiHttpRequestFactory
            .create_post(&client, "https://example.com/x", b"{}".to_vec())
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.headers()[USER_AGENT], HTTP_USER_AGENT);
        assert_eq!(
            request.headers()[HTTP_VERSION_HEADER_NAME],
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"{}"[..]));
    }

    #[test]
    fn vertex_post_uses_bearer_token() {
        let client = reqwest::Client::new();
        let request = VertexAIGeminiHttpRequestFactory::new("token-123")
            .create_post(&client, "https://example.com/x", Vec::new())
            .unwrap();

        assert_eq!(request.headers()[AUTHORIZATION], "Bearer token-123");
        assert_eq!(request.headers()[USER_AGENT], HTTP_USER_AGENT);
    }

    #[test]
    fn invalid_url_is_a_request_error() {
        let client = reqwest::Client::new();
        let err = GoogleAIGeminiHttpRequestFactory
            .create_post(&client, "not a url", Vec::new())
            .unwrap_err();
        assert!(matches!(err, ConnectorError::RequestError(_)));
    }
}
