//! Transport abstraction for the VRChat Web API.
//!
//! The client core only needs "send a request, get back status + headers +
//! body text". Hiding that behind a trait lets tests substitute canned
//! responses without touching the network, and keeps reqwest out of the
//! mapping and pagination code entirely.

use async_trait::async_trait;
use reqwest::Method;

use crate::Error;

/// One outgoing API call, fully assembled by the client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Header pairs in the order they will be applied.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The raw result of a transport call, before any status policy is applied.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    /// First header with the given name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The injected transport capability. Implementations perform the raw HTTP
/// call only; status validation belongs to the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error>;
}

/// Synchronous observation hooks fired immediately before a request is sent
/// and immediately after a response is received. Observers see the exchange,
/// they cannot mutate it.
pub trait ApiObserver: Send + Sync {
    fn request_sending(&self, request: &ApiRequest) {
        let _ = request;
    }
    fn response_received(&self, response: &ApiResponse) {
        let _ = response;
    }
}

/// Default user agent, matching what the upstream API expects from tools.
pub const DEFAULT_USER_AGENT: &str = "application/1.00 VRChatTool";

/// Default transport backed by a [`reqwest::Client`] with a fixed User-Agent.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, Error> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::ClientBuilder::new().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(ApiResponse { status, headers, body })
    }
}
