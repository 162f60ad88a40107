// File: vrcweb-core/src/client.rs

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use vrcweb_common::json;
use vrcweb_common::models::{UserInfo, WorldInfo};

use crate::http::{ApiObserver, ApiRequest, ApiResponse, ApiTransport, HttpTransport};
use crate::Error;

/// Base URL of the VRChat Web API.
const BASE_URL: &str = "https://api.vrchat.cloud/api/1";

/// Page size used by the multi-page aggregation loops.
const PAGE_SIZE: u32 = 100;

/// Client for the VRChat Web API.
///
/// Holds the session cookie and the injected transport; every call is
/// sequential and awaited to completion. Pagination helpers aggregate
/// multi-page listings into a single result set.
pub struct VRCWebApiClient {
    transport: Arc<dyn ApiTransport>,
    observers: Vec<Arc<dyn ApiObserver>>,
    cookie: Option<String>,
}

impl VRCWebApiClient {
    /// Client with the default reqwest transport and user agent.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?)))
    }

    /// Client with the default transport and a custom user agent.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, Error> {
        Ok(Self::with_transport(Arc::new(HttpTransport::with_user_agent(
            user_agent,
        )?)))
    }

    /// Client with a custom user agent and an existing session cookie
    /// (assumed to include `auth=authcookie_xxxx`).
    pub fn with_user_agent_and_cookie(user_agent: &str, cookie: &str) -> Result<Self, Error> {
        let mut client = Self::with_user_agent(user_agent)?;
        client.set_cookie(cookie);
        Ok(client)
    }

    /// Client over an injected transport capability.
    pub fn with_transport(transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            transport,
            observers: Vec::new(),
            cookie: None,
        }
    }

    /// Register an observer notified around every transport call, in
    /// registration order.
    pub fn add_observer(&mut self, observer: Arc<dyn ApiObserver>) {
        self.observers.push(observer);
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Replace the session cookie sent with every request.
    pub fn set_cookie(&mut self, cookie: impl Into<String>) {
        self.cookie = Some(cookie.into());
    }

    /// Get the client API key from `/config`.
    pub async fn get_api_key(&self) -> Result<String, Error> {
        let response = self.get(format!("{BASE_URL}/config")).await?;
        let doc: Value = serde_json::from_str(&response.body)?;
        json::required_str(&doc, "clientApiKey")
    }

    /// Get an auth token cookie for the given credentials without installing
    /// it on the client.
    pub async fn get_auth_token_cookie(
        &self,
        user_name: &str,
        password: &str,
        api_key: &str,
    ) -> Result<String, Error> {
        let query = build_query(&[("apiKey", api_key)]);
        let url = format!("{BASE_URL}/auth/user?{query}");

        let mut headers = self.default_headers();
        let basic = BASE64.encode(format!("{user_name}:{password}"));
        headers.push(("Authorization".to_string(), format!("Basic {basic}")));

        let response = self
            .send(ApiRequest {
                method: Method::GET,
                url,
                headers,
                body: None,
            })
            .await?;

        match response.header("set-cookie") {
            Some(cookie) => Ok(cookie.to_string()),
            None => Err(Error::Auth(format!(
                "Set-Cookie not found: HTTP {}",
                response.status
            ))),
        }
    }

    /// Get an auth token cookie and install it on the client.
    pub async fn login(
        &mut self,
        user_name: &str,
        password: &str,
        api_key: &str,
    ) -> Result<String, Error> {
        let cookie = self
            .get_auth_token_cookie(user_name, password, api_key)
            .await?;
        self.set_cookie(cookie.clone());
        info!("Session cookie updated from login response");
        Ok(cookie)
    }

    /// Verify a TOTP two-factor code for the current session. Returns the
    /// raw response body.
    pub async fn verify_two_factor_code(&self, code: &str) -> Result<String, Error> {
        let body = serde_json::json!({ "code": code }).to_string();
        let response = self
            .post_json(format!("{BASE_URL}/auth/twofactorauth/totp/verify"), body)
            .await?;
        Ok(response.body)
    }

    /// Current user information for the session cookie.
    pub async fn get_current_user(&self) -> Result<UserInfo, Error> {
        let response = self.get(format!("{BASE_URL}/auth/user")).await?;
        let doc: Value = serde_json::from_str(&response.body)?;
        UserInfo::from_api(&doc)
    }

    /// Probe whether the session cookie is still valid.
    ///
    /// A non-success status is returned in-band as `(status, None)` instead
    /// of an error; other failures propagate.
    pub async fn try_get_current_user(&self) -> Result<(u16, Option<UserInfo>), Error> {
        match self.get_current_user().await {
            Ok(user) => Ok((200, Some(user))),
            Err(Error::Status { status, .. }) => Ok((status, None)),
            Err(e) => Err(e),
        }
    }

    /// Get user information by id (`usr_xxxx...`).
    pub async fn get_user_by_id(&self, user_id: &str) -> Result<UserInfo, Error> {
        let response = self.get(format!("{BASE_URL}/users/{user_id}")).await?;
        let doc: Value = serde_json::from_str(&response.body)?;
        UserInfo::from_api(&doc)
    }

    /// One page of the friend listing.
    pub async fn get_friends(
        &self,
        n: u32,
        offset: u32,
        offline_only: bool,
    ) -> Result<Vec<UserInfo>, Error> {
        let n_param = n.to_string();
        let offset_param = offset.to_string();
        let query = build_query(&[
            ("n", n_param.as_str()),
            ("offset", offset_param.as_str()),
            ("offline", if offline_only { "true" } else { "false" }),
        ]);
        let response = self
            .get(format!("{BASE_URL}/auth/user/friends?{query}"))
            .await?;
        let doc: Value = serde_json::from_str(&response.body)?;
        as_array(&doc, "friends")?
            .iter()
            .map(UserInfo::from_api)
            .collect()
    }

    /// All friends in one presence segment, aggregated across pages.
    ///
    /// Requests fixed-size pages at increasing offsets until the server
    /// returns an empty page. A server that never does causes unbounded
    /// iteration.
    pub async fn get_all_friends_segment(&self, offline_only: bool) -> Result<Vec<UserInfo>, Error> {
        let mut friends = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.get_friends(PAGE_SIZE, offset, offline_only).await?;
            if page.is_empty() {
                break;
            }
            debug!(offset, count = page.len(), "fetched friends page");
            friends.extend(page);
            offset += PAGE_SIZE;
        }
        Ok(friends)
    }

    /// All friends: the offline segment first, then the online-or-active
    /// segment, each fully paginated.
    pub async fn get_all_friends(&self) -> Result<Vec<UserInfo>, Error> {
        let mut friends = self.get_all_friends_segment(true).await?;
        friends.extend(self.get_all_friends_segment(false).await?);
        Ok(friends)
    }

    /// Get world information by id (`wrld_xxxx...`).
    pub async fn get_world_by_id(&self, world_id: &str) -> Result<WorldInfo, Error> {
        let response = self.get(format!("{BASE_URL}/worlds/{world_id}")).await?;
        let doc: Value = serde_json::from_str(&response.body)?;
        WorldInfo::from_api(&doc)
    }

    /// One page of the favorite world listing, with unavailable entries
    /// dropped.
    pub async fn get_favorite_worlds(&self, n: u32, offset: u32) -> Result<Vec<WorldInfo>, Error> {
        let (_, worlds) = self.favorite_worlds_page(n, offset).await?;
        Ok(worlds)
    }

    /// All favorite worlds, aggregated across pages.
    ///
    /// Termination checks the raw element count of each page, not the count
    /// surviving the unavailable-world filter; a page whose entries were all
    /// filtered out still continues the loop.
    pub async fn get_all_favorite_worlds(&self) -> Result<Vec<WorldInfo>, Error> {
        let mut worlds = Vec::new();
        let mut offset = 0;
        loop {
            let (raw_count, page) = self.favorite_worlds_page(PAGE_SIZE, offset).await?;
            if raw_count == 0 {
                break;
            }
            worlds.extend(page);
            offset += PAGE_SIZE;
        }
        Ok(worlds)
    }

    /// Recently visited worlds. Unpaginated, no filter.
    pub async fn get_recent_worlds(&self) -> Result<Vec<WorldInfo>, Error> {
        let response = self.get(format!("{BASE_URL}/worlds/recent")).await?;
        let doc: Value = serde_json::from_str(&response.body)?;
        as_array(&doc, "recent worlds")?
            .iter()
            .map(WorldInfo::from_api)
            .collect()
    }

    async fn favorite_worlds_page(
        &self,
        n: u32,
        offset: u32,
    ) -> Result<(usize, Vec<WorldInfo>), Error> {
        let n_param = n.to_string();
        let offset_param = offset.to_string();
        let query = build_query(&[("n", n_param.as_str()), ("offset", offset_param.as_str())]);
        let response = self
            .get(format!("{BASE_URL}/worlds/favorites?{query}"))
            .await?;
        let doc: Value = serde_json::from_str(&response.body)?;
        let items = as_array(&doc, "favorite worlds")?;

        let mut worlds = Vec::with_capacity(items.len());
        for item in items {
            if is_unavailable_world(item) {
                debug!("skipping unavailable world entry in favorites page");
                continue;
            }
            worlds.push(WorldInfo::from_api(item)?);
        }
        Ok((items.len(), worlds))
    }

    async fn get(&self, url: String) -> Result<ApiResponse, Error> {
        self.send(ApiRequest {
            method: Method::GET,
            url,
            headers: self.default_headers(),
            body: None,
        })
        .await
    }

    async fn post_json(&self, url: String, body: String) -> Result<ApiResponse, Error> {
        let mut headers = self.default_headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        self.send(ApiRequest {
            method: Method::POST,
            url,
            headers,
            body: Some(body),
        })
        .await
    }

    /// Notify observers, perform the call, validate the status. Anything
    /// outside 200-299 becomes [`Error::Status`] carrying the numeric code
    /// and the diagnostic body text; error bodies are never parsed as JSON.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        for observer in &self.observers {
            observer.request_sending(&request);
        }
        let response = self.transport.send(request).await?;
        for observer in &self.observers {
            observer.response_received(&response);
        }

        if !(200..300).contains(&response.status) {
            warn!(status = response.status, "API call returned a non-success status");
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        match &self.cookie {
            Some(cookie) => vec![("Cookie".to_string(), cookie.clone())],
            None => Vec::new(),
        }
    }
}

/// URL-encoded query string from ordered key/value pairs.
fn build_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn as_array<'a>(doc: &'a Value, what: &str) -> Result<&'a Vec<Value>, Error> {
    doc.as_array()
        .ok_or_else(|| Error::MalformedResponse(format!("expected a JSON array of {what}")))
}

/// Favorites pages carry placeholder entries for worlds that no longer
/// resolve: the id is `"???"` and there is no author. Those are dropped,
/// not mapped.
fn is_unavailable_world(json: &Value) -> bool {
    json.get("authorId").is_none() || json.get("id").and_then(Value::as_str) == Some("???")
}
