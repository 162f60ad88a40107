// File: vrcweb-core/tests/common/mod.rs

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vrcweb_core::{ApiRequest, ApiResponse, ApiTransport, Error};

/// Transport stub replaying canned responses in order and recording every
/// request it was handed.
pub struct StubTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new(responses: Vec<ApiResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Stub answering every request with HTTP 200 and the given bodies.
    pub fn ok(bodies: &[&str]) -> Arc<Self> {
        Self::new(bodies.iter().map(|body| ok_response(body)).collect())
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.url.clone())
            .collect()
    }
}

#[async_trait]
impl ApiTransport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("stub transport ran out of canned responses"))
    }
}

pub fn ok_response(body: &str) -> ApiResponse {
    ApiResponse {
        status: 200,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

pub fn status_response(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

/// A complete user object with every required field populated.
pub fn user_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "displayName": name,
        "currentAvatarImageUrl": "https://example.com/a.png",
        "currentAvatarThumbnailImageUrl": "https://example.com/a_thumb.png",
        "developerType": "none",
        "friendKey": "fk",
        "isFriend": true,
        "last_platform": "standalonewindows",
        "profilePicOverride": "",
        "status": "active",
        "statusDescription": "",
        "tags": []
    })
}

/// A complete world object with every required field populated.
pub fn world_json(id: &str, author_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "world",
        "authorId": author_id,
        "authorName": "author",
        "capacity": 16,
        "favorites": 1,
        "heat": 0,
        "imageUrl": "https://example.com/file",
        "occupants": 0,
        "organization": "vrchat",
        "popularity": 0,
        "releaseStatus": "public",
        "tags": [],
        "thumbnailImageUrl": "https://example.com/256",
        "visits": 10
    })
}

/// The placeholder entry favorites pages contain for unavailable worlds.
pub fn unavailable_world_json() -> serde_json::Value {
    serde_json::json!({
        "authorName": "???",
        "capacity": 0,
        "favoriteGroup": "worlds2",
        "favoriteId": "fvrt_3f023e5e-25a4-4d94-9a14-fa60f53e562b",
        "id": "???",
        "imageUrl": "",
        "isSecure": false,
        "name": "???",
        "occupants": 0,
        "releaseStatus": "hidden",
        "thumbnailImageUrl": "https://assets.vrchat.com/default/unavailable-world.png"
    })
}
