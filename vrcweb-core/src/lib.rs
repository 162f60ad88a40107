// File: vrcweb-core/src/lib.rs

pub mod client;
pub mod http;

pub use client::VRCWebApiClient;
pub use http::{ApiObserver, ApiRequest, ApiResponse, ApiTransport, HttpTransport};
pub use vrcweb_common::error::Error;
pub use vrcweb_common::models;
