// File: vrcweb-common/src/lib.rs

pub mod error;
pub mod json;
pub mod models;

pub use error::Error;
