// File: vrcweb-common/src/models/mod.rs

pub mod user;
pub mod world;

pub use user::{DeveloperType, FriendRequestStatus, Platform, UserInfo, UserState, UserStatus};
pub use world::{ReleaseStatus, WorldInfo};
