// File: vrcweb-common/src/models/user.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::json;
use crate::Error;

/// Presence status a user announces ("join me", "busy", ...).
#[derive(Debug, Serialize, Clone, Copy, Eq, PartialEq, Hash)]
pub enum UserStatus {
    Offline,
    JoinMe,
    Active,
    AskMe,
    Busy,
}

impl UserStatus {
    pub fn from_api(token: &str) -> Result<Self, Error> {
        match token {
            "offline" => Ok(UserStatus::Offline),
            "join me" => Ok(UserStatus::JoinMe),
            "active" => Ok(UserStatus::Active),
            "ask me" => Ok(UserStatus::AskMe),
            "busy" => Ok(UserStatus::Busy),
            _ => Err(Error::decode("user status", token)),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Offline => write!(f, "offline"),
            UserStatus::JoinMe => write!(f, "join me"),
            UserStatus::Active => write!(f, "active"),
            UserStatus::AskMe => write!(f, "ask me"),
            UserStatus::Busy => write!(f, "busy"),
        }
    }
}

/// Connection state of the session, distinct from [`UserStatus`].
#[derive(Debug, Serialize, Clone, Copy, Eq, PartialEq, Hash)]
pub enum UserState {
    Offline,
    Active,
    Online,
}

impl UserState {
    pub fn from_api(token: &str) -> Result<Self, Error> {
        match token {
            "offline" => Ok(UserState::Offline),
            "active" => Ok(UserState::Active),
            "online" => Ok(UserState::Online),
            _ => Err(Error::decode("user state", token)),
        }
    }
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserState::Offline => write!(f, "offline"),
            UserState::Active => write!(f, "active"),
            UserState::Online => write!(f, "online"),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DeveloperType {
    None,
    Trusted,
    Internal,
    Moderator,
}

impl DeveloperType {
    pub fn from_api(token: &str) -> Result<Self, Error> {
        match token {
            "none" => Ok(DeveloperType::None),
            "trusted" => Ok(DeveloperType::Trusted),
            "internal" => Ok(DeveloperType::Internal),
            "moderator" => Ok(DeveloperType::Moderator),
            _ => Err(Error::decode("developer type", token)),
        }
    }
}

impl fmt::Display for DeveloperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeveloperType::None => write!(f, "none"),
            DeveloperType::Trusted => write!(f, "trusted"),
            DeveloperType::Internal => write!(f, "internal"),
            DeveloperType::Moderator => write!(f, "moderator"),
        }
    }
}

/// Platform a user was last seen on.
#[derive(Debug, Serialize, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Platform {
    StandaloneWindows,
    Android,
}

impl Platform {
    pub fn from_api(token: &str) -> Result<Self, Error> {
        match token {
            "standalonewindows" => Ok(Platform::StandaloneWindows),
            "android" => Ok(Platform::Android),
            _ => Err(Error::decode("platform", token)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::StandaloneWindows => write!(f, "standalonewindows"),
            Platform::Android => write!(f, "android"),
        }
    }
}

/// State of a pending friend request.
///
/// Unlike the other closed sets, the upstream API has been observed to send
/// tokens other than "completed" here; everything else maps to `OutGoing`
/// rather than failing the whole user record.
#[derive(Debug, Serialize, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FriendRequestStatus {
    Completed,
    OutGoing,
}

impl FriendRequestStatus {
    pub fn from_api(token: &str) -> Self {
        match token {
            "completed" => FriendRequestStatus::Completed,
            _ => FriendRequestStatus::OutGoing,
        }
    }
}

impl fmt::Display for FriendRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriendRequestStatus::Completed => write!(f, "completed"),
            FriendRequestStatus::OutGoing => write!(f, "outgoing"),
        }
    }
}

/// One user record as returned by `/auth/user`, `/users/{id}` and the friend
/// listing endpoints.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub allow_avatar_copying: Option<bool>,
    pub bio: Option<String>,
    pub current_avatar_image_url: String,
    pub current_avatar_thumbnail_image_url: String,
    pub date_joined: Option<DateTime<Utc>>,
    pub developer_type: DeveloperType,
    pub friend_key: String,
    pub friend_request_status: Option<FriendRequestStatus>,
    /// Instance part of the location, when the user is in a world.
    pub instance_part: Option<String>,
    pub is_friend: bool,
    pub last_activity: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub last_platform: Platform,
    pub location: Option<String>,
    pub note: Option<String>,
    pub profile_pic_override: String,
    pub state: Option<UserState>,
    pub status: UserStatus,
    pub status_description: String,
    pub traveling_to_instance: Option<String>,
    pub traveling_to_location: Option<String>,
    pub traveling_to_world: Option<String>,
    pub user_icon: Option<String>,
    pub world_id: Option<String>,
    /// Trust/system tags, in the order the API listed them.
    pub tags: Vec<String>,
}

impl UserInfo {
    /// Map one JSON user object into a [`UserInfo`].
    ///
    /// Required scalars error with `MalformedResponse` when missing; optional
    /// fields go through the accessors in [`crate::json`]. A missing `tags`
    /// array yields an empty list.
    pub fn from_api(json: &Value) -> Result<UserInfo, Error> {
        Ok(UserInfo {
            id: json::required_str(json, "id")?,
            name: json::required_str(json, "displayName")?,
            allow_avatar_copying: json::optional_bool(json, "allowAvatarCopying")?,
            bio: json::optional_str(json, "bio")?,
            current_avatar_image_url: json::required_str(json, "currentAvatarImageUrl")?,
            current_avatar_thumbnail_image_url: json::required_str(
                json,
                "currentAvatarThumbnailImageUrl",
            )?,
            date_joined: json::optional_datetime(json, "date_joined")?,
            developer_type: DeveloperType::from_api(&json::required_str(json, "developerType")?)?,
            friend_key: json::required_str(json, "friendKey")?,
            friend_request_status: json::optional_str(json, "friendRequestStatus")?
                .map(|token| FriendRequestStatus::from_api(&token)),
            instance_part: json::optional_str(json, "instanceId")?,
            is_friend: json::required_bool(json, "isFriend")?,
            last_activity: json::optional_datetime(json, "last_activity")?,
            last_login: json::optional_datetime(json, "last_login")?,
            last_platform: Platform::from_api(&json::required_str(json, "last_platform")?)?,
            location: json::optional_str(json, "location")?,
            note: json::optional_str(json, "note")?,
            profile_pic_override: json::required_str(json, "profilePicOverride")?,
            state: json::optional_str(json, "state")?
                .map(|token| UserState::from_api(&token))
                .transpose()?,
            status: UserStatus::from_api(&json::required_str(json, "status")?)?,
            status_description: json::required_str(json, "statusDescription")?,
            traveling_to_instance: json::optional_str(json, "travelingToInstance")?,
            traveling_to_location: json::optional_str(json, "travelingToLocation")?,
            traveling_to_world: json::optional_str(json, "travelingToWorld")?,
            user_icon: json::optional_str(json, "userIcon")?,
            world_id: json::optional_str(json, "worldId")?,
            tags: json::string_array(json, "tags")?,
        })
    }
}
