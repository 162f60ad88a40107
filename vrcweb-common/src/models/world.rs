// File: vrcweb-common/src/models/world.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::json;
use crate::Error;

/// Visibility of a world listing.
#[derive(Debug, Serialize, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ReleaseStatus {
    Public,
    Private,
    Hidden,
    All,
}

impl ReleaseStatus {
    pub fn from_api(token: &str) -> Result<Self, Error> {
        match token {
            "public" => Ok(ReleaseStatus::Public),
            "private" => Ok(ReleaseStatus::Private),
            "hidden" => Ok(ReleaseStatus::Hidden),
            "all" => Ok(ReleaseStatus::All),
            _ => Err(Error::decode("release status", token)),
        }
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseStatus::Public => write!(f, "public"),
            ReleaseStatus::Private => write!(f, "private"),
            ReleaseStatus::Hidden => write!(f, "hidden"),
            ReleaseStatus::All => write!(f, "all"),
        }
    }
}

/// One world record as returned by `/worlds/{id}`, `/worlds/favorites` and
/// `/worlds/recent`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WorldInfo {
    pub id: String,
    pub name: String,
    pub namespace: Option<String>,
    pub author_id: String,
    pub author_name: String,
    pub capacity: u32,
    pub description: Option<String>,
    pub release_status: ReleaseStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub labs_publication_date: Option<DateTime<Utc>>,
    pub publication_date: Option<DateTime<Utc>>,
    pub version: Option<u32>,
    pub visits: u32,
    pub favorites: u32,
    pub heat: u32,
    pub featured: Option<bool>,
    pub image_url: String,
    pub thumbnail_image_url: String,
    /// YouTube preview id, when the author linked one.
    pub youtube_url: Option<String>,
    pub organization: String,
    pub popularity: u32,
    pub occupants: u32,
    pub private_occupants: Option<u32>,
    pub public_occupants: Option<u32>,
    /// Set when the record came from a favorites listing.
    pub favorite_id: Option<String>,
    pub favorite_group: Option<String>,
    pub tags: Vec<String>,
}

impl WorldInfo {
    /// Map one JSON world object into a [`WorldInfo`].
    ///
    /// Occupancy and popularity counters go through non-negative integer
    /// coercion; a non-numeric value is a `MalformedResponse`.
    pub fn from_api(json: &Value) -> Result<WorldInfo, Error> {
        Ok(WorldInfo {
            id: json::required_str(json, "id")?,
            name: json::required_str(json, "name")?,
            namespace: json::optional_str(json, "namespace")?,
            author_id: json::required_str(json, "authorId")?,
            author_name: json::required_str(json, "authorName")?,
            capacity: json::required_u32(json, "capacity")?,
            description: json::optional_str(json, "description")?,
            release_status: ReleaseStatus::from_api(&json::required_str(json, "releaseStatus")?)?,
            created_at: json::optional_datetime(json, "created_at")?,
            updated_at: json::optional_datetime(json, "updated_at")?,
            labs_publication_date: json::optional_datetime(json, "labsPublicationDate")?,
            publication_date: json::optional_datetime(json, "publicationDate")?,
            version: json::optional_u32(json, "version")?,
            visits: json::required_u32(json, "visits")?,
            favorites: json::required_u32(json, "favorites")?,
            heat: json::required_u32(json, "heat")?,
            featured: json::optional_bool(json, "featured")?,
            image_url: json::required_str(json, "imageUrl")?,
            thumbnail_image_url: json::required_str(json, "thumbnailImageUrl")?,
            youtube_url: json::optional_str(json, "previewYoutubeId")?,
            organization: json::required_str(json, "organization")?,
            popularity: json::required_u32(json, "popularity")?,
            occupants: json::required_u32(json, "occupants")?,
            private_occupants: json::optional_u32(json, "privateOccupants")?,
            public_occupants: json::optional_u32(json, "publicOccupants")?,
            favorite_id: json::optional_str(json, "favoriteId")?,
            favorite_group: json::optional_str(json, "favoriteGroup")?,
            tags: json::string_array(json, "tags")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn world_json() -> Value {
        json!({
            "id": "wrld_765cfcb2-45b3-4829-9d5a-2b7d5b851f8c",
            "name": "RBS Bedroom 03",
            "authorId": "usr_502842d5-73df-4ca5-af53-1b27c654f923",
            "authorName": "author",
            "capacity": 8,
            "created_at": "2022-11-17T07:02:30.912Z",
            "favorites": 116,
            "heat": 3,
            "imageUrl": "https://example.com/file",
            "labsPublicationDate": "2022-11-17T07:17:04.561Z",
            "occupants": 0,
            "organization": "vrchat",
            "popularity": 5,
            "previewYoutubeId": null,
            "publicationDate": "2022-11-30T08:28:39.005Z",
            "releaseStatus": "public",
            "tags": ["system_approved"],
            "thumbnailImageUrl": "https://example.com/256",
            "updated_at": "2022-11-17T07:02:30.912Z",
            "visits": 2880
        })
    }

    #[test]
    fn known_release_status_tokens_decode() {
        assert_eq!(ReleaseStatus::from_api("public").unwrap(), ReleaseStatus::Public);
        assert_eq!(ReleaseStatus::from_api("private").unwrap(), ReleaseStatus::Private);
        assert_eq!(ReleaseStatus::from_api("hidden").unwrap(), ReleaseStatus::Hidden);
        assert_eq!(ReleaseStatus::from_api("all").unwrap(), ReleaseStatus::All);
    }

    #[test]
    fn unknown_release_status_errors() {
        assert!(matches!(
            ReleaseStatus::from_api("communityLabs"),
            Err(Error::Decode { field: "release status", .. })
        ));
    }

    #[test]
    fn maps_favorites_world() {
        let world = WorldInfo::from_api(&world_json()).unwrap();
        assert_eq!(world.id, "wrld_765cfcb2-45b3-4829-9d5a-2b7d5b851f8c");
        assert_eq!(world.capacity, 8);
        assert_eq!(world.release_status, ReleaseStatus::Public);
        assert_eq!(world.visits, 2880);
        assert_eq!(world.youtube_url, None);
        assert_eq!(world.tags, vec!["system_approved"]);
        assert_eq!(
            world.created_at.unwrap().to_rfc3339(),
            "2022-11-17T07:02:30.912+00:00"
        );
    }

    #[test]
    fn non_numeric_counter_fails_mapping() {
        let mut doc = world_json();
        doc["visits"] = json!("lots");
        assert!(matches!(
            WorldInfo::from_api(&doc),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_author_id_fails_mapping() {
        let mut doc = world_json();
        doc.as_object_mut().unwrap().remove("authorId");
        assert!(matches!(
            WorldInfo::from_api(&doc),
            Err(Error::MalformedResponse(_))
        ));
    }
}
