use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Access and refresh token pair obtained from the OAuth callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
}

/// Raw body of the token endpoint reply.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl From<TokenResponse> for Credential {
    fn from(res: TokenResponse) -> Self {
        Credential {
            access_token: res.access_token,
            refresh_token: res.refresh_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

impl ArtistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Artist id to recency score (1 = long term only, 2 = medium, 3 = short).
pub type ScoreMap = HashMap<String, u8>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<ArtistRef>,
    pub next: Option<String>,
}

/// A previously flagged artist as kept in the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowRecord {
    pub spotify_id: String,
    pub name: String,
    pub unfollowed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataResponse {
    pub artists_to_unfollow: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub unfollowed_artists: Vec<UnfollowRecord>,
}

#[derive(Tabled)]
pub struct UnfollowTableRow {
    pub flagged: String,
    pub name: String,
    pub id: String,
}

impl From<UnfollowRecord> for UnfollowTableRow {
    fn from(record: UnfollowRecord) -> Self {
        UnfollowTableRow {
            flagged: record.unfollowed_at.format("%Y-%m-%d %H:%M").to_string(),
            name: record.name,
            id: record.spotify_id,
        }
    }
}
