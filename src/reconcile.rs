//! Decides which followed artists are candidates to unfollow.
//!
//! Listening recency is derived from the three top-artist windows Spotify
//! offers. An artist gets the score of the most recent window it shows up
//! in; artists missing from every window score 0. Anything scoring 1 or
//! less (never in a top list, or only in the long-term one) is flagged.

use crate::types::{ArtistRef, ScoreMap};

/// Highest score that still marks an artist as a candidate to unfollow.
pub const UNFOLLOW_THRESHOLD: u8 = 1;

/// Lookback window of the top-artists endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    /// Query value for the `time_range` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            TimeRange::ShortTerm => 3,
            TimeRange::MediumTerm => 2,
            TimeRange::LongTerm => 1,
        }
    }
}

/// Merges the three windows into one score per artist.
///
/// Windows are applied long, medium, short, so later (more recent) windows
/// overwrite earlier ones.
pub fn score_map(short: &[ArtistRef], medium: &[ArtistRef], long: &[ArtistRef]) -> ScoreMap {
    let mut scores = ScoreMap::new();
    for (range, artists) in [
        (TimeRange::LongTerm, long),
        (TimeRange::MediumTerm, medium),
        (TimeRange::ShortTerm, short),
    ] {
        for artist in artists {
            scores.insert(artist.id.clone(), range.score());
        }
    }
    scores
}

/// Recency score of one artist, 0 when it is in no window.
pub fn score_of(scores: &ScoreMap, artist_id: &str) -> u8 {
    scores.get(artist_id).copied().unwrap_or(0)
}

/// Followed artists scoring at most [`UNFOLLOW_THRESHOLD`], in `followed` order.
pub fn artists_to_unfollow(followed: &[ArtistRef], scores: &ScoreMap) -> Vec<ArtistRef> {
    followed
        .iter()
        .filter(|artist| score_of(scores, &artist.id) <= UNFOLLOW_THRESHOLD)
        .cloned()
        .collect()
}
