use reqwest::Client;

use crate::{
    reconcile::{self, TimeRange},
    types::{ArtistRef, FollowedArtistsResponse, ScoreMap, TopArtistsResponse},
};

/// Largest page size both artist endpoints accept.
pub const PAGE_LIMIT: u32 = 50;

/// Retrieves the user's top artists for one listening window.
///
/// Only the first page (up to [`PAGE_LIMIT`] artists) is requested.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Web API base URL, e.g. `https://api.spotify.com/v1`
/// * `token` - Access token of the user
/// * `range` - Listening window to rank by
///
/// # Errors
///
/// Network failures and non-2xx replies (expired token, rate limit) are
/// returned as-is. There is no retry.
pub async fn get_top_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    range: TimeRange,
) -> Result<Vec<ArtistRef>, reqwest::Error> {
    let res = client
        .get(format!("{uri}/me/top/artists", uri = api_url))
        .query(&[("time_range", range.as_str())])
        .query(&[("limit", PAGE_LIMIT)])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    Ok(res.json::<TopArtistsResponse>().await?.items)
}

/// Fetches all three windows concurrently and merges them into a [`ScoreMap`].
///
/// The first failing window fails the whole call; no partial scores are
/// produced.
pub async fn get_top_artist_scores(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<ScoreMap, reqwest::Error> {
    let (short, medium, long) = tokio::try_join!(
        get_top_artists(client, api_url, token, TimeRange::ShortTerm),
        get_top_artists(client, api_url, token, TimeRange::MediumTerm),
        get_top_artists(client, api_url, token, TimeRange::LongTerm),
    )?;

    Ok(reconcile::score_map(&short, &medium, &long))
}

/// Retrieves every artist the user follows.
///
/// Pages are requested one after another, following the `next` URL of each
/// reply until Spotify returns none. Artists keep the order Spotify returns
/// them in.
///
/// # Errors
///
/// A failure on any page discards everything fetched so far.
pub async fn get_followed_artists(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<Vec<ArtistRef>, reqwest::Error> {
    let mut artists: Vec<ArtistRef> = Vec::new();
    let mut next = Some(format!(
        "{uri}/me/following?type=artist&limit={limit}",
        uri = api_url,
        limit = PAGE_LIMIT
    ));

    while let Some(url) = next {
        let res = client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let page = res.json::<FollowedArtistsResponse>().await?;
        artists.extend(page.artists.items);
        next = page.artists.next;
    }

    Ok(artists)
}
