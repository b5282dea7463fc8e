use axum::{Extension, Json};

use crate::{
    api::AppState,
    error::AppError,
    management::{SESSION_KEY, UnfollowStore, spawn_upsert},
    reconcile,
    spotify::artists,
    types::{HistoryResponse, UserDataResponse},
};

/// `GET /user/data`: followed artists the user no longer listens to.
///
/// Top-artist scores and the followed list are fetched concurrently; if
/// either side fails the request fails as a whole. The result is recorded
/// in the history store in the background, so the response never waits on
/// (or reports) persistence.
pub async fn user_data<S: UnfollowStore>(
    Extension(state): Extension<AppState<S>>,
) -> Result<Json<UserDataResponse>, AppError> {
    let credential = state
        .tokens
        .get(SESSION_KEY)
        .await
        .ok_or(AppError::Unauthenticated)?;
    let token = credential.access_token.as_str();
    let api_url = state.settings.api_url.as_str();

    let (scores, followed) = tokio::try_join!(
        artists::get_top_artist_scores(&state.http, api_url, token),
        artists::get_followed_artists(&state.http, api_url, token),
    )?;

    let artists_to_unfollow = reconcile::artists_to_unfollow(&followed, &scores);
    spawn_upsert(state.store.clone(), artists_to_unfollow.clone());

    Ok(Json(UserDataResponse {
        artists_to_unfollow,
    }))
}

/// `GET /user/history`: every artist flagged so far, newest first.
pub async fn history<S: UnfollowStore>(
    Extension(state): Extension<AppState<S>>,
) -> Result<Json<HistoryResponse>, AppError> {
    let unfollowed_artists = state.store.list().await?;
    Ok(Json(HistoryResponse { unfollowed_artists }))
}
