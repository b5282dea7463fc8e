use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::AppState,
    error::AppError,
    management::{SESSION_KEY, UnfollowStore},
    spotify, success,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

/// `GET /auth/spotify/login`: sends the browser to the Spotify consent page.
pub async fn login<S: UnfollowStore>(
    Extension(state): Extension<AppState<S>>,
) -> Result<Response, AppError> {
    let url = spotify::auth::authorize_url(&state.settings)?;
    Ok(found(url))
}

/// `GET /auth/spotify/callback`: trades the code for tokens and stores them.
///
/// Any failure answers `500` in plain text and leaves the stored credential
/// untouched.
pub async fn callback<S: UnfollowStore>(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState<S>>,
) -> Result<Response, AppError> {
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(AppError::UpstreamAuth(
            "callback without authorization code".to_string(),
        ));
    };

    let credential = spotify::auth::exchange_code(&state.http, &state.settings, &code).await?;
    state.tokens.store(SESSION_KEY, credential).await;
    success!("Spotify account connected");

    Ok(found(format!(
        "{}/connected",
        state.settings.frontend_uri.trim_end_matches('/')
    )))
}

/// Plain `302 Found`; axum's `Redirect` helpers only emit 303/307/308.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
