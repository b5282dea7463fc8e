use reqwest::{Client, Url};

use crate::{
    config::Settings,
    error::AppError,
    types::{Credential, TokenResponse},
};

/// Permissions requested at login.
pub const SCOPES: [&str; 2] = ["user-follow-read", "user-top-read"];

/// Builds the Spotify authorization URL the login endpoint redirects to.
///
/// The URL carries `client_id`, `response_type=code`, `redirect_uri` and the
/// space-joined [`SCOPES`], all properly query-encoded.
///
/// # Errors
///
/// Returns [`AppError::Config`] if the configured authorization URL is not a
/// valid absolute URL.
pub fn authorize_url(settings: &Settings) -> Result<String, AppError> {
    let scope = SCOPES.join(" ");
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| AppError::Config(format!("invalid SPOTIFY_API_AUTH_URL: {}", e)))?;

    Ok(url.into())
}

/// Exchanges an authorization code for an access/refresh token pair.
///
/// Posts a form-encoded `authorization_code` grant to the token endpoint and
/// authenticates the application with an HTTP Basic header built from the
/// client id and secret.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `settings` - Supplies the token URL, client credentials and redirect URI
/// * `code` - Authorization code received on the callback
///
/// # Errors
///
/// Every failure (network error, non-2xx reply, unreadable body) becomes
/// [`AppError::UpstreamAuth`]. Nothing is stored by this function.
pub async fn exchange_code(
    client: &Client,
    settings: &Settings,
    code: &str,
) -> Result<Credential, AppError> {
    let res = client
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

    let token: TokenResponse = res
        .json()
        .await
        .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

    Ok(token.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:3001/auth/spotify/callback".to_string(),
            frontend_uri: "http://localhost:3000".to_string(),
            mongo_uri: "mongodb://localhost:27017/test".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            auth_url: "https://accounts.spotify.com/authorize".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            api_url: "https://api.spotify.com/v1".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_carries_all_parameters() {
        let url = Url::parse(&authorize_url(&settings()).unwrap()).unwrap();
        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert_eq!(url.path(), "/authorize");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            params,
            vec![
                ("client_id".to_string(), "client-123".to_string()),
                ("response_type".to_string(), "code".to_string()),
                (
                    "redirect_uri".to_string(),
                    "http://localhost:3001/auth/spotify/callback".to_string()
                ),
                (
                    "scope".to_string(),
                    "user-follow-read user-top-read".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_authorize_url_rejects_invalid_base() {
        let mut s = settings();
        s.auth_url = "not a url".to_string();
        assert!(matches!(authorize_url(&s), Err(AppError::Config(_))));
    }
}
