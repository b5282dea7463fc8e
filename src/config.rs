//! Configuration management for unfollowr.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. Lookup order, first hit wins:
//! 1. Real environment variables
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data dir>/unfollowr/.env`)
//! 4. Built-in defaults (optional values only)

use std::{env, path::PathBuf};

use crate::error::AppError;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/spotifyApp";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3001";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Loads `.env` files into the process environment.
///
/// Neither file has to exist. `dotenv` never overrides a variable that is
/// already set, so real environment variables keep priority.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    dotenv::dotenv().ok();

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Location of the per-user `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("unfollowr/.env");
    path
}

/// Address the HTTP server binds to, `SERVER_ADDRESS` or `0.0.0.0:3001`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Document store connection string, `MONGO_URI` or the local default.
pub fn mongo_uri() -> String {
    var_or("MONGO_URI", DEFAULT_MONGO_URI)
}

pub fn spotify_client_id() -> Result<String, AppError> {
    required("SPOTIFY_CLIENT_ID")
}

/// The client secret is only ever sent inside the Basic auth header of the
/// token exchange. Never log it.
pub fn spotify_client_secret() -> Result<String, AppError> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Must match the redirect URI registered in the Spotify dashboard.
pub fn spotify_redirect_uri() -> Result<String, AppError> {
    required("SPOTIFY_REDIRECT_URI")
}

/// Base URL of the web client; successful logins land on `<uri>/connected`.
pub fn frontend_uri() -> Result<String, AppError> {
    required("FRONTEND_URI")
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Everything the service needs at runtime, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub frontend_uri: String,
    pub mongo_uri: String,
    pub server_addr: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Settings {
    /// Collects all settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] naming the first missing required variable.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Settings {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            redirect_uri: spotify_redirect_uri()?,
            frontend_uri: frontend_uri()?,
            mongo_uri: mongo_uri(),
            server_addr: server_addr(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!("{} must be set", key))),
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test touches its own variable names; the process environment is shared.

    #[test]
    fn test_var_or_falls_back_on_unset_and_blank() {
        unsafe {
            env::remove_var("UNFOLLOWR_TEST_UNSET");
            env::set_var("UNFOLLOWR_TEST_BLANK", "  ");
        }
        assert_eq!(var_or("UNFOLLOWR_TEST_UNSET", "fallback"), "fallback");
        assert_eq!(var_or("UNFOLLOWR_TEST_BLANK", "fallback"), "fallback");
    }

    #[test]
    fn test_required_reports_missing_variable() {
        unsafe {
            env::remove_var("UNFOLLOWR_TEST_REQUIRED");
        }
        match required("UNFOLLOWR_TEST_REQUIRED") {
            Err(AppError::Config(msg)) => assert!(msg.contains("UNFOLLOWR_TEST_REQUIRED")),
            other => panic!("expected config error, got {:?}", other),
        }

        unsafe {
            env::set_var("UNFOLLOWR_TEST_REQUIRED", "value");
        }
        assert_eq!(required("UNFOLLOWR_TEST_REQUIRED").unwrap(), "value");
    }

    #[test]
    fn test_env_file_path_is_under_unfollowr() {
        let path = env_file_path();
        assert!(path.ends_with("unfollowr/.env"));
    }
}
