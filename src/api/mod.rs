//! # API Module
//!
//! HTTP endpoints of the unfollowr service.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /auth/spotify/login`, redirects (302) to the Spotify
//!   authorization page
//! - [`callback`] - `GET /auth/spotify/callback`, exchanges the code, stores
//!   the credential and redirects to `<FRONTEND_URI>/connected`
//!
//! ### User Data
//!
//! - [`user_data`] - `GET /user/data`, returns `{artistsToUnfollow: [...]}`
//! - [`history`] - `GET /user/history`, returns previously flagged artists
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, status and version
//!
//! ## Shared State
//!
//! Handlers receive an [`AppState`] through an `Extension` layer. It owns
//! the settings, one HTTP client, the credential store and the history
//! store; nothing lives in globals.
//!
//! ## Errors
//!
//! Handlers return [`crate::error::AppError`], which renders the fixed
//! `401`/`500` bodies clients rely on.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::Settings,
    management::{TokenStore, UnfollowStore},
};

mod auth;
mod health;
mod user;

pub use auth::callback;
pub use auth::login;
pub use health::health;
pub use user::history;
pub use user::user_data;

#[derive(Clone)]
pub struct AppState<S> {
    pub settings: Arc<Settings>,
    pub http: Client,
    pub tokens: TokenStore,
    pub store: S,
}

impl<S: UnfollowStore> AppState<S> {
    pub fn new(settings: Settings, store: S) -> Self {
        Self {
            settings: Arc::new(settings),
            http: Client::new(),
            tokens: TokenStore::new(),
            store,
        }
    }
}
