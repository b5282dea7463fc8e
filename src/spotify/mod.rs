//! # Spotify Integration Module
//!
//! Thin wrappers around the Spotify accounts service and Web API.
//!
//! ## Modules
//!
//! - [`auth`] - Authorization URL construction and the authorization-code
//!   exchange (client id/secret via HTTP Basic auth)
//! - [`artists`] - Top artists per listening window and the full list of
//!   followed artists
//!
//! ## Endpoints Used
//!
//! - `GET /authorize` - User consent page (browser redirect only)
//! - `POST /api/token` - Authorization code exchange
//! - `GET /me/top/artists` - Top artists for `short_term`, `medium_term`
//!   and `long_term`
//! - `GET /me/following?type=artist` - Followed artists, cursor paginated
//!
//! ## Error Handling
//!
//! Every call fails fast. Non-2xx replies are turned into errors with
//! `error_for_status()`, and nothing is retried: an expired token, a rate
//! limit and a dropped connection all surface the same way to the caller.
//!
//! All base URLs come from [`crate::config::Settings`], so the functions
//! here can be pointed at any compatible server.

pub mod artists;
pub mod auth;
