//! # CLI Module
//!
//! Command implementations behind the `unfollowr` binary.
//!
//! - [`serve`] - Starts the HTTP service (MongoDB or in-memory history)
//! - [`history`] - Prints previously flagged artists from MongoDB
//!
//! ```bash
//! unfollowr serve                  # MongoDB from MONGO_URI
//! unfollowr serve --in-memory      # history kept in the process only
//! unfollowr history --search band  # filter by artist name
//! ```
//!
//! Commands report through the crate's logging macros and exit with status
//! 1 on unrecoverable errors.

mod history;
mod serve;

pub use history::history;
pub use serve::serve;
