mod token;
mod unfollow;

pub use token::SESSION_KEY;
pub use token::TokenStore;
pub use unfollow::DEFAULT_DATABASE;
pub use unfollow::MemoryStore;
pub use unfollow::MongoStore;
pub use unfollow::UNFOLLOWED_COLLECTION;
pub use unfollow::UnfollowStore;
pub use unfollow::spawn_ensure_indexes;
pub use unfollow::spawn_upsert;
