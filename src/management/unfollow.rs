use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, IndexModel,
    bson::{DateTime as BsonDateTime, doc},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    error::AppError,
    info,
    types::{ArtistRef, UnfollowRecord},
    utils, warning,
};

/// Collection backing the `UnfollowedArtist` model.
pub const UNFOLLOWED_COLLECTION: &str = "unfollowedartists";

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "spotifyApp";

/// History of artists flagged for unfollowing, keyed by Spotify id.
pub trait UnfollowStore: Clone + Send + Sync + 'static {
    /// Inserts or refreshes one record per artist.
    ///
    /// Existing records get their `name` and `unfollowed_at` overwritten;
    /// earlier timestamps are not kept. Returns the number of records written.
    fn upsert_many(
        &self,
        artists: &[ArtistRef],
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<usize, AppError>> + Send;

    /// All records, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<UnfollowRecord>, AppError>> + Send;
}

/// Persists `artists` in the background.
///
/// The caller does not have to wait: the outcome is logged by the task
/// itself, and the returned handle can be awaited or dropped. Nothing is
/// spawned for an empty list.
pub fn spawn_upsert<S: UnfollowStore>(
    store: S,
    artists: Vec<ArtistRef>,
) -> Option<JoinHandle<Result<usize, AppError>>> {
    if artists.is_empty() {
        return None;
    }

    Some(tokio::spawn(async move {
        let result = store.upsert_many(&artists, Utc::now()).await;
        match &result {
            Ok(count) => info!("Recorded {} unfollow candidates", count),
            Err(e) => warning!("DB save error: {}", e),
        }
        result
    }))
}

/// Creates the history indexes without holding up the caller.
///
/// An unreachable server only surfaces once server selection times out, so
/// the outcome is logged from the task and startup carries on regardless.
pub fn spawn_ensure_indexes(store: MongoStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        match store.ensure_indexes().await {
            Ok(()) => info!("MongoDB connected"),
            Err(e) => warning!("MongoDB connection error: {}", e),
        }
    })
}

/// Runs `op` on every item, even after a failure.
///
/// Returns the item count when all succeed, otherwise the first error seen.
async fn attempt_all<T, F, Fut>(items: &[T], mut op: F) -> Result<usize, AppError>
where
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<(), AppError>>,
{
    let mut first_error = None;
    for item in items {
        if let Err(e) = op(item).await {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(items.len()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UnfollowedArtistDoc {
    #[serde(rename = "spotifyId")]
    spotify_id: String,
    name: String,
    #[serde(rename = "unfollowedAt")]
    unfollowed_at: BsonDateTime,
}

impl From<UnfollowedArtistDoc> for UnfollowRecord {
    fn from(doc: UnfollowedArtistDoc) -> Self {
        UnfollowRecord {
            spotify_id: doc.spotify_id,
            name: doc.name,
            unfollowed_at: DateTime::from_timestamp_millis(doc.unfollowed_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

fn records_from_docs(docs: Vec<UnfollowedArtistDoc>) -> Vec<UnfollowRecord> {
    let mut records: Vec<UnfollowRecord> = docs.into_iter().map(UnfollowRecord::from).collect();
    utils::sort_records_newest_first(&mut records);
    records
}

/// MongoDB-backed history.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<UnfollowedArtistDoc>,
}

impl MongoStore {
    /// Parses `uri` and opens the history collection.
    ///
    /// The driver connects lazily, so an unreachable server only shows up on
    /// the first operation.
    pub async fn connect(uri: &str) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        Ok(Self {
            collection: db.collection(UNFOLLOWED_COLLECTION),
        })
    }

    /// Creates the unique index on `spotifyId`.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let options = IndexOptions::builder().unique(true).build();
        let index = IndexModel::builder()
            .keys(doc! { "spotifyId": 1 })
            .options(options)
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

impl UnfollowStore for MongoStore {
    async fn upsert_many(
        &self,
        artists: &[ArtistRef],
        at: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let stamp = BsonDateTime::from_millis(at.timestamp_millis());
        let collection = &self.collection;

        attempt_all(artists, |artist| {
            let filter = doc! { "spotifyId": artist.id.as_str() };
            let update = doc! { "$set": { "name": artist.name.as_str(), "unfollowedAt": stamp } };
            async move {
                collection.update_one(filter, update).upsert(true).await?;
                Ok::<(), AppError>(())
            }
        })
        .await
    }

    async fn list(&self) -> Result<Vec<UnfollowRecord>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<UnfollowedArtistDoc> = cursor.try_collect().await?;
        Ok(records_from_docs(docs))
    }
}

/// Process-local history, lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, UnfollowRecord>>>,
    upserts: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times [`UnfollowStore::upsert_many`] has been called.
    pub fn upsert_calls(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

impl UnfollowStore for MemoryStore {
    async fn upsert_many(
        &self,
        artists: &[ArtistRef],
        at: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.lock().await;
        for artist in artists {
            records.insert(
                artist.id.clone(),
                UnfollowRecord {
                    spotify_id: artist.id.clone(),
                    name: artist.name.clone(),
                    unfollowed_at: at,
                },
            );
        }
        Ok(artists.len())
    }

    async fn list(&self) -> Result<Vec<UnfollowRecord>, AppError> {
        let mut records: Vec<UnfollowRecord> =
            self.records.lock().await.values().cloned().collect();
        utils::sort_records_newest_first(&mut records);
        Ok(records)
    }
}
