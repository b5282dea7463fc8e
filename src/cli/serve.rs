use crate::{
    Res,
    api::AppState,
    config::Settings,
    info,
    management::{MemoryStore, MongoStore, spawn_ensure_indexes},
    server,
};

/// Runs the HTTP service until it is stopped.
///
/// With `in_memory` the unfollow history only lives as long as the process;
/// otherwise it goes to MongoDB. A MongoDB that is down at startup is not
/// fatal: persistence is best-effort and failures are logged per request.
pub async fn serve(in_memory: bool) -> Res<()> {
    let settings = Settings::from_env()?;

    if in_memory {
        info!("Keeping unfollow history in memory");
        server::start_api_server(AppState::new(settings, MemoryStore::new())).await?;
        return Ok(());
    }

    let store = MongoStore::connect(&settings.mongo_uri).await?;
    spawn_ensure_indexes(store.clone());

    server::start_api_server(AppState::new(settings, store)).await?;
    Ok(())
}
