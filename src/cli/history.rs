use tabled::Table;

use crate::{
    Res, config,
    management::{MongoStore, UnfollowStore},
    success,
    types::UnfollowTableRow,
    utils, warning,
};

/// Prints the persisted unfollow history as a table, newest first.
pub async fn history(search: Option<String>) -> Res<()> {
    let store = MongoStore::connect(&config::mongo_uri()).await?;
    let mut records = store.list().await?;

    if let Some(search_term) = search {
        utils::filter_records_by_name(&mut records, &search_term);
    }

    if records.is_empty() {
        warning!("No flagged artists found.");
        return Ok(());
    }

    let count = records.len();
    let table_rows: Vec<UnfollowTableRow> =
        records.into_iter().map(UnfollowTableRow::from).collect();
    println!("{}", Table::new(table_rows));
    success!("{} artists flagged", count);
    Ok(())
}
