//! Cost-base operations built on the repos: registering catalog entries
//! (which also records the canonical self-mapping) and the grouped views the
//! budget composer consumes.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::database::models::CostCatalogEntry;
use crate::database::{cost_repo, mapping_repo};
use crate::types::errors::{AppError, AppResult};

/// Register (or refresh) a cost-catalog entry.
///
/// Besides the cost row, this upserts the item's self-mapping
/// (`raw_description = canonical_item`), carrying the group. The
/// self-mapping is what keeps catalog items addressable after a
/// price-history purge.
pub async fn register_cost_entry(
    pool: &SqlitePool,
    entry: &CostCatalogEntry,
    group_name: Option<&str>,
) -> AppResult<()> {
    let item = entry.canonical_item.trim();
    if item.is_empty() {
        return Err(AppError::Validation(
            "cost entry needs a canonical item name".into(),
        ));
    }

    cost_repo::upsert_cost_entry(pool, entry).await?;
    mapping_repo::upsert_mapping(pool, item, item, group_name, None).await?;
    Ok(())
}

/// Cataloged items grouped by classification group name. Items without a
/// group land under the empty-string key.
pub async fn items_by_group(pool: &SqlitePool) -> AppResult<BTreeMap<String, Vec<String>>> {
    let pairs = cost_repo::list_items_with_group(pool).await?;
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (group, item) in pairs {
        grouped.entry(group).or_default().push(item);
    }
    Ok(grouped)
}

/// Cost attributes for one canonical item; `NotFound` when not cataloged.
pub async fn cost_for_item(pool: &SqlitePool, canonical_item: &str) -> AppResult<CostCatalogEntry> {
    cost_repo::get_cost_entry(pool, canonical_item)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no cost entry for '{canonical_item}'")))
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
