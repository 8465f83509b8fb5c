//! Read-only access to the geographic reference registry.
//!
//! The resolver only talks to a [`RegionStore`], so the same control flow runs
//! against Postgres in production and against a pre-loaded tree in tests.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::locations::models::{LocationHierarchy, RegionLevel, RegionRecord};

pub use memory::InMemoryRegionStore;
pub use postgres::PgRegionStore;

#[async_trait]
pub trait RegionStore: Send + Sync {
    /// Look up a single row by canonical ID
    async fn find_by_id(&self, level: RegionLevel, id: &str) -> Result<Option<RegionRecord>>;

    /// Case-insensitive equality on name, optionally restricted to one parent
    async fn find_by_exact_name(
        &self,
        level: RegionLevel,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<RegionRecord>>;

    /// Case-insensitive substring match on name, optionally restricted to one parent
    async fn find_by_partial_name(
        &self,
        level: RegionLevel,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<RegionRecord>>;

    /// Canonical chain from the row `id` at `level` up to its province.
    ///
    /// Levels below `level` are left empty.
    async fn find_ancestry(
        &self,
        level: RegionLevel,
        id: &str,
    ) -> Result<Option<LocationHierarchy>>;
}
