use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::locations::models::{
    District, LocationHierarchy, Province, Regency, RegionLevel, RegionRecord, Village,
};
use crate::features::locations::store::{InMemoryRegionStore, RegionStore};

/// Region store backed by the `reg_*` tables in Postgres
pub struct PgRegionStore {
    pool: PgPool,
}

impl PgRegionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the whole registry into memory.
    ///
    /// The reference data is effectively immutable, so a snapshot taken at
    /// startup answers every lookup without touching the database again.
    pub async fn snapshot(&self) -> Result<InMemoryRegionStore> {
        let provinces = sqlx::query_as::<_, Province>(
            r#"SELECT id, name FROM reg_provinces ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load provinces: {:?}", e);
            AppError::Database(e)
        })?;

        let regencies = sqlx::query_as::<_, Regency>(
            r#"SELECT id, name, province_id FROM reg_regencies ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load regencies: {:?}", e);
            AppError::Database(e)
        })?;

        let districts = sqlx::query_as::<_, District>(
            r#"SELECT id, name, regency_id FROM reg_districts ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load districts: {:?}", e);
            AppError::Database(e)
        })?;

        let villages = sqlx::query_as::<_, Village>(
            r#"SELECT id, name, district_id FROM reg_villages ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load villages: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Loaded region snapshot: provinces={}, regencies={}, districts={}, villages={}",
            provinces.len(),
            regencies.len(),
            districts.len(),
            villages.len()
        );

        Ok(InMemoryRegionStore::from_rows(
            provinces, regencies, districts, villages,
        ))
    }

    /// Name lookup shared by the exact and partial queries.
    ///
    /// `name_predicate` must reference the name as `$1`; the parent filter,
    /// when present, is bound as `$2`.
    async fn find_by_name(
        &self,
        level: RegionLevel,
        name_predicate: &str,
        name_param: String,
        parent_id: Option<&str>,
    ) -> Result<Vec<RegionRecord>> {
        let mut sql = format!(
            "SELECT id, name, {} AS parent_id FROM {} WHERE {}",
            parent_select(level),
            level.table(),
            name_predicate
        );

        let parent_filter = match (level.parent_column(), parent_id) {
            (Some(column), Some(parent)) => {
                sql.push_str(&format!(" AND {} = $2", column));
                Some(parent)
            }
            _ => None,
        };
        sql.push_str(" ORDER BY id ASC");

        let mut query = sqlx::query_as::<_, RegionRecord>(&sql).bind(name_param);
        if let Some(parent) = parent_filter {
            query = query.bind(parent);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to lookup {} by name: {:?}", level, e);
            AppError::Database(e)
        })
    }
}

fn parent_select(level: RegionLevel) -> &'static str {
    level.parent_column().unwrap_or("NULL::text")
}

/// Escape `LIKE` wildcards so user input only ever matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn ancestry_sql(level: RegionLevel) -> &'static str {
    match level {
        RegionLevel::Village => {
            r#"
            SELECT v.id AS village_id, v.district_id, d.regency_id, r.province_id
            FROM reg_villages v
            LEFT JOIN reg_districts d ON v.district_id = d.id
            LEFT JOIN reg_regencies r ON d.regency_id = r.id
            WHERE v.id = $1
            "#
        }
        RegionLevel::District => {
            r#"
            SELECT NULL::text AS village_id, d.id AS district_id, d.regency_id, r.province_id
            FROM reg_districts d
            LEFT JOIN reg_regencies r ON d.regency_id = r.id
            WHERE d.id = $1
            "#
        }
        RegionLevel::Regency => {
            r#"
            SELECT NULL::text AS village_id, NULL::text AS district_id,
                   r.id AS regency_id, r.province_id
            FROM reg_regencies r
            WHERE r.id = $1
            "#
        }
        RegionLevel::Province => {
            r#"
            SELECT NULL::text AS village_id, NULL::text AS district_id,
                   NULL::text AS regency_id, p.id AS province_id
            FROM reg_provinces p
            WHERE p.id = $1
            "#
        }
    }
}

#[async_trait]
impl RegionStore for PgRegionStore {
    async fn find_by_id(&self, level: RegionLevel, id: &str) -> Result<Option<RegionRecord>> {
        let sql = format!(
            "SELECT id, name, {} AS parent_id FROM {} WHERE id = $1",
            parent_select(level),
            level.table()
        );

        sqlx::query_as::<_, RegionRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch {} by id {}: {:?}", level, id, e);
                AppError::Database(e)
            })
    }

    async fn find_by_exact_name(
        &self,
        level: RegionLevel,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<RegionRecord>> {
        self.find_by_name(level, "LOWER(name) = LOWER($1)", name.to_string(), parent_id)
            .await
    }

    async fn find_by_partial_name(
        &self,
        level: RegionLevel,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<RegionRecord>> {
        self.find_by_name(
            level,
            r#"name ILIKE '%' || $1 || '%' ESCAPE '\'"#,
            escape_like(name),
            parent_id,
        )
        .await
    }

    async fn find_ancestry(
        &self,
        level: RegionLevel,
        id: &str,
    ) -> Result<Option<LocationHierarchy>> {
        sqlx::query_as::<_, LocationHierarchy>(ancestry_sql(level))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch ancestry of {} {}: {:?}", level, id, e);
                AppError::Database(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("BANDUNG"), "BANDUNG");
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_parent_select_per_level() {
        assert_eq!(parent_select(RegionLevel::Province), "NULL::text");
        assert_eq!(parent_select(RegionLevel::Village), "district_id");
    }
}
