use serde::Serialize;
use sqlx::FromRow;

/// District model representing Indonesian districts (kecamatan)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct District {
    pub id: String,
    pub name: String,
    pub regency_id: String,
}
