use serde::Serialize;
use sqlx::FromRow;

/// Regency model representing Indonesian regencies/cities (kabupaten/kota).
///
/// Names are only unique within a province.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Regency {
    /// 4-digit code, e.g. "3273"
    pub id: String,
    pub name: String,
    pub province_id: String,
}
