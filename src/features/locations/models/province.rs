use serde::Serialize;
use sqlx::FromRow;

/// Province model representing Indonesian provinces (provinsi)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Province {
    /// 2-digit code, e.g. "32"
    pub id: String,
    pub name: String,
}
