use serde::Serialize;
use sqlx::FromRow;

/// Village model representing Indonesian villages (kelurahan/desa)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Village {
    /// 10-digit code, e.g. "3273010001"
    pub id: String,
    pub name: String,
    pub district_id: String,
}
