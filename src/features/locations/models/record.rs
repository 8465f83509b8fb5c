use serde::Serialize;
use sqlx::FromRow;

use super::{District, Province, Regency, Village};

/// Level-agnostic row shape returned by a [`RegionStore`](crate::features::locations::store::RegionStore)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RegionRecord {
    pub id: String,
    pub name: String,
    /// `None` only for provinces
    pub parent_id: Option<String>,
}

impl From<Province> for RegionRecord {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
            parent_id: None,
        }
    }
}

impl From<Regency> for RegionRecord {
    fn from(regency: Regency) -> Self {
        Self {
            id: regency.id,
            name: regency.name,
            parent_id: Some(regency.province_id),
        }
    }
}

impl From<District> for RegionRecord {
    fn from(district: District) -> Self {
        Self {
            id: district.id,
            name: district.name,
            parent_id: Some(district.regency_id),
        }
    }
}

impl From<Village> for RegionRecord {
    fn from(village: Village) -> Self {
        Self {
            id: village.id,
            name: village.name,
            parent_id: Some(village.district_id),
        }
    }
}
