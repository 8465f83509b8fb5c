use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::locations::models::{
    District, LocationHierarchy, Province, Regency, RegionLevel, RegionRecord, Village,
};
use crate::features::locations::store::RegionStore;

/// Pre-loaded, read-only copy of the registry.
///
/// Rows are kept per level in ID order, so every lookup returns rows in the
/// same order the Postgres store does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegionStore {
    provinces: BTreeMap<String, RegionRecord>,
    regencies: BTreeMap<String, RegionRecord>,
    districts: BTreeMap<String, RegionRecord>,
    villages: BTreeMap<String, RegionRecord>,
}

impl InMemoryRegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(
        provinces: Vec<Province>,
        regencies: Vec<Regency>,
        districts: Vec<District>,
        villages: Vec<Village>,
    ) -> Self {
        let mut store = Self::new();
        for province in provinces {
            store.insert(RegionLevel::Province, province.into());
        }
        for regency in regencies {
            store.insert(RegionLevel::Regency, regency.into());
        }
        for district in districts {
            store.insert(RegionLevel::District, district.into());
        }
        for village in villages {
            store.insert(RegionLevel::Village, village.into());
        }
        store
    }

    pub fn with_province(mut self, id: &str, name: &str) -> Self {
        self.insert(RegionLevel::Province, record(id, name, None));
        self
    }

    pub fn with_regency(mut self, id: &str, name: &str, province_id: &str) -> Self {
        self.insert(RegionLevel::Regency, record(id, name, Some(province_id)));
        self
    }

    pub fn with_district(mut self, id: &str, name: &str, regency_id: &str) -> Self {
        self.insert(RegionLevel::District, record(id, name, Some(regency_id)));
        self
    }

    pub fn with_village(mut self, id: &str, name: &str, district_id: &str) -> Self {
        self.insert(RegionLevel::Village, record(id, name, Some(district_id)));
        self
    }

    /// Number of rows held at `level`
    pub fn len(&self, level: RegionLevel) -> usize {
        self.rows(level).len()
    }

    fn insert(&mut self, level: RegionLevel, row: RegionRecord) {
        let rows = match level {
            RegionLevel::Province => &mut self.provinces,
            RegionLevel::Regency => &mut self.regencies,
            RegionLevel::District => &mut self.districts,
            RegionLevel::Village => &mut self.villages,
        };
        rows.insert(row.id.clone(), row);
    }

    fn rows(&self, level: RegionLevel) -> &BTreeMap<String, RegionRecord> {
        match level {
            RegionLevel::Province => &self.provinces,
            RegionLevel::Regency => &self.regencies,
            RegionLevel::District => &self.districts,
            RegionLevel::Village => &self.villages,
        }
    }

    fn filter_by_name<F>(
        &self,
        level: RegionLevel,
        parent_id: Option<&str>,
        predicate: F,
    ) -> Vec<RegionRecord>
    where
        F: Fn(&str) -> bool,
    {
        // Provinces have no parent column, so a parent filter never applies to them
        let parent_id = parent_id.filter(|_| level.parent().is_some());

        self.rows(level)
            .values()
            .filter(|row| match parent_id {
                Some(parent) => row.parent_id.as_deref() == Some(parent),
                None => true,
            })
            .filter(|row| predicate(&row.name.to_lowercase()))
            .cloned()
            .collect()
    }

    fn parent_of(&self, level: RegionLevel, id: &str) -> Option<String> {
        self.rows(level).get(id).and_then(|row| row.parent_id.clone())
    }
}

fn record(id: &str, name: &str, parent_id: Option<&str>) -> RegionRecord {
    RegionRecord {
        id: id.to_string(),
        name: name.to_string(),
        parent_id: parent_id.map(str::to_string),
    }
}

#[async_trait]
impl RegionStore for InMemoryRegionStore {
    async fn find_by_id(&self, level: RegionLevel, id: &str) -> Result<Option<RegionRecord>> {
        Ok(self.rows(level).get(id).cloned())
    }

    async fn find_by_exact_name(
        &self,
        level: RegionLevel,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<RegionRecord>> {
        let needle = name.to_lowercase();
        Ok(self.filter_by_name(level, parent_id, |candidate| candidate == needle))
    }

    async fn find_by_partial_name(
        &self,
        level: RegionLevel,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<RegionRecord>> {
        let needle = name.to_lowercase();
        Ok(self.filter_by_name(level, parent_id, |candidate| {
            candidate.contains(&needle)
        }))
    }

    async fn find_ancestry(
        &self,
        level: RegionLevel,
        id: &str,
    ) -> Result<Option<LocationHierarchy>> {
        if !self.rows(level).contains_key(id) {
            return Ok(None);
        }

        // Walk upwards, mirroring the LEFT JOIN chain: a dangling parent
        // reference leaves the remaining ancestors empty
        let mut hierarchy = LocationHierarchy::default();
        let mut current = Some(id.to_string());
        let mut current_level = Some(level);
        while let (Some(lvl), Some(row_id)) = (current_level, current.clone()) {
            let parent = self.parent_of(lvl, &row_id);
            match lvl {
                RegionLevel::Village => hierarchy.village_id = Some(row_id),
                RegionLevel::District => hierarchy.district_id = Some(row_id),
                RegionLevel::Regency => hierarchy.regency_id = Some(row_id),
                RegionLevel::Province => hierarchy.province_id = Some(row_id),
            }
            current = parent;
            current_level = lvl.parent();
        }

        Ok(Some(hierarchy))
    }
}
