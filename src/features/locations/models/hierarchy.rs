use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::RegionLevel;

/// Canonical, internally consistent location path.
///
/// Every populated ID comes from the registry, never from caller input.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LocationHierarchy {
    pub province_id: Option<String>,
    pub regency_id: Option<String>,
    pub district_id: Option<String>,
    pub village_id: Option<String>,
}

impl LocationHierarchy {
    pub fn get(&self, level: RegionLevel) -> Option<&str> {
        match level {
            RegionLevel::Province => self.province_id.as_deref(),
            RegionLevel::Regency => self.regency_id.as_deref(),
            RegionLevel::District => self.district_id.as_deref(),
            RegionLevel::Village => self.village_id.as_deref(),
        }
    }
}

/// Raw IDs as supplied by a caller, one per level.
///
/// Blank strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationIds {
    pub province_id: Option<String>,
    pub regency_id: Option<String>,
    pub district_id: Option<String>,
    pub village_id: Option<String>,
}

impl LocationIds {
    /// The supplied ID for `level`, trimmed; `None` when absent or blank
    pub fn get(&self, level: RegionLevel) -> Option<&str> {
        let value = match level {
            RegionLevel::Province => self.province_id.as_deref(),
            RegionLevel::Regency => self.regency_id.as_deref(),
            RegionLevel::District => self.district_id.as_deref(),
            RegionLevel::Village => self.village_id.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, level: RegionLevel, id: Option<String>) {
        match level {
            RegionLevel::Province => self.province_id = id,
            RegionLevel::Regency => self.regency_id = id,
            RegionLevel::District => self.district_id = id,
            RegionLevel::Village => self.village_id = id,
        }
    }

    /// Most specific level with a non-blank ID, together with that ID
    pub fn most_specific(&self) -> Option<(RegionLevel, &str)> {
        RegionLevel::ALL
            .into_iter()
            .rev()
            .find_map(|level| self.get(level).map(|id| (level, id)))
    }
}

impl From<LocationHierarchy> for LocationIds {
    fn from(hierarchy: LocationHierarchy) -> Self {
        Self {
            province_id: hierarchy.province_id,
            regency_id: hierarchy.regency_id,
            district_id: hierarchy.district_id,
            village_id: hierarchy.village_id,
        }
    }
}

/// Free-text location tokens, one per level, plus optional parent hints.
///
/// Each token may be blank, a canonical ID, an exact name, or part of a name.
/// Without an explicit hint a level is scoped by whatever its parent level
/// resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationInput {
    pub province: Option<String>,
    pub regency: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
    pub regency_parent: Option<String>,
    pub district_parent: Option<String>,
    pub village_parent: Option<String>,
}

impl LocationInput {
    pub fn token(&self, level: RegionLevel) -> Option<&str> {
        let token = match level {
            RegionLevel::Province => self.province.as_deref(),
            RegionLevel::Regency => self.regency.as_deref(),
            RegionLevel::District => self.district.as_deref(),
            RegionLevel::Village => self.village.as_deref(),
        };
        token.filter(|t| !t.trim().is_empty())
    }

    /// Explicit parent hint for `level`, ignoring blank values
    pub fn parent_hint(&self, level: RegionLevel) -> Option<&str> {
        let hint = match level {
            RegionLevel::Province => None,
            RegionLevel::Regency => self.regency_parent.as_deref(),
            RegionLevel::District => self.district_parent.as_deref(),
            RegionLevel::Village => self.village_parent.as_deref(),
        };
        hint.filter(|h| !h.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_specific_skips_blank() {
        let ids = LocationIds {
            province_id: Some("32".to_string()),
            regency_id: Some("3273".to_string()),
            district_id: Some("   ".to_string()),
            village_id: None,
        };
        assert_eq!(ids.most_specific(), Some((RegionLevel::Regency, "3273")));
        assert_eq!(LocationIds::default().most_specific(), None);
    }

    #[test]
    fn test_blank_parent_hint_is_ignored() {
        let input = LocationInput {
            regency: Some("BANDUNG".to_string()),
            regency_parent: Some("32".to_string()),
            district_parent: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(input.parent_hint(RegionLevel::Regency), Some("32"));
        assert_eq!(input.parent_hint(RegionLevel::District), None);
        assert_eq!(input.parent_hint(RegionLevel::Province), None);
    }
}
