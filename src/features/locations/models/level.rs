use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::validation::DIGITS_REGEX;

/// Regency prefix groups, tried in order when a partial name matches
/// several regencies and no province scope is known.
const REGENCY_TIE_BREAK: &[&[&str]] = &[&["KOTA "], &["KAB.", "KABUPATEN "]];

/// One level of the Indonesian administrative hierarchy (wilayah)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegionLevel {
    /// Provinsi
    Province,
    /// Kabupaten/Kota
    Regency,
    /// Kecamatan
    District,
    /// Kelurahan/Desa
    Village,
}

impl RegionLevel {
    pub const ALL: [RegionLevel; 4] = [
        RegionLevel::Province,
        RegionLevel::Regency,
        RegionLevel::District,
        RegionLevel::Village,
    ];

    /// Width of a canonical ID at this level (digits, no separators)
    pub fn id_width(self) -> usize {
        match self {
            RegionLevel::Province => 2,
            RegionLevel::Regency => 4,
            RegionLevel::District => 6,
            RegionLevel::Village => 10,
        }
    }

    pub fn parent(self) -> Option<RegionLevel> {
        match self {
            RegionLevel::Province => None,
            RegionLevel::Regency => Some(RegionLevel::Province),
            RegionLevel::District => Some(RegionLevel::Regency),
            RegionLevel::Village => Some(RegionLevel::District),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionLevel::Province => "Province",
            RegionLevel::Regency => "Regency",
            RegionLevel::District => "District",
            RegionLevel::Village => "Village",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            RegionLevel::Province => "reg_provinces",
            RegionLevel::Regency => "reg_regencies",
            RegionLevel::District => "reg_districts",
            RegionLevel::Village => "reg_villages",
        }
    }

    /// Foreign-key column pointing at the parent level, `None` for provinces
    pub fn parent_column(self) -> Option<&'static str> {
        match self {
            RegionLevel::Province => None,
            RegionLevel::Regency => Some("province_id"),
            RegionLevel::District => Some("regency_id"),
            RegionLevel::Village => Some("district_id"),
        }
    }

    /// Prefix groups used to break ties between several partial matches.
    ///
    /// Groups are tried in order. A group wins when exactly one candidate
    /// carries one of its prefixes; a group with several hits stops the
    /// search, a group with none falls through to the next.
    pub fn tie_break_rules(self) -> &'static [&'static [&'static str]] {
        match self {
            RegionLevel::Regency => REGENCY_TIE_BREAK,
            _ => &[],
        }
    }

    /// Whether `token` already has the shape of a canonical ID at this level
    pub fn is_canonical_id(self, token: &str) -> bool {
        token.len() == self.id_width() && DIGITS_REGEX.is_match(token)
    }
}

impl fmt::Display for RegionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
