use std::sync::Arc;

use crate::core::error::Result;
use crate::features::locations::error::LocationError;
use crate::features::locations::models::{
    LocationHierarchy, LocationIds, LocationInput, RegionLevel, RegionRecord,
};
use crate::features::locations::store::RegionStore;

/// Resolves free-text or ID location input into a canonical, consistent
/// province → regency → district → village path.
///
/// Ambiguous or conflicting input always fails; the resolver never guesses
/// between two equally plausible regions.
pub struct LocationResolver {
    store: Arc<dyn RegionStore>,
}

impl LocationResolver {
    pub fn new(store: Arc<dyn RegionStore>) -> Self {
        Self { store }
    }

    // ==================== Top-level Resolution ====================

    /// Resolve every level of `input`, then check the result for consistency.
    ///
    /// A level is scoped by its explicit parent hint when one is given,
    /// otherwise by the ID its parent level resolved to (if any).
    pub async fn resolve(&self, input: &LocationInput) -> Result<LocationHierarchy> {
        let mut ids = LocationIds::default();

        for level in RegionLevel::ALL {
            let Some(token) = input.token(level) else {
                continue;
            };

            let resolved = match input.parent_hint(level) {
                Some(hint) => self.resolve_level(level, token, Some(hint)).await?,
                None => {
                    let scope = level.parent().and_then(|parent| ids.get(parent));
                    self.resolve_scoped(level, token, scope).await?
                }
            };
            ids.set(level, resolved);
        }

        self.resolve_hierarchy(&ids).await
    }

    // ==================== Per-level Resolution ====================

    /// Turn one token into a canonical ID at `level`.
    ///
    /// `parent_token` may itself be a name or an ID; it is resolved at the
    /// parent level (unscoped) and used to narrow the name search. Returns
    /// `None` for a blank token.
    pub async fn resolve_level(
        &self,
        level: RegionLevel,
        token: &str,
        parent_token: Option<&str>,
    ) -> Result<Option<String>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let parent_id = match (level.parent(), parent_token) {
            (Some(parent_level), Some(parent_token)) => {
                self.resolve_scoped(parent_level, parent_token, None)
                    .await?
            }
            _ => None,
        };

        self.resolve_scoped(level, token, parent_id.as_deref())
            .await
    }

    /// Per-level lookup with an already-resolved parent scope
    async fn resolve_scoped(
        &self,
        level: RegionLevel,
        token: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<String>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        if level.is_canonical_id(token) {
            let row = self
                .store
                .find_by_id(level, token)
                .await?
                .ok_or_else(|| LocationError::IdNotFound {
                    level,
                    value: token.to_string(),
                })?;
            return Ok(Some(row.id));
        }

        let exact = self
            .store
            .find_by_exact_name(level, token, parent_id)
            .await?;
        match exact.len() {
            0 => {}
            1 => return Ok(Some(single_id(level, token, exact))),
            matches => return Err(too_many(level, token, parent_id, matches).into()),
        }

        let partial = self
            .store
            .find_by_partial_name(level, token, parent_id)
            .await?;
        match partial.len() {
            0 => Err(LocationError::NameNotFound {
                level,
                value: token.to_string(),
                parent_id: parent_id.map(str::to_string),
            }
            .into()),
            1 => Ok(Some(single_id(level, token, partial))),
            matches if parent_id.is_none() => match tie_break(level, &partial) {
                Some(row) => {
                    tracing::debug!(
                        "Tie-break picked {} '{}' for '{}' out of {} matches",
                        level,
                        row.name,
                        token,
                        matches
                    );
                    Ok(Some(row.id.clone()))
                }
                None => Err(too_many(level, token, parent_id, matches).into()),
            },
            matches => Err(too_many(level, token, parent_id, matches).into()),
        }
    }

    // ==================== Hierarchy Consistency ====================

    /// Derive the canonical path from the most specific ID supplied and check
    /// every other supplied ID against it.
    ///
    /// Fails on the first conflict, closest ancestor first.
    pub async fn resolve_hierarchy(&self, ids: &LocationIds) -> Result<LocationHierarchy> {
        let Some((level, id)) = ids.most_specific() else {
            return Ok(LocationHierarchy::default());
        };

        let canonical = self
            .store
            .find_ancestry(level, id)
            .await?
            .ok_or_else(|| LocationError::IdNotFound {
                level,
                value: id.to_string(),
            })?;

        let mut ancestor = level.parent();
        while let Some(ancestor_level) = ancestor {
            if let Some(provided) = ids.get(ancestor_level) {
                let expected = canonical.get(ancestor_level).unwrap_or("-");
                if provided != expected {
                    return Err(LocationError::Mismatch {
                        level: ancestor_level,
                        child_level: level,
                        child_id: id.to_string(),
                        expected: expected.to_string(),
                        provided: provided.to_string(),
                    }
                    .into());
                }
            }
            ancestor = ancestor_level.parent();
        }

        tracing::debug!(
            "Resolved location: province={:?}, regency={:?}, district={:?}, village={:?}",
            canonical.province_id,
            canonical.regency_id,
            canonical.district_id,
            canonical.village_id
        );

        Ok(canonical)
    }
}

fn single_id(level: RegionLevel, token: &str, rows: Vec<RegionRecord>) -> String {
    let id = rows.into_iter().map(|row| row.id).next().unwrap_or_default();
    tracing::debug!("Resolved {} '{}' -> {}", level, token, id);
    id
}

/// Error for a name that matches several rows
fn too_many(
    level: RegionLevel,
    token: &str,
    parent_id: Option<&str>,
    matches: usize,
) -> LocationError {
    match (parent_id, level.parent()) {
        (Some(parent_id), Some(parent_level)) => LocationError::DuplicateInScope {
            level,
            value: token.to_string(),
            parent_level,
            parent_id: parent_id.to_string(),
            matches,
        },
        _ => LocationError::Ambiguous {
            level,
            value: token.to_string(),
            parent_level: level.parent(),
            matches,
        },
    }
}

/// Pick a single candidate using the level's prefix rules, if they settle it
fn tie_break(level: RegionLevel, candidates: &[RegionRecord]) -> Option<&RegionRecord> {
    for prefixes in level.tie_break_rules() {
        let hits: Vec<&RegionRecord> = candidates
            .iter()
            .filter(|row| {
                let name = row.name.to_uppercase();
                prefixes.iter().any(|prefix| name.starts_with(prefix))
            })
            .collect();

        match hits.as_slice() {
            [] => continue,
            [only] => return Some(only),
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::locations::error::LocationErrorKind;
    use crate::features::locations::store::InMemoryRegionStore;
    use tokio_test::{assert_err, assert_ok};

    fn registry() -> InMemoryRegionStore {
        InMemoryRegionStore::new()
            .with_province("32", "JAWA BARAT")
            .with_province("33", "JAWA TENGAH")
            .with_province("35", "JAWA TIMUR")
            .with_regency("3273", "KOTA BANDUNG", "32")
            .with_regency("3204", "KABUPATEN BANDUNG", "32")
            .with_regency("3217", "KABUPATEN BANDUNG BARAT", "32")
            .with_regency("3374", "KOTA SEMARANG", "33")
            .with_regency("3322", "KABUPATEN SEMARANG", "33")
            // Same name in two provinces
            .with_regency("3310", "KABUPATEN KLATEN", "33")
            .with_regency("3510", "KABUPATEN KLATEN", "35")
            .with_district("327301", "SUKASARI", "3273")
            .with_district("327302", "COBLONG", "3273")
            .with_district("320401", "SUKASARI", "3204")
            .with_village("3273010001", "SARIJADI", "327301")
            .with_village("3273010002", "SUKARASA", "327301")
            .with_village("3273020001", "DAGO", "327302")
    }

    fn resolver() -> LocationResolver {
        LocationResolver::new(Arc::new(registry()))
    }

    fn location_error(result: Result<impl std::fmt::Debug>) -> LocationError {
        match assert_err!(result) {
            AppError::Location(err) => err,
            other => panic!("expected a location error, got {:?}", other),
        }
    }

    // ==================== Per-level ====================

    #[tokio::test]
    async fn test_blank_token_resolves_to_none() {
        let resolver = resolver();
        for level in RegionLevel::ALL {
            let resolved = assert_ok!(resolver.resolve_level(level, "   ", None).await);
            assert_eq!(resolved, None);
        }
    }

    #[tokio::test]
    async fn test_blank_token_ignores_unknown_parent_hint() {
        let resolver = resolver();
        let resolved = assert_ok!(
            resolver
                .resolve_level(RegionLevel::Regency, "  ", Some("ATLANTIS"))
                .await
        );
        assert_eq!(resolved, None);

        let input = LocationInput {
            regency: Some(String::new()),
            regency_parent: Some("ATLANTIS".to_string()),
            ..Default::default()
        };
        let resolved = assert_ok!(resolver.resolve(&input).await);
        assert_eq!(resolved, LocationHierarchy::default());
    }

    #[tokio::test]
    async fn test_canonical_id_short_circuits() {
        let resolver = resolver();
        let cases = [
            (RegionLevel::Province, "32", "99"),
            (RegionLevel::Regency, "3273", "3299"),
            (RegionLevel::District, "327301", "329999"),
            (RegionLevel::Village, "3273010001", "3299999999"),
        ];

        for (level, known, missing) in cases {
            let resolved = assert_ok!(resolver.resolve_level(level, known, None).await);
            assert_eq!(resolved.as_deref(), Some(known));

            let err = location_error(resolver.resolve_level(level, missing, None).await);
            assert_eq!(
                err,
                LocationError::IdNotFound {
                    level,
                    value: missing.to_string(),
                }
            );
        }
    }

    #[tokio::test]
    async fn test_exact_match_wins_over_partial_matches() {
        // Also a substring of "KABUPATEN BANDUNG BARAT"
        let resolved = assert_ok!(
            resolver()
                .resolve_level(RegionLevel::Regency, "kabupaten bandung", None)
                .await
        );
        assert_eq!(resolved.as_deref(), Some("3204"));
    }

    #[tokio::test]
    async fn test_duplicate_name_without_scope_is_ambiguous() {
        let err = location_error(
            resolver()
                .resolve_level(RegionLevel::Regency, "KABUPATEN KLATEN", None)
                .await,
        );
        assert_eq!(err.kind(), LocationErrorKind::Ambiguous);
        assert_eq!(err.level(), RegionLevel::Regency);
        assert!(err.to_string().contains("Province"));
    }

    #[tokio::test]
    async fn test_duplicate_name_with_parent_hint() {
        let resolver = resolver();
        let by_name = assert_ok!(
            resolver
                .resolve_level(RegionLevel::Regency, "KABUPATEN KLATEN", Some("Jawa Timur"))
                .await
        );
        assert_eq!(by_name.as_deref(), Some("3510"));

        let by_id = assert_ok!(
            resolver
                .resolve_level(RegionLevel::Regency, "KABUPATEN KLATEN", Some("33"))
                .await
        );
        assert_eq!(by_id.as_deref(), Some("3310"));
    }

    #[tokio::test]
    async fn test_regency_tie_break_prefers_kota() {
        let resolved = assert_ok!(
            resolver()
                .resolve_level(RegionLevel::Regency, "SEMARANG", None)
                .await
        );
        assert_eq!(resolved.as_deref(), Some("3374"));
    }

    #[tokio::test]
    async fn test_regency_tie_break_falls_back_to_kabupaten() {
        let store = InMemoryRegionStore::new()
            .with_province("32", "JAWA BARAT")
            .with_regency("3201", "KABUPATEN BOGOR", "32")
            .with_regency("3299", "BOGOR RAYA", "32");
        let resolver = LocationResolver::new(Arc::new(store));

        let resolved = assert_ok!(
            resolver
                .resolve_level(RegionLevel::Regency, "BOGOR", None)
                .await
        );
        assert_eq!(resolved.as_deref(), Some("3201"));
    }

    #[tokio::test]
    async fn test_regency_tie_break_needs_a_single_hit() {
        // KOTA BANDUNG is the single "KOTA " hit, so it wins even though two
        // kabupaten also match
        let resolver = resolver();
        let resolved = assert_ok!(
            resolver
                .resolve_level(RegionLevel::Regency, "BANDUNG", None)
                .await
        );
        assert_eq!(resolved.as_deref(), Some("3273"));

        let store = InMemoryRegionStore::new()
            .with_province("32", "JAWA BARAT")
            .with_regency("3204", "KABUPATEN BANDUNG", "32")
            .with_regency("3217", "KABUPATEN BANDUNG BARAT", "32");
        let resolver = LocationResolver::new(Arc::new(store));
        let err = location_error(
            resolver
                .resolve_level(RegionLevel::Regency, "BANDUNG", None)
                .await,
        );
        assert_eq!(err.kind(), LocationErrorKind::Ambiguous);
    }

    #[tokio::test]
    async fn test_districts_have_no_tie_break() {
        let err = location_error(
            resolver()
                .resolve_level(RegionLevel::District, "SUKA", None)
                .await,
        );
        assert!(matches!(
            err,
            LocationError::Ambiguous {
                level: RegionLevel::District,
                parent_level: Some(RegionLevel::Regency),
                matches: 2,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_multiple_matches_within_scope() {
        let err = location_error(
            resolver()
                .resolve_level(RegionLevel::Regency, "BANDUNG", Some("32"))
                .await,
        );
        assert_eq!(err.kind(), LocationErrorKind::NotFound);
        assert!(matches!(err, LocationError::DuplicateInScope { matches: 3, .. }));
    }

    #[tokio::test]
    async fn test_unknown_name_not_found() {
        let err = location_error(
            resolver()
                .resolve_level(RegionLevel::Village, "ATLANTIS", None)
                .await,
        );
        assert_eq!(err.kind(), LocationErrorKind::NotFound);
        assert_eq!(err.to_string(), "Village 'ATLANTIS' not found");
    }

    #[tokio::test]
    async fn test_unresolvable_parent_hint_fails() {
        let err = location_error(
            resolver()
                .resolve_level(RegionLevel::District, "COBLONG", Some("KOTA ANTAH"))
                .await,
        );
        assert_eq!(err.level(), RegionLevel::Regency);
        assert_eq!(err.kind(), LocationErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_province_partial_match_is_ambiguous() {
        let err = location_error(
            resolver()
                .resolve_level(RegionLevel::Province, "JAWA", None)
                .await,
        );
        assert!(matches!(
            err,
            LocationError::Ambiguous {
                parent_level: None,
                matches: 3,
                ..
            }
        ));
    }

    // ==================== Hierarchy ====================

    #[tokio::test]
    async fn test_hierarchy_from_village_only() {
        let ids = LocationIds {
            village_id: Some("3273010001".to_string()),
            ..Default::default()
        };
        let resolved = assert_ok!(resolver().resolve_hierarchy(&ids).await);
        assert_eq!(
            resolved,
            LocationHierarchy {
                province_id: Some("32".to_string()),
                regency_id: Some("3273".to_string()),
                district_id: Some("327301".to_string()),
                village_id: Some("3273010001".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_hierarchy_detects_district_mismatch() {
        let ids = LocationIds {
            village_id: Some("3273010001".to_string()),
            district_id: Some("327302".to_string()),
            ..Default::default()
        };
        let err = location_error(resolver().resolve_hierarchy(&ids).await);
        assert_eq!(
            err,
            LocationError::Mismatch {
                level: RegionLevel::District,
                child_level: RegionLevel::Village,
                child_id: "3273010001".to_string(),
                expected: "327301".to_string(),
                provided: "327302".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_hierarchy_checks_closest_ancestor_first() {
        let ids = LocationIds {
            province_id: Some("33".to_string()),
            regency_id: Some("3204".to_string()),
            district_id: Some("327301".to_string()),
            village_id: None,
        };
        let err = location_error(resolver().resolve_hierarchy(&ids).await);
        assert_eq!(err.level(), RegionLevel::Regency);
        assert_eq!(
            err.to_string(),
            "Regency ID mismatch: district 327301 belongs to regency 3273, but you provided 3204"
        );
    }

    #[tokio::test]
    async fn test_hierarchy_regency_province_mismatch() {
        let ids = LocationIds {
            province_id: Some("33".to_string()),
            regency_id: Some("3273".to_string()),
            ..Default::default()
        };
        let err = location_error(resolver().resolve_hierarchy(&ids).await);
        assert_eq!(err.level(), RegionLevel::Province);
        assert_eq!(err.kind(), LocationErrorKind::Mismatch);
    }

    #[tokio::test]
    async fn test_hierarchy_unknown_village() {
        let ids = LocationIds {
            village_id: Some("9999999999".to_string()),
            ..Default::default()
        };
        let err = location_error(resolver().resolve_hierarchy(&ids).await);
        assert_eq!(err.to_string(), "Village with ID 9999999999 not found");
    }

    #[tokio::test]
    async fn test_hierarchy_province_only() {
        let resolver = resolver();
        let ids = LocationIds {
            province_id: Some("33".to_string()),
            ..Default::default()
        };
        let resolved = assert_ok!(resolver.resolve_hierarchy(&ids).await);
        assert_eq!(
            resolved,
            LocationHierarchy {
                province_id: Some("33".to_string()),
                ..Default::default()
            }
        );

        let missing = LocationIds {
            province_id: Some("99".to_string()),
            ..Default::default()
        };
        let err = location_error(resolver.resolve_hierarchy(&missing).await);
        assert_eq!(err.kind(), LocationErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_hierarchy_empty_input() {
        let resolved = assert_ok!(resolver().resolve_hierarchy(&LocationIds::default()).await);
        assert_eq!(resolved, LocationHierarchy::default());
    }

    #[tokio::test]
    async fn test_hierarchy_is_idempotent() {
        let resolver = resolver();
        let ids = LocationIds {
            province_id: Some("32".to_string()),
            regency_id: Some("3273".to_string()),
            district_id: Some("327302".to_string()),
            village_id: Some("3273020001".to_string()),
        };
        let first = assert_ok!(resolver.resolve_hierarchy(&ids).await);
        let second = assert_ok!(resolver.resolve_hierarchy(&ids).await);
        assert_eq!(first, second);

        let again = assert_ok!(resolver.resolve_hierarchy(&first.clone().into()).await);
        assert_eq!(again, first);
    }

    // ==================== Top-level ====================

    #[tokio::test]
    async fn test_resolve_names_top_down() {
        let input = LocationInput {
            province: Some("jawa barat".to_string()),
            regency: Some("kota bandung".to_string()),
            district: Some("Sukasari".to_string()),
            village: Some("sarijadi".to_string()),
            ..Default::default()
        };
        let resolved = assert_ok!(resolver().resolve(&input).await);
        assert_eq!(resolved.village_id.as_deref(), Some("3273010001"));
        assert_eq!(resolved.district_id.as_deref(), Some("327301"));
        assert_eq!(resolved.regency_id.as_deref(), Some("3273"));
        assert_eq!(resolved.province_id.as_deref(), Some("32"));
    }

    #[tokio::test]
    async fn test_resolve_scopes_by_resolved_parent() {
        // SUKASARI exists in two regencies; the resolved regency settles it
        let input = LocationInput {
            regency: Some("3204".to_string()),
            district: Some("SUKASARI".to_string()),
            ..Default::default()
        };
        let resolved = assert_ok!(resolver().resolve(&input).await);
        assert_eq!(resolved.district_id.as_deref(), Some("320401"));
        assert_eq!(resolved.province_id.as_deref(), Some("32"));
    }

    #[tokio::test]
    async fn test_resolve_with_explicit_parent_hint() {
        let input = LocationInput {
            district: Some("SUKASARI".to_string()),
            district_parent: Some("KOTA BANDUNG".to_string()),
            ..Default::default()
        };
        let resolved = assert_ok!(resolver().resolve(&input).await);
        assert_eq!(resolved.district_id.as_deref(), Some("327301"));
        assert_eq!(resolved.regency_id.as_deref(), Some("3273"));
    }

    #[tokio::test]
    async fn test_resolve_hint_conflicting_with_regency_is_mismatch() {
        let input = LocationInput {
            regency: Some("KABUPATEN BANDUNG".to_string()),
            district: Some("SUKASARI".to_string()),
            district_parent: Some("3273".to_string()),
            ..Default::default()
        };
        let err = location_error(resolver().resolve(&input).await);
        assert_eq!(err.kind(), LocationErrorKind::Mismatch);
        assert_eq!(err.level(), RegionLevel::Regency);
    }

    #[tokio::test]
    async fn test_resolve_empty_input() {
        let resolved = assert_ok!(resolver().resolve(&LocationInput::default()).await);
        assert_eq!(resolved, LocationHierarchy::default());
    }
}
