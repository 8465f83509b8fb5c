use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::models::{LocationHierarchy, LocationIds, LocationInput};

/// Request DTO for resolving free-text location input.
///
/// Every field accepts a canonical ID, an exact name, or part of a name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveLocationRequestDto {
    /// Province ID (2 digits) or name
    #[validate(length(max = 255, message = "Province must not exceed 255 characters"))]
    #[schema(example = "Jawa Barat")]
    pub province: Option<String>,

    /// Regency ID (4 digits) or name
    #[validate(length(max = 255, message = "Regency must not exceed 255 characters"))]
    #[schema(example = "Bandung")]
    pub regency: Option<String>,

    /// District ID (6 digits) or name
    #[validate(length(max = 255, message = "District must not exceed 255 characters"))]
    pub district: Option<String>,

    /// Village ID (10 digits) or name
    #[validate(length(max = 255, message = "Village must not exceed 255 characters"))]
    pub village: Option<String>,

    /// Province used to narrow the regency search, overrides `province`
    #[validate(length(max = 255, message = "Regency parent must not exceed 255 characters"))]
    pub regency_parent: Option<String>,

    /// Regency used to narrow the district search, overrides `regency`
    #[validate(length(max = 255, message = "District parent must not exceed 255 characters"))]
    pub district_parent: Option<String>,

    /// District used to narrow the village search, overrides `district`
    #[validate(length(max = 255, message = "Village parent must not exceed 255 characters"))]
    pub village_parent: Option<String>,
}

impl From<ResolveLocationRequestDto> for LocationInput {
    fn from(dto: ResolveLocationRequestDto) -> Self {
        Self {
            province: dto.province,
            regency: dto.regency,
            district: dto.district,
            village: dto.village,
            regency_parent: dto.regency_parent,
            district_parent: dto.district_parent,
            village_parent: dto.village_parent,
        }
    }
}

/// Request DTO for checking a set of canonical IDs for consistency
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationIdsDto {
    #[validate(length(max = 2, message = "Province ID must be 2 digits"))]
    #[schema(example = "32")]
    pub province_id: Option<String>,

    #[validate(length(max = 4, message = "Regency ID must be 4 digits"))]
    #[schema(example = "3273")]
    pub regency_id: Option<String>,

    #[validate(length(max = 6, message = "District ID must be 6 digits"))]
    pub district_id: Option<String>,

    #[validate(length(max = 10, message = "Village ID must be 10 digits"))]
    pub village_id: Option<String>,
}

impl From<LocationIdsDto> for LocationIds {
    fn from(dto: LocationIdsDto) -> Self {
        Self {
            province_id: dto.province_id,
            regency_id: dto.regency_id,
            district_id: dto.district_id,
            village_id: dto.village_id,
        }
    }
}

/// Response DTO for a resolved location; absent levels are `null`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocationDto {
    pub province_id: Option<String>,
    pub regency_id: Option<String>,
    pub district_id: Option<String>,
    pub village_id: Option<String>,
}

impl From<LocationHierarchy> for ResolvedLocationDto {
    fn from(hierarchy: LocationHierarchy) -> Self {
        Self {
            province_id: hierarchy.province_id,
            regency_id: hierarchy.regency_id,
            district_id: hierarchy.district_id,
            village_id: hierarchy.village_id,
        }
    }
}
