use utoipa::{Modify, OpenApi};

use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Locations
        locations_handlers::resolve_location,
        locations_handlers::validate_location,
    ),
    components(
        schemas(
            // Locations
            locations_dtos::ResolveLocationRequestDto,
            locations_dtos::LocationIdsDto,
            locations_dtos::ResolvedLocationDto,
            ApiResponse<locations_dtos::ResolvedLocationDto>,
        )
    ),
    tags(
        (name = "locations", description = "Indonesian administrative location resolution (province, regency, district, village)"),
    ),
    info(
        title = "Wilayah Resolver API",
        version = "0.1.0",
        description = "Indonesian administrative location resolution",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_location_paths() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Test".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut openapi);

        assert!(openapi.paths.paths.contains_key("/api/locations/resolve"));
        assert!(openapi.paths.paths.contains_key("/api/locations/validate"));
        assert_eq!(openapi.info.version, "9.9.9");
    }
}
