use thiserror::Error;

use crate::features::locations::models::RegionLevel;

/// Broad category of a location resolution failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationErrorKind {
    NotFound,
    Ambiguous,
    Mismatch,
}

/// Validation failures raised while resolving a location.
///
/// Messages are shown to end users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("{level} with ID {value} not found")]
    IdNotFound { level: RegionLevel, value: String },

    #[error("{level} '{value}' not found")]
    NameNotFound {
        level: RegionLevel,
        value: String,
        parent_id: Option<String>,
    },

    /// Several rows share the name even inside the parent scope
    #[error("{level} '{value}' could not be resolved: {matches} matches within {parent_level} {parent_id}")]
    DuplicateInScope {
        level: RegionLevel,
        value: String,
        parent_level: RegionLevel,
        parent_id: String,
        matches: usize,
    },

    #[error("{level} '{value}' is ambiguous ({matches} matches), {}", ambiguity_hint(.parent_level))]
    Ambiguous {
        level: RegionLevel,
        value: String,
        parent_level: Option<RegionLevel>,
        matches: usize,
    },

    #[error(
        "{level} ID mismatch: {} {child_id} belongs to {} {expected}, but you provided {provided}",
        .child_level.label().to_lowercase(),
        .level.label().to_lowercase()
    )]
    Mismatch {
        level: RegionLevel,
        child_level: RegionLevel,
        child_id: String,
        expected: String,
        provided: String,
    },
}

fn ambiguity_hint(parent_level: &Option<RegionLevel>) -> String {
    match parent_level {
        Some(parent) => format!("please also provide the {}", parent),
        None => "please use a more specific name".to_string(),
    }
}

impl LocationError {
    pub fn kind(&self) -> LocationErrorKind {
        match self {
            LocationError::IdNotFound { .. }
            | LocationError::NameNotFound { .. }
            | LocationError::DuplicateInScope { .. } => LocationErrorKind::NotFound,
            LocationError::Ambiguous { .. } => LocationErrorKind::Ambiguous,
            LocationError::Mismatch { .. } => LocationErrorKind::Mismatch,
        }
    }

    /// Level the failure is about
    pub fn level(&self) -> RegionLevel {
        match self {
            LocationError::IdNotFound { level, .. }
            | LocationError::NameNotFound { level, .. }
            | LocationError::DuplicateInScope { level, .. }
            | LocationError::Ambiguous { level, .. }
            | LocationError::Mismatch { level, .. } => *level,
        }
    }
}
