//! Indonesian administrative location (wilayah) resolution.
//!
//! Turns loosely entered location data (IDs, official names, colloquial or
//! partial names) into a canonical path through the four-level hierarchy and
//! rejects input that is unknown, ambiguous, or internally inconsistent.
//!
//! ## Data Hierarchy
//!
//! | Level | Name | ID width | Table |
//! |-------|------|----------|-------|
//! | 1 | Province (Provinsi) | 2 | `reg_provinces` |
//! | 2 | Regency/City (Kabupaten/Kota) | 4 | `reg_regencies` |
//! | 3 | District (Kecamatan) | 6 | `reg_districts` |
//! | 4 | Village (Kelurahan/Desa) | 10 | `reg_villages` |
//!
//! Regency names repeat across provinces, so a bare regency name may need a
//! province to disambiguate it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/locations/resolve` | Resolve IDs or names into a canonical path |
//! | POST | `/api/locations/validate` | Check a set of IDs for consistency |

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use error::{LocationError, LocationErrorKind};
pub use services::LocationResolver;
pub use store::{InMemoryRegionStore, PgRegionStore, RegionStore};
