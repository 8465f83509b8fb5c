mod district;
mod hierarchy;
mod level;
mod province;
mod record;
mod regency;
mod village;

pub use district::District;
pub use hierarchy::{LocationHierarchy, LocationIds, LocationInput};
pub use level::RegionLevel;
pub use province::Province;
pub use record::RegionRecord;
pub use regency::Regency;
pub use village::Village;
