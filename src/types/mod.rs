mod feature;
mod geo_level;

pub use feature::{Feature, FeatureCollection};
pub use geo_level::GeoLevel;
