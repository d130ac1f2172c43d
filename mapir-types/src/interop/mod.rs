//! Conversions between the crate types and other georust crates.

#[cfg(feature = "geo-types")]
mod with_geo_types;
#[cfg(feature = "geojson")]
mod with_geojson;
