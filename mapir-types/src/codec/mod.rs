//! Conversion between [`Shape`]s and GeoJSON geometry objects.
//!
//! Each supported geometry type has its own pair of `encode`/`decode` functions in a dedicated
//! module; [`to_geometry`] and [`from_geometry`] dispatch to them by the GeoJSON `type` member.
//! All functions are pure and never touch the network.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::shape::Shape;

mod array;
pub mod multi_polygon;
pub mod point;
pub mod polygon;

pub use array::GeometryArray;

/// GeoJSON geometry object: `{"type": "...", "coordinates": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonGeometry {
    /// GeoJSON geometry type name, e.g. `Point`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Coordinates in `[lon, lat]` order.
    pub coordinates: GeometryArray,
}

impl GeoJsonGeometry {
    /// Creates a new geometry object.
    pub fn new(kind: impl Into<String>, coordinates: GeometryArray) -> Self {
        Self {
            kind: kind.into(),
            coordinates,
        }
    }
}

/// Converts a shape into its GeoJSON geometry.
pub fn to_geometry(shape: &Shape) -> GeoJsonGeometry {
    let coordinates = match shape {
        Shape::Point(coordinate) => point::encode(coordinate),
        Shape::Polygon(p) => polygon::encode(p),
        Shape::MultiPolygon(mp) => multi_polygon::encode(mp),
    };

    GeoJsonGeometry::new(shape.type_name(), coordinates)
}

/// Converts a GeoJSON geometry into a shape.
pub fn from_geometry(geometry: &GeoJsonGeometry) -> Result<Shape, GeometryError> {
    decode(&geometry.kind, &geometry.coordinates)
}

/// Decodes a coordinate array of the given GeoJSON geometry type.
pub fn decode(kind: &str, coordinates: &GeometryArray) -> Result<Shape, GeometryError> {
    match kind {
        "Point" => point::decode(coordinates).map(Shape::Point),
        "Polygon" => polygon::decode(coordinates).map(Shape::Polygon),
        "MultiPolygon" => multi_polygon::decode(coordinates).map(Shape::MultiPolygon),
        other => Err(GeometryError::UnsupportedGeometry(other.to_string())),
    }
}
