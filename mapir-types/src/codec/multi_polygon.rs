//! `MultiPolygon` geometry: array of polygon arrays.

use crate::codec::{polygon, GeometryArray};
use crate::error::GeometryError;
use crate::polygon::MultiPolygon;

/// Encodes all parts of a multi-polygon.
pub fn encode(multi_polygon: &MultiPolygon) -> GeometryArray {
    GeometryArray::Array(
        multi_polygon
            .polygons()
            .iter()
            .map(polygon::encode)
            .collect(),
    )
}

/// Decodes a multi-polygon, failing with [`GeometryError::InsufficientPolygons`] if there are no
/// parts.
pub fn decode(array: &GeometryArray) -> Result<MultiPolygon, GeometryError> {
    let parts = array
        .as_array()
        .ok_or(GeometryError::MalformedArray("an array of polygons"))?;

    let polygons = parts
        .iter()
        .map(polygon::decode)
        .collect::<Result<Vec<_>, _>>()?;

    MultiPolygon::new(polygons)
}
