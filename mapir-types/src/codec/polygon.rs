//! `Polygon` geometry: array of rings, each an array of `[lon, lat]` pairs.

use crate::codec::{point, GeometryArray};
use crate::coordinate::Coordinate;
use crate::error::GeometryError;
use crate::polygon::{LinearRing, Polygon};

/// Encodes a polygon, exterior ring first.
pub fn encode(polygon: &Polygon) -> GeometryArray {
    GeometryArray::Array(polygon.rings().map(encode_ring).collect())
}

fn encode_ring(ring: &LinearRing) -> GeometryArray {
    GeometryArray::Array(ring.points().iter().map(point::encode).collect())
}

/// Decodes a polygon from an array of rings.
pub fn decode(array: &GeometryArray) -> Result<Polygon, GeometryError> {
    let rings = array
        .as_array()
        .ok_or(GeometryError::MalformedArray("an array of rings"))?;

    let rings = rings
        .iter()
        .enumerate()
        .map(|(index, ring)| decode_ring(ring, index > 0))
        .collect::<Result<Vec<_>, _>>()?;

    Polygon::from_rings(rings)
}

fn decode_ring(ring: &GeometryArray, is_interior: bool) -> Result<Vec<Coordinate>, GeometryError> {
    let points = ring
        .as_array()
        .ok_or(GeometryError::MalformedArray("an array of coordinates"))?;

    points
        .iter()
        .map(|item| {
            if item.has_nested_arrays() {
                return Err(if is_interior {
                    GeometryError::IncorrectInteriorPolygonFormat
                } else {
                    GeometryError::MalformedArray("an array of coordinates")
                });
            }

            point::decode(item)
        })
        .collect()
}
