//! `Point` geometry: `[lon, lat]`.

use crate::codec::GeometryArray;
use crate::coordinate::Coordinate;
use crate::error::GeometryError;

/// Encodes a coordinate as `[lon, lat]`.
pub fn encode(coordinate: &Coordinate) -> GeometryArray {
    let [lon, lat] = coordinate.lonlat();
    GeometryArray::Array(vec![lon.into(), lat.into()])
}

/// Decodes a `[lon, lat]` array.
pub fn decode(array: &GeometryArray) -> Result<Coordinate, GeometryError> {
    let Some(items) = array.as_array() else {
        return Err(GeometryError::IncorrectCoordinateComponents { found: 1 });
    };

    match items {
        [lon, lat] => match (lon.as_number(), lat.as_number()) {
            (Some(lon), Some(lat)) => Coordinate::new(lat, lon),
            _ => Err(GeometryError::MalformedArray("a pair of numbers")),
        },
        _ => Err(GeometryError::IncorrectCoordinateComponents { found: items.len() }),
    }
}
