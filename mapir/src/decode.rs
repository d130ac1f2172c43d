//! Helpers shared by response decoders.
//!
//! Decoders are lenient: a field that is missing, `null` or cannot be parsed becomes `None`
//! instead of failing the whole response. Only a payload that is not valid JSON of the expected
//! overall structure results in [`MapirError::Decode`].

use mapir_types::codec::{self, GeoJsonGeometry, GeometryArray};
use mapir_types::{Coordinate, Shape};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::MapirError;

/// Parses a JSON payload.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, MapirError> {
    serde_json::from_slice(bytes).map_err(|err| MapirError::Decode(err.to_string()))
}

/// Parses a JSON payload that must be an object.
///
/// Response structs have only optional fields, so serde would also accept them in array form.
/// Any top-level value other than an object is rejected here.
pub fn decode_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, MapirError> {
    let value: serde_json::Value = decode_json(bytes)?;
    if !value.is_object() {
        return Err(MapirError::Decode(format!(
            "expected a JSON object, found {}",
            json_type_name(&value)
        )));
    }

    serde_json::from_value(value).map_err(|err| MapirError::Decode(err.to_string()))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Converts an embedded GeoJSON geometry object into a shape. Returns `None` and logs a warning
/// if the geometry is invalid.
pub fn decode_shape(geometry: Option<&serde_json::Value>) -> Option<Shape> {
    let geometry = geometry.filter(|v| !v.is_null())?;
    let geometry = match GeoJsonGeometry::deserialize(geometry) {
        Ok(v) => v,
        Err(err) => {
            log::warn!("Ignoring malformed geometry {geometry}: {err}");
            return None;
        }
    };

    match codec::from_geometry(&geometry) {
        Ok(shape) => Some(shape),
        Err(err) => {
            log::warn!("Ignoring invalid {} geometry: {err}", geometry.kind);
            None
        }
    }
}

/// Converts an embedded GeoJSON `Point` geometry into a coordinate.
pub fn decode_point(geometry: Option<&serde_json::Value>) -> Option<Coordinate> {
    match decode_shape(geometry)? {
        Shape::Point(coordinate) => Some(coordinate),
        other => {
            log::warn!("Expected Point geometry, got {}", other.type_name());
            None
        }
    }
}

/// Converts a bare `[lon, lat]` array into a coordinate.
pub fn decode_location(location: Option<&GeometryArray>) -> Option<Coordinate> {
    codec::point::decode(location?)
        .inspect_err(|err| log::warn!("Ignoring invalid location: {err}"))
        .ok()
}

/// Deserializes an optional text field that may arrive as a string or as a number. Empty strings
/// are treated as absent values.
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserializes an optional number that may arrive as a number or as a numeric string.
pub(crate) fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Deserializes an optional non-negative integer that may arrive as a number, a numeric string
/// or an integral float.
pub(crate) fn optional_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    let value = optional_number(deserializer)?;
    Ok(value
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
        .map(|v| v as u64))
}

/// Deserializes a list that may be `null` or missing, both treated as empty.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
