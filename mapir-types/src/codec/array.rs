use std::fmt;

use serde::de::{self, SeqAccess, Unexpected, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Nested numeric array, the `coordinates` member of a GeoJSON geometry.
///
/// Numbers may arrive as JSON strings (`"35.7"`) in API responses; the deserializer parses them,
/// while the serializer always writes plain numbers.
///
/// ```
/// use mapir_types::codec::GeometryArray;
///
/// let array: GeometryArray = serde_json::from_str(r#"["51.42", 35.73]"#).unwrap();
/// assert_eq!(
///     array,
///     GeometryArray::Array(vec![GeometryArray::Number(51.42), GeometryArray::Number(35.73)])
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryArray {
    /// Leaf value.
    Number(f64),
    /// Array of nested values.
    Array(Vec<GeometryArray>),
}

impl GeometryArray {
    /// Returns the items if this is an array.
    pub fn as_array(&self) -> Option<&[GeometryArray]> {
        match self {
            GeometryArray::Array(items) => Some(items),
            GeometryArray::Number(_) => None,
        }
    }

    /// Returns the value if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            GeometryArray::Number(v) => Some(*v),
            GeometryArray::Array(_) => None,
        }
    }

    /// Returns true if this is an array that has at least one array inside.
    pub fn has_nested_arrays(&self) -> bool {
        self.as_array()
            .is_some_and(|items| items.iter().any(|item| item.as_array().is_some()))
    }
}

impl From<f64> for GeometryArray {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<GeometryArray>> for GeometryArray {
    fn from(value: Vec<GeometryArray>) -> Self {
        Self::Array(value)
    }
}

impl Serialize for GeometryArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeometryArray::Number(v) => serializer.serialize_f64(*v),
            GeometryArray::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

struct GeometryArrayVisitor;

impl<'de> Visitor<'de> for GeometryArrayVisitor {
    type Value = GeometryArray;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string or an array of them")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(GeometryArray::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(GeometryArray::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(GeometryArray::Number(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.trim()
            .parse::<f64>()
            .map(GeometryArray::Number)
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }

        Ok(GeometryArray::Array(items))
    }
}

impl<'de> Deserialize<'de> for GeometryArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GeometryArrayVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_numbers_and_strings() {
        let array: GeometryArray =
            serde_json::from_str(r#"[[" 1.5", 2], ["-3", 4.25]]"#).unwrap();
        assert_eq!(
            array,
            GeometryArray::Array(vec![
                GeometryArray::Array(vec![1.5.into(), 2.0.into()]),
                GeometryArray::Array(vec![(-3.0).into(), 4.25.into()]),
            ])
        );
        assert!(array.has_nested_arrays());
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<GeometryArray>(r#"["north", 1]"#).is_err());
        assert!(serde_json::from_str::<GeometryArray>(r#"[true, 1]"#).is_err());
        assert!(serde_json::from_str::<GeometryArray>(r#"{"lat": 1}"#).is_err());
    }

    #[test]
    fn serializes_as_plain_numbers() {
        let array = GeometryArray::Array(vec![51.5.into(), 35.25.into()]);
        assert_eq!(serde_json::to_string(&array).unwrap(), "[51.5,35.25]");
    }
}
