//! Error type used by the crate.

use thiserror::Error;

/// Error returned when a shape cannot be constructed or converted from its GeoJSON representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A ring contains fewer points than a closed linear ring requires.
    #[error("ring must contain at least 4 coordinates, got {found}")]
    InsufficientCoordinates {
        /// Number of coordinates in the offending ring.
        found: usize,
    },
    /// A multi-polygon has no parts.
    #[error("multi-polygon must contain at least one polygon")]
    InsufficientPolygons,
    /// An interior ring contains nested rings of its own.
    #[error("interior rings cannot contain nested rings")]
    IncorrectInteriorPolygonFormat,
    /// A coordinate array does not consist of exactly two numbers.
    #[error("coordinate must have exactly 2 numeric components, got {found}")]
    IncorrectCoordinateComponents {
        /// Number of components in the offending array.
        found: usize,
    },
    /// Latitude or longitude is outside of the valid range.
    #[error("coordinate out of range: lat {lat}, lon {lon}")]
    CoordinateOutOfRange {
        /// Latitude value.
        lat: f64,
        /// Longitude value.
        lon: f64,
    },
    /// Nesting level of the coordinate array does not match the geometry type.
    #[error("malformed coordinate array: expected {0}")]
    MalformedArray(&'static str),
    /// GeoJSON geometry type is not supported by the codec.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),
}
