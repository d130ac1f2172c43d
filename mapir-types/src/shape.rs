use serde::Serialize;

use crate::coordinate::Coordinate;
use crate::polygon::{MultiPolygon, Polygon};

/// Any shape that can be sent to or received from the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    /// Single point.
    Point(Coordinate),
    /// Polygon.
    Polygon(Polygon),
    /// Multi-polygon.
    MultiPolygon(MultiPolygon),
}

impl Shape {
    /// Name of the GeoJSON geometry type for this shape.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Point(_) => "Point",
            Shape::Polygon(_) => "Polygon",
            Shape::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Returns the point if the shape is a point.
    pub fn as_point(&self) -> Option<Coordinate> {
        match self {
            Shape::Point(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<Coordinate> for Shape {
    fn from(value: Coordinate) -> Self {
        Self::Point(value)
    }
}

impl From<Polygon> for Shape {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPolygon> for Shape {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}
