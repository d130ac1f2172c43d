use geojson::{Position, Value};

use crate::codec::{self, GeometryArray};
use crate::error::GeometryError;
use crate::polygon::{LinearRing, Polygon};
use crate::shape::Shape;
use crate::Coordinate;

fn position(coordinate: &Coordinate) -> Position {
    coordinate.lonlat().to_vec()
}

fn ring_positions(ring: &LinearRing) -> Vec<Position> {
    ring.points().iter().map(position).collect()
}

fn polygon_positions(polygon: &Polygon) -> Vec<Vec<Position>> {
    polygon.rings().map(ring_positions).collect()
}

impl From<&Shape> for Value {
    fn from(shape: &Shape) -> Self {
        match shape {
            Shape::Point(c) => Value::Point(position(c)),
            Shape::Polygon(p) => Value::Polygon(polygon_positions(p)),
            Shape::MultiPolygon(mp) => {
                Value::MultiPolygon(mp.polygons().iter().map(polygon_positions).collect())
            }
        }
    }
}

fn position_array(position: &Position) -> GeometryArray {
    GeometryArray::Array(position.iter().copied().map(GeometryArray::Number).collect())
}

fn positions_array(positions: &[Position]) -> GeometryArray {
    GeometryArray::Array(positions.iter().map(position_array).collect())
}

fn polygon_array(rings: &[Vec<Position>]) -> GeometryArray {
    GeometryArray::Array(rings.iter().map(|ring| positions_array(ring)).collect())
}

impl TryFrom<&Value> for Shape {
    type Error = GeometryError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Point(p) => codec::decode("Point", &position_array(p)),
            Value::Polygon(p) => codec::decode("Polygon", &polygon_array(p)),
            Value::MultiPolygon(mp) => codec::decode(
                "MultiPolygon",
                &GeometryArray::Array(mp.iter().map(|p| polygon_array(p)).collect()),
            ),
            Value::MultiPoint(_) => Err(GeometryError::UnsupportedGeometry("MultiPoint".into())),
            Value::LineString(_) => Err(GeometryError::UnsupportedGeometry("LineString".into())),
            Value::MultiLineString(_) => Err(GeometryError::UnsupportedGeometry(
                "MultiLineString".into(),
            )),
            Value::GeometryCollection(_) => Err(GeometryError::UnsupportedGeometry(
                "GeometryCollection".into(),
            )),
        }
    }
}

impl TryFrom<&geojson::Geometry> for Shape {
    type Error = GeometryError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self, Self::Error> {
        Shape::try_from(&geometry.value)
    }
}
