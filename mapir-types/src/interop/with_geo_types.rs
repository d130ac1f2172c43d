use crate::error::GeometryError;
use crate::polygon::{LinearRing, MultiPolygon, Polygon};
use crate::Coordinate;

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(value: Coordinate) -> Self {
        geo_types::Point::new(value.lon(), value.lat())
    }
}

impl TryFrom<geo_types::Point<f64>> for Coordinate {
    type Error = GeometryError;

    fn try_from(value: geo_types::Point<f64>) -> Result<Self, Self::Error> {
        Coordinate::new(value.y(), value.x())
    }
}

impl From<&LinearRing> for geo_types::LineString<f64> {
    fn from(value: &LinearRing) -> Self {
        value
            .points()
            .iter()
            .map(|c| (c.lon(), c.lat()))
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<&Polygon> for geo_types::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        geo_types::Polygon::new(
            value.exterior().into(),
            value.interiors().iter().map(Into::into).collect(),
        )
    }
}

impl From<&MultiPolygon> for geo_types::MultiPolygon<f64> {
    fn from(value: &MultiPolygon) -> Self {
        geo_types::MultiPolygon::new(value.polygons().iter().map(Into::into).collect())
    }
}
