use serde::Serialize;

use crate::coordinate::Coordinate;
use crate::error::GeometryError;

/// Minimum number of points in a closed ring.
pub const MIN_RING_SIZE: usize = 4;

/// Sequence of at least [`MIN_RING_SIZE`] coordinates forming a polygon boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearRing {
    points: Vec<Coordinate>,
}

impl LinearRing {
    /// Creates a new ring, failing with [`GeometryError::InsufficientCoordinates`] if there are
    /// too few points.
    pub fn new(points: Vec<Coordinate>) -> Result<Self, GeometryError> {
        if points.len() < MIN_RING_SIZE {
            return Err(GeometryError::InsufficientCoordinates {
                found: points.len(),
            });
        }

        Ok(Self { points })
    }

    /// Points of the ring.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Number of points in the ring.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, rings are never empty. Provided for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if the first and the last points of the ring are equal.
    pub fn is_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }
}

/// Polygon with one exterior ring and any number of interior rings (holes).
///
/// ```
/// use mapir_types::{Coordinate, Polygon};
///
/// let square = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]
///     .into_iter()
///     .map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
///     .collect();
///
/// let polygon = Polygon::from_rings(vec![square]).unwrap();
/// assert_eq!(polygon.exterior().len(), 5);
/// assert!(polygon.interiors().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    /// Creates a polygon from already validated rings.
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Creates a polygon from a list of rings. The first ring is the exterior one.
    pub fn from_rings(rings: Vec<Vec<Coordinate>>) -> Result<Self, GeometryError> {
        let mut rings = rings.into_iter();
        let exterior = LinearRing::new(rings.next().unwrap_or_default())?;
        let interiors = rings.map(LinearRing::new).collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(exterior, interiors))
    }

    /// Creates a polygon cutting the given holes out of the exterior ring.
    ///
    /// Holes are only allowed one level deep: a hole that has holes of its own fails with
    /// [`GeometryError::IncorrectInteriorPolygonFormat`].
    pub fn with_holes(exterior: Vec<Coordinate>, holes: Vec<Polygon>) -> Result<Self, GeometryError> {
        let exterior = LinearRing::new(exterior)?;
        let interiors = holes
            .into_iter()
            .map(|hole| {
                if hole.interiors.is_empty() {
                    Ok(hole.exterior)
                } else {
                    Err(GeometryError::IncorrectInteriorPolygonFormat)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(exterior, interiors))
    }

    /// Exterior ring.
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    /// Interior rings.
    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// Iterates over all rings, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

/// Non-empty set of polygons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a new multi-polygon, failing with [`GeometryError::InsufficientPolygons`] if the
    /// list is empty.
    pub fn new(polygons: Vec<Polygon>) -> Result<Self, GeometryError> {
        if polygons.is_empty() {
            return Err(GeometryError::InsufficientPolygons);
        }

        Ok(Self { polygons })
    }

    /// Parts of the multi-polygon.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}
