use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Point on the surface of the Earth in WGS84 degrees.
///
/// Values are always in range: latitude in `[-90, 90]` and longitude in `[-180, 180]`. Note that
/// the order of arguments in [`Coordinate::new`] is `(lat, lon)`, while the GeoJSON representation
/// of the same point is `[lon, lat]`.
///
/// ```
/// use mapir_types::Coordinate;
///
/// let point = Coordinate::new(35.732590, 51.422456).unwrap();
/// assert_eq!(point.lat(), 35.732590);
/// assert_eq!(point.lon(), 51.422456);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeometryError;

    fn try_from(value: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lon)
    }
}

impl Coordinate {
    /// Creates a new coordinate, checking that both values are finite and in range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeometryError> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Ok(Self { lat, lon })
        } else {
            Err(GeometryError::CoordinateOutOfRange { lat, lon })
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Components in GeoJSON order: `[lon, lat]`.
    pub fn lonlat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl AbsDiffEq for Coordinate {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}
