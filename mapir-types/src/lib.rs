//! Geometry types used by the [`mapir`](https://docs.rs/mapir) client and the codec converting
//! them to and from GeoJSON coordinate arrays.
//!
//! The API transfers geometries as GeoJSON objects, in which coordinates are nested arrays of
//! numbers in `[lon, lat]` order. Types of this crate always store and accept coordinates in
//! `(lat, lon)` order, and the [`codec`] module takes care of swapping them at the boundary.
//!
//! ```
//! use mapir_types::codec::{from_geometry, to_geometry};
//! use mapir_types::{Coordinate, Shape};
//!
//! let shape = Shape::Point(Coordinate::new(35.732590, 51.422456).unwrap());
//! let geometry = to_geometry(&shape);
//!
//! assert_eq!(geometry.kind, "Point");
//! assert_eq!(from_geometry(&geometry).unwrap(), shape);
//! ```

pub mod codec;
mod coordinate;
pub mod error;
mod interop;
mod polygon;
mod shape;

pub use coordinate::Coordinate;
pub use error::GeometryError;
pub use polygon::{LinearRing, MultiPolygon, Polygon, MIN_RING_SIZE};
pub use shape::Shape;
