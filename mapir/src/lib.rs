//! Asynchronous client of the [map.ir](https://map.ir) API: reverse geocoding, search, routing
//! and static map images.
//!
//! # Quick start
//!
//! ```no_run
//! use mapir::{AccessToken, Client};
//! use mapir::mapir_types::Coordinate;
//!
//! # tokio_test::block_on(async {
//! mapir::config::set_default_access_token(AccessToken::from_env().unwrap()).unwrap();
//!
//! let client = Client::builder().build().unwrap();
//! let location = Coordinate::new(35.732590, 51.422456).unwrap();
//! let placemark = client.reverse_geocode(location).unwrap().await.unwrap();
//!
//! println!("{}", placemark.address());
//! # });
//! ```
//!
//! # How requests are run
//!
//! Every operation is described by an [`Endpoint`](endpoint::Endpoint): the path and query of the
//! request and the decoder of its response. The [`Client`] builds the request, adds the access
//! token and the standard headers, sends it with its [`HttpTransport`](platform::HttpTransport)
//! and decodes the response.
//!
//! A client runs at most one operation at a time. Starting a new operation cancels the previous
//! one, and the result of a cancelled operation is never delivered. This suits the typical use
//! of reverse geocoding the position of a moving map: only the answer for the last position
//! matters.
//!
//! Geometry types and the GeoJSON codec live in the [`mapir_types`] crate, re-exported here.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub(crate) mod async_runtime;
mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
mod placemark;
pub mod platform;
pub mod request;
pub mod task;

#[cfg(test)]
mod tests;

pub use client::{Client, ClientBuilder, Pending};
pub use config::AccessToken;
pub use endpoint::{CustomEndpoint, Endpoint};
pub use error::MapirError;
pub use placemark::{decode_placemark, Placemark};
pub use request::QueryParams;
pub use task::{TaskHandle, TaskId, TaskSlot, TaskState};

// Reexport mapir_types
pub use mapir_types;
