//! API operations.
//!
//! An [`Endpoint`] describes one operation: where the request goes and how its response is
//! decoded. The [`Client`](crate::Client) runs any endpoint through the same pipeline, so
//! operations not covered by this crate can be added with a custom [`Endpoint`] implementation
//! or with [`CustomEndpoint`] without changes to the client.

use bytes::Bytes;
use reqwest::Method;

use crate::error::MapirError;
use crate::request::QueryParams;

mod geocode;
mod route;
mod static_map;

pub use geocode::{FastReverseGeocode, ReverseGeocode, Search, SearchItem, SearchResult};
pub use route::{Directions, Route, RouteLeg, RouteOverview, RouteProfile, RouteRequest, Waypoint};
pub use static_map::{Marker, MarkerStyle, StaticMap, StaticMapRequest};

/// API operation.
pub trait Endpoint: Send + Sync + 'static {
    /// Decoded result of the operation.
    type Output: Send + 'static;

    /// Name of the operation, used in log messages.
    fn kind(&self) -> &str;

    /// HTTP method. Defaults to `GET`.
    fn method(&self) -> Method {
        Method::GET
    }

    /// Request path, starting with `/`.
    fn path(&self) -> String;

    /// Query parameters of the request.
    fn query(&self) -> QueryParams {
        QueryParams::new()
    }

    /// Decodes a successful response body.
    fn decode(&self, body: Bytes) -> Result<Self::Output, MapirError>;
}

/// Path builder of a [`CustomEndpoint`].
pub trait PathSource: (Fn() -> String) + Send + Sync {}
impl<T: Fn() -> String> PathSource for T where T: Send + Sync {}

/// Response decoder of a [`CustomEndpoint`].
pub trait ResponseDecoder<T>: (Fn(Bytes) -> Result<T, MapirError>) + Send + Sync {}
impl<T, F: Fn(Bytes) -> Result<T, MapirError>> ResponseDecoder<T> for F where F: Send + Sync {}

/// Endpoint assembled from a path builder and a decoder function.
///
/// ```no_run
/// use mapir::decode::decode_json;
/// use mapir::{Client, CustomEndpoint, QueryParams};
///
/// # tokio_test::block_on(async {
/// let endpoint = CustomEndpoint::new(
///     "distance-matrix",
///     || "/distancematrix".to_string(),
///     |body| decode_json::<serde_json::Value>(&body),
/// )
/// .with_query(
///     QueryParams::new()
///         .with("origins", "a,35.732,51.422")
///         .with("destinations", "b,35.700,51.391"),
/// );
///
/// let client = Client::builder().build().unwrap();
/// let matrix = client.perform(endpoint).unwrap().await.unwrap();
/// # });
/// ```
pub struct CustomEndpoint<T> {
    kind: String,
    method: Method,
    path_source: Box<dyn PathSource>,
    query: QueryParams,
    decoder: Box<dyn ResponseDecoder<T>>,
}

impl<T: Send + 'static> CustomEndpoint<T> {
    /// Creates a new `GET` endpoint.
    pub fn new(
        kind: impl Into<String>,
        path_source: impl PathSource + 'static,
        decoder: impl ResponseDecoder<T> + 'static,
    ) -> Self {
        Self {
            kind: kind.into(),
            method: Method::GET,
            path_source: Box::new(path_source),
            query: QueryParams::new(),
            decoder: Box::new(decoder),
        }
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

impl<T: Send + 'static> Endpoint for CustomEndpoint<T> {
    type Output = T;

    fn kind(&self) -> &str {
        &self.kind
    }

    fn method(&self) -> Method {
        self.method.clone()
    }

    fn path(&self) -> String {
        (self.path_source)()
    }

    fn query(&self) -> QueryParams {
        self.query.clone()
    }

    fn decode(&self, body: Bytes) -> Result<T, MapirError> {
        (self.decoder)(body)
    }
}

/// Formats a coordinate component the way the API expects it.
pub(crate) fn format_degrees(value: f64) -> String {
    format!("{value:.6}")
}
