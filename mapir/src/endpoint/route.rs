use bytes::Bytes;
use mapir_types::codec::GeometryArray;
use mapir_types::Coordinate;
use serde::{Deserialize, Serialize};

use crate::decode::{
    decode_location, decode_object, lenient_list, optional_number, optional_text,
};
use crate::endpoint::{format_degrees, Endpoint};
use crate::error::MapirError;
use crate::request::QueryParams;

/// Routing profile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteProfile {
    /// Car route.
    #[default]
    Car,
    /// Car route avoiding the traffic restriction zone.
    TrafficZone,
    /// Car route avoiding the odd-even restriction zone.
    OddEvenZone,
    /// Bicycle route.
    Bicycle,
    /// Walking route.
    Foot,
}

impl RouteProfile {
    fn path_segment(&self) -> &'static str {
        match self {
            RouteProfile::Car => "route",
            RouteProfile::TrafficZone => "tarh",
            RouteProfile::OddEvenZone => "zojofard",
            RouteProfile::Bicycle => "bicycle",
            RouteProfile::Foot => "foot",
        }
    }
}

/// How detailed the route geometry in the response is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteOverview {
    /// Full geometry.
    Full,
    /// Simplified geometry.
    #[default]
    Simplified,
    /// No geometry.
    None,
}

impl RouteOverview {
    fn as_str(&self) -> &'static str {
        match self {
            RouteOverview::Full => "full",
            RouteOverview::Simplified => "simplified",
            RouteOverview::None => "false",
        }
    }
}

/// Finds a route through the given points.
///
/// Points are sent in the url path in `lon,lat` order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    points: Vec<Coordinate>,
    profile: RouteProfile,
    alternatives: bool,
    steps: bool,
    overview: RouteOverview,
}

impl RouteRequest {
    /// Creates a request for a route between two points.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            points: vec![origin, destination],
            profile: RouteProfile::default(),
            alternatives: false,
            steps: false,
            overview: RouteOverview::default(),
        }
    }

    /// Adds an intermediate stop before the destination.
    pub fn with_stop(mut self, stop: Coordinate) -> Self {
        let destination_index = self.points.len() - 1;
        self.points.insert(destination_index, stop);
        self
    }

    /// Sets the routing profile.
    pub fn with_profile(mut self, profile: RouteProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Requests alternative routes.
    pub fn with_alternatives(mut self, alternatives: bool) -> Self {
        self.alternatives = alternatives;
        self
    }

    /// Requests turn-by-turn steps.
    pub fn with_steps(mut self, steps: bool) -> Self {
        self.steps = steps;
        self
    }

    /// Sets geometry detail level.
    pub fn with_overview(mut self, overview: RouteOverview) -> Self {
        self.overview = overview;
        self
    }

    /// Points of the route: origin, stops and destination.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }
}

impl Endpoint for RouteRequest {
    type Output = Directions;

    fn kind(&self) -> &str {
        "route"
    }

    fn path(&self) -> String {
        let points = self
            .points
            .iter()
            .map(|c| format!("{},{}", format_degrees(c.lon()), format_degrees(c.lat())))
            .collect::<Vec<_>>()
            .join(";");

        format!("/routes/{}/v1/driving/{points}", self.profile.path_segment())
    }

    fn query(&self) -> QueryParams {
        QueryParams::new()
            .with("alternatives", self.alternatives.to_string())
            .with("steps", self.steps.to_string())
            .with("overview", self.overview.as_str())
    }

    fn decode(&self, body: Bytes) -> Result<Directions, MapirError> {
        let response: DirectionsResponse = decode_object(&body)?;
        Ok(Directions {
            code: response.code,
            routes: response.routes.into_iter().map(Route::from).collect(),
            waypoints: response.waypoints.into_iter().map(Waypoint::from).collect(),
        })
    }
}

/// Routing result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directions {
    /// Status code reported by the routing engine, `Ok` on success.
    pub code: Option<String>,
    /// Found routes, the best one first.
    pub routes: Vec<Route>,
    /// Requested points snapped to the road network.
    pub waypoints: Vec<Waypoint>,
}

/// Single route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Length in meters.
    pub distance: Option<f64>,
    /// Travel time in seconds.
    pub duration: Option<f64>,
    /// Route geometry as an encoded polyline.
    pub geometry: Option<String>,
    /// Parts of the route between consecutive waypoints.
    pub legs: Vec<RouteLeg>,
}

/// Part of a route between two waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    /// Length in meters.
    pub distance: Option<f64>,
    /// Travel time in seconds.
    pub duration: Option<f64>,
    /// Names of the main roads of the leg.
    pub summary: Option<String>,
}

/// Requested point snapped to the road network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    /// Name of the road.
    pub name: Option<String>,
    /// Snapped location.
    pub coordinate: Option<Coordinate>,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default, deserialize_with = "optional_text")]
    code: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    routes: Vec<RouteResponse>,
    #[serde(default, deserialize_with = "lenient_list")]
    waypoints: Vec<WaypointResponse>,
}

#[derive(Deserialize)]
struct RouteResponse {
    #[serde(default, deserialize_with = "optional_number")]
    distance: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    duration: Option<f64>,
    #[serde(default)]
    geometry: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    legs: Vec<LegResponse>,
}

#[derive(Deserialize)]
struct LegResponse {
    #[serde(default, deserialize_with = "optional_number")]
    distance: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    duration: Option<f64>,
    #[serde(default, deserialize_with = "optional_text")]
    summary: Option<String>,
}

#[derive(Deserialize)]
struct WaypointResponse {
    #[serde(default, deserialize_with = "optional_text")]
    name: Option<String>,
    #[serde(default)]
    location: Option<serde_json::Value>,
}

impl From<RouteResponse> for Route {
    fn from(value: RouteResponse) -> Self {
        let geometry = match value.geometry {
            Some(serde_json::Value::String(polyline)) => Some(polyline),
            Some(other) if !other.is_null() => {
                log::warn!("Ignoring route geometry in unsupported format");
                None
            }
            _ => None,
        };

        Self {
            distance: value.distance,
            duration: value.duration,
            geometry,
            legs: value
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    distance: leg.distance,
                    duration: leg.duration,
                    summary: leg.summary,
                })
                .collect(),
        }
    }
}

impl From<WaypointResponse> for Waypoint {
    fn from(value: WaypointResponse) -> Self {
        let location = value
            .location
            .filter(|v| !v.is_null())
            .and_then(|v| match GeometryArray::deserialize(&v) {
                Ok(array) => Some(array),
                Err(err) => {
                    log::warn!("Ignoring malformed waypoint location {v}: {err}");
                    None
                }
            });

        Self {
            name: value.name,
            coordinate: decode_location(location.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn point(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn path_uses_lon_lat_order() {
        let request = RouteRequest::new(point(35.732936, 51.421047), point(35.731821, 51.422185))
            .with_stop(point(35.7, 51.4))
            .with_profile(RouteProfile::Foot);

        assert_eq!(
            request.path(),
            "/routes/foot/v1/driving/51.421047,35.732936;51.400000,35.700000;51.422185,35.731821"
        );
        assert_eq!(request.points().len(), 3);
    }

    #[test]
    fn query_flags() {
        let request = RouteRequest::new(point(0.0, 0.0), point(1.0, 1.0))
            .with_alternatives(true)
            .with_overview(RouteOverview::None);

        assert_eq!(
            request.query().iter().collect::<Vec<_>>(),
            vec![
                ("alternatives", "true"),
                ("steps", "false"),
                ("overview", "false")
            ]
        );
    }

    #[test]
    fn decodes_directions() {
        let body = Bytes::from_static(
            br#"{
                "code": "Ok",
                "routes": [{
                    "geometry": "_c`|Ek~`yH",
                    "legs": [{"summary": "Valiasr", "distance": 1520.4, "duration": 240.1}],
                    "distance": 1520.4,
                    "duration": "240.1"
                }],
                "waypoints": [
                    {"name": "Valiasr", "location": [51.421047, 35.732936]},
                    {"name": "", "location": [51.422185]}
                ]
            }"#,
        );

        let directions = RouteRequest::new(point(0.0, 0.0), point(1.0, 1.0))
            .decode(body)
            .unwrap();

        assert_eq!(directions.code.as_deref(), Some("Ok"));
        let route = &directions.routes[0];
        assert_eq!(route.distance, Some(1520.4));
        assert_eq!(route.duration, Some(240.1));
        assert_eq!(route.geometry.as_deref(), Some("_c`|Ek~`yH"));
        assert_eq!(route.legs[0].summary.as_deref(), Some("Valiasr"));

        let snapped = directions.waypoints[0].coordinate.unwrap();
        assert_abs_diff_eq!(snapped, point(35.732936, 51.421047), epsilon = 1e-9);
        assert_eq!(directions.waypoints[1].name, None);
        assert_eq!(directions.waypoints[1].coordinate, None);
    }

    #[test]
    fn null_lists_and_bad_locations_are_absent() {
        let request = RouteRequest::new(point(0.0, 0.0), point(1.0, 1.0));
        let directions = request
            .decode(Bytes::from_static(
                br#"{
                    "code": "Ok",
                    "routes": [{"distance": "10", "legs": null}],
                    "waypoints": [{"name": "a", "location": ["east", "north"]}, {"location": null}]
                }"#,
            ))
            .unwrap();

        assert_eq!(directions.routes[0].distance, Some(10.0));
        assert!(directions.routes[0].legs.is_empty());
        assert_eq!(directions.waypoints[0].name.as_deref(), Some("a"));
        assert_eq!(directions.waypoints[0].coordinate, None);
        assert_eq!(directions.waypoints[1].coordinate, None);

        let directions = request
            .decode(Bytes::from_static(br#"{"routes": null, "waypoints": null}"#))
            .unwrap();
        assert!(directions.routes.is_empty());
        assert!(directions.waypoints.is_empty());
    }

    #[test]
    fn array_payload_is_rejected() {
        let request = RouteRequest::new(point(0.0, 0.0), point(1.0, 1.0));
        assert!(matches!(
            request.decode(Bytes::from_static(b"[]")),
            Err(MapirError::Decode(_))
        ));
    }
}
