use bytes::Bytes;
use mapir_types::Coordinate;
use serde::{Deserialize, Serialize};

use crate::decode::{
    decode_object, decode_point, lenient_list, optional_count, optional_text,
};
use crate::endpoint::{format_degrees, Endpoint};
use crate::error::MapirError;
use crate::placemark::{decode_placemark, Placemark};
use crate::request::QueryParams;

fn location_query(coordinate: &Coordinate) -> QueryParams {
    QueryParams::new()
        .with("lat", format_degrees(coordinate.lat()))
        .with("lon", format_degrees(coordinate.lon()))
}

/// Finds the address of the given location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseGeocode {
    /// Location to find the address for.
    pub coordinate: Coordinate,
}

impl ReverseGeocode {
    /// Creates a new request.
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl Endpoint for ReverseGeocode {
    type Output = Placemark;

    fn kind(&self) -> &str {
        "reverse-geocode"
    }

    fn path(&self) -> String {
        "/reverse".into()
    }

    fn query(&self) -> QueryParams {
        location_query(&self.coordinate)
    }

    fn decode(&self, body: Bytes) -> Result<Placemark, MapirError> {
        decode_placemark(&body)
    }
}

/// Lower latency version of [`ReverseGeocode`]. The response has the same format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastReverseGeocode {
    /// Location to find the address for.
    pub coordinate: Coordinate,
}

impl FastReverseGeocode {
    /// Creates a new request.
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl Endpoint for FastReverseGeocode {
    type Output = Placemark;

    fn kind(&self) -> &str {
        "fast-reverse-geocode"
    }

    fn path(&self) -> String {
        "/fast-reverse".into()
    }

    fn query(&self) -> QueryParams {
        location_query(&self.coordinate)
    }

    fn decode(&self, body: Bytes) -> Result<Placemark, MapirError> {
        decode_placemark(&body)
    }
}

/// Forward geocoding: finds places matching the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    /// Text to search for.
    pub text: String,
    /// If set, only places in this city are returned.
    pub city: Option<String>,
}

impl Search {
    /// Creates a new request.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            city: None,
        }
    }

    /// Limits the search to the given city.
    pub fn in_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

impl Endpoint for Search {
    type Output = SearchResult;

    fn kind(&self) -> &str {
        "search"
    }

    fn path(&self) -> String {
        "/search/v2".into()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new().with("text", self.text.as_str());
        if let Some(city) = &self.city {
            query.insert("$filter", format!("city eq {city}"));
        }

        query
    }

    fn decode(&self, body: Bytes) -> Result<SearchResult, MapirError> {
        let response: SearchResponse = decode_object(&body)?;
        Ok(SearchResult {
            count: response.count,
            items: response.value.into_iter().map(SearchItem::from).collect(),
        })
    }
}

/// Places found by [`Search`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Total number of matches reported by the server.
    pub count: Option<u64>,
    /// Found places.
    pub items: Vec<SearchItem>,
}

/// Single place found by [`Search`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchItem {
    /// Name of the place.
    pub title: Option<String>,
    /// Address of the place.
    pub address: Option<String>,
    /// Province.
    pub province: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Neighbourhood.
    pub neighbourhood: Option<String>,
    /// Type of the place, e.g. `poi` or `street`.
    pub kind: Option<String>,
    /// Feature class of the place.
    pub fclass: Option<String>,
    /// Location of the place.
    pub coordinate: Option<Coordinate>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(rename = "odata.count", default, deserialize_with = "optional_count")]
    count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_list")]
    value: Vec<SearchItemResponse>,
}

#[derive(Deserialize)]
struct SearchItemResponse {
    #[serde(default, deserialize_with = "optional_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    province: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    city: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    neighborhood: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "optional_text")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    fclass: Option<String>,
    #[serde(default)]
    geom: Option<serde_json::Value>,
}

impl From<SearchItemResponse> for SearchItem {
    fn from(value: SearchItemResponse) -> Self {
        Self {
            coordinate: decode_point(value.geom.as_ref()),
            title: value.title,
            address: value.address,
            province: value.province,
            city: value.city,
            neighbourhood: value.neighborhood,
            kind: value.kind,
            fclass: value.fclass,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn tehran() -> Coordinate {
        Coordinate::new(35.73259, 51.422456).unwrap()
    }

    #[test]
    fn reverse_paths() {
        let reverse = ReverseGeocode::new(tehran());
        assert_eq!(reverse.path(), "/reverse");
        assert_eq!(
            reverse.query().iter().collect::<Vec<_>>(),
            vec![("lat", "35.732590"), ("lon", "51.422456")]
        );

        let fast = FastReverseGeocode::new(tehran());
        assert_eq!(fast.path(), "/fast-reverse");
        assert_eq!(fast.query(), reverse.query());
    }

    #[test]
    fn reverse_and_fast_reverse_decode_the_same_way() {
        let body = Bytes::from_static(
            br#"{"address": "x", "geom": {"type": "Point", "coordinates": [51.4, 35.7]}}"#,
        );
        let reverse = ReverseGeocode::new(tehran()).decode(body.clone()).unwrap();
        let fast = FastReverseGeocode::new(tehran()).decode(body).unwrap();

        assert_eq!(reverse, fast);
    }

    #[test]
    fn search_filter() {
        let search = Search::new("آزادی");
        assert_eq!(search.query().get("$filter"), None);

        let search = search.in_city("تهران");
        assert_eq!(search.path(), "/search/v2");
        assert_eq!(search.query().get("text"), Some("آزادی"));
        assert_eq!(search.query().get("$filter"), Some("city eq تهران"));
    }

    #[test]
    fn decodes_search_response() {
        let body = Bytes::from_static(
            br#"{
                "odata.count": 2,
                "value": [
                    {
                        "title": "Azadi Tower",
                        "address": "Azadi Sq.",
                        "province": "Tehran",
                        "city": "Tehran",
                        "neighborhood": "Azadi",
                        "type": "poi",
                        "fclass": "monument",
                        "geom": {"type": "Point", "coordinates": ["51.338", "35.699"]}
                    },
                    {
                        "title": "Broken",
                        "geom": {"type": "Point", "coordinates": ["north", "east"]}
                    }
                ]
            }"#,
        );

        let result = Search::new("azadi").decode(body).unwrap();
        assert_eq!(result.count, Some(2));
        assert_eq!(result.items.len(), 2);

        let tower = &result.items[0];
        assert_eq!(tower.neighbourhood.as_deref(), Some("Azadi"));
        assert_eq!(tower.kind.as_deref(), Some("poi"));
        assert_eq!(tower.coordinate, Some(Coordinate::new(35.699, 51.338).unwrap()));

        assert_eq!(result.items[1].title.as_deref(), Some("Broken"));
        assert_eq!(result.items[1].coordinate, None);
    }

    #[test]
    fn search_response_must_be_object() {
        assert_matches!(
            Search::new("x").decode(Bytes::from_static(b"\"nothing\"")),
            Err(MapirError::Decode(_))
        );
        assert_matches!(
            Search::new("x").decode(Bytes::from_static(b"[]")),
            Err(MapirError::Decode(_))
        );
    }

    #[test]
    fn lenient_count_and_items() {
        let result = Search::new("x")
            .decode(Bytes::from_static(
                br#"{"odata.count": "1", "value": [{"title": "Azadi"}]}"#,
            ))
            .unwrap();
        assert_eq!(result.count, Some(1));
        assert_eq!(result.items[0].title.as_deref(), Some("Azadi"));

        let result = Search::new("x")
            .decode(Bytes::from_static(br#"{"odata.count": 2.0, "value": null}"#))
            .unwrap();
        assert_eq!(result.count, Some(2));
        assert!(result.items.is_empty());
    }
}
