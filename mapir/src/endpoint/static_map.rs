use bytes::Bytes;
use mapir_types::Coordinate;

use crate::endpoint::{format_degrees, Endpoint};
use crate::error::MapirError;
use crate::request::QueryParams;

/// Icon of a [`Marker`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStyle {
    /// Generic pin.
    #[default]
    Default,
    /// Start of a route.
    Origin,
    /// End of a route.
    Destination,
}

impl MarkerStyle {
    fn as_str(&self) -> &'static str {
        match self {
            MarkerStyle::Default => "default",
            MarkerStyle::Origin => "origin",
            MarkerStyle::Destination => "destination",
        }
    }
}

/// Marker drawn on a static map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Position of the marker.
    pub coordinate: Coordinate,
    /// Icon of the marker.
    pub style: MarkerStyle,
    /// Text shown next to the marker.
    pub label: String,
}

impl Marker {
    /// Creates a marker with the default style.
    pub fn new(coordinate: Coordinate, label: impl Into<String>) -> Self {
        Self {
            coordinate,
            style: MarkerStyle::default(),
            label: label.into(),
        }
    }

    /// Sets the icon.
    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    fn to_query_value(&self) -> String {
        format!(
            "color:{}|label:{}|{},{}",
            self.style.as_str(),
            self.label,
            format_degrees(self.coordinate.lon()),
            format_degrees(self.coordinate.lat())
        )
    }
}

/// Renders a map image of the given size.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapRequest {
    width: u32,
    height: u32,
    zoom_level: u8,
    markers: Vec<Marker>,
}

impl StaticMapRequest {
    /// Creates a request for an image of `width`x`height` pixels.
    pub fn new(width: u32, height: u32, zoom_level: u8) -> Self {
        Self {
            width,
            height,
            zoom_level,
            markers: vec![],
        }
    }

    /// Adds a marker. The map is centered on the markers.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Markers of the map.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Endpoint for StaticMapRequest {
    type Output = StaticMap;

    fn kind(&self) -> &str {
        "static-map"
    }

    fn path(&self) -> String {
        "/static".into()
    }

    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with("width", self.width.to_string())
            .with("height", self.height.to_string())
            .with("zoom_level", self.zoom_level.to_string());

        for marker in &self.markers {
            query.append("markers", marker.to_query_value());
        }

        query
    }

    fn decode(&self, body: Bytes) -> Result<StaticMap, MapirError> {
        if body.is_empty() {
            return Err(MapirError::Decode("static map image is empty".into()));
        }

        Ok(StaticMap { bytes: body })
    }
}

/// Encoded image returned by [`StaticMapRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMap {
    bytes: Bytes,
}

impl StaticMap {
    /// Image bytes, as sent by the server.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the image returning its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false, since an empty response is rejected when decoding.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn one_query_entry_per_marker() {
        let request = StaticMapRequest::new(600, 400, 12)
            .with_marker(Marker::new(Coordinate::new(35.7, 51.4).unwrap(), "home"))
            .with_marker(
                Marker::new(Coordinate::new(35.71, 51.41).unwrap(), "work")
                    .with_style(MarkerStyle::Destination),
            );

        assert_eq!(request.path(), "/static");
        assert_eq!(
            request.query().iter().collect::<Vec<_>>(),
            vec![
                ("width", "600"),
                ("height", "400"),
                ("zoom_level", "12"),
                ("markers", "color:default|label:home|51.400000,35.700000"),
                ("markers", "color:destination|label:work|51.410000,35.710000"),
            ]
        );
    }

    #[test]
    fn keeps_image_bytes() {
        let request = StaticMapRequest::new(10, 10, 1);
        let image = request
            .decode(Bytes::from_static(b"\x89PNG\r\n"))
            .unwrap();
        assert_eq!(image.len(), 6);
        assert_eq!(&image.bytes()[1..4], b"PNG");

        assert_matches!(request.decode(Bytes::new()), Err(MapirError::Decode(_)));
    }
}
