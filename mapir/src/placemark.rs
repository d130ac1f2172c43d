//! Result of (reverse) geocoding.

use mapir_types::Coordinate;
use serde::{Deserialize, Serialize};

use crate::decode::{decode_object, decode_point, optional_text};
use crate::error::MapirError;

/// Address and location returned by reverse geocoding.
///
/// Placemarks are only created by decoding API responses. All the structured fields are optional
/// since the API omits those that do not apply to the location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placemark {
    address: String,
    postal_address: Option<String>,
    address_compact: Option<String>,
    primary: Option<String>,
    name: Option<String>,
    poi: Option<String>,
    country: Option<String>,
    province: Option<String>,
    county: Option<String>,
    district: Option<String>,
    rural_district: Option<String>,
    city: Option<String>,
    village: Option<String>,
    region: Option<String>,
    neighbourhood: Option<String>,
    last: Option<String>,
    plaque: Option<String>,
    postal_code: Option<String>,
    coordinate: Option<Coordinate>,
}

#[derive(Deserialize)]
struct PlacemarkResponse {
    #[serde(default, deserialize_with = "optional_text")]
    address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    postal_address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    address_compact: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    primary: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    poi: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    country: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    province: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    county: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    district: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    rural_district: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    city: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    village: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    region: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    neighbourhood: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    last: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    plaque: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    postal_code: Option<String>,
    #[serde(default)]
    geom: Option<serde_json::Value>,
}

impl From<PlacemarkResponse> for Placemark {
    fn from(value: PlacemarkResponse) -> Self {
        Self {
            coordinate: decode_point(value.geom.as_ref()),
            address: value.address.unwrap_or_default(),
            postal_address: value.postal_address,
            address_compact: value.address_compact,
            primary: value.primary,
            name: value.name,
            poi: value.poi,
            country: value.country,
            province: value.province,
            county: value.county,
            district: value.district,
            rural_district: value.rural_district,
            city: value.city,
            village: value.village,
            region: value.region,
            neighbourhood: value.neighbourhood,
            last: value.last,
            plaque: value.plaque,
            postal_code: value.postal_code,
        }
    }
}

/// Decodes the response of both `/reverse` and `/fast-reverse` endpoints.
pub fn decode_placemark(bytes: &[u8]) -> Result<Placemark, MapirError> {
    decode_object::<PlacemarkResponse>(bytes).map(Placemark::from)
}

impl Placemark {
    /// Full address. Empty if the API did not return one.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Address in the format used for postal delivery.
    pub fn postal_address(&self) -> Option<&str> {
        self.postal_address.as_deref()
    }

    /// Short form of the address.
    pub fn address_compact(&self) -> Option<&str> {
        self.address_compact.as_deref()
    }

    /// Main street or square of the address.
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// Name of the place.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Point of interest at the location.
    pub fn poi(&self) -> Option<&str> {
        self.poi.as_deref()
    }

    /// Country.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Province.
    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    /// County.
    pub fn county(&self) -> Option<&str> {
        self.county.as_deref()
    }

    /// District.
    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    /// Rural district.
    pub fn rural_district(&self) -> Option<&str> {
        self.rural_district.as_deref()
    }

    /// City.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Village.
    pub fn village(&self) -> Option<&str> {
        self.village.as_deref()
    }

    /// Municipal region.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Neighbourhood.
    pub fn neighbourhood(&self) -> Option<&str> {
        self.neighbourhood.as_deref()
    }

    /// Last (most specific) part of the address, usually an alley or a street.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// House number.
    pub fn plaque(&self) -> Option<&str> {
        self.plaque.as_deref()
    }

    /// Postal code.
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    /// Location of the placemark.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}
