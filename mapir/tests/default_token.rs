//! The default access token is process-wide, so these checks run in their own test binary.

use assert_matches::assert_matches;
use mapir::config::{default_access_token, set_default_access_token};
use mapir::endpoint::ReverseGeocode;
use mapir::mapir_types::Coordinate;
use mapir::request::API_KEY_HEADER;
use mapir::{AccessToken, Client, MapirError};

#[test]
fn default_token_and_client_override() {
    let coordinate = Coordinate::new(35.73259, 51.422456).unwrap();
    let without_token = Client::builder().build().unwrap();
    assert_matches!(
        without_token.request_for(&ReverseGeocode::new(coordinate)),
        Err(MapirError::Configuration(_))
    );

    set_default_access_token(AccessToken::new("process-wide").unwrap()).unwrap();
    assert_eq!(default_access_token().unwrap().as_str(), "process-wide");

    let request = without_token
        .request_for(&ReverseGeocode::new(coordinate))
        .unwrap();
    assert_eq!(request.headers[API_KEY_HEADER], "process-wide");

    let with_token = Client::builder()
        .with_access_token(AccessToken::new("per-client").unwrap())
        .build()
        .unwrap();
    let request = with_token
        .request_for(&ReverseGeocode::new(coordinate))
        .unwrap();
    assert_eq!(request.headers[API_KEY_HEADER], "per-client");

    assert_matches!(
        set_default_access_token(AccessToken::new("another").unwrap()),
        Err(MapirError::Configuration(_))
    );
    assert_eq!(default_access_token().unwrap().as_str(), "process-wide");
}
