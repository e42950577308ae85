//! Integration tests for the transport and geocoding clients (wiremock-based)

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_transport::{
    GeocodingClient, GeocodingError, HttpTransportClient, NominatimConfig,
    NominatimGeocodingClient, OptionsRequest, TransportClient, TransportConfig, TransportError,
};

fn config_for_mock(base_url: &str) -> TransportConfig {
    TransportConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        cache_ttl_minutes: 0,
        ..TransportConfig::default()
    }
}

fn louvre_to_notre_dame(step_id: u32) -> OptionsRequest {
    OptionsRequest::new("Rue de Rivoli, Paris", "Parvis Notre-Dame, Paris", step_id)
}

const fn sample_options_json() -> &'static str {
    r#"[
        "Adresse: Rue de Rivoli → Parvis Notre-Dame | Moyen: Marche à pied | Temps: 16min | Prix: 0€",
        "Adresse: Rue de Rivoli → Parvis Notre-Dame | Moyen: Métro 1 puis 4 | Temps: 11min | Prix: 2,15€"
    ]"#
}

#[tokio::test]
async fn test_request_options_list_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .and(body_json(serde_json::json!({
            "origin": "Rue de Rivoli, Paris",
            "destination": "Parvis Notre-Dame, Paris",
            "step_id": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_options_json()))
        .mount(&server)
        .await;

    let client = HttpTransportClient::new(&config_for_mock(&server.uri())).unwrap();
    let response = client.request_options(&louvre_to_notre_dame(2)).await.unwrap();

    assert_eq!(response.step_id, Some(2));
    assert_eq!(response.options.len(), 2);
    assert!(response.options[1].contains("Métro"));
    assert!(!response.is_error());
}

#[tokio::test]
async fn test_request_options_envelope_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Données invalides",
            "step_id": 1,
            "success": false
        })))
        .mount(&server)
        .await;

    let client = HttpTransportClient::new(&config_for_mock(&server.uri())).unwrap();
    let response = client.request_options(&louvre_to_notre_dame(1)).await.unwrap();
    assert!(response.is_error());
    assert!(response.options.is_empty());
}

#[tokio::test]
async fn test_request_options_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = HttpTransportClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .request_options(&louvre_to_notre_dame(1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_request_options_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpTransportClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .request_options(&louvre_to_notre_dame(1))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::RequestFailed(_)));
}

#[tokio::test]
async fn test_request_options_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpTransportClient::new(&config_for_mock(&server.uri())).unwrap();
    let err = client
        .request_options(&louvre_to_notre_dame(1))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::ParseError(_)));
}

#[tokio::test]
async fn test_request_options_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sample_options_json())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = TransportConfig {
        timeout_secs: 1,
        ..config_for_mock(&server.uri())
    };
    let client = HttpTransportClient::new(&config).unwrap();
    let err = client
        .request_options(&louvre_to_notre_dame(1))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Timeout { timeout_secs: 1 }));
}

#[tokio::test]
async fn test_cache_serves_same_pair_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_options_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = TransportConfig {
        cache_ttl_minutes: 10,
        ..config_for_mock(&server.uri())
    };
    let client = HttpTransportClient::new(&config).unwrap();

    let first = client.request_options(&louvre_to_notre_dame(1)).await.unwrap();
    let second = client
        .request_options(&OptionsRequest::new(
            "RUE DE RIVOLI, PARIS",
            "parvis notre-dame, paris",
            3,
        ))
        .await
        .unwrap();

    assert_eq!(first.options, second.options);
    assert_eq!(second.step_id, Some(3));
}

#[tokio::test]
async fn test_canned_list_is_fallback_and_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            "Adresse: Rue de Rivoli, Paris → Parvis Notre-Dame, Paris | Moyen: Marche à pied | Temps: 30min | Prix: 0€",
            "Adresse: Rue de Rivoli, Paris → Parvis Notre-Dame, Paris | Moyen: Taxi | Temps: 10min | Prix: 15€"
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let config = TransportConfig {
        cache_ttl_minutes: 10,
        ..config_for_mock(&server.uri())
    };
    let client = HttpTransportClient::new(&config).unwrap();

    for _ in 0..2 {
        let response = client.request_options(&louvre_to_notre_dame(1)).await.unwrap();
        assert!(response.fallback);
        assert_eq!(response.options.len(), 2);
    }
}

#[tokio::test]
async fn test_placeholder_answers_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transport-options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "options": ["Adresse: A → B | Moyen: Taxi | Temps: 10min | Prix: 15€"],
            "step_id": 1,
            "success": true,
            "fallback": true
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = TransportConfig {
        cache_ttl_minutes: 10,
        ..config_for_mock(&server.uri())
    };
    let client = HttpTransportClient::new(&config).unwrap();

    for _ in 0..2 {
        let response = client.request_options(&louvre_to_notre_dame(1)).await.unwrap();
        assert!(response.fallback);
    }
}

fn nominatim_for_mock(base_url: &str) -> NominatimGeocodingClient {
    let config = NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    };
    NominatimGeocodingClient::new(&config, "Tourguide-test").unwrap()
}

#[tokio::test]
async fn test_geocode_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Musée du Louvre, Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "48.8606", "lon": "2.3376", "display_name": "Musée du Louvre"}
        ])))
        .mount(&server)
        .await;

    let client = nominatim_for_mock(&server.uri());
    let point = client.geocode("Musée du Louvre, Paris").await.unwrap();
    assert!((point.latitude() - 48.8606).abs() < 1e-9);
    assert!((point.longitude() - 2.3376).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = nominatim_for_mock(&server.uri());
    let err = client.geocode("Nowhere at all").await.unwrap_err();
    assert!(matches!(err, GeocodingError::AddressNotFound(_)));
}

#[tokio::test]
async fn test_geocode_empty_address() {
    let client = nominatim_for_mock("http://127.0.0.1:9");
    let err = client.geocode("   ").await.unwrap_err();
    assert!(matches!(err, GeocodingError::AddressNotFound(_)));
}
