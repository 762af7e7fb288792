use std::net::IpAddr;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{Client, GeoIp2Error, Locales, NamedEntity};

const CITY_TYPE: &str = "application/vnd.maxmind.com-city+json; charset=UTF-8; version=2.1";
const ERROR_TYPE: &str = "application/vnd.maxmind.com-error+json; charset=UTF-8; version=2.0";

fn client(server: &MockServer) -> Client {
    Client::builder(42, "abcdef123456")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn json_response(status: u16, content_type: &str, body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), content_type)
}

fn insights_body() -> Value {
    json!({
        "city": {"geoname_id": 4930956, "names": {"en": "Boston", "ru": "Бостон"}},
        "continent": {"code": "NA", "geoname_id": 6255149, "names": {"en": "North America"}},
        "country": {"geoname_id": 6252001, "iso_code": "US",
                    "names": {"en": "United States", "ru": "США"}},
        "location": {"accuracy_radius": 20, "latitude": 42.3601, "longitude": -71.0589,
                     "average_income": 24626, "population_density": 1341,
                     "time_zone": "America/New_York"},
        "maxmind": {"queries_remaining": 11},
        "postal": {"code": "02101", "confidence": 40},
        "subdivisions": [{"iso_code": "MA", "names": {"en": "Massachusetts"}}],
        "traits": {"autonomous_system_number": 1234, "is_anycast": true,
                   "ip_address": "1.2.3.4", "network": "1.2.3.0/24",
                   "user_type": "residential", "static_ip_score": 1.3},
    })
}

#[tokio::test]
async fn test_insights() {
    let _ = env_logger::try_init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/insights/1.2.3.4"))
        .and(basic_auth("42", "abcdef123456"))
        .and(header("Accept", "application/json"))
        .respond_with(json_response(200, CITY_TYPE, &insights_body()))
        .expect(1)
        .mount(&server)
        .await;

    let insights = client(&server).insights(ip("1.2.3.4")).await.unwrap();
    assert_eq!(insights.city.name(), Some("Boston"));
    assert_eq!(insights.country.iso_code.as_deref(), Some("US"));
    assert_eq!(insights.location.average_income, Some(24626));
    assert!(insights.location.has_coordinates());
    assert_eq!(insights.postal.code.as_deref(), Some("02101"));
    assert_eq!(insights.most_specific_subdivision().iso_code.as_deref(), Some("MA"));
    assert_eq!(insights.maxmind.queries_remaining, Some(11));
    assert_eq!(insights.traits.autonomous_system_number, Some(1234));
    assert!(insights.traits.is_anycast);
    assert_eq!(insights.traits.ip_address.as_deref(), Some("1.2.3.4"));
    assert_eq!(insights.traits.network, Some("1.2.3.0/24".parse().unwrap()));
}

#[tokio::test]
async fn test_me_keeps_reported_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/country/me"))
        .respond_with(json_response(
            200,
            CITY_TYPE,
            &json!({"country": {"iso_code": "US"}, "traits": {"ip_address": "24.24.24.24"}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let country = client(&server).country(None).await.unwrap();
    assert_eq!(country.country.iso_code.as_deref(), Some("US"));
    assert_eq!(country.traits.ip_address.as_deref(), Some("24.24.24.24"));
    assert_eq!(country.traits.network, None);
}

#[tokio::test]
async fn test_queried_address_overrides_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/city/2001:db8::1"))
        .respond_with(json_response(
            200,
            CITY_TYPE,
            &json!({"traits": {"ip_address": "2001:db8:0:0:0:0:0:1", "network": "2001:db8::/32"}}),
        ))
        .mount(&server)
        .await;

    let city = client(&server).city(ip("2001:db8::1")).await.unwrap();
    assert_eq!(city.traits.ip_address.as_deref(), Some("2001:db8::1"));
    assert_eq!(city.traits.network, Some("2001:db8::/32".parse().unwrap()));
}

#[tokio::test]
async fn test_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/city/1.2.3.4"))
        .respond_with(json_response(200, CITY_TYPE, &json!({})))
        .mount(&server)
        .await;

    let city = client(&server).city(ip("1.2.3.4")).await.unwrap();
    assert_eq!(city.city.name(), None);
    assert_eq!(city.country.iso_code, None);
    assert!(city.subdivisions.is_empty());
    assert_eq!(city.most_specific_subdivision().name(), None);
    assert!(!city.location.has_coordinates());
    assert_eq!(city.maxmind.queries_remaining, None);
    assert_eq!(city.traits.ip_address.as_deref(), Some("1.2.3.4"));
    assert_eq!(city.traits.network, None);
}

#[tokio::test]
async fn test_null_members() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/city/1.2.3.4"))
        .respond_with(json_response(
            200,
            CITY_TYPE,
            &json!({"city": null, "maxmind": null, "subdivisions": null,
                    "traits": {"is_anonymous": null, "network": "1.2.3.0/24"}}),
        ))
        .mount(&server)
        .await;

    let city = client(&server).city(ip("1.2.3.4")).await.unwrap();
    assert_eq!(city.city.name(), None);
    assert!(city.subdivisions.is_empty());
    assert!(!city.traits.is_anonymous);
    assert_eq!(city.traits.network, Some("1.2.3.0/24".parse().unwrap()));
}

#[tokio::test]
async fn test_locales() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/city/1.2.3.4"))
        .respond_with(json_response(200, CITY_TYPE, &insights_body()))
        .mount(&server)
        .await;

    let client = Client::builder(42, "abcdef123456")
        .base_url(server.uri())
        .locales(Locales::new(["ru", "en"]))
        .build()
        .unwrap();
    let city = client.city(ip("1.2.3.4")).await.unwrap();
    assert_eq!(city.city.name(), Some("Бостон"));
    assert_eq!(city.country.name(), Some("США"));
    assert_eq!(city.continent.name(), Some("North America"));
    assert_eq!(client.locales().as_slice(), ["ru", "en"]);
}

#[tokio::test]
async fn test_invalid_ip_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/country/1.2.3.4"))
        .respond_with(json_response(
            400,
            ERROR_TYPE,
            &json!({"code": "IP_ADDRESS_INVALID",
                    "error": "The value \"1.2.3\" is not a valid ip address"}),
        ))
        .mount(&server)
        .await;

    let err = client(&server).country(ip("1.2.3.4")).await.unwrap_err();
    match err {
        GeoIp2Error::InvalidRequest { code, message, uri } => {
            assert_eq!(code, "IP_ADDRESS_INVALID");
            assert_eq!(message, "The value \"1.2.3\" is not a valid ip address");
            assert_eq!(uri, format!("{}/geoip/v2.1/country/1.2.3.4", server.uri()));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_error_codes() {
    let server = MockServer::start().await;
    let cases = [
        ("1.1.1.1", 401, "LICENSE_KEY_REQUIRED"),
        ("1.1.1.2", 401, "ACCOUNT_ID_REQUIRED"),
        ("1.1.1.3", 402, "OUT_OF_QUERIES"),
        ("1.1.1.4", 403, "PERMISSION_REQUIRED"),
        ("1.1.1.5", 404, "IP_ADDRESS_NOT_FOUND"),
        ("1.1.1.6", 400, "IP_ADDRESS_RESERVED"),
    ];
    for (address, status, code) in cases {
        Mock::given(method("GET"))
            .and(path(format!("/geoip/v2.1/city/{address}")))
            .respond_with(json_response(
                status,
                ERROR_TYPE,
                &json!({"code": code, "error": format!("{code} message")}),
            ))
            .mount(&server)
            .await;
    }

    let client = client(&server);
    let err = client.city(ip("1.1.1.1")).await.unwrap_err();
    assert!(matches!(err, GeoIp2Error::Authentication { .. }), "{err:?}");
    assert_eq!(err.to_string(), "LICENSE_KEY_REQUIRED message");
    assert!(err.is_domain());

    let err = client.city(ip("1.1.1.2")).await.unwrap_err();
    assert!(matches!(err, GeoIp2Error::Authentication { .. }), "{err:?}");

    let err = client.city(ip("1.1.1.3")).await.unwrap_err();
    assert!(matches!(err, GeoIp2Error::OutOfQueries { .. }), "{err:?}");

    let err = client.city(ip("1.1.1.4")).await.unwrap_err();
    assert!(matches!(err, GeoIp2Error::PermissionRequired { .. }), "{err:?}");

    for (address, code) in [("1.1.1.5", "IP_ADDRESS_NOT_FOUND"), ("1.1.1.6", "IP_ADDRESS_RESERVED")] {
        let err = client.city(ip(address)).await.unwrap_err();
        assert!(matches!(err, GeoIp2Error::AddressNotFound { .. }), "{err:?}");
        assert_eq!(err.to_string(), format!("{code} message"));
    }
}

#[tokio::test]
async fn test_transport_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/country/1.2.3.4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/country/1.2.3.5"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/country/1.2.3.6"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.country(ip("1.2.3.4")).await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert_eq!(err.status(), Some(500));

    let err = client.country(ip("1.2.3.5")).await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert!(err.to_string().contains("no message body"), "{err}");

    let err = client.country(ip("1.2.3.6")).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("did not include the expected JSON body"), "{err}");
}

#[tokio::test]
async fn test_undecodable_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/country/1.2.3.4"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"invalid\":yes}", CITY_TYPE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geoip/v2.1/country/1.2.3.5"))
        .respond_with(json_response(200, CITY_TYPE, &json!({"country": "US"})))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.country(ip("1.2.3.4")).await.unwrap_err();
    assert!(matches!(err, GeoIp2Error::InvalidInput { .. }), "{err:?}");

    let err = client.country(ip("1.2.3.5")).await.unwrap_err();
    assert!(matches!(err, GeoIp2Error::InvalidInput { .. }), "{err:?}");
    assert!(err.to_string().contains("could not decode"), "{err}");
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            json_response(200, CITY_TYPE, &json!({})).set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = Client::builder(42, "abcdef123456")
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = client.city(ip("1.2.3.4")).await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_connection_refused() {
    let client = Client::builder(42, "abcdef123456")
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let err = client.country(ip("1.2.3.4")).await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("User-Agent", "my-app/1.0"))
        .respond_with(json_response(200, CITY_TYPE, &json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder(42, "abcdef123456")
        .base_url(server.uri())
        .user_agent("my-app/1.0")
        .build()
        .unwrap();
    client.country(None).await.unwrap();
}

#[test]
fn test_blocking_client() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geoip/v2.1/insights/1.2.3.4"))
            .and(basic_auth("42", "abcdef123456"))
            .respond_with(json_response(200, CITY_TYPE, &insights_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geoip/v2.1/country/me"))
            .respond_with(json_response(
                401,
                ERROR_TYPE,
                &json!({"code": "AUTHORIZATION_INVALID", "error": "bad key"}),
            ))
            .mount(&server)
            .await;
        server
    });

    let client = Client::builder(42, "abcdef123456")
        .base_url(server.uri())
        .build_blocking()
        .unwrap();
    let insights = client.insights(ip("1.2.3.4")).unwrap();
    assert_eq!(insights.city.name(), Some("Boston"));
    assert_eq!(client.locales().as_slice(), ["en"]);

    let err = client.country(None).unwrap_err();
    assert!(matches!(err, GeoIp2Error::Authentication { .. }), "{err:?}");
}
