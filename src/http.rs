//! Classification of web service responses.
//!
//! A 200 with a JSON body is the only success. 4xx bodies carry a
//! machine-readable `code` that [`error_for_code`] maps onto the error
//! taxonomy; every other outcome is a transport failure.

use serde::Deserialize;
use serde_json::Value;

use crate::error::GeoIp2Error;

/// Error body returned by the web service with 4xx statuses.
#[derive(Deserialize, Debug)]
struct WebServiceError {
    code: Option<String>,
    error: Option<String>,
}

/// Maps a web service error code onto the error taxonomy.
///
/// Unknown codes become [`GeoIp2Error::InvalidRequest`], which keeps the
/// code and the queried URI.
pub fn error_for_code(code: &str, message: &str, uri: &str) -> GeoIp2Error {
    let message = message.to_owned();
    match code {
        "IP_ADDRESS_NOT_FOUND" | "IP_ADDRESS_RESERVED" => GeoIp2Error::AddressNotFound { message },
        "ACCOUNT_ID_REQUIRED"
        | "ACCOUNT_ID_UNKNOWN"
        | "AUTHORIZATION_INVALID"
        | "LICENSE_KEY_REQUIRED"
        | "USER_ID_REQUIRED"
        | "USER_ID_UNKNOWN" => GeoIp2Error::Authentication { message },
        "OUT_OF_QUERIES" | "INSUFFICIENT_FUNDS" => GeoIp2Error::OutOfQueries { message },
        "PERMISSION_REQUIRED" => GeoIp2Error::PermissionRequired { message },
        _ => GeoIp2Error::InvalidRequest {
            code: code.to_owned(),
            message,
            uri: uri.to_owned(),
        },
    }
}

/// Turns a status, content type and body into the raw record of a successful
/// response, or the matching error.
pub(crate) fn classify(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
    uri: &str,
) -> Result<Value, GeoIp2Error> {
    match status {
        200 => success_body(content_type, body, uri),
        400..=499 => Err(client_error(status, body, uri)),
        500..=599 => Err(GeoIp2Error::http(
            format!("Received a server ({status}) error for {uri}"),
            Some(status),
            uri,
        )),
        _ => Err(GeoIp2Error::http(
            format!("Received an unexpected response for {uri} (status code: {status})"),
            Some(status),
            uri,
        )),
    }
}

fn success_body(content_type: Option<&str>, body: &[u8], uri: &str) -> Result<Value, GeoIp2Error> {
    if body.is_empty() {
        return Err(GeoIp2Error::http(
            format!("Received a 200 response for {uri} but there was no message body."),
            Some(200),
            uri,
        ));
    }

    let content_type = content_type.unwrap_or_default();
    if !content_type.to_ascii_lowercase().contains("json") {
        return Err(GeoIp2Error::invalid_input(format!(
            "Received a 200 response for {uri} but it does not appear to be JSON: {content_type}"
        )));
    }

    serde_json::from_slice(body).map_err(|e| {
        GeoIp2Error::invalid_input(format!(
            "Received a 200 response for {uri} but could not decode it as JSON: {e}"
        ))
    })
}

fn client_error(status: u16, body: &[u8], uri: &str) -> GeoIp2Error {
    if body.is_empty() {
        return GeoIp2Error::http(
            format!("Received a {status} error for {uri} with no body."),
            Some(status),
            uri,
        );
    }

    let text = String::from_utf8_lossy(body);
    match serde_json::from_slice::<WebServiceError>(body) {
        Ok(WebServiceError {
            code: Some(code),
            error: Some(error),
        }) => error_for_code(&code, &error, uri),
        Ok(_) => GeoIp2Error::http(
            format!(
                "Received a {status} error for {uri}; the response contains JSON but it does \
                 not specify code or error keys: {text}"
            ),
            Some(status),
            uri,
        ),
        Err(_) => GeoIp2Error::http(
            format!(
                "Received a {status} error for {uri} but it did not include the expected JSON \
                 body: {text}"
            ),
            Some(status),
            uri,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URI: &str = "https://geoip.maxmind.com/geoip/v2.1/city/1.2.3.4";
    const JSON: Option<&str> = Some("application/vnd.maxmind.com-city+json; charset=UTF-8; version=2.1");

    #[test]
    fn test_error_codes() {
        for code in ["IP_ADDRESS_NOT_FOUND", "IP_ADDRESS_RESERVED"] {
            assert!(matches!(
                error_for_code(code, "msg", URI),
                GeoIp2Error::AddressNotFound { .. }
            ));
        }
        for code in [
            "ACCOUNT_ID_REQUIRED",
            "ACCOUNT_ID_UNKNOWN",
            "AUTHORIZATION_INVALID",
            "LICENSE_KEY_REQUIRED",
            "USER_ID_REQUIRED",
            "USER_ID_UNKNOWN",
        ] {
            assert!(matches!(
                error_for_code(code, "msg", URI),
                GeoIp2Error::Authentication { .. }
            ));
        }
        for code in ["OUT_OF_QUERIES", "INSUFFICIENT_FUNDS"] {
            assert!(matches!(
                error_for_code(code, "msg", URI),
                GeoIp2Error::OutOfQueries { .. }
            ));
        }
        assert!(matches!(
            error_for_code("PERMISSION_REQUIRED", "msg", URI),
            GeoIp2Error::PermissionRequired { .. }
        ));

        match error_for_code("IP_ADDRESS_INVALID", "not a valid ip address", URI) {
            GeoIp2Error::InvalidRequest { code, message, uri } => {
                assert_eq!(code, "IP_ADDRESS_INVALID");
                assert_eq!(message, "not a valid ip address");
                assert_eq!(uri, URI);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_success() {
        let body = br#"{"city": {"names": {"en": "Boxford"}}}"#;
        assert_eq!(
            classify(200, JSON, body, URI).unwrap(),
            json!({"city": {"names": {"en": "Boxford"}}})
        );
        assert_eq!(classify(200, Some("application/json"), b"{}", URI).unwrap(), json!({}));
    }

    #[test]
    fn test_success_without_body() {
        let err = classify(200, JSON, b"", URI).unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("no message body"), "{err}");
    }

    #[test]
    fn test_success_not_json() {
        let err = classify(200, Some("text/plain"), b"hello", URI).unwrap_err();
        assert!(matches!(err, GeoIp2Error::InvalidInput { .. }), "{err:?}");
        assert!(err.to_string().contains("does not appear to be JSON"), "{err}");

        let err = classify(200, None, b"{}", URI).unwrap_err();
        assert!(matches!(err, GeoIp2Error::InvalidInput { .. }), "{err:?}");
    }

    #[test]
    fn test_success_undecodable() {
        let err = classify(200, JSON, b"{\"invalid\":yes}", URI).unwrap_err();
        assert!(matches!(err, GeoIp2Error::InvalidInput { .. }), "{err:?}");
        assert!(err.to_string().contains("could not decode it as JSON"), "{err}");
    }

    #[test]
    fn test_client_errors() {
        let err = classify(
            400,
            JSON,
            br#"{"code":"IP_ADDRESS_INVALID","error":"not a valid ip address"}"#,
            URI,
        )
        .unwrap_err();
        assert!(matches!(err, GeoIp2Error::InvalidRequest { .. }), "{err:?}");

        let err = classify(401, JSON, br#"{"code":"LICENSE_KEY_REQUIRED","error":"x"}"#, URI)
            .unwrap_err();
        assert!(matches!(err, GeoIp2Error::Authentication { .. }), "{err:?}");

        let err = classify(404, JSON, b"", URI).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("with no body"), "{err}");

        let err = classify(400, JSON, br#"{"weird":42}"#, URI).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("does not specify code or error keys"), "{err}");

        let err = classify(400, JSON, br#"{"code":"IP_ADDRESS_INVALID"}"#, URI).unwrap_err();
        assert!(err.to_string().contains("does not specify code or error keys"), "{err}");

        let err = classify(400, Some("text/html"), b"<html>bad</html>", URI).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("did not include the expected JSON body"), "{err}");
    }

    #[test]
    fn test_server_and_unexpected() {
        let err = classify(500, JSON, b"{}", URI).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), format!("Received a server (500) error for {URI}"));

        let err = classify(300, JSON, b"{}", URI).unwrap_err();
        assert_eq!(err.status(), Some(300));
        assert!(err.to_string().contains("status code: 300"), "{err}");

        let err = classify(204, JSON, b"", URI).unwrap_err();
        assert!(err.is_transport());
    }
}
