//! Error types shared by the database reader and the web service client.

use std::io;

use ipnetwork::IpNetworkError;
use maxminddb::MaxMindDBError;
use thiserror::Error;

/// Error returned by GeoIP2 lookups.
///
/// The variants fall into two families. Transport failures ([`Http`]) mean no
/// usable answer was obtained from the web service. Domain failures
/// ([`AddressNotFound`], [`Authentication`], [`OutOfQueries`],
/// [`PermissionRequired`], [`InvalidRequest`], [`InvalidInput`]) are the
/// backend's authoritative answer. [`InvalidOperation`] is a programming
/// error: the wrong reader method was used for the open database.
///
/// [`Http`]: GeoIp2Error::Http
/// [`AddressNotFound`]: GeoIp2Error::AddressNotFound
/// [`Authentication`]: GeoIp2Error::Authentication
/// [`OutOfQueries`]: GeoIp2Error::OutOfQueries
/// [`PermissionRequired`]: GeoIp2Error::PermissionRequired
/// [`InvalidRequest`]: GeoIp2Error::InvalidRequest
/// [`InvalidInput`]: GeoIp2Error::InvalidInput
/// [`InvalidOperation`]: GeoIp2Error::InvalidOperation
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoIp2Error {
    /// The backend has no data for the address.
    #[error("{message}")]
    AddressNotFound {
        /// Human-readable description.
        message: String,
    },

    /// The account id or license key was missing or rejected.
    #[error("{message}")]
    Authentication {
        /// Error message from the web service.
        message: String,
    },

    /// The account is out of queries.
    #[error("{message}")]
    OutOfQueries {
        /// Error message from the web service.
        message: String,
    },

    /// The account is not permitted to use the requested service.
    #[error("{message}")]
    PermissionRequired {
        /// Error message from the web service.
        message: String,
    },

    /// The web service rejected the request with an unrecognized error code.
    #[error("{message} (code: {code}, uri: {uri})")]
    InvalidRequest {
        /// Machine-readable code returned by the web service.
        code: String,
        /// Error message from the web service.
        message: String,
        /// URI that was queried.
        uri: String,
    },

    /// The input or a response body could not be interpreted.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of what is invalid.
        message: String,
    },

    /// No usable HTTP response was obtained.
    #[error("{message}")]
    Http {
        /// Description of the failure.
        message: String,
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// URI that was queried.
        uri: String,
        /// Underlying transport error, if any.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The reader method does not match the database type.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Names the database type and the attempted method.
        message: String,
    },

    /// The MaxMind DB decoder reported an error.
    #[error("database error: {0}")]
    Database(
        #[from]
        #[source]
        MaxMindDBError,
    ),

    /// An I/O error occurred while opening a database.
    #[error("i/o error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),

    /// A database record could not be bound into the requested response.
    #[error("could not bind record: {0}")]
    Decoding(
        #[from]
        #[source]
        serde_json::Error,
    ),

    /// A network could not be derived from a lookup.
    #[error("invalid network: {0}")]
    InvalidNetwork(
        #[from]
        #[source]
        IpNetworkError,
    ),
}

impl GeoIp2Error {
    /// Creates an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        GeoIp2Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an Http error without an underlying transport error.
    pub fn http(message: impl Into<String>, status: Option<u16>, uri: impl Into<String>) -> Self {
        GeoIp2Error::Http {
            message: message.into(),
            status,
            uri: uri.into(),
            source: None,
        }
    }

    /// Returns true for transport-layer failures.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, GeoIp2Error::Http { .. })
    }

    /// Returns true when the error is the backend's own answer rather than a
    /// transport or programming failure.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            GeoIp2Error::AddressNotFound { .. }
                | GeoIp2Error::Authentication { .. }
                | GeoIp2Error::OutOfQueries { .. }
                | GeoIp2Error::PermissionRequired { .. }
                | GeoIp2Error::InvalidRequest { .. }
                | GeoIp2Error::InvalidInput { .. }
        )
    }

    /// Returns the HTTP status for transport errors that received a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GeoIp2Error::Http { status, .. } => *status,
            _ => None,
        }
    }
}
