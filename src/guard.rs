//! Checks that an open database can answer a reader method.

use crate::error::GeoIp2Error;

/// Succeeds if `database_type` contains `requested` as a substring, e.g.
/// `"City"` against `"GeoIP2-City"`.
///
/// A mismatch means the wrong reader method was used for the database and is
/// reported as [`GeoIp2Error::InvalidOperation`].
pub fn check_database_type(
    database_type: &str,
    requested: &str,
    method: &str,
) -> Result<(), GeoIp2Error> {
    if database_type.contains(requested) {
        return Ok(());
    }
    Err(GeoIp2Error::InvalidOperation {
        message: format!("the {method} method cannot be used with the {database_type} database"),
    })
}
