//! Blocking web service client.
//!
//! Wraps the async [`Client`](crate::Client) and waits on each request with a
//! private current-thread runtime, so both calling conventions share one
//! request and classification path. Do not call it from inside an async
//! runtime; use the async client there.

use std::net::IpAddr;

use tokio::runtime::{Builder, Runtime};

use crate::error::GeoIp2Error;
use crate::locales::Locales;
use crate::response::{CityResponse, CountryResponse, InsightsResponse};

/// Blocking client for the GeoIP2 Precision web service.
///
/// # Example
///
/// ```no_run
/// use geoip2::{Client, NamedEntity};
///
/// # fn main() -> Result<(), geoip2::GeoIp2Error> {
/// let client = Client::builder(42, "license_key").build_blocking()?;
/// let country = client.country(None)?;
/// println!("{:?}", country.country.name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    inner: crate::Client,
    runtime: Runtime,
}

impl Client {
    /// Creates a blocking client for the default host with default settings.
    pub fn new(account_id: u32, license_key: impl Into<String>) -> Result<Self, GeoIp2Error> {
        crate::Client::builder(account_id, license_key).build_blocking()
    }

    /// Wraps an async client.
    pub fn from_async(inner: crate::Client) -> Result<Self, GeoIp2Error> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Client { inner, runtime })
    }

    /// Locales handed to every response.
    #[must_use]
    pub fn locales(&self) -> &Locales {
        self.inner.locales()
    }

    /// Country web service lookup.
    pub fn country(
        &self,
        ip_address: impl Into<Option<IpAddr>>,
    ) -> Result<CountryResponse, GeoIp2Error> {
        self.runtime.block_on(self.inner.country(ip_address))
    }

    /// City web service lookup.
    pub fn city(&self, ip_address: impl Into<Option<IpAddr>>) -> Result<CityResponse, GeoIp2Error> {
        self.runtime.block_on(self.inner.city(ip_address))
    }

    /// Insights web service lookup.
    pub fn insights(
        &self,
        ip_address: impl Into<Option<IpAddr>>,
    ) -> Result<InsightsResponse, GeoIp2Error> {
        self.runtime.block_on(self.inner.insights(ip_address))
    }
}
