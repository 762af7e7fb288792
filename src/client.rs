//! GeoIP2 Precision web service client.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::binder::{bind, Injected};
use crate::blocking;
use crate::error::GeoIp2Error;
use crate::http::classify;
use crate::locales::Locales;
use crate::response::{CityResponse, CountryResponse, InsightsResponse, Response};

/// Default web service host.
const DEFAULT_HOST: &str = "geoip.maxmind.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Async client for the GeoIP2 Precision web service.
///
/// Cloning is cheap and clones share the connection pool. Passing `None` as
/// the address looks up the caller's own public address.
///
/// # Example
///
/// ```no_run
/// use geoip2::{Client, NamedEntity};
///
/// # async fn run() -> Result<(), geoip2::GeoIp2Error> {
/// let client = Client::new(42, "license_key")?;
/// let city = client.city("128.101.101.101".parse::<std::net::IpAddr>().unwrap()).await?;
/// println!("{:?}", city.city.name());
///
/// let me = client.country(None).await?;
/// println!("{:?}", me.traits.ip_address);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    account_id: String,
    license_key: String,
    base_url: Url,
    locales: Locales,
}

impl Client {
    /// Creates a client for the default host with default settings.
    pub fn new(account_id: u32, license_key: impl Into<String>) -> Result<Self, GeoIp2Error> {
        ClientBuilder::new(account_id, license_key).build()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder(account_id: u32, license_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(account_id, license_key)
    }

    /// Locales handed to every response.
    #[must_use]
    pub fn locales(&self) -> &Locales {
        &self.inner.locales
    }

    /// Country web service lookup.
    pub async fn country(
        &self,
        ip_address: impl Into<Option<IpAddr>>,
    ) -> Result<CountryResponse, GeoIp2Error> {
        self.execute("country", ip_address.into()).await
    }

    /// City web service lookup.
    pub async fn city(
        &self,
        ip_address: impl Into<Option<IpAddr>>,
    ) -> Result<CityResponse, GeoIp2Error> {
        self.execute("city", ip_address.into()).await
    }

    /// Insights web service lookup.
    pub async fn insights(
        &self,
        ip_address: impl Into<Option<IpAddr>>,
    ) -> Result<InsightsResponse, GeoIp2Error> {
        self.execute("insights", ip_address.into()).await
    }

    /// Builds `{base}/geoip/v2.1/{endpoint}/{ip or "me"}`.
    fn uri(&self, endpoint: &str, ip_address: Option<IpAddr>) -> Result<Url, GeoIp2Error> {
        let target = ip_address.map_or_else(|| "me".to_owned(), |ip| ip.to_string());
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                GeoIp2Error::invalid_input(format!(
                    "{} cannot be used as a base URL",
                    self.inner.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["geoip", "v2.1", endpoint, target.as_str()]);
        Ok(url)
    }

    async fn execute<T: Response>(
        &self,
        endpoint: &str,
        ip_address: Option<IpAddr>,
    ) -> Result<T, GeoIp2Error> {
        let uri = self.uri(endpoint, ip_address)?;
        debug!("GET {uri}");

        let response = self
            .inner
            .http
            .get(uri.clone())
            .basic_auth(&self.inner.account_id, Some(&self.inner.license_key))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&uri, None, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&uri, Some(status), e))?;
        debug!("{uri} answered {status} with {} bytes", body.len());

        let record = classify(status, content_type.as_deref(), &body, uri.as_str())?;

        // The web service reports the network itself; only the address is ours.
        let injected = Injected {
            ip_address: ip_address.map(|ip| ip.to_string()),
            network: None,
        };
        bind(record, &injected, &self.inner.locales).map_err(|e| {
            GeoIp2Error::invalid_input(format!(
                "Received a 200 response for {uri} but could not decode it as a response: {e}"
            ))
        })
    }
}

impl fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientInner")
            .field("account_id", &self.account_id)
            .field("base_url", &self.base_url.as_str())
            .field("locales", &self.locales)
            .finish_non_exhaustive()
    }
}

fn transport_error(uri: &Url, status: Option<u16>, source: reqwest::Error) -> GeoIp2Error {
    GeoIp2Error::Http {
        message: format!("Error received while making request to {uri}: {source}"),
        status,
        uri: uri.to_string(),
        source: Some(source),
    }
}

/// Builder for configuring a [`Client`].
pub struct ClientBuilder {
    account_id: u32,
    license_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    locales: Locales,
}

impl ClientBuilder {
    /// Creates a builder with the given credentials.
    #[must_use]
    pub fn new(account_id: u32, license_key: impl Into<String>) -> Self {
        Self {
            account_id,
            license_key: license_key.into(),
            base_url: format!("https://{DEFAULT_HOST}"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("GeoIP2-Rust/{}", env!("CARGO_PKG_VERSION")),
            locales: Locales::default(),
        }
    }

    /// Sets the web service host, e.g. "geolite.info" for GeoLite2.
    #[must_use]
    pub fn host(mut self, host: impl AsRef<str>) -> Self {
        self.base_url = format!("https://{}", host.as_ref());
        self
    }

    /// Sets the full base URL, scheme included. Useful for testing and
    /// proxies.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the timeout applied to each request.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Sets the locales handed to every response.
    #[must_use]
    pub fn locales(mut self, locales: Locales) -> Self {
        self.locales = locales;
        self
    }

    /// Builds the async client.
    pub fn build(self) -> Result<Client, GeoIp2Error> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            GeoIp2Error::invalid_input(format!("invalid base URL {}: {e}", self.base_url))
        })?;
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| GeoIp2Error::Http {
                message: format!("could not build the HTTP client: {e}"),
                status: None,
                uri: base_url.to_string(),
                source: Some(e),
            })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                account_id: self.account_id.to_string(),
                license_key: self.license_key,
                base_url,
                locales: self.locales,
            }),
        })
    }

    /// Builds a client with a blocking API.
    pub fn build_blocking(self) -> Result<blocking::Client, GeoIp2Error> {
        blocking::Client::from_async(self.build()?)
    }
}
