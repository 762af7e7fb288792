//! GeoIP2 database reader.

use std::net::IpAddr;
use std::path::Path;

use log::{debug, trace};

use crate::binder::{bind, Injected};
use crate::database::{Database, FileAccessMode, Source};
use crate::error::GeoIp2Error;
use crate::guard::check_database_type;
use crate::locales::Locales;
use crate::response::{
    AnonymousIpResponse, AsnResponse, CityResponse, ConnectionTypeResponse, CountryResponse,
    DomainResponse, EnterpriseResponse, IspResponse, Response,
};

/// Reads GeoIP2 and GeoLite2 databases.
///
/// Each lookup method checks that the open database is of a matching type,
/// looks the address up, and binds the record into a response carrying the
/// reader's locales. The plain methods report a miss as
/// [`GeoIp2Error::AddressNotFound`]; the `try_` methods return `Ok(None)`
/// instead, which suits private and reserved ranges where misses are routine.
///
/// The reader is `Send` and `Sync` whenever its database is, and may be
/// shared across threads.
///
/// # Example
///
/// ```no_run
/// use geoip2::{DatabaseReader, FileAccessMode, Locales, NamedEntity};
///
/// # fn main() -> Result<(), geoip2::GeoIp2Error> {
/// let reader = DatabaseReader::open("/path/to/GeoIP2-City.mmdb", FileAccessMode::Memory)?
///     .with_locales(Locales::new(["de", "en"]));
///
/// if let Some(city) = reader.try_city("89.160.20.128")? {
///     println!("City: {:?}", city.city.name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DatabaseReader<D> {
    database: D,
    locales: Locales,
}

impl DatabaseReader<maxminddb::Reader<Source>> {
    /// Opens a MaxMind DB file.
    pub fn open<P: AsRef<Path>>(path: P, mode: FileAccessMode) -> Result<Self, GeoIp2Error> {
        let source = Source::open(path, mode)?;
        Ok(Self::from_database(maxminddb::Reader::from_source(source)?))
    }

    /// Opens a MaxMind DB database held in memory.
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self, GeoIp2Error> {
        Ok(Self::from_database(maxminddb::Reader::from_source(
            Source::Memory(buf),
        )?))
    }

    /// Database metadata.
    #[must_use]
    pub fn metadata(&self) -> &maxminddb::Metadata {
        &self.database.metadata
    }
}

impl<D: Database> DatabaseReader<D> {
    /// Wraps an already opened database. Names resolve in English until
    /// [`with_locales`](Self::with_locales) says otherwise.
    pub fn from_database(database: D) -> Self {
        DatabaseReader {
            database,
            locales: Locales::default(),
        }
    }

    /// Sets the locales handed to every response.
    #[must_use]
    pub fn with_locales(mut self, locales: Locales) -> Self {
        self.locales = locales;
        self
    }

    /// Replaces the locales used for later lookups.
    pub fn set_locales(&mut self, locales: Locales) {
        self.locales = locales;
    }

    /// Locales handed to every response.
    #[must_use]
    pub fn locales(&self) -> &Locales {
        &self.locales
    }

    /// Database type of the open database.
    #[must_use]
    pub fn database_type(&self) -> &str {
        self.database.database_type()
    }

    /// The underlying database.
    #[must_use]
    pub fn database(&self) -> &D {
        &self.database
    }

    /// Country lookup. Only databases whose type contains "Country" are
    /// accepted, so a City or Enterprise database is rejected.
    pub fn country(&self, ip_address: &str) -> Result<CountryResponse, GeoIp2Error> {
        self.resolve(ip_address, "Country", "country")
    }

    /// Like [`country`](Self::country), but a miss is `Ok(None)`.
    pub fn try_country(&self, ip_address: &str) -> Result<Option<CountryResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "Country", "country")
    }

    /// City lookup.
    pub fn city(&self, ip_address: &str) -> Result<CityResponse, GeoIp2Error> {
        self.resolve(ip_address, "City", "city")
    }

    /// Like [`city`](Self::city), but a miss is `Ok(None)`.
    pub fn try_city(&self, ip_address: &str) -> Result<Option<CityResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "City", "city")
    }

    /// Enterprise lookup.
    pub fn enterprise(&self, ip_address: &str) -> Result<EnterpriseResponse, GeoIp2Error> {
        self.resolve(ip_address, "Enterprise", "enterprise")
    }

    /// Like [`enterprise`](Self::enterprise), but a miss is `Ok(None)`.
    pub fn try_enterprise(
        &self,
        ip_address: &str,
    ) -> Result<Option<EnterpriseResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "Enterprise", "enterprise")
    }

    /// Anonymous IP lookup.
    pub fn anonymous_ip(&self, ip_address: &str) -> Result<AnonymousIpResponse, GeoIp2Error> {
        self.resolve(ip_address, "GeoIP2-Anonymous-IP", "anonymous_ip")
    }

    /// Like [`anonymous_ip`](Self::anonymous_ip), but a miss is `Ok(None)`.
    pub fn try_anonymous_ip(
        &self,
        ip_address: &str,
    ) -> Result<Option<AnonymousIpResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "GeoIP2-Anonymous-IP", "anonymous_ip")
    }

    /// GeoLite2 ASN lookup.
    pub fn asn(&self, ip_address: &str) -> Result<AsnResponse, GeoIp2Error> {
        self.resolve(ip_address, "GeoLite2-ASN", "asn")
    }

    /// Like [`asn`](Self::asn), but a miss is `Ok(None)`.
    pub fn try_asn(&self, ip_address: &str) -> Result<Option<AsnResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "GeoLite2-ASN", "asn")
    }

    /// Connection type lookup.
    pub fn connection_type(
        &self,
        ip_address: &str,
    ) -> Result<ConnectionTypeResponse, GeoIp2Error> {
        self.resolve(ip_address, "GeoIP2-Connection-Type", "connection_type")
    }

    /// Like [`connection_type`](Self::connection_type), but a miss is `Ok(None)`.
    pub fn try_connection_type(
        &self,
        ip_address: &str,
    ) -> Result<Option<ConnectionTypeResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "GeoIP2-Connection-Type", "connection_type")
    }

    /// Domain lookup.
    pub fn domain(&self, ip_address: &str) -> Result<DomainResponse, GeoIp2Error> {
        self.resolve(ip_address, "GeoIP2-Domain", "domain")
    }

    /// Like [`domain`](Self::domain), but a miss is `Ok(None)`.
    pub fn try_domain(&self, ip_address: &str) -> Result<Option<DomainResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "GeoIP2-Domain", "domain")
    }

    /// ISP lookup.
    pub fn isp(&self, ip_address: &str) -> Result<IspResponse, GeoIp2Error> {
        self.resolve(ip_address, "GeoIP2-ISP", "isp")
    }

    /// Like [`isp`](Self::isp), but a miss is `Ok(None)`.
    pub fn try_isp(&self, ip_address: &str) -> Result<Option<IspResponse>, GeoIp2Error> {
        self.try_resolve(ip_address, "GeoIP2-ISP", "isp")
    }

    fn resolve<T: Response>(
        &self,
        ip_address: &str,
        database_type: &str,
        method: &str,
    ) -> Result<T, GeoIp2Error> {
        self.try_resolve(ip_address, database_type, method)?
            .ok_or_else(|| GeoIp2Error::AddressNotFound {
                message: format!("The address {ip_address} is not in the database."),
            })
    }

    fn try_resolve<T: Response>(
        &self,
        ip_address: &str,
        database_type: &str,
        method: &str,
    ) -> Result<Option<T>, GeoIp2Error> {
        let address: IpAddr = ip_address.parse().map_err(|_| {
            GeoIp2Error::invalid_input(format!("'{ip_address}' is not a valid IP address"))
        })?;
        check_database_type(self.database.database_type(), database_type, method)?;

        debug!("{method} lookup of {address}");
        let Some(lookup) = self.database.lookup(address)? else {
            trace!("{address} is not in the {} database", self.database.database_type());
            return Ok(None);
        };

        let injected = Injected::new(ip_address, lookup.network);
        Ok(Some(bind(lookup.record, &injected, &self.locales)?))
    }
}
