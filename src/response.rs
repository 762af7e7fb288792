//! GeoIP2 response types.
//!
//! # Response Types
//!
//! - [`CountryResponse`] - Country-level data
//! - [`CityResponse`] - City-level data (also used for Insights and Enterprise)
//! - [`AnonymousIpResponse`] - Anonymous proxy and VPN detection
//! - [`AsnResponse`] - Autonomous System Number data
//! - [`ConnectionTypeResponse`] - Connection type classification
//! - [`DomainResponse`] - Domain information
//! - [`IspResponse`] - Internet Service Provider information

use std::borrow::Cow;

use ipnetwork::IpNetwork;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::entity::{
    City, Continent, Country, Location, MaxMind, Postal, RepresentedCountry, Subdivision, Traits,
};
use crate::locales::{Locales, NamedEntity};

/// A response that can be bound from a raw record.
pub trait Response: DeserializeOwned + Serialize {
    /// Key of the nested object that receives the injected `ip_address` and
    /// `network`, or `None` when they live at the top level.
    const INJECTION_KEY: Option<&'static str>;

    /// Hands the locale list to every named entity of the response.
    fn set_locales(&mut self, _locales: &Locales) {}
}

/// Country-level response.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct CountryResponse {
    /// Continent data for the IP address.
    #[serde(skip_serializing_if = "Continent::is_empty")]
    pub continent: Continent,
    /// Country where MaxMind believes the IP is located.
    #[serde(skip_serializing_if = "Country::is_empty")]
    pub country: Country,
    /// Account data; web service only.
    #[serde(skip_serializing_if = "MaxMind::is_empty")]
    pub maxmind: MaxMind,
    /// Country where the ISP has registered the IP block.
    #[serde(skip_serializing_if = "Country::is_empty")]
    pub registered_country: Country,
    /// Country represented by users of this IP (e.g., military base or embassy).
    #[serde(skip_serializing_if = "RepresentedCountry::is_empty")]
    pub represented_country: RepresentedCountry,
    /// Various traits associated with the IP address.
    #[serde(skip_serializing_if = "Traits::is_empty")]
    pub traits: Traits,
}

impl Response for CountryResponse {
    const INJECTION_KEY: Option<&'static str> = Some("traits");

    fn set_locales(&mut self, locales: &Locales) {
        self.continent.set_locales(locales);
        self.country.set_locales(locales);
        self.registered_country.set_locales(locales);
        self.represented_country.set_locales(locales);
    }
}

/// City-level response.
///
/// Insights and Enterprise responses have the same shape; they fill in more
/// of it (confidence values, user type, income).
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct CityResponse {
    /// City data for the IP address.
    #[serde(skip_serializing_if = "City::is_empty")]
    pub city: City,
    /// Continent data for the IP address.
    #[serde(skip_serializing_if = "Continent::is_empty")]
    pub continent: Continent,
    /// Country where MaxMind believes the IP is located.
    #[serde(skip_serializing_if = "Country::is_empty")]
    pub country: Country,
    /// Location data including coordinates and time zone.
    #[serde(skip_serializing_if = "Location::is_empty")]
    pub location: Location,
    /// Account data; web service only.
    #[serde(skip_serializing_if = "MaxMind::is_empty")]
    pub maxmind: MaxMind,
    /// Postal code data for the IP address.
    #[serde(skip_serializing_if = "Postal::is_empty")]
    pub postal: Postal,
    /// Country where the ISP has registered the IP block.
    #[serde(skip_serializing_if = "Country::is_empty")]
    pub registered_country: Country,
    /// Country represented by users of this IP (e.g., military base or embassy).
    #[serde(skip_serializing_if = "RepresentedCountry::is_empty")]
    pub represented_country: RepresentedCountry,
    /// Subdivisions ordered from largest to smallest. Oxford, UK would have
    /// England first, then Oxfordshire.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subdivisions: Vec<Subdivision>,
    /// Various traits associated with the IP address.
    #[serde(skip_serializing_if = "Traits::is_empty")]
    pub traits: Traits,
}

impl CityResponse {
    /// The smallest subdivision, or an empty one if there are none.
    #[must_use]
    pub fn most_specific_subdivision(&self) -> Cow<'_, Subdivision> {
        match self.subdivisions.last() {
            Some(subdivision) => Cow::Borrowed(subdivision),
            None => {
                let mut empty = Subdivision::default();
                empty.set_locales(self.city.locales());
                Cow::Owned(empty)
            }
        }
    }
}

impl Response for CityResponse {
    const INJECTION_KEY: Option<&'static str> = Some("traits");

    fn set_locales(&mut self, locales: &Locales) {
        self.city.set_locales(locales);
        self.continent.set_locales(locales);
        self.country.set_locales(locales);
        self.registered_country.set_locales(locales);
        self.represented_country.set_locales(locales);
        for subdivision in &mut self.subdivisions {
            subdivision.set_locales(locales);
        }
    }
}

/// Insights web service response.
pub type InsightsResponse = CityResponse;

/// Enterprise database response.
pub type EnterpriseResponse = CityResponse;

/// GeoIP2 Anonymous IP database response.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AnonymousIpResponse {
    /// The queried IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// True if the IP belongs to any sort of anonymous network.
    pub is_anonymous: bool,
    /// True if the IP is registered to an anonymous VPN provider.
    pub is_anonymous_vpn: bool,
    /// True if the IP belongs to a hosting or VPN provider.
    pub is_hosting_provider: bool,
    /// True if the IP belongs to a public proxy.
    pub is_public_proxy: bool,
    /// True if the IP is on a suspected anonymizing network and belongs to
    /// a residential ISP.
    pub is_residential_proxy: bool,
    /// True if the IP is a Tor exit node.
    pub is_tor_exit_node: bool,
    /// The network associated with the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<IpNetwork>,
}

impl Response for AnonymousIpResponse {
    const INJECTION_KEY: Option<&'static str> = None;
}

/// GeoLite2 ASN database response.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AsnResponse {
    /// The autonomous system number for the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomous_system_number: Option<u32>,
    /// The organization associated with the registered ASN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomous_system_organization: Option<String>,
    /// The queried IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// The network associated with the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<IpNetwork>,
}

impl Response for AsnResponse {
    const INJECTION_KEY: Option<&'static str> = None;
}

/// GeoIP2 Connection-Type database response.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionTypeResponse {
    /// The connection type. Possible values include "Dialup", "Cable/DSL",
    /// "Corporate", "Cellular", and "Satellite".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    /// The queried IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// The network associated with the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<IpNetwork>,
}

impl Response for ConnectionTypeResponse {
    const INJECTION_KEY: Option<&'static str> = None;
}

/// GeoIP2 Domain database response.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DomainResponse {
    /// The second-level domain associated with the IP address
    /// (e.g., "example.com").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// The queried IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// The network associated with the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<IpNetwork>,
}

impl Response for DomainResponse {
    const INJECTION_KEY: Option<&'static str> = None;
}

/// GeoIP2 ISP database response.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IspResponse {
    /// The autonomous system number (ASN) for the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomous_system_number: Option<u32>,
    /// The organization associated with the registered ASN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomous_system_organization: Option<String>,
    /// The queried IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// The name of the ISP associated with the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    /// The mobile country code (MCC) associated with the IP.
    /// See <https://en.wikipedia.org/wiki/Mobile_country_code>.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_country_code: Option<String>,
    /// The mobile network code (MNC) associated with the IP.
    /// See <https://en.wikipedia.org/wiki/Mobile_network_code>.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_network_code: Option<String>,
    /// The network associated with the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<IpNetwork>,
    /// The name of the organization associated with the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Response for IspResponse {
    const INJECTION_KEY: Option<&'static str> = None;
}
