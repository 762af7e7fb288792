//! Entities that make up a GeoIP2 response.
//!
//! Every struct here accepts a partial record: missing keys take their
//! default (`None`, `false`, an empty map) and unknown keys are ignored.
//! Named entities also carry the [`Locales`] used to pick their display
//! name; the list is injected by the reader or client and never serialized.

use std::collections::BTreeMap;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::locales::{Locales, NamedEntity};

macro_rules! named_entity {
    ($ty:ty) => {
        impl NamedEntity for $ty {
            fn geoname_id(&self) -> Option<u32> {
                self.geoname_id
            }

            fn names(&self) -> &BTreeMap<String, String> {
                &self.names
            }

            fn locales(&self) -> &Locales {
                &self.locales
            }

            fn set_locales(&mut self, locales: &Locales) {
                self.locales = locales.clone();
            }
        }

        impl $ty {
            /// Returns true if no field carries data.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                *self
                    == Self {
                        locales: self.locales.clone(),
                        ..Self::default()
                    }
            }
        }
    };
}

/// Continent data for an IP address.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Continent {
    /// Two-character continent code (e.g., "NA" for North America, "EU" for Europe).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// GeoNames ID for the continent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    /// Localized continent names keyed by locale tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    #[serde(skip)]
    locales: Locales,
}

named_entity!(Continent);

/// Country data for an IP address.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Country {
    /// Confidence (0-100) that the country is correct. Insights and
    /// Enterprise only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// GeoNames ID for the country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    /// True if the country is a member state of the European Union.
    pub is_in_european_union: bool,
    /// Two-character ISO 3166-1 alpha-2 country code.
    /// See <https://en.wikipedia.org/wiki/ISO_3166-1_alpha-2>.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_code: Option<String>,
    /// Localized country names keyed by locale tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    #[serde(skip)]
    locales: Locales,
}

named_entity!(Country);

/// The country represented by users of the IP address, such as a military
/// base or an embassy.
///
/// This is a plain [`Country`] plus the kind of representation.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct RepresentedCountry {
    /// The represented country.
    #[serde(flatten)]
    pub country: Country,
    /// Type of entity representing the country (e.g., "military").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub representation_type: Option<String>,
}

impl RepresentedCountry {
    /// Returns true if no field carries data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.country.is_empty() && self.representation_type.is_none()
    }
}

impl NamedEntity for RepresentedCountry {
    fn geoname_id(&self) -> Option<u32> {
        self.country.geoname_id
    }

    fn names(&self) -> &BTreeMap<String, String> {
        &self.country.names
    }

    fn locales(&self) -> &Locales {
        &self.country.locales
    }

    fn set_locales(&mut self, locales: &Locales) {
        self.country.set_locales(locales);
    }
}

/// Subdivision (state, province, etc.) data for an IP address.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Subdivision {
    /// Confidence (0-100) that the subdivision is correct. Insights and
    /// Enterprise only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// GeoNames ID for the subdivision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    /// ISO 3166-2 subdivision code (up to 3 characters).
    /// See <https://en.wikipedia.org/wiki/ISO_3166-2>.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso_code: Option<String>,
    /// Localized subdivision names keyed by locale tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    #[serde(skip)]
    locales: Locales,
}

named_entity!(Subdivision);

/// City data for an IP address.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct City {
    /// Confidence (0-100) that the city is correct. Insights and Enterprise
    /// only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// GeoNames ID for the city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    /// Localized city names keyed by locale tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    #[serde(skip)]
    locales: Locales,
}

named_entity!(City);

/// Location data for an IP address.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Location {
    /// Approximate accuracy radius in kilometers around the coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_radius: Option<u16>,
    /// Average income in US dollars. Insights only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_income: Option<u32>,
    /// Approximate latitude. Not precise enough to identify an address or
    /// household.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Approximate longitude. Not precise enough to identify an address or
    /// household.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Metro code for the location.
    ///
    /// **Deprecated:** Metro codes are no longer maintained and should not be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metro_code: Option<u16>,
    /// Estimated people per square kilometer. Insights only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_density: Option<u32>,
    /// IANA time zone (e.g., "America/New_York").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl Location {
    /// True when both latitude and longitude are present.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Returns true if all fields are None.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Postal data for an IP address.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Postal {
    /// Postal code. Not available for all countries; in some it is only
    /// the first part of the code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Confidence (0-100) that the postal code is correct. Insights and
    /// Enterprise only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl Postal {
    /// Returns true if all fields are None.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Account data returned by the web service.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MaxMind {
    /// Queries left on the account. Never set by the database reader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries_remaining: Option<u32>,
}

impl MaxMind {
    /// Returns true if all fields are None.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Network and anonymizer traits of an IP address.
///
/// `ip_address` and `network` are filled in by the reader or client, not
/// taken from the database record.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Traits {
    /// The autonomous system number (ASN) for the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomous_system_number: Option<u32>,
    /// The organization associated with the registered ASN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomous_system_organization: Option<String>,
    /// The connection type, e.g. "Cable/DSL", "Cellular" or "Corporate".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    /// The second-level domain associated with the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// The queried IP address, exactly as the caller supplied it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// True if the IP belongs to any sort of anonymous network.
    pub is_anonymous: bool,
    /// **Deprecated:** use the anonymizer flags instead.
    pub is_anonymous_proxy: bool,
    /// True if the IP is registered to an anonymous VPN provider.
    pub is_anonymous_vpn: bool,
    /// True if the IP belongs to an anycast network.
    pub is_anycast: bool,
    /// True if the IP belongs to a hosting or VPN provider.
    pub is_hosting_provider: bool,
    /// True if MaxMind believes the IP is a legitimate proxy, such as an
    /// internal VPN used by a corporation.
    pub is_legitimate_proxy: bool,
    /// True if the IP belongs to a public proxy.
    pub is_public_proxy: bool,
    /// True if the IP is on a suspected anonymizing network and belongs to a
    /// residential ISP.
    pub is_residential_proxy: bool,
    /// **Deprecated:** satellite providers are no longer flagged.
    pub is_satellite_provider: bool,
    /// True if the IP is a Tor exit node.
    pub is_tor_exit_node: bool,
    /// The name of the ISP associated with the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    /// The mobile country code (MCC) associated with the IP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_country_code: Option<String>,
    /// The mobile network code (MNC) associated with the IP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_network_code: Option<String>,
    /// The largest network with the same data as the queried address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<IpNetwork>,
    /// The name of the organization associated with the IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Static IP score (0-99.99). Insights only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_ip_score: Option<f64>,
    /// Estimated users sharing the IP in the past 24 hours. Insights only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u32>,
    /// The user type, e.g. "business", "cellular", "residential".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

impl Traits {
    /// Returns true if no field carries data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
