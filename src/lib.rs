#![deny(trivial_casts, trivial_numeric_casts, unused_import_braces)]
//! # GeoIP2 Client
//!
//! This library resolves IP addresses into geolocation and network data using
//! either a local GeoIP2/GeoLite2 database or the GeoIP2 Precision web
//! service. Both backends produce the same response types and report failures
//! through the same error type, [`GeoIp2Error`].
//!
//! ## Features
//!
//! - **`mmap`** (default: disabled): Enable memory-mapped file access for
//!   better performance in long-running applications
//!
//! ## Database Compatibility
//!
//! Every lookup method checks that the open database's type contains the
//! method's label before querying it:
//! - **Country** databases answer `country` lookups only
//! - **City** databases answer `city` lookups only
//! - **Enterprise** databases answer `enterprise` lookups only
//! - **Anonymous IP, ASN, Connection Type, Domain and ISP** databases each
//!   answer their own lookup
//!
//! ## Thread Safety
//!
//! [`DatabaseReader`] and [`Client`] are `Send` and `Sync`, so one instance
//! can be shared across threads.
//!
//! ## Quick Start
//!
//! ```no_run
//! use geoip2::{DatabaseReader, FileAccessMode, NamedEntity};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = DatabaseReader::open("/path/to/GeoIP2-City.mmdb", FileAccessMode::Memory)?;
//!
//!     let city = reader.city("89.160.20.128")?;
//!     println!("Country: {}", city.country.iso_code.as_deref().unwrap_or("Unknown"));
//!     println!("City: {:?}", city.city.name());
//!     println!("Network: {:?}", city.traits.network);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Web Service
//!
//! ```no_run
//! use geoip2::{Client, NamedEntity};
//!
//! # async fn run() -> Result<(), geoip2::GeoIp2Error> {
//! let client = Client::new(42, "license_key")?;
//! let insights = client.insights("128.101.101.101".parse::<std::net::IpAddr>().unwrap()).await?;
//! println!("{:?} ({:?} queries left)", insights.city.name(), insights.maxmind.queries_remaining);
//! # Ok(())
//! # }
//! ```
//!
//! A blocking variant lives in [`blocking`].

pub use binder::{bind, Injected};
pub use client::{Client, ClientBuilder};
pub use database::{Database, FileAccessMode, Lookup, Source};
pub use error::GeoIp2Error;
pub use guard::check_database_type;
pub use http::error_for_code;
pub use locales::{Locales, NamedEntity};
pub use reader::DatabaseReader;
pub use response::{
    AnonymousIpResponse, AsnResponse, CityResponse, ConnectionTypeResponse, CountryResponse,
    DomainResponse, EnterpriseResponse, InsightsResponse, IspResponse, Response,
};

mod binder;
pub mod blocking;
mod client;
mod database;
pub mod entity;
mod error;
mod guard;
mod http;
mod locales;
mod reader;
mod response;

#[cfg(test)]
mod client_test;
