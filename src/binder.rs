//! Binding raw records into typed responses.
//!
//! A raw record is the loosely-typed tree a backend hands back: a decoded
//! MaxMind DB record or a web service body. Field names, defaults and the
//! handling of unknown keys are declared on each response type through its
//! serde attributes; [`bind`] adds the values the record does not carry
//! itself (the queried address and its network) and applies the locales.

use ipnetwork::IpNetwork;
use serde_json::{Map, Value};

use crate::locales::Locales;
use crate::response::Response;

/// Values supplied by the resolver rather than the record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Injected {
    /// The queried IP address, exactly as the caller wrote it.
    pub ip_address: Option<String>,
    /// The network containing the queried address.
    pub network: Option<IpNetwork>,
}

impl Injected {
    /// Creates the injected values for a query.
    pub fn new(ip_address: impl Into<String>, network: Option<IpNetwork>) -> Self {
        Injected {
            ip_address: Some(ip_address.into()),
            network,
        }
    }

    fn apply(&self, target: &mut Map<String, Value>) {
        if let Some(ip_address) = &self.ip_address {
            target.insert("ip_address".to_owned(), Value::String(ip_address.clone()));
        }
        if let Some(network) = &self.network {
            target.insert("network".to_owned(), Value::String(network.to_string()));
        }
    }
}

/// Binds `record` into `T`, overlaying `injected` and handing `locales` to
/// every named entity.
///
/// Missing keys take their defaults and unknown keys are ignored, so an empty
/// object binds into every response type. A record that is not an object, or
/// whose values have the wrong type, is an error. A `null` anywhere in the
/// record counts as missing.
pub fn bind<T: Response>(
    mut record: Value,
    injected: &Injected,
    locales: &Locales,
) -> Result<T, serde_json::Error> {
    strip_nulls(&mut record);
    if let Value::Object(map) = &mut record {
        match T::INJECTION_KEY {
            Some(key) => {
                let nested = map
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(nested) = nested {
                    injected.apply(nested);
                }
            }
            None => injected.apply(map),
        }
    }

    let mut response: T = serde_json::from_value(record)?;
    response.set_locales(locales);
    Ok(response)
}

/// Removes `null` members and elements at every depth, so an explicit
/// `null` takes the same default as a missing key.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|item| !item.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}
