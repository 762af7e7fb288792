//! Locale preference lists and localized name resolution.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An ordered list of locale tags, most preferred first.
///
/// Cloning is cheap: every entity of a response shares the same list.
/// The default list is `["en"]`.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use geoip2::Locales;
///
/// let names = BTreeMap::from([
///     ("de".to_owned(), "München".to_owned()),
///     ("en".to_owned(), "Munich".to_owned()),
/// ]);
/// let locales = Locales::new(["fr", "de", "en"]);
/// assert_eq!(locales.resolve(&names), Some("München"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Locales(Arc<[String]>);

impl Locales {
    /// Builds a locale list. An empty list falls back to `["en"]`.
    pub fn new<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list: Vec<String> = locales.into_iter().map(Into::into).collect();
        if list.is_empty() {
            return Self::default();
        }
        Locales(list.into())
    }

    /// The locale tags in preference order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the name for the first locale in this list that `names`
    /// contains. The map's own ordering plays no part.
    #[must_use]
    pub fn resolve<'a>(&self, names: &'a BTreeMap<String, String>) -> Option<&'a str> {
        self.0
            .iter()
            .find_map(|locale| names.get(locale))
            .map(String::as_str)
    }
}

impl Default for Locales {
    fn default() -> Self {
        Locales(Arc::from(vec!["en".to_owned()]))
    }
}

impl fmt::Debug for Locales {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<S: Into<String>> FromIterator<S> for Locales {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Locales::new(iter)
    }
}

/// An entity with localized names, such as a city or a country.
pub trait NamedEntity {
    /// GeoNames id of the entity, if known.
    fn geoname_id(&self) -> Option<u32>;

    /// Localized names keyed by locale tag.
    fn names(&self) -> &BTreeMap<String, String>;

    /// Locale list used by [`name`](Self::name).
    fn locales(&self) -> &Locales;

    /// Replaces the locale list. Later [`name`](Self::name) calls use it.
    fn set_locales(&mut self, locales: &Locales);

    /// The name in the most preferred available locale. Computed on every
    /// call.
    fn name(&self) -> Option<&str> {
        self.locales().resolve(self.names())
    }
}
