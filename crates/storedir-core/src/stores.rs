use std::collections::BTreeMap;

use serde::Serialize;

/// Placeholder written into any store field the page did not provide.
pub const NOT_FOUND: &str = "not found";

/// One store as read from the directory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreRecord {
    pub country: String,
    pub store_name: String,
    pub address: String,
    pub working_hours: String,
    pub phone: String,
}

impl StoreRecord {
    /// A record for `country` with every other field set to [`NOT_FOUND`].
    #[must_use]
    pub fn unknown(country: &str) -> Self {
        Self {
            country: country.to_owned(),
            store_name: NOT_FOUND.to_owned(),
            address: NOT_FOUND.to_owned(),
            working_hours: NOT_FOUND.to_owned(),
            phone: NOT_FOUND.to_owned(),
        }
    }
}

/// Stores of a single country in page order.
pub type CountryResult = Vec<StoreRecord>;

/// Stores grouped by country name. Iteration is alphabetical by country.
pub type ScrapeResult = BTreeMap<String, CountryResult>;
