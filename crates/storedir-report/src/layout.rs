//! Row layout of the report, independent of the spreadsheet writer.
//!
//! Row 0 holds the headers. Countries follow alphabetically, one row per
//! store, each group followed by one blank separator row. Countries without
//! stores get no rows.

use storedir_core::{ScrapeResult, StoreRecord};

pub const HEADERS: [&str; 5] = ["Country", "Store Name", "Address", "Working Hours", "Phone"];

pub const COLUMN_WIDTHS: [f64; 5] = [20.0, 30.0, 40.0, 30.0, 25.0];

/// Rows occupied by one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryGroup<'a> {
    pub country: &'a str,
    pub first_row: u32,
    pub last_row: u32,
    pub stores: &'a [StoreRecord],
}

impl CountryGroup<'_> {
    /// Whether the country cell spans several rows.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.last_row > self.first_row
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout<'a> {
    pub groups: Vec<CountryGroup<'a>>,
    /// Last populated row. Separators between groups lie inside it; the one
    /// after the final group does not.
    pub last_row: u32,
}

impl ReportLayout<'_> {
    /// Blank rows between two country groups.
    #[must_use]
    pub fn separator_rows(&self) -> Vec<u32> {
        self.groups
            .windows(2)
            .map(|pair| pair[0].last_row + 1)
            .collect()
    }
}

#[must_use]
pub fn plan_rows(result: &ScrapeResult) -> ReportLayout<'_> {
    let mut groups = Vec::with_capacity(result.len());
    let mut next_row: u32 = 1;

    for (country, stores) in result {
        if stores.is_empty() {
            continue;
        }
        let span = u32::try_from(stores.len()).unwrap_or(u32::MAX);
        let first_row = next_row;
        let last_row = first_row.saturating_add(span - 1);
        groups.push(CountryGroup {
            country,
            first_row,
            last_row,
            stores,
        });
        next_row = last_row.saturating_add(2);
    }

    let last_row = groups.last().map_or(0, |group| group.last_row);
    ReportLayout { groups, last_row }
}
