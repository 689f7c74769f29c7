use std::fmt;

use storedir_core::ScrapeResult;

/// Per-country store counts of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub countries: Vec<(String, usize)>,
    pub total_stores: usize,
}

impl RunSummary {
    #[must_use]
    pub fn total_countries(&self) -> usize {
        self.countries.len()
    }
}

#[must_use]
pub fn summarize(result: &ScrapeResult) -> RunSummary {
    let countries: Vec<(String, usize)> = result
        .iter()
        .map(|(country, stores)| (country.clone(), stores.len()))
        .collect();
    let total_stores = countries.iter().map(|(_, count)| count).sum();
    RunSummary {
        countries,
        total_stores,
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (country, count) in &self.countries {
            writeln!(f, "{country}: {count} stores")?;
        }
        write!(
            f,
            "total: {} stores in {} countries",
            self.total_stores,
            self.total_countries()
        )
    }
}
