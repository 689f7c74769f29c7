use thiserror::Error;

use crate::browser::BrowserError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },

    #[error("failed to read store #{index} in {country}: {source}")]
    Extraction {
        country: String,
        index: usize,
        #[source]
        source: BrowserError,
    },

    #[error("country \"{country}\" is not an option of the country selector")]
    UnknownCountry { country: String },

    #[error("scrape of {country} failed: {source}")]
    Country {
        country: String,
        #[source]
        source: Box<ScraperError>,
    },

    #[error("store directory unusable during {stage}: {source}")]
    FatalSession {
        stage: &'static str,
        #[source]
        source: Box<ScraperError>,
    },
}

impl ScraperError {
    pub(crate) fn fatal(stage: &'static str, source: impl Into<ScraperError>) -> Self {
        Self::FatalSession {
            stage,
            source: Box::new(source.into()),
        }
    }
}
