//! Country-by-country scrape of the whole store directory.
//!
//! Countries share one page, so they are scraped strictly one after another.
//! A failing country is logged and skipped; only failures before the
//! country list is known abort the run.

use storedir_core::ScrapeResult;

use crate::browser::{BrowserSession, PageElement};
use crate::error::ScraperError;
use crate::select::CountrySelect;
use crate::session::CountrySession;
use crate::settings::ScrapeSettings;

/// A country whose scrape was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFailure {
    pub country: String,
    pub error: String,
}

/// Outcome of a run: the stores found plus the countries that failed.
#[derive(Debug, Default)]
pub struct ScrapeRun {
    pub stores: ScrapeResult,
    pub failures: Vec<CountryFailure>,
}

pub struct ScrapeOrchestrator<'a, S: BrowserSession> {
    session: &'a S,
    select: &'a CountrySelect<S::Element>,
    settings: &'a ScrapeSettings,
}

impl<'a, S: BrowserSession> ScrapeOrchestrator<'a, S> {
    pub fn new(
        session: &'a S,
        select: &'a CountrySelect<S::Element>,
        settings: &'a ScrapeSettings,
    ) -> Self {
        Self {
            session,
            select,
            settings,
        }
    }

    /// Scrapes `countries` in order and groups the stores by country.
    ///
    /// Countries without stores are left out of the result.
    pub async fn run(&self, countries: &[String]) -> ScrapeResult {
        self.run_detailed(countries).await.stores
    }

    /// Like [`run`](Self::run), also reporting which countries failed.
    pub async fn run_detailed(&self, countries: &[String]) -> ScrapeRun {
        let country_session = CountrySession::new(self.session, self.select, self.settings);
        let mut run = ScrapeRun::default();

        for country in countries {
            match country_session.run(country).await {
                Ok(stores) if stores.is_empty() => {}
                Ok(stores) => {
                    run.stores.insert(country.clone(), stores);
                }
                Err(e) => {
                    let e = ScraperError::Country {
                        country: country.clone(),
                        source: Box::new(e),
                    };
                    tracing::warn!(country = %country, error = %e, "skipping country");
                    run.failures.push(CountryFailure {
                        country: country.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        run
    }
}

/// Opens the directory page and returns its country selector.
async fn open_directory<S: BrowserSession>(
    session: &S,
    settings: &ScrapeSettings,
) -> Result<CountrySelect<S::Element>, ScraperError> {
    session
        .navigate(&settings.directory_url)
        .await
        .map_err(|e| ScraperError::fatal("navigation", e))?;

    let locator = settings.layout.country_select();
    match session
        .wait_until_present(locator, settings.element_wait)
        .await
    {
        Ok(element) => Ok(CountrySelect::new(element)),
        Err(e) => {
            tracing::warn!(%locator, error = %e, "country selector not found");
            Err(ScraperError::fatal(
                "country selector lookup",
                ScraperError::ElementNotFound {
                    locator: locator.to_string(),
                },
            ))
        }
    }
}

async fn read_countries<E: PageElement>(
    select: &CountrySelect<E>,
    settings: &ScrapeSettings,
) -> Result<Vec<String>, ScraperError> {
    select
        .country_names(&settings.layout.placeholder_options)
        .await
        .map_err(|e| ScraperError::fatal("country enumeration", e))
}

/// Lists the countries the directory offers, without scraping them.
///
/// # Errors
///
/// Returns [`ScraperError::FatalSession`] if the page or its country
/// selector cannot be reached.
pub async fn list_countries<S: BrowserSession>(
    session: &S,
    settings: &ScrapeSettings,
) -> Result<Vec<String>, ScraperError> {
    let select = open_directory(session, settings).await?;
    read_countries(&select, settings).await
}

/// Scrapes the directory through an already open `session`.
///
/// # Errors
///
/// Returns [`ScraperError::FatalSession`] if navigation, the country selector
/// lookup or the country enumeration fails. Per-country failures are
/// reported in [`ScrapeRun::failures`] instead.
pub async fn scrape_directory<S: BrowserSession>(
    session: &S,
    settings: &ScrapeSettings,
) -> Result<ScrapeRun, ScraperError> {
    let select = open_directory(session, settings).await?;
    let mut countries = read_countries(&select, settings).await?;
    tracing::info!(count = countries.len(), "countries available");

    if !settings.country_filter.is_empty() {
        for wanted in &settings.country_filter {
            if !countries.contains(wanted) {
                tracing::warn!(country = %wanted, "requested country is not offered by the directory");
            }
        }
        countries.retain(|c| settings.country_filter.contains(c));
    }

    let orchestrator = ScrapeOrchestrator::new(session, &select, settings);
    Ok(orchestrator.run_detailed(&countries).await)
}

/// Scrapes the directory and closes `session` afterwards, whatever the outcome.
///
/// # Errors
///
/// Same as [`scrape_directory`]. A failure to close the session is logged,
/// not returned.
pub async fn scrape_with_session<S: BrowserSession>(
    session: S,
    settings: &ScrapeSettings,
) -> Result<ScrapeRun, ScraperError> {
    let outcome = scrape_directory(&session, settings).await;
    if let Err(e) = session.quit().await {
        tracing::warn!(error = %e, "failed to close browser session");
    }
    outcome
}
