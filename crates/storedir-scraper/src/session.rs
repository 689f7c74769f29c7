//! Scrape of the store list for a single country.

use storedir_core::CountryResult;

use crate::browser::BrowserSession;
use crate::error::ScraperError;
use crate::extract::StoreExtractor;
use crate::loader::IncrementalListLoader;
use crate::select::CountrySelect;
use crate::settings::ScrapeSettings;

pub struct CountrySession<'a, S: BrowserSession> {
    session: &'a S,
    select: &'a CountrySelect<S::Element>,
    settings: &'a ScrapeSettings,
}

impl<'a, S: BrowserSession> CountrySession<'a, S> {
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

    /// Selects `country` and reads every store its list discloses, in page order.
    ///
    /// Individual stores that cannot be read are skipped. A country without
    /// any rendered store yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the country cannot be selected or its
    /// store list cannot be queried.
    pub async fn run(&self, country: &str) -> Result<CountryResult, ScraperError> {
        tracing::info!(country = %country, "loading stores");
        self.select.select_by_visible_text(country).await?;
        tokio::time::sleep(self.settings.country_settle).await;

        let mut loader = IncrementalListLoader::new(self.session, self.settings, country);
        let initial = loader.first_batch().await?;
        if initial.items.is_empty() {
            tracing::info!(country = %country, "no stores listed");
            return Ok(CountryResult::new());
        }
        tracing::info!(country = %country, count = initial.items.len(), "stores found");

        let extractor = StoreExtractor::new(self.session, self.settings, country);
        let mut stores = CountryResult::with_capacity(initial.items.len());
        extractor.extract_batch(&initial, &mut stores).await;
        drop(initial);

        while let Some(batch) = loader.next_batch().await {
            tracing::debug!(
                country = %country,
                start_index = batch.start_index,
                count = batch.items.len(),
                "more stores revealed by scrolling"
            );
            extractor.extract_batch(&batch, &mut stores).await;
        }

        tracing::info!(
            country = %country,
            total = stores.len(),
            discovered = loader.discovered(),
            "country complete"
        );
        Ok(stores)
    }
}
