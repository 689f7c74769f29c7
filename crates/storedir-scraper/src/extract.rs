//! Turns one rendered store item into a [`StoreRecord`].

use storedir_core::{StoreRecord, NOT_FOUND};

use crate::browser::{BrowserError, BrowserSession, PageElement};
use crate::classify::classify;
use crate::error::ScraperError;
use crate::loader::ItemBatch;
use crate::settings::{ScrapeSettings, SCROLL_INTO_VIEW_SCRIPT};

pub struct StoreExtractor<'a, S: BrowserSession> {
    session: &'a S,
    settings: &'a ScrapeSettings,
    country: &'a str,
}

impl<'a, S: BrowserSession> StoreExtractor<'a, S> {
    pub fn new(session: &'a S, settings: &'a ScrapeSettings, country: &'a str) -> Self {
        Self {
            session,
            settings,
            country,
        }
    }

    /// Reads the store behind `item`.
    ///
    /// A missing or unreadable name becomes [`NOT_FOUND`]; the detail
    /// paragraphs must be readable.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Extraction`] if the item cannot be scrolled
    /// into view or its paragraphs cannot be read.
    pub async fn extract(&self, index: usize, item: &S::Element) -> Result<StoreRecord, ScraperError> {
        let failed = |source: BrowserError| ScraperError::Extraction {
            country: self.country.to_owned(),
            index,
            source,
        };

        self.session
            .execute_script(SCROLL_INTO_VIEW_SCRIPT, &[item])
            .await
            .map_err(failed)?;
        tokio::time::sleep(self.settings.item_settle).await;

        let store_name = self.store_name(item).await;
        let fragments = self.detail_fragments(item).await.map_err(failed)?;
        let details = classify(&fragments);

        Ok(StoreRecord {
            country: self.country.to_owned(),
            store_name,
            address: details.address,
            working_hours: details.working_hours,
            phone: details.phone,
        })
    }

    /// Extracts every item of `batch` into `stores`, skipping items that fail.
    pub async fn extract_batch(&self, batch: &ItemBatch<S::Element>, stores: &mut Vec<StoreRecord>) {
        for (offset, item) in batch.items.iter().enumerate() {
            let index = batch.start_index + offset;
            match self.extract(index, item).await {
                Ok(record) => {
                    tracing::debug!(
                        country = %self.country,
                        index,
                        store = %record.store_name,
                        address = %record.address,
                        working_hours = %record.working_hours,
                        phone = %record.phone,
                        "store extracted"
                    );
                    stores.push(record);
                }
                Err(e) => {
                    tracing::warn!(country = %self.country, index, error = %e, "skipping store");
                }
            }
        }
    }

    async fn store_name(&self, item: &S::Element) -> String {
        let heading = match item.find_first(self.settings.layout.store_name()).await {
            Ok(Some(heading)) => heading,
            Ok(None) => return NOT_FOUND.to_owned(),
            Err(e) => {
                tracing::debug!(country = %self.country, error = %e, "store name unreadable");
                return NOT_FOUND.to_owned();
            }
        };
        match heading.text().await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_owned(),
            Ok(_) => NOT_FOUND.to_owned(),
            Err(e) => {
                tracing::debug!(country = %self.country, error = %e, "store name unreadable");
                NOT_FOUND.to_owned()
            }
        }
    }

    async fn detail_fragments(&self, item: &S::Element) -> Result<Vec<String>, BrowserError> {
        let paragraphs = item.find_all(self.settings.layout.paragraphs()).await?;
        let mut fragments = Vec::with_capacity(paragraphs.len());
        for paragraph in &paragraphs {
            let text = paragraph.text().await?;
            let text = text.trim();
            if !text.is_empty() {
                fragments.push(text.to_owned());
            }
        }
        Ok(fragments)
    }
}
