//! Scroll-driven disclosure of a lazily rendered store list.
//!
//! The list only renders more items after its container is scrolled. The
//! loader hands out the initially rendered items first, then each call to
//! [`IncrementalListLoader::next_batch`] scrolls once, waits, and yields only
//! the items past the previously discovered count. It stops when a scroll
//! reveals nothing new, the container has no scrollbar, or the attempt budget
//! is spent.

use crate::browser::{BrowserError, BrowserSession};
use crate::settings::ScrapeSettings;

/// Items revealed by one read of the list, with the index of the first one.
pub struct ItemBatch<E> {
    pub start_index: usize,
    pub items: Vec<E>,
}

pub struct IncrementalListLoader<'a, S: BrowserSession> {
    session: &'a S,
    settings: &'a ScrapeSettings,
    country: &'a str,
    discovered: usize,
    scroll_attempts: u32,
    scrollable: Option<bool>,
    exhausted: bool,
}

impl<'a, S: BrowserSession> IncrementalListLoader<'a, S> {
    /// A loader for the list currently shown for `country`.
    pub fn new(session: &'a S, settings: &'a ScrapeSettings, country: &'a str) -> Self {
        Self {
            session,
            settings,
            country,
            discovered: 0,
            scroll_attempts: 0,
            scrollable: None,
            exhausted: false,
        }
    }

    /// Number of items discovered so far. Never decreases.
    #[must_use]
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    /// Scroll steps performed so far.
    #[must_use]
    pub fn scroll_attempts(&self) -> u32 {
        self.scroll_attempts
    }

    /// Reads the items rendered without any scrolling.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the item list cannot be queried.
    pub async fn first_batch(&mut self) -> Result<ItemBatch<S::Element>, BrowserError> {
        let items = self
            .session
            .find_elements(self.settings.layout.items())
            .await?;
        self.discovered = items.len();
        Ok(ItemBatch {
            start_index: 0,
            items,
        })
    }

    /// Scrolls once and returns the newly rendered items.
    ///
    /// Returns `None` once no further items are forthcoming. Browser errors
    /// while scrolling end the disclosure; items already handed out stay valid.
    pub async fn next_batch(&mut self) -> Option<ItemBatch<S::Element>> {
        if self.exhausted {
            return None;
        }

        if self.scrollable.is_none() {
            self.scrollable = Some(self.has_scrollbar().await);
        }
        if self.scrollable != Some(true) || self.scroll_attempts >= self.settings.max_scroll_attempts
        {
            self.exhausted = true;
            return None;
        }

        self.scroll_attempts += 1;
        match self.scroll_and_reread().await {
            Ok(Some(batch)) => Some(batch),
            Ok(None) => {
                tracing::debug!(
                    country = %self.country,
                    attempt = self.scroll_attempts,
                    discovered = self.discovered,
                    "scroll revealed no new items"
                );
                self.exhausted = true;
                None
            }
            Err(e) => {
                tracing::warn!(
                    country = %self.country,
                    attempt = self.scroll_attempts,
                    discovered = self.discovered,
                    error = %e,
                    "scrolling failed; keeping items loaded so far"
                );
                self.exhausted = true;
                None
            }
        }
    }

    /// Every item of the list: the initial render followed by everything
    /// scrolling reveals, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] only if the initial read fails.
    pub async fn load(mut self) -> Result<Vec<S::Element>, BrowserError> {
        let mut items = self.first_batch().await?.items;
        while let Some(batch) = self.next_batch().await {
            items.extend(batch.items);
        }
        Ok(items)
    }

    async fn has_scrollbar(&self) -> bool {
        let layout = &self.settings.layout;
        let probe = async {
            let pane = self.session.find_element(layout.scroll_pane()).await?;
            let drag = self.session.find_element(layout.scroll_drag()).await?;
            Ok::<bool, BrowserError>(pane.is_some() && drag.is_some())
        };
        match probe.await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    country = %self.country,
                    error = %e,
                    "could not look for a scrollbar; assuming none"
                );
                false
            }
        }
    }

    async fn scroll_and_reread(&mut self) -> Result<Option<ItemBatch<S::Element>>, BrowserError> {
        let script = self
            .settings
            .layout
            .scroll_script(self.settings.scroll_step_px);
        self.session.execute_script(&script, &[]).await?;
        tokio::time::sleep(self.settings.scroll_pause).await;

        let items = self
            .session
            .find_elements(self.settings.layout.items())
            .await?;
        if items.len() <= self.discovered {
            return Ok(None);
        }

        let start_index = self.discovered;
        self.discovered = items.len();
        Ok(Some(ItemBatch {
            start_index,
            items: items.into_iter().skip(start_index).collect(),
        }))
    }
}
