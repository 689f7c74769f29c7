//! Reader and driver for the country `<select>` control.

use crate::browser::{BrowserError, Locator, PageElement};
use crate::error::ScraperError;

const OPTION: Locator<'static> = Locator::Tag("option");

pub struct CountrySelect<E> {
    element: E,
}

impl<E: PageElement> CountrySelect<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }

    /// Visible option texts in page order, without blanks and `placeholders`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the options cannot be read.
    pub async fn country_names(&self, placeholders: &[String]) -> Result<Vec<String>, BrowserError> {
        let mut names = Vec::new();
        for option in self.element.find_all(OPTION).await? {
            let text = option.text().await?;
            let text = text.trim();
            if text.is_empty() || placeholders.iter().any(|p| p == text) {
                continue;
            }
            names.push(text.to_owned());
        }
        Ok(names)
    }

    /// Picks the option whose visible text is `country`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownCountry`] if no option carries that text,
    /// or [`ScraperError::Browser`] if the options cannot be read or clicked.
    pub async fn select_by_visible_text(&self, country: &str) -> Result<(), ScraperError> {
        for option in self.element.find_all(OPTION).await? {
            if option.text().await?.trim() == country {
                option.click().await?;
                return Ok(());
            }
        }
        Err(ScraperError::UnknownCountry {
            country: country.to_owned(),
        })
    }
}
