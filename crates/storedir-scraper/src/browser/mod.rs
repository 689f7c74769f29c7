//! Browsing-session boundary.
//!
//! The scraping pipeline only talks to the page through [`BrowserSession`]
//! and [`PageElement`]. [`WebDriverSession`] drives a real Chrome over
//! WebDriver; tests substitute an in-memory page.

mod webdriver;

use std::time::Duration;

use async_trait::async_trait;

pub use webdriver::{DriverElement, WebDriverSession};

/// How an element is addressed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator<'a> {
    Id(&'a str),
    Css(&'a str),
    ClassName(&'a str),
    Tag(&'a str),
}

impl std::fmt::Display for Locator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{id}"),
            Locator::Css(css) => write!(f, "{css}"),
            Locator::ClassName(class) => write!(f, ".{class}"),
            Locator::Tag(tag) => write!(f, "<{tag}>"),
        }
    }
}

/// Errors raised by the browsing session or one of its element handles.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("timed out after {timeout_secs}s waiting for {locator}")]
    Timeout { locator: String, timeout_secs: u64 },

    /// The handle points at a node that was re-rendered or removed.
    #[error("stale element: {0}")]
    Stale(String),
}

/// A live handle to one element of the current page.
///
/// Handles go stale as soon as the page re-renders the node they point at,
/// so callers read what they need and drop them.
#[async_trait]
pub trait PageElement: Send + Sync + Sized {
    /// Rendered text of the element.
    async fn text(&self) -> Result<String, BrowserError>;

    /// All descendants matching `locator`, in document order.
    async fn find_all(&self, locator: Locator<'_>) -> Result<Vec<Self>, BrowserError>;

    async fn click(&self) -> Result<(), BrowserError>;

    /// First descendant matching `locator`, if any.
    async fn find_first(&self, locator: Locator<'_>) -> Result<Option<Self>, BrowserError> {
        Ok(self.find_all(locator).await?.into_iter().next())
    }
}

/// One browser tab showing the store directory.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Element: PageElement;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// All elements matching `locator`, in document order.
    async fn find_elements(&self, locator: Locator<'_>)
        -> Result<Vec<Self::Element>, BrowserError>;

    /// Runs `script` in the page. Elements are exposed to it as `arguments[i]`.
    async fn execute_script(
        &self,
        script: &str,
        args: &[&Self::Element],
    ) -> Result<(), BrowserError>;

    /// Blocks until `locator` matches something or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Timeout`] when nothing matched in time.
    async fn wait_until_present(
        &self,
        locator: Locator<'_>,
        timeout: Duration,
    ) -> Result<Self::Element, BrowserError>;

    /// Ends the session. Called exactly once per run.
    async fn quit(&self) -> Result<(), BrowserError>;

    /// First element matching `locator`, if any.
    async fn find_element(
        &self,
        locator: Locator<'_>,
    ) -> Result<Option<Self::Element>, BrowserError> {
        Ok(self.find_elements(locator).await?.into_iter().next())
    }
}
