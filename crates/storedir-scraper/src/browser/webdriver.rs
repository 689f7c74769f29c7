//! [`BrowserSession`] over a W3C WebDriver server (chromedriver).

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::error::WebDriverErrorInner;
use thirtyfour::prelude::*;

use super::{BrowserError, BrowserSession, Locator, PageElement};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A Chrome session driven through WebDriver.
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Starts a Chrome session on the WebDriver server at `server_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::WebDriver`] if the server is unreachable or
    /// refuses to start a session.
    pub async fn connect(server_url: &str, headless: bool) -> Result<Self, BrowserError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--start-maximized")?;
        caps.add_arg("--disable-gpu")?;
        if headless {
            caps.add_arg("--headless=new")?;
        }

        let driver = WebDriver::new(server_url, caps).await?;
        tracing::debug!(server_url, headless, "webdriver session started");
        Ok(Self { driver })
    }
}

/// A [`WebElement`] behind the [`PageElement`] seam.
pub struct DriverElement {
    inner: WebElement,
}

fn by(locator: Locator<'_>) -> By {
    match locator {
        Locator::Id(id) => By::Id(id.to_owned()),
        Locator::Css(css) => By::Css(css.to_owned()),
        Locator::ClassName(class) => By::ClassName(class.to_owned()),
        Locator::Tag(tag) => By::Tag(tag.to_owned()),
    }
}

/// A failed wait is a timeout only when nothing matched in time; anything
/// else (a dropped session, a bad selector) is passed through.
fn wait_error(locator: Locator<'_>, timeout: Duration, err: WebDriverError) -> BrowserError {
    let timed_out = matches!(
        &*err,
        WebDriverErrorInner::NoSuchElement(_)
            | WebDriverErrorInner::Timeout(_)
            | WebDriverErrorInner::WebDriverTimeout(_)
    );
    if timed_out {
        BrowserError::Timeout {
            locator: locator.to_string(),
            timeout_secs: timeout.as_secs(),
        }
    } else {
        BrowserError::WebDriver(err)
    }
}

fn wrap(elements: Vec<WebElement>) -> Vec<DriverElement> {
    elements
        .into_iter()
        .map(|inner| DriverElement { inner })
        .collect()
}

#[async_trait]
impl PageElement for DriverElement {
    async fn text(&self) -> Result<String, BrowserError> {
        Ok(self.inner.text().await?)
    }

    async fn find_all(&self, locator: Locator<'_>) -> Result<Vec<Self>, BrowserError> {
        Ok(wrap(self.inner.find_all(by(locator)).await?))
    }

    async fn click(&self) -> Result<(), BrowserError> {
        Ok(self.inner.click().await?)
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    type Element = DriverElement;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        Ok(self.driver.goto(url).await?)
    }

    async fn find_elements(&self, locator: Locator<'_>) -> Result<Vec<DriverElement>, BrowserError> {
        Ok(wrap(self.driver.find_all(by(locator)).await?))
    }

    async fn execute_script(
        &self,
        script: &str,
        args: &[&DriverElement],
    ) -> Result<(), BrowserError> {
        let args = args
            .iter()
            .map(|element| element.inner.to_json())
            .collect::<Result<Vec<serde_json::Value>, _>>()?;
        self.driver.execute(script, args).await?;
        Ok(())
    }

    async fn wait_until_present(
        &self,
        locator: Locator<'_>,
        timeout: Duration,
    ) -> Result<DriverElement, BrowserError> {
        match self
            .driver
            .query(by(locator))
            .wait(timeout, WAIT_POLL_INTERVAL)
            .first()
            .await
        {
            Ok(inner) => Ok(DriverElement { inner }),
            Err(err) => {
                tracing::debug!(%locator, error = %err, "element wait failed");
                Err(wait_error(locator, timeout, err))
            }
        }
    }

    async fn quit(&self) -> Result<(), BrowserError> {
        self.driver.clone().quit().await?;
        tracing::debug!("webdriver session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_after_wait_is_a_timeout() {
        let err = thirtyfour::error::no_such_element("no element matched".to_owned());

        let mapped = wait_error(Locator::Id("DDLCountry"), Duration::from_secs(10), err);

        assert!(
            matches!(
                mapped,
                BrowserError::Timeout { ref locator, timeout_secs: 10 } if locator == "#DDLCountry"
            ),
            "expected Timeout, got: {mapped:?}"
        );
    }

    #[test]
    fn lost_session_is_not_reported_as_timeout() {
        let err = WebDriverError::RequestFailed("connection refused".to_owned());

        let mapped = wait_error(Locator::Id("DDLCountry"), Duration::from_secs(10), err);

        assert!(
            matches!(mapped, BrowserError::WebDriver(_)),
            "expected WebDriver error, got: {mapped:?}"
        );
    }
}
