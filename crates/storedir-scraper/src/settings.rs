//! Selectors and timings for one scrape run.

use std::time::Duration;

use crate::browser::Locator;

/// Where things live on the store directory page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// `id` of the country `<select>`.
    pub country_select_id: String,
    /// CSS selector matching every rendered store item.
    pub item_selector: String,
    /// `id` of the scrollable element holding the items.
    pub list_container_id: String,
    pub scroll_pane_class: String,
    pub scroll_drag_class: String,
    /// Tag of the store name inside an item.
    pub name_tag: String,
    /// Tag of the free-text detail fragments inside an item.
    pub paragraph_tag: String,
    /// Option texts of the country selector that are not countries.
    pub placeholder_options: Vec<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            country_select_id: "DDLCountry".to_owned(),
            item_selector: "#ListArea li".to_owned(),
            list_container_id: "ListArea".to_owned(),
            scroll_pane_class: "jspPane".to_owned(),
            scroll_drag_class: "jspDrag".to_owned(),
            name_tag: "h3".to_owned(),
            paragraph_tag: "p".to_owned(),
            placeholder_options: vec!["Ülke".to_owned(), "Seçiniz".to_owned()],
        }
    }
}

impl PageLayout {
    pub(crate) fn country_select(&self) -> Locator<'_> {
        Locator::Id(&self.country_select_id)
    }

    pub(crate) fn items(&self) -> Locator<'_> {
        Locator::Css(&self.item_selector)
    }

    pub(crate) fn scroll_pane(&self) -> Locator<'_> {
        Locator::ClassName(&self.scroll_pane_class)
    }

    pub(crate) fn scroll_drag(&self) -> Locator<'_> {
        Locator::ClassName(&self.scroll_drag_class)
    }

    pub(crate) fn store_name(&self) -> Locator<'_> {
        Locator::Tag(&self.name_tag)
    }

    pub(crate) fn paragraphs(&self) -> Locator<'_> {
        Locator::Tag(&self.paragraph_tag)
    }

    /// Script advancing the list container by `step_px`.
    pub(crate) fn scroll_script(&self, step_px: u32) -> String {
        format!(
            "document.getElementById('{}').scrollTop += {step_px};",
            self.list_container_id
        )
    }
}

/// Script centring `arguments[0]` in the viewport.
pub(crate) const SCROLL_INTO_VIEW_SCRIPT: &str =
    "arguments[0].scrollIntoView({block: 'center'});";

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub directory_url: String,
    pub layout: PageLayout,
    /// Upper bound for waiting on the country selector after navigation.
    pub element_wait: Duration,
    /// Pause after picking a country so the list can re-render.
    pub country_settle: Duration,
    /// Pause after scrolling an item into view, before reading it.
    pub item_settle: Duration,
    /// Pause after each scroll step so lazily loaded items can arrive.
    pub scroll_pause: Duration,
    pub scroll_step_px: u32,
    pub max_scroll_attempts: u32,
    /// When non-empty, only these countries are scraped.
    pub country_filter: Vec<String>,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            directory_url: "https://corporate.lcwaikiki.com/magazalar".to_owned(),
            layout: PageLayout::default(),
            element_wait: Duration::from_secs(10),
            country_settle: Duration::from_millis(1000),
            item_settle: Duration::from_millis(200),
            scroll_pause: Duration::from_millis(800),
            scroll_step_px: 500,
            max_scroll_attempts: 10,
            country_filter: Vec::new(),
        }
    }
}

impl ScrapeSettings {
    #[must_use]
    pub fn from_app_config(config: &storedir_core::AppConfig) -> Self {
        Self {
            directory_url: config.directory_url.clone(),
            layout: PageLayout::default(),
            element_wait: Duration::from_secs(config.element_wait_secs),
            country_settle: Duration::from_millis(config.country_settle_ms),
            item_settle: Duration::from_millis(config.item_settle_ms),
            scroll_pause: Duration::from_millis(config.scroll_pause_ms),
            scroll_step_px: config.scroll_step_px,
            max_scroll_attempts: config.max_scroll_attempts,
            country_filter: Vec::new(),
        }
    }
}
