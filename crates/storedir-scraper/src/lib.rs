pub mod browser;
pub mod classify;
pub mod error;
pub mod extract;
pub mod loader;
pub mod orchestrator;
pub mod select;
pub mod session;
pub mod settings;

pub use browser::{BrowserError, BrowserSession, Locator, PageElement, WebDriverSession};
pub use classify::{classify, StoreDetails};
pub use error::ScraperError;
pub use extract::StoreExtractor;
pub use loader::{IncrementalListLoader, ItemBatch};
pub use orchestrator::{
    list_countries, scrape_directory, scrape_with_session, CountryFailure, ScrapeOrchestrator,
    ScrapeRun,
};
pub use select::CountrySelect;
pub use session::CountrySession;
pub use settings::{PageLayout, ScrapeSettings};
