//! Command handlers that drive a live browser session.
//!
//! Per-country failures are reported and skipped; only a failure to reach
//! the directory or to write the report fails the command.

use anyhow::Context;
use storedir_core::AppConfig;
use storedir_scraper::{BrowserSession, ScrapeSettings, WebDriverSession};

async fn connect(config: &AppConfig) -> anyhow::Result<WebDriverSession> {
    tracing::info!(
        webdriver = %config.webdriver_url,
        headless = config.headless,
        "starting browser session"
    );
    WebDriverSession::connect(&config.webdriver_url, config.headless)
        .await
        .with_context(|| format!("cannot start browser via {}", config.webdriver_url))
}

/// Scrape the directory, log the run summary and export the report.
///
/// # Errors
///
/// Returns an error if the browser cannot be started, the directory cannot
/// be enumerated, or the report cannot be written.
pub(crate) async fn run_scrape(config: &AppConfig, countries: Vec<String>) -> anyhow::Result<()> {
    let mut settings = ScrapeSettings::from_app_config(config);
    settings.country_filter = countries;

    let session = connect(config).await?;
    let run = storedir_scraper::scrape_with_session(session, &settings)
        .await
        .context("store directory scrape aborted")?;

    let summary = storedir_report::summarize(&run.stores);
    for (country, count) in &summary.countries {
        tracing::info!(country = %country, stores = count, "country scraped");
    }
    tracing::info!(
        countries = summary.total_countries(),
        stores = summary.total_stores,
        failed = run.failures.len(),
        "scrape finished"
    );
    println!("{summary}");

    if !run.failures.is_empty() {
        let failed: Vec<&str> = run.failures.iter().map(|f| f.country.as_str()).collect();
        eprintln!(
            "warning: {} countries failed: [{}]",
            failed.len(),
            failed.join(", ")
        );
    }

    let path = storedir_report::export_report(
        &run.stores,
        &config.output_dir,
        chrono::Local::now().naive_local(),
    )?;
    println!("report saved to {}", path.display());
    Ok(())
}

/// Print the selectable countries, one per line.
///
/// # Errors
///
/// Returns an error if the browser cannot be started or the directory page
/// has no country selector.
pub(crate) async fn run_countries(config: &AppConfig) -> anyhow::Result<()> {
    let settings = ScrapeSettings::from_app_config(config);
    let session = connect(config).await?;

    let listed = storedir_scraper::list_countries(&session, &settings).await;
    if let Err(e) = session.quit().await {
        tracing::warn!(error = %e, "failed to close browser session");
    }

    for country in listed.context("cannot list directory countries")? {
        println!("{country}");
    }
    Ok(())
}
