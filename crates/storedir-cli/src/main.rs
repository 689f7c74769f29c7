use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scrape;

#[derive(Debug, Parser)]
#[command(name = "storedir")]
#[command(about = "Scrape a retail store directory into a spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every offered country and export the report (the default).
    Scrape(ScrapeArgs),
    /// Print the countries the directory offers.
    Countries {
        #[arg(long)]
        headless: bool,
    },
}

#[derive(Debug, Default, Args)]
struct ScrapeArgs {
    /// Only scrape this country; repeat for several.
    #[arg(long = "country", value_name = "NAME")]
    countries: Vec<String>,

    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    #[arg(long)]
    headless: bool,
}

impl ScrapeArgs {
    fn apply(&self, config: &mut storedir_core::AppConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        config.headless |= self.headless;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = storedir_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli
        .command
        .unwrap_or_else(|| Commands::Scrape(ScrapeArgs::default()))
    {
        Commands::Scrape(args) => {
            args.apply(&mut config);
            scrape::run_scrape(&config, args.countries).await
        }
        Commands::Countries { headless } => {
            config.headless |= headless;
            scrape::run_countries(&config).await
        }
    }
}
