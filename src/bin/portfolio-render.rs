use std::fs;
use std::time::Duration;

use clap::{Arg, Command};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use portfolio_content::config::{ClientOptions, PortfolioOptions, API_URL_ENV, DEFAULT_BASE_URL};
use portfolio_content::content::Origin;
use portfolio_content::controller::PortfolioController;
use portfolio_content::error::{Error, Result};
use portfolio_content::render::Region;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("portfolio-render: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let matches = Command::new("portfolio-render")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render the portfolio page from the content API as static HTML")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .takes_value(true)
                .help("Base URL of the content API (defaults to $PORTFOLIO_API_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .takes_value(true)
                .help("Per-request timeout in seconds"),
        )
        .arg(
            Arg::new("all-projects")
                .long("all-projects")
                .help("Load the full project list instead of the first page"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .takes_value(true)
                .help("Write the page to FILE instead of stdout"),
        )
        .get_matches();

    let mut options = match matches.value_of("api-url") {
        Some(url) => ClientOptions::new(url)?,
        None => match ClientOptions::from_env() {
            Ok(options) => options,
            Err(_) => {
                warn!("{} not set, using {}", API_URL_ENV, DEFAULT_BASE_URL);
                ClientOptions::default()
            }
        },
    };
    if let Some(raw) = matches.value_of("timeout") {
        let secs: u64 = raw
            .parse()
            .map_err(|_| Error::config(format!("--timeout must be a whole number of seconds, got {:?}", raw)))?;
        options = options.with_request_timeout(Some(Duration::from_secs(secs)));
    }

    info!("Rendering portfolio from {}", options.base_url);
    let controller = PortfolioController::connect(options, PortfolioOptions::default())?;
    controller.start().await;

    if matches.is_present("all-projects") {
        if let Some(Origin::Fallback(err)) = controller.load_all_projects().await {
            warn!("Full project list unavailable: {}", err);
        }
    }

    let page = controller.page();
    let page = page.lock().await;
    let title = page
        .element(Region::UserName)
        .and_then(|el| el.text.clone())
        .unwrap_or_else(|| "Portfolio".to_string());
    let html = page.to_html(&title);

    match matches.value_of("output") {
        Some(path) => {
            fs::write(path, html).map_err(|e| Error::general(format!("failed to write {}: {}", path, e)))?;
            info!("Wrote {}", path);
        }
        None => print!("{}", html),
    }
    Ok(())
}
