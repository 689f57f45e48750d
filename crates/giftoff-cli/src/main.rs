mod output;

use clap::Parser;
use giftoff_scraper::{client, DashboardClient};

#[derive(Debug, Parser)]
#[command(name = "giftoff-cli")]
#[command(about = "Exports gift-card records from a Giftoff dashboard")]
struct Cli {
    /// PHPSESSID cookie value for the authenticated dashboard session.
    #[arg(long, env = "GIFTOFF_SESSION", hide_env_values = true)]
    session: String,

    /// Dashboard origin to export from.
    #[arg(long, default_value = "https://giftoff.com")]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let base = client::parse_base_url(&cli.base_url)?;
    let dashboard = DashboardClient::new()?;

    let records = giftoff_scraper::export_cards(&dashboard, &base, &cli.session).await?;
    for record in &records {
        println!("{}", output::record_line(record));
    }

    Ok(())
}
