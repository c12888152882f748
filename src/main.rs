use clap::{Parser, Subcommand};
use simple_folio::client::ApiClient;
use simple_folio::contact::{ContactField, ContactForm, FormStatus};
use simple_folio::types::Category;
use simple_folio::{config, output};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Client for a photography portfolio service")]
#[command(long_about = "\
Client for a photography portfolio service

Fetches photos, testimonials and the about record from the portfolio service
and prints them as an inventory, or submits a contact inquiry.

The service address comes from (last wins):
  1. stock default          http://localhost:8001
  2. config.toml            [api] base_url
  3. FOLIO_API_URL          environment variable
  4. --api-url              command line

Set RUST_LOG (e.g. RUST_LOG=simple_folio=debug) for diagnostics.

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Portfolio service base URL (overrides config and environment)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load portfolio data and print it
    Fetch {
        /// Only list photos in this category
        #[arg(long)]
        category: Option<Category>,
    },
    /// Submit a contact inquiry
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { category } => {
            let client = connect(&cli.config_dir, cli.api_url)?;
            let mut data = client.load_portfolio_or_empty().await;
            if let Some(category) = category {
                data.photos = client.fetch_photos_in(category).await?;
            }
            output::print_portfolio(&data);
        }
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let client = connect(&cli.config_dir, cli.api_url)?;
            let mut form = ContactForm::new();
            form.set_field(ContactField::Name, name);
            form.set_field(ContactField::Email, email);
            form.set_field(ContactField::Phone, phone.unwrap_or_default());
            form.set_field(ContactField::Message, message);

            let submission = form.begin_submit()?;
            let outcome = client.submit_contact(&submission).await;
            form.finish(outcome);
            output::print_contact_status(&form);
            if form.status() == Some(FormStatus::Failure) {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, apply the `--api-url` override, and build the client.
fn connect(config_dir: &Path, api_url: Option<String>) -> Result<ApiClient, Box<dyn Error>> {
    let mut site_config = config::load_config(config_dir)?;
    if let Some(url) = api_url {
        site_config.api.base_url = url;
        site_config.validate()?;
    }
    Ok(ApiClient::new(&site_config.api)?)
}
