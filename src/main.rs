//! `omise` - fetch a resource from the Omise API and print it as JSON.
//!
//! ```text
//! omise customer cust_test_1
//! omise charge chrg_test_1
//! omise transaction trxn_test_1
//! omise customers | charges | refunds | transactions
//! ```
//!
//! Credentials come from `OMISE__API__SECRET_KEY` (see [`omise::config`]).

use std::process::ExitCode;

use omise::config::{AppConfig, ConfigError};
use omise::telemetry::init_tracing;
use omise::{Attributes, Charge, Client, Customer, OmiseError, Refund, Resource, Transaction};
use thiserror::Error;

const USAGE: &str = "usage: omise <customer|charge|transaction> <id>\n       omise <customers|charges|refunds|transactions>";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] OmiseError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(CliError::Usage(usage)) => {
            eprintln!("{}", usage);
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String, CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (kind, id) = match args.as_slice() {
        [kind] => (kind.as_str(), None),
        [kind, id] => (kind.as_str(), Some(id.as_str())),
        _ => return Err(CliError::Usage(USAGE)),
    };

    let config = AppConfig::load_validated()?;
    init_tracing(&config.log);

    let client = Client::from_config(&config.api)?;
    tracing::debug!(kind, id, "Fetching resource");

    let attributes = fetch(&client, kind, id).await?;
    Ok(serde_json::to_string_pretty(&attributes)?)
}

async fn fetch(client: &Client, kind: &str, id: Option<&str>) -> Result<Attributes, CliError> {
    let none = Attributes::new;
    let attributes = match (kind, id) {
        ("customer", Some(id)) => Customer::retrieve(client, id, none()).await?.attributes().clone(),
        ("charge", Some(id)) => Charge::retrieve(client, id, none()).await?.attributes().clone(),
        ("transaction", Some(id)) => {
            Transaction::retrieve(client, id, none()).await?.attributes().clone()
        }
        ("customers", None) => Customer::list(client, none()).await?.attributes().clone(),
        ("charges", None) => Charge::list(client, none()).await?.attributes().clone(),
        ("refunds", None) => Refund::list(client, none()).await?.attributes().clone(),
        ("transactions", None) => Transaction::list(client, none()).await?.attributes().clone(),
        _ => return Err(CliError::Usage(USAGE)),
    };
    Ok(attributes)
}
