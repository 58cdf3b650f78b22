//! ramp-cli — operator console for the RAMP API
//!
//! Drives the client views from the command line:
//! - `login`: log in, print the session, log out
//! - `pii <user_id>`: print a user's PII (VIEW_PII)
//! - `plan <user_id> <policy_id>`: create a draft support plan (CREATE_PLAN)
//! - `logs [plan_id]`: print the audit log (SYSTEM_LOG_READ)
//!
//! Credentials come from `--email` / `--password` or `RAMP_EMAIL` /
//! `RAMP_PASSWORD`; they are only used when no restored session is valid.

mod command;

use anyhow::Context;
use clap::Parser;
use command::Cli;
use ramp_client::{ClientConfig, RampClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ramp_client=info,ramp_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    tracing::info!(api_root = %config.api_root, "Starting ramp-cli");

    let client = RampClient::connect(config)
        .await
        .context("failed to build client")?;

    let result = command::run(&client, cli).await;

    // Always leave the server session closed.
    if client.session().is_authenticated() {
        client.logout().await?;
    }

    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            Err(e)
        }
    }
}
