//! Command line and dispatch

use anyhow::Context;
use clap::{Parser, Subcommand};
use ramp_client::RampClient;
use ramp_client::views::{LoginForm, PlanCreator, SystemLogViewer, UserPiiViewer};
use serde_json::{Value, json};

#[derive(Parser, Debug)]
#[command(name = "ramp-cli", about = "Operator console for the RAMP API")]
pub struct Cli {
    /// Supporter email used to log in
    #[arg(long, env = "RAMP_EMAIL", global = true)]
    pub email: Option<String>,

    #[arg(long, env = "RAMP_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Log in and print the session user
    Login,
    /// Print a user's PII (VIEW_PII)
    Pii { user_id: i64 },
    /// Create a draft support plan (CREATE_PLAN)
    Plan { user_id: i64, policy_id: i64 },
    /// Print the audit log, optionally for one plan (SYSTEM_LOG_READ)
    Logs { plan_id: Option<i64> },
}

impl Cli {
    fn credentials(&self) -> anyhow::Result<(String, String)> {
        let email = self
            .email
            .clone()
            .context("no email given (--email or RAMP_EMAIL)")?;
        let password = self
            .password
            .clone()
            .context("no password given (--password or RAMP_PASSWORD)")?;
        Ok((email, password))
    }
}

pub async fn run(client: &RampClient, cli: Cli) -> anyhow::Result<Value> {
    match cli.command {
        Command::Login => {
            let (email, password) = cli.credentials()?;
            login(client, email, password).await
        }
        Command::Pii { user_id } => {
            ensure_session(client, &cli).await?;
            let mut viewer = UserPiiViewer::new(client.clone());
            let pii = viewer.fetch(user_id).await?;
            Ok(serde_json::to_value(pii)?)
        }
        Command::Plan { user_id, policy_id } => {
            ensure_session(client, &cli).await?;
            let mut creator = PlanCreator::new(client.clone());
            let draft = creator.create_draft(user_id, policy_id).await?;
            Ok(serde_json::to_value(draft)?)
        }
        Command::Logs { plan_id } => {
            ensure_session(client, &cli).await?;
            let mut viewer = SystemLogViewer::new(client.clone());
            let logs = viewer.fetch(plan_id).await?;
            Ok(serde_json::to_value(logs)?)
        }
    }
}

/// Reuse a restored session, otherwise log in with the given credentials
async fn ensure_session(client: &RampClient, cli: &Cli) -> anyhow::Result<()> {
    if client.session().is_authenticated() {
        return Ok(());
    }
    let (email, password) = cli.credentials()?;
    login(client, email, password).await.map(|_| ())
}

async fn login(client: &RampClient, email: String, password: String) -> anyhow::Result<Value> {
    let mut form = LoginForm::new(client.clone());
    form.email = email;
    form.set_password(password);
    let user = form.submit().await.context("login failed")?;
    Ok(json!({
        "id": user.id(),
        "full_name": user.full_name(),
        "role_id": user.role_id(),
        "role_name": user.role_name(),
    }))
}
