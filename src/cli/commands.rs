//! CLI command implementations

use anyhow::Result;
use std::fs;

use crate::auth::models::RegisterRequest;
use crate::cli::{error, info, print_user_detail, success, warn};
use crate::config::{self, Config};
use crate::session::{SessionState, SessionStore};

/// Initialize a new callboard.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("callboard.toml");

    if config_path.exists() {
        warn("callboard.toml already exists");
        return Ok(());
    }

    let content = config::default_config_content();
    fs::write(config_path, content)?;

    success("Created callboard.toml");
    info("Edit the configuration file and run 'callboard serve' to start the API");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(host: &str, port: u16) -> Result<()> {
    let config = config::load_config()?;

    info(&format!("Starting server at http://{}:{}", host, port));

    crate::api::run_server(config, host, port).await?;

    Ok(())
}

/// Create an account and sign in
pub async fn register(email: &str, first_name: &str, last_name: &str) -> Result<()> {
    let config = config::load_config()?;

    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let mut store = session_store(&config);
    let state = store
        .register(RegisterRequest {
            email: email.to_string(),
            password,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
        .await
        .clone();

    report_outcome(&state, "Registered and signed in")
}

/// Sign in with an existing account
pub async fn login(email: &str) -> Result<()> {
    let config = config::load_config()?;

    let password = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()?;

    let mut store = session_store(&config);
    let state = store.login(email, &password).await.clone();

    report_outcome(&state, "Signed in")
}

/// Sign out and discard the stored credential
pub async fn logout() -> Result<()> {
    let config = config::load_config()?;

    let mut store = session_store(&config);
    store.logout();

    success("Signed out");
    Ok(())
}

/// Show the identity behind the stored credential
pub async fn whoami() -> Result<()> {
    let config = config::load_config()?;

    let mut store = session_store(&config);
    match store.check_status().await.clone() {
        SessionState::Authenticated { user, .. } => {
            print_user_detail(&user);
            Ok(())
        }
        _ => {
            info("Not signed in. Run 'callboard login --email <email>'");
            Ok(())
        }
    }
}

fn session_store(config: &Config) -> SessionStore {
    SessionStore::from_config(&config.client)
}

fn report_outcome(state: &SessionState, verb: &str) -> Result<()> {
    match state {
        SessionState::Authenticated { user, .. } => {
            success(&format!(
                "{} as {} {} <{}>",
                verb, user.first_name, user.last_name, user.email
            ));
            Ok(())
        }
        SessionState::TransientError { message } => {
            error(message);
            Err(anyhow::anyhow!(message.clone()))
        }
        _ => Ok(()),
    }
}
