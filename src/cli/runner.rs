//! CLI runner - executes commands

use crate::api::{AuthApi, Credentials};
use crate::cli::commands::{Cli, Commands};
use crate::cli::profile::Profile;
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::http::{ApiClient, ApiClientConfig, RequestConfig};
use crate::session::MemorySessionStore;
use crate::types::JsonValue;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Environment for a terminal host: notifications go to stderr, and
/// "navigation" (which only ever targets the login page after a session
/// wipe) is just logged since there is no page to leave.
#[derive(Debug, Default)]
pub struct TerminalEnvironment;

impl Environment for TerminalEnvironment {
    fn navigate(&self, path: &str) {
        debug!("session ended, would navigate to {path}");
    }

    fn notify(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn current_path(&self) -> String {
        "/".to_string()
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let profile = self.load_profile()?;
        let client = self.build_client(&profile)?;

        match &self.cli.command {
            Commands::Login { email, password } => {
                self.login(&client, &profile, email.as_deref(), password.as_deref())
                    .await
            }
            Commands::Get { path, query } => {
                self.authenticate_if_configured(&client, &profile).await?;
                let config = parse_query_pairs(query)?;
                let response = client.get_with_config(path, config).await?;
                print_body(response).await
            }
            Commands::Post { path, body } => {
                self.authenticate_if_configured(&client, &profile).await?;
                let body: JsonValue = match body {
                    Some(raw) => serde_json::from_str(raw)?,
                    None => json!({}),
                };
                let response = client.post(path, body).await?;
                print_body(response).await
            }
        }
    }

    fn load_profile(&self) -> Result<Profile> {
        match &self.cli.profile {
            Some(path) => Profile::load(path),
            None => Ok(Profile::default()),
        }
    }

    fn build_client(&self, profile: &Profile) -> Result<ApiClient> {
        let origin = self
            .cli
            .origin
            .clone()
            .or_else(|| profile.origin.clone())
            .unwrap_or_else(|| "http://localhost:5000".to_string());

        let mut builder = ApiClientConfig::builder().origin(origin);
        if let Some(secs) = profile.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        ApiClient::new(
            builder.build(),
            Arc::new(MemorySessionStore::new()),
            Arc::new(TerminalEnvironment),
        )
    }

    async fn login(
        &self,
        client: &ApiClient,
        profile: &Profile,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<()> {
        let credentials = resolve_credentials(profile, email, password)
            .ok_or_else(|| Error::config("email and password required (flags or profile)"))?;

        let session = AuthApi::new(client).login(&credentials).await?;
        match session.user {
            Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
            None => println!("authenticated (no user in response)"),
        }
        Ok(())
    }

    /// Log in first when the profile carries credentials; anonymous
    /// probing is fine for public endpoints.
    async fn authenticate_if_configured(&self, client: &ApiClient, profile: &Profile) -> Result<()> {
        if let Some(credentials) = resolve_credentials(profile, None, None) {
            AuthApi::new(client).login(&credentials).await?;
        }
        Ok(())
    }
}

fn resolve_credentials(
    profile: &Profile,
    email: Option<&str>,
    password: Option<&str>,
) -> Option<Credentials> {
    let email = email.map(str::to_string).or_else(|| profile.email.clone())?;
    let password = password
        .map(str::to_string)
        .or_else(|| profile.password.clone())?;
    Some(Credentials { email, password })
}

fn parse_query_pairs(pairs: &[String]) -> Result<RequestConfig> {
    let mut config = RequestConfig::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::config(format!("query parameter must be key=value: {pair}")))?;
        config = config.query(key, value);
    }
    Ok(config)
}

async fn print_body(response: reqwest::Response) -> Result<()> {
    let body: JsonValue = response.json().await.map_err(Error::Http)?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[cfg(test)]
mod runner_tests {
    use super::*;

    #[test]
    fn test_parse_query_pairs() {
        let config =
            parse_query_pairs(&["status=open".to_string(), "page=2".to_string()]).unwrap();
        assert_eq!(config.query.get("status"), Some(&"open".to_string()));
        assert_eq!(config.query.get("page"), Some(&"2".to_string()));
    }

    #[test]
    fn test_parse_query_pairs_rejects_bare_key() {
        assert!(parse_query_pairs(&["status".to_string()]).is_err());
    }

    #[test]
    fn test_resolve_credentials_precedence() {
        let profile = Profile {
            email: Some("profile@example.com".to_string()),
            password: Some("from-profile".to_string()),
            ..Profile::default()
        };

        let creds = resolve_credentials(&profile, Some("flag@example.com"), None).unwrap();
        assert_eq!(creds.email, "flag@example.com");
        assert_eq!(creds.password, "from-profile");

        assert!(resolve_credentials(&Profile::default(), None, None).is_none());
    }
}
