use crate::cli::globals::GlobalArgs;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Mount holding one KV v2 record per user.
const SECRET_MOUNT: &str = "usercreds";

/// Transport timeout for every Vault read.
const VAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Credential record stored under `usercreds/data/<username>`. Fields missing
/// from the secret document decode to empty strings and fail the password
/// comparison downstream.
#[derive(Debug, Default, Deserialize)]
pub struct UserCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub customerno: String,
}

/// Build the HTTP client used for a single Vault read.
pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(crate::APP_USER_AGENT)
        .timeout(VAULT_TIMEOUT)
        .build()?)
}

/// Build the KV v2 read URL for a username. The username is pushed as a
/// single path segment, so characters that are special in URLs are
/// percent-encoded instead of reaching Vault as extra path components.
pub fn secret_url(vault_addr: &str, username: &str) -> Result<Url> {
    let mut url = Url::parse(vault_addr)?;

    url.path_segments_mut()
        .map_err(|()| anyhow!("Error parsing URL: cannot be a base"))?
        .extend(["v1", SECRET_MOUNT, "data", username]);

    debug!("secret URL: {}", url);

    Ok(url)
}

/// Read a user's credential record from Vault.
#[instrument(skip(client, globals))]
pub async fn read_user_creds(
    client: &Client,
    globals: &GlobalArgs,
    username: &str,
) -> Result<UserCredentials> {
    let url = secret_url(&globals.vault_addr, username)?;

    let response = client
        .get(url.as_str())
        .header("X-Vault-Token", globals.vault_token.expose_secret())
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let json_response: Value = response.json().await?;

        return Err(anyhow!(
            "{} - {}, {}",
            url,
            status,
            json_response["errors"][0].as_str().unwrap_or("")
        ));
    }

    let json_response: Value = response.json().await?;

    let data = json_response
        .get("data")
        .and_then(|data| data.get("data"))
        .cloned()
        .ok_or_else(|| anyhow!("Error parsing JSON response: no credential data found"))?;

    serde_json::from_value(data).context("Error decoding credential data")
}
