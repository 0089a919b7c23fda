use anyhow::{Context, Result, anyhow};

use async_openai::{Client, config::OpenAIConfig};

use super::secrets::{API_KEY_ENV, ApiKey, ApiKeySource, lookup_api_key};

/// Resolves the credential or explains how to provide one.
pub fn require_api_key() -> Result<ApiKey> {
    lookup_api_key()?.ok_or_else(|| {
        anyhow!(
            "No API key configured. Set {} or run `vocab-importer key --set <KEY>`.",
            API_KEY_ENV
        )
    })
}

pub fn initialize_client(api_key: &str, api_base: &str) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(api_base);

    Client::with_config(config)
}

pub async fn test_configured_api_key(api_base: &str) -> Result<ApiKeySource> {
    let api_key = require_api_key()?;
    let client = initialize_client(&api_key.key, api_base);
    healthcheck_client(&client, api_base).await?;
    Ok(api_key.source)
}

async fn healthcheck_client(client: &Client<OpenAIConfig>, api_base: &str) -> Result<()> {
    client
        .models()
        .list()
        .await
        .with_context(|| format!("Failed to validate API key against {api_base}"))?;
    Ok(())
}
