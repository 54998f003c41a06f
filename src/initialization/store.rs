//! Document store initialization.

use std::sync::Arc;

use log::info;

use crate::auth::{load_service_account, TokenProvider};
use crate::config::{Config, FIRESTORE_BASE_URL};
use crate::error_handling::{ConfigError, InitializationError};
use crate::store::{Authorization, FirestoreStore};

/// Builds the Firestore store described by `config`.
///
/// With an emulator host, no token is minted. With a pre-issued access token,
/// that token is sent as-is. In both cases the project id comes from
/// `--project-id` or, failing that, from the credential file if one exists.
/// Otherwise the credential file is required and is loaded exactly once.
pub async fn init_store(
    config: &Config,
    client: Arc<reqwest::Client>,
) -> Result<FirestoreStore, InitializationError> {
    if let Some(host) = &config.emulator_host {
        let project_id = resolve_project_id(config).await?;
        info!("Using Firestore emulator at {host} (project {project_id})");
        return Ok(FirestoreStore::emulator(
            client,
            host,
            &project_id,
            &config.database,
        )?);
    }

    if let Some(token) = &config.access_token {
        let project_id = resolve_project_id(config).await?;
        info!("Using pre-issued access token (project {project_id})");
        return Ok(FirestoreStore::new(
            client,
            FIRESTORE_BASE_URL,
            &project_id,
            &config.database,
            Authorization::AccessToken(token.clone()),
        )?);
    }

    info!("Authenticating with {}...", config.credentials.display());
    let key = load_service_account(&config.credentials).await?;
    let project_id = config
        .project_id
        .clone()
        .unwrap_or_else(|| key.project_id.clone());
    let provider = TokenProvider::new(key, Arc::clone(&client));

    Ok(FirestoreStore::new(
        client,
        FIRESTORE_BASE_URL,
        &project_id,
        &config.database,
        Authorization::ServiceAccount(provider),
    )?)
}

/// Project id for modes that do not need the credential file to sign tokens.
async fn resolve_project_id(config: &Config) -> Result<String, ConfigError> {
    match &config.project_id {
        Some(project_id) => Ok(project_id.clone()),
        None => load_service_account(&config.credentials)
            .await
            .map(|key| key.project_id)
            .map_err(|_| ConfigError::MissingProjectId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportTask;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            credentials: PathBuf::from("/nonexistent/serviceAccountKey.json"),
            tasks: vec![ImportTask::new("users.json", "users", false)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_is_fatal() {
        let result = init_store(&config(), Arc::new(reqwest::Client::new())).await;
        assert!(matches!(
            result,
            Err(InitializationError::CredentialError(_))
        ));
    }

    #[tokio::test]
    async fn test_emulator_with_project_id_needs_no_credentials() {
        let config = Config {
            emulator_host: Some("localhost:8080".to_string()),
            project_id: Some("demo".to_string()),
            ..config()
        };
        let store = init_store(&config, Arc::new(reqwest::Client::new()))
            .await
            .unwrap();
        assert_eq!(
            store.commit_url().as_str(),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents:commit"
        );
    }

    #[tokio::test]
    async fn test_emulator_without_project_id() {
        let config = Config {
            emulator_host: Some("localhost:8080".to_string()),
            ..config()
        };
        let result = init_store(&config, Arc::new(reqwest::Client::new())).await;
        assert!(matches!(
            result,
            Err(InitializationError::ConfigError(ConfigError::MissingProjectId))
        ));
    }

    #[tokio::test]
    async fn test_access_token_with_project_id_needs_no_credentials() {
        let config = Config {
            access_token: Some("ya29.pre-issued".to_string()),
            project_id: Some("demo".to_string()),
            ..config()
        };
        let store = init_store(&config, Arc::new(reqwest::Client::new()))
            .await
            .unwrap();
        assert_eq!(
            store.commit_url().as_str(),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents:commit"
        );
    }

    #[tokio::test]
    async fn test_access_token_without_project_id() {
        let config = Config {
            access_token: Some("ya29.pre-issued".to_string()),
            ..config()
        };
        let result = init_store(&config, Arc::new(reqwest::Client::new())).await;
        assert!(matches!(
            result,
            Err(InitializationError::ConfigError(ConfigError::MissingProjectId))
        ));
    }
}
