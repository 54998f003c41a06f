//! Firestore REST implementation of [`DocumentStore`].

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::{json, Value};
use url::Url;

use super::value::to_firestore_fields;
use super::{generate_auto_id, DocumentStore, WriteBatch};
use crate::auth::TokenProvider;
use crate::config::{EMULATOR_BEARER_TOKEN, MAX_BATCH_WRITES};
use crate::error_handling::StoreError;

/// How requests to Firestore are authorized.
#[derive(Debug)]
pub enum Authorization {
    /// OAuth2 tokens minted from a service-account key
    ServiceAccount(TokenProvider),
    /// A pre-issued bearer token
    AccessToken(String),
    /// The local emulator, which accepts a fixed owner token
    Emulator,
}

/// Writes batches through the Firestore `documents:commit` endpoint.
///
/// Every staged set becomes an `update` write without an update mask, which
/// replaces the whole document. A commit applies all writes or none.
#[derive(Debug)]
pub struct FirestoreStore {
    client: Arc<reqwest::Client>,
    commit_url: Url,
    database_path: String,
    auth: Authorization,
}

impl FirestoreStore {
    /// Creates a store rooted at `base_url` (e.g. `https://firestore.googleapis.com`).
    pub fn new(
        client: Arc<reqwest::Client>,
        base_url: &str,
        project_id: &str,
        database: &str,
        auth: Authorization,
    ) -> Result<Self, url::ParseError> {
        let database_path = format!("projects/{project_id}/databases/{database}");
        let commit_url =
            Url::parse(base_url)?.join(&format!("v1/{database_path}/documents:commit"))?;

        Ok(FirestoreStore {
            client,
            commit_url,
            database_path,
            auth,
        })
    }

    /// Creates a store talking plain HTTP to an emulator at `host:port`.
    pub fn emulator(
        client: Arc<reqwest::Client>,
        host: &str,
        project_id: &str,
        database: &str,
    ) -> Result<Self, url::ParseError> {
        Self::new(
            client,
            &format!("http://{host}"),
            project_id,
            database,
            Authorization::Emulator,
        )
    }

    pub fn commit_url(&self) -> &Url {
        &self.commit_url
    }

    /// Full resource name of a document.
    pub fn document_name(&self, collection: &str, key: &str) -> String {
        format!("{}/documents/{}/{}", self.database_path, collection, key)
    }

    fn encode_batch(&self, batch: &WriteBatch) -> Value {
        let writes: Vec<Value> = batch
            .writes()
            .iter()
            .map(|op| {
                json!({
                    "update": {
                        "name": self.document_name(&op.collection, &op.key),
                        "fields": to_firestore_fields(&op.fields),
                    }
                })
            })
            .collect();
        json!({ "writes": writes })
    }

    async fn bearer_token(&self) -> Result<String, StoreError> {
        match &self.auth {
            Authorization::ServiceAccount(provider) => Ok(provider.access_token().await?),
            Authorization::AccessToken(token) => Ok(token.clone()),
            Authorization::Emulator => Ok(EMULATOR_BEARER_TOKEN.to_string()),
        }
    }
}

/// Pulls `error.message` out of a Google API error body, falling back to the raw text.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    fn generate_key(&self) -> String {
        generate_auto_id()
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.len() > MAX_BATCH_WRITES {
            return Err(StoreError::BatchTooLarge {
                len: batch.len(),
                max: MAX_BATCH_WRITES,
            });
        }

        let body = self.encode_batch(&batch);
        let token = self.bearer_token().await?;
        debug!("Committing {} writes to {}", batch.len(), self.commit_url);

        let response = self
            .client
            .post(self.commit_url.clone())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::CommitRejected {
                status: status.as_u16(),
                message: rejection_message(&text),
            });
        }

        Ok(())
    }
}
