// ABOUTME: Firestore REST document store using documents:commit merge-writes
// ABOUTME: Encodes JSON into Firestore typed values and sets server timestamps via transforms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Firestore REST Store
//!
//! A merge-write is one `update` write of a `documents:commit` request:
//!
//! ```json
//! {
//!   "writes": [{
//!     "update": { "name": "projects/p/databases/d/documents/users/u/health_logs/2025-06-02",
//!                 "fields": { "exercise_data": { "arrayValue": { "values": [] } } } },
//!     "updateMask": { "fieldPaths": ["exercise_data"] },
//!     "updateTransforms": [{ "fieldPath": "timestamp", "setToServerValue": "REQUEST_TIME" }]
//!   }]
//! }
//! ```
//!
//! The update mask limits the write to the listed top-level fields, which gives merge
//! semantics; without a precondition the document is created when absent.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};
use url::Url;

use super::{DocumentPath, DocumentStore};
use crate::config::FirestoreConfig;
use crate::constants::{env_config, service_names::DOCUMENT_STORE};
use crate::errors::{AppError, AppResult};

/// Document store backed by the Firestore REST API
#[derive(Clone)]
pub struct FirestoreStore {
    client: Client,
    base_url: Url,
    project_id: String,
    database: String,
    token: Option<String>,
}

impl std::fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("base_url", &self.base_url.as_str())
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl FirestoreStore {
    /// Store for a project and database
    pub fn new(
        client: Client,
        base_url: Url,
        project_id: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            project_id: project_id.into(),
            database: database.into(),
            token: None,
        }
    }

    /// Authenticate requests with an OAuth bearer token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Store configured from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no project id is configured.
    pub fn from_config(config: &FirestoreConfig, client: Client) -> AppResult<Self> {
        let store = Self::new(
            client,
            config.base_url.clone(),
            config.require_project_id()?,
            config.database.clone(),
        );
        Ok(match &config.token {
            Some(token) => store.with_token(token.clone()),
            None => store,
        })
    }

    fn database_root(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.database)
    }

    /// Fully qualified resource name of a document
    #[must_use]
    pub fn document_name(&self, path: &DocumentPath) -> String {
        format!("{}/documents/{path}", self.database_root())
    }

    /// URL of the `documents:commit` endpoint
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the base URL cannot be extended.
    pub fn commit_url(&self) -> AppResult<Url> {
        let raw = format!(
            "{}/{}/documents:commit",
            self.base_url.as_str().trim_end_matches('/'),
            self.database_root()
        );
        Url::parse(&raw).map_err(|e| AppError::config_invalid(env_config::FIRESTORE_BASE_URL, e))
    }

    /// Body of the commit request for one merge-write
    #[must_use]
    pub fn commit_body(
        &self,
        path: &DocumentPath,
        fields: &Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> Value {
        let encoded: Map<String, Value> = fields
            .iter()
            .map(|(name, value)| (name.clone(), encode_value(value)))
            .collect();
        let field_paths: Vec<String> = fields.keys().map(|name| quote_field_path(name)).collect();

        let mut write = json!({
            "update": {
                "name": self.document_name(path),
                "fields": encoded,
            },
            "updateMask": { "fieldPaths": field_paths },
        });
        if let Some(field) = server_timestamp_field {
            write["updateTransforms"] = json!([{
                "fieldPath": quote_field_path(field),
                "setToServerValue": "REQUEST_TIME",
            }]);
        }

        json!({ "writes": [write] })
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    fn name(&self) -> &'static str {
        "firestore"
    }

    #[instrument(skip(self, fields), fields(store.path = %path))]
    async fn merge(
        &self,
        path: &DocumentPath,
        fields: Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> AppResult<()> {
        let body = self.commit_body(path, &fields, server_timestamp_field);
        let mut request = self.client.post(self.commit_url()?).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::external_unavailable(DOCUMENT_STORE, format!("commit failed: {e}"))
                .with_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                DOCUMENT_STORE,
                format!("HTTP {status}: {detail}"),
            ));
        }

        debug!(%status, fields = fields.len(), "Firestore commit accepted");
        Ok(())
    }
}

/// Encode a JSON value as a Firestore typed value
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                json!({ "integerValue": int.to_string() })
            } else {
                // u64 above i64::MAX and fractional numbers
                json!({ "doubleValue": number.as_f64().unwrap_or_default() })
            }
        }
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(name, inner)| (name.clone(), encode_value(inner)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Field path segment, backtick-quoted unless it is a simple identifier
fn quote_field_path(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_owned()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}
