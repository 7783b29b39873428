// ABOUTME: In-memory document store with merge-write semantics
// ABOUTME: Backs tests and dry-run syncs without a network connection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Map, Value};
use tracing::debug;

use super::{DocumentPath, DocumentStore};
use crate::errors::AppResult;

/// Document store held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<DashMap<String, Map<String, Value>>>,
    writes: Arc<AtomicU64>,
}

impl InMemoryDocumentStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the document at `path`
    #[must_use]
    pub fn get(&self, path: &DocumentPath) -> Option<Map<String, Value>> {
        self.documents
            .get(&path.to_string())
            .map(|entry| entry.value().clone())
    }

    /// Number of stored documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no document is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of merge-writes performed
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn merge(
        &self,
        path: &DocumentPath,
        fields: Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> AppResult<()> {
        let mut document = self.documents.entry(path.to_string()).or_default();
        let field_count = fields.len();
        document.extend(fields);
        if let Some(field) = server_timestamp_field {
            document.insert(field.to_owned(), Value::String(Utc::now().to_rfc3339()));
        }
        drop(document);

        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(%path, fields = field_count, "Merged document in memory");
        Ok(())
    }
}
