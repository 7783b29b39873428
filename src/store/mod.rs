// ABOUTME: Merge-write document store abstraction and document paths
// ABOUTME: DocumentStore trait with Firestore REST and in-memory implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Document Store
//!
//! Daily health logs are upserted into `users/{user}/health_logs/{YYYY-MM-DD}` with
//! merge semantics: top-level fields present in the write replace the stored values,
//! other stored fields are left untouched, and the document is created if absent. The
//! store assigns the server timestamp field itself.

/// Firestore REST implementation
pub mod firestore;
/// In-memory implementation for tests and dry runs
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::InMemoryDocumentStore;

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::constants::health_log::{HEALTH_LOGS_COLLECTION, USERS_COLLECTION};
use crate::errors::{AppError, AppResult};

/// Slash-separated path of a document: alternating collection and document ids
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Path from its segments
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless there is an even, non-zero number of non-empty
    /// segments without slashes.
    pub fn new<I, S>(segments: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.len() % 2 != 0 {
            return Err(AppError::invalid_input(format!(
                "document path needs collection/document pairs, got {} segments",
                segments.len()
            )));
        }
        if let Some(bad) = segments.iter().find(|s| s.is_empty() || s.contains('/')) {
            return Err(AppError::invalid_input(format!(
                "invalid document path segment '{bad}'"
            )));
        }
        Ok(Self { segments })
    }

    /// `users/{user_id}/health_logs/{YYYY-MM-DD}`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `user_id` is empty or contains a slash.
    pub fn health_log(user_id: &str, date: NaiveDate) -> AppResult<Self> {
        Self::new([
            USERS_COLLECTION.to_owned(),
            user_id.to_owned(),
            HEALTH_LOGS_COLLECTION.to_owned(),
            date.format("%Y-%m-%d").to_string(),
        ])
    }

    /// Path segments
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment (the document id)
    #[must_use]
    pub fn document_id(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Remote document database accepting merge-writes
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store name for logs
    fn name(&self) -> &'static str;

    /// Merge `fields` into the document at `path`, creating it if absent
    ///
    /// When `server_timestamp_field` is given, that field is set to the store's
    /// write time.
    async fn merge(
        &self,
        path: &DocumentPath,
        fields: Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> AppResult<()>;
}
