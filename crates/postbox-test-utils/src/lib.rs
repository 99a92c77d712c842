// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic in-memory mocks for Postbox tests.
//!
//! `MemoryFormRepo` implements `FormRepo` over a `Vec`, with switchable
//! lookup failures and call counters so tests can assert cache behavior.
//! `RecordingSender` implements `MailSender` with pre-configured results.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use postbox_core::{Form, FormRepo, MailSender, Message, MessageStore, PostboxError};

/// In-memory `FormRepo` with lookup counters and failure switches.
#[derive(Default)]
pub struct MemoryFormRepo {
    forms: Mutex<Vec<Form>>,
    identifier_lookups: AtomicUsize,
    id_lookups: AtomicUsize,
    fail_identifier_lookups: AtomicBool,
    fail_id_lookups: AtomicBool,
}

impl MemoryFormRepo {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with the given forms.
    pub fn with_forms(forms: Vec<Form>) -> Self {
        Self {
            forms: Mutex::new(forms),
            ..Self::default()
        }
    }

    /// Make every `find_by_identifier` call fail with a storage error.
    pub fn fail_identifier_lookups(&self) {
        self.fail_identifier_lookups.store(true, Ordering::SeqCst);
    }

    /// Make every `find_by_id` call fail with a storage error.
    pub fn fail_id_lookups(&self) {
        self.fail_id_lookups.store(true, Ordering::SeqCst);
    }

    /// Number of `find_by_identifier` calls seen so far.
    pub fn identifier_lookups(&self) -> usize {
        self.identifier_lookups.load(Ordering::SeqCst)
    }

    /// Number of `find_by_id` calls seen so far.
    pub fn id_lookups(&self) -> usize {
        self.id_lookups.load(Ordering::SeqCst)
    }

    fn storage_error(what: &str) -> PostboxError {
        PostboxError::Storage {
            source: Box::new(std::io::Error::other(format!("{what} lookup failed"))),
        }
    }
}

#[async_trait]
impl FormRepo for MemoryFormRepo {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Form>, PostboxError> {
        self.identifier_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_identifier_lookups.load(Ordering::SeqCst) {
            return Err(Self::storage_error("identifier"));
        }
        let forms = self.forms.lock().await;
        Ok(forms.iter().find(|f| f.identifier == identifier).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Form>, PostboxError> {
        self.id_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_id_lookups.load(Ordering::SeqCst) {
            return Err(Self::storage_error("id"));
        }
        let forms = self.forms.lock().await;
        Ok(forms.iter().find(|f| f.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Form>, PostboxError> {
        let mut forms = self.forms.lock().await.clone();
        forms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(forms)
    }

    async fn insert(&self, form: &Form) -> Result<(), PostboxError> {
        let mut forms = self.forms.lock().await;
        if forms.iter().any(|f| f.identifier == form.identifier) {
            return Err(PostboxError::InvalidInput(format!(
                "identifier `{}` already taken",
                form.identifier
            )));
        }
        forms.push(form.clone());
        Ok(())
    }

    async fn update(&self, form: &Form) -> Result<(), PostboxError> {
        let mut forms = self.forms.lock().await;
        if let Some(existing) = forms.iter_mut().find(|f| f.id == form.id) {
            *existing = form.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), PostboxError> {
        let mut forms = self.forms.lock().await;
        forms.retain(|f| f.id != id);
        Ok(())
    }
}

/// `MailSender` mock returning pre-configured results and recording sends.
pub struct RecordingSender {
    count: usize,
    failed: BTreeMap<String, String>,
    sent: Mutex<Vec<Message>>,
}

impl RecordingSender {
    /// A sender that reports one notified recipient per send.
    pub fn new() -> Self {
        Self::with_count(1)
    }

    /// A sender that reports `count` notified recipients per send.
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            failed: BTreeMap::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A sender that additionally reports the given failure map.
    pub fn with_failed(count: usize, failed: BTreeMap<String, String>) -> Self {
        Self {
            count,
            failed,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages passed to `send` so far, in order.
    pub async fn sent(&self) -> Vec<Message> {
        self.sent.lock().await.clone()
    }
}

impl Default for RecordingSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailSender for RecordingSender {
    async fn send(&self, message: &Message) -> Result<usize, PostboxError> {
        self.sent.lock().await.push(message.clone());
        Ok(self.count)
    }

    async fn failed_recipients(&self) -> BTreeMap<String, String> {
        self.failed.clone()
    }
}

/// `MessageStore` mock keeping archived messages in memory.
#[derive(Default)]
pub struct MemoryMessageStore {
    archived: Mutex<Vec<Message>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages archived so far, in order.
    pub async fn archived(&self) -> Vec<Message> {
        self.archived.lock().await.clone()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn archive(&self, message: &Message) -> Result<(), PostboxError> {
        self.archived.lock().await.push(message.clone());
        Ok(())
    }
}

/// A ready-made form definition for tests.
pub fn sample_form(id: &str, identifier: &str) -> Form {
    Form {
        id: id.to_string(),
        name: "Feedback".to_string(),
        identifier: identifier.to_string(),
        to_name: "Site Owner".to_string(),
        to_email: "owner@example.com".to_string(),
        success_url: "/thanks".to_string(),
        failure_url: "/sorry".to_string(),
        max_body_length: 128,
        created_at: "2026-01-01T00:00:00.000Z".to_string(),
        updated_at: "2026-01-01T00:00:00.000Z".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_repo_counts_lookups() {
        let repo = MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]);

        assert!(repo.find_by_identifier("feedback").await.unwrap().is_some());
        assert!(repo.find_by_id("f1").await.unwrap().is_some());
        assert_eq!(repo.identifier_lookups(), 1);
        assert_eq!(repo.id_lookups(), 1);
    }

    #[tokio::test]
    async fn memory_repo_failure_switches() {
        let repo = MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]);
        repo.fail_identifier_lookups();

        assert!(repo.find_by_identifier("feedback").await.is_err());
        assert!(repo.find_by_id("f1").await.is_ok());
    }

    #[tokio::test]
    async fn recording_sender_passes_through_configured_results() {
        let mut failed = BTreeMap::new();
        failed.insert("foo".to_string(), "bar".to_string());
        let sender = RecordingSender::with_failed(13, failed.clone());

        let message = Message::new("m1", "2026-01-01T00:00:00.000Z");
        assert_eq!(sender.send(&message).await.unwrap(), 13);
        assert_eq!(sender.failed_recipients().await, failed);
        assert_eq!(sender.sent().await.len(), 1);
    }
}
