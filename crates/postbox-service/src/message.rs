// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message execute service: form resolution, submission validation, entity
//! fill, and delivery delegation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use postbox_core::{Entity, Form, FormRepo, MailSender, Message, PostboxError};

use crate::validation::SubmissionValidator;

/// Result of filling a message entity.
///
/// A fill only succeeds against a resolved form; `Unresolved` hands the
/// entity back untouched so the caller can refuse delivery explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// Form resolved; the message is populated and carries the back-reference.
    Filled(Message),
    /// The referenced form does not exist; the message is unchanged.
    Unresolved(Message),
}

impl FillOutcome {
    /// The message, whether or not the fill resolved.
    pub fn into_message(self) -> Message {
        match self {
            FillOutcome::Filled(message) | FillOutcome::Unresolved(message) => message,
        }
    }
}

/// Execute service for contact-message submissions.
///
/// Holds a single-slot memo of the most recently resolved form, keyed by
/// identifier, so the validate-then-fill sequence of one submission costs
/// one repository lookup.
pub struct MessageService {
    repo: Arc<dyn FormRepo>,
    sender: Arc<dyn MailSender>,
    current_form: Option<Form>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn FormRepo>, sender: Arc<dyn MailSender>) -> Self {
        Self {
            repo,
            sender,
            current_form: None,
        }
    }

    /// Create an empty message entity stamped with the current time.
    pub fn new_message() -> Message {
        Message::new(
            uuid::Uuid::new_v4().to_string(),
            chrono::Utc::now().to_rfc3339(),
        )
    }

    /// Resolve a form reference to its definition.
    ///
    /// Resolution order: the memoized form (by identifier equality), then
    /// lookup by identifier, then lookup by id with the same string. A miss
    /// everywhere is `Ok(None)`, a soft miss, never an error. Lookup
    /// errors degrade to the next step and are logged.
    pub async fn form(&mut self, identifier: &str) -> Result<Option<Form>, PostboxError> {
        if let Some(form) = &self.current_form
            && form.identifier == identifier
        {
            return Ok(Some(form.clone()));
        }

        match self.repo.find_by_identifier(identifier).await {
            Ok(Some(form)) => {
                self.current_form = Some(form.clone());
                return Ok(Some(form));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(identifier, error = %e, "form lookup by identifier failed");
            }
        }

        match self.repo.find_by_id(identifier).await {
            Ok(Some(form)) => {
                self.current_form = Some(form.clone());
                Ok(Some(form))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(identifier, error = %e, "form lookup by id failed");
                Ok(None)
            }
        }
    }

    /// Validate raw submitted fields against the referenced form's rules.
    ///
    /// Returns field -> error message (empty = valid). An unresolved form
    /// is a hard failure here, unlike the soft miss in [`Self::form`].
    pub async fn validate(
        &mut self,
        form_identifier: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, PostboxError> {
        let form = self.form(form_identifier).await?.ok_or_else(|| {
            PostboxError::InvalidInput(format!("unknown form `{form_identifier}`"))
        })?;

        let validator = SubmissionValidator::new().with_max_body_length(form.max_body_length);
        Ok(validator.validate(fields))
    }

    /// Populate a message entity from validated fields and the resolved form.
    ///
    /// The entity must be a message; anything else is a hard failure. When
    /// the form does not resolve the entity is handed back untouched as
    /// [`FillOutcome::Unresolved`] and the back-reference stays unset.
    pub async fn fill_entity(
        &mut self,
        form_identifier: &str,
        entity: Entity,
        fields: &BTreeMap<String, String>,
    ) -> Result<FillOutcome, PostboxError> {
        let mut message = match entity {
            Entity::Message(message) => message,
            other => {
                return Err(PostboxError::InvalidInput(format!(
                    "message entity expected, got {}",
                    other.kind()
                )));
            }
        };

        let Some(form) = self.form(form_identifier).await? else {
            return Ok(FillOutcome::Unresolved(message));
        };

        let get = |field: &str| fields.get(field).map(|v| v.trim().to_string()).unwrap_or_default();

        message.subject = get("subject");
        message.body = get("body");
        message.from_name = get("from_name");
        message.from_email = get("from_email");
        message.from_phone = get("from_phone");
        message.form = Some(form);

        Ok(FillOutcome::Filled(message))
    }

    /// Deliver a filled message.
    ///
    /// Returns the number of recipients notified, straight from the sender.
    pub async fn send(&self, message: &Message) -> Result<usize, PostboxError> {
        self.sender.send(message).await
    }

    /// Recipient -> failure reason for the last delivery attempt.
    pub async fn failed_recipients(&self) -> BTreeMap<String, String> {
        self.sender.failed_recipients().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postbox_test_utils::{MemoryFormRepo, RecordingSender, sample_form};

    fn service_with(
        repo: MemoryFormRepo,
        sender: RecordingSender,
    ) -> (MessageService, Arc<MemoryFormRepo>, Arc<RecordingSender>) {
        let repo = Arc::new(repo);
        let sender = Arc::new(sender);
        let service = MessageService::new(repo.clone(), sender.clone());
        (service, repo, sender)
    }

    fn submission_fields() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("subject".to_string(), "bar".to_string()),
            ("body".to_string(), "baz".to_string()),
            ("from_name".to_string(), "Qux".to_string()),
            ("from_email".to_string(), "qux@example.com".to_string()),
            ("from_phone".to_string(), "32 234 4567".to_string()),
        ])
    }

    #[tokio::test]
    async fn form_resolves_by_identifier_by_default() {
        let (mut service, repo, _) = service_with(
            MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]),
            RecordingSender::new(),
        );

        let form = service.form("feedback").await.unwrap();
        assert_eq!(form.as_ref().map(|f| f.id.as_str()), Some("f1"));
        assert_eq!(repo.identifier_lookups(), 1);
        assert_eq!(repo.id_lookups(), 0);
    }

    #[tokio::test]
    async fn form_is_memoized_the_second_time() {
        let (mut service, repo, _) = service_with(
            MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]),
            RecordingSender::new(),
        );

        let first = service.form("feedback").await.unwrap();
        let second = service.form("feedback").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.identifier_lookups(), 1, "memo must skip the repo");
        assert_eq!(repo.id_lookups(), 0);
    }

    #[tokio::test]
    async fn memo_is_keyed_by_identifier() {
        let (mut service, repo, _) = service_with(
            MemoryFormRepo::with_forms(vec![
                sample_form("f1", "feedback"),
                sample_form("f2", "support"),
            ]),
            RecordingSender::new(),
        );

        service.form("feedback").await.unwrap();
        let other = service.form("support").await.unwrap();

        assert_eq!(other.map(|f| f.id), Some("f2".to_string()));
        assert_eq!(repo.identifier_lookups(), 2);
    }

    #[tokio::test]
    async fn form_falls_back_to_id_lookup() {
        let (mut service, repo, _) = service_with(
            MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]),
            RecordingSender::new(),
        );

        // "f1" is not an identifier, so the by-identifier lookup misses.
        let form = service.form("f1").await.unwrap();
        assert!(form.is_some());
        assert_eq!(repo.identifier_lookups(), 1);
        assert_eq!(repo.id_lookups(), 1);
    }

    #[tokio::test]
    async fn form_falls_back_to_id_lookup_on_lookup_error() {
        let repo = MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]);
        repo.fail_identifier_lookups();
        let (mut service, repo, _) = service_with(repo, RecordingSender::new());

        let form = service.form("f1").await.unwrap();
        assert!(form.is_some());
        assert_eq!(repo.id_lookups(), 1);
    }

    #[tokio::test]
    async fn form_double_miss_is_a_soft_none() {
        let repo = MemoryFormRepo::new();
        repo.fail_identifier_lookups();
        repo.fail_id_lookups();
        let (mut service, _, _) = service_with(repo, RecordingSender::new());

        let form = service.form("ghost").await.unwrap();
        assert!(form.is_none());
    }

    #[tokio::test]
    async fn validate_hard_fails_on_unknown_form() {
        let (mut service, _, _) =
            service_with(MemoryFormRepo::new(), RecordingSender::new());

        let result = service.validate("ghost", &submission_fields()).await;
        assert!(matches!(result, Err(PostboxError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn validate_returns_empty_map_when_valid() {
        let (mut service, _, _) = service_with(
            MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]),
            RecordingSender::new(),
        );

        let errors = service.validate("feedback", &submission_fields()).await.unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn validate_applies_the_forms_body_limit() {
        let mut form = sample_form("f1", "feedback");
        form.max_body_length = 2;
        let (mut service, _, _) = service_with(
            MemoryFormRepo::with_forms(vec![form]),
            RecordingSender::new(),
        );

        let errors = service.validate("feedback", &submission_fields()).await.unwrap();
        assert!(errors.contains_key("body"));
    }

    #[tokio::test]
    async fn fill_entity_rejects_wrong_entity_kind() {
        let (mut service, _, _) = service_with(
            MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]),
            RecordingSender::new(),
        );

        let entity = Entity::Form(sample_form("f9", "other"));
        let result = service
            .fill_entity("feedback", entity, &submission_fields())
            .await;
        assert!(matches!(result, Err(PostboxError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn fill_entity_leaves_entity_untouched_on_unresolved_form() {
        let (mut service, _, _) =
            service_with(MemoryFormRepo::new(), RecordingSender::new());

        let message = MessageService::new_message();
        let original = message.clone();
        let outcome = service
            .fill_entity("ghost", Entity::Message(message), &submission_fields())
            .await
            .unwrap();

        match outcome {
            FillOutcome::Unresolved(message) => {
                assert_eq!(message, original);
                assert!(message.form.is_none());
            }
            FillOutcome::Filled(_) => panic!("fill must not resolve a missing form"),
        }
    }

    #[tokio::test]
    async fn fill_entity_sets_all_fields_and_back_reference() {
        let (mut service, _, _) = service_with(
            MemoryFormRepo::with_forms(vec![sample_form("f1", "feedback")]),
            RecordingSender::new(),
        );

        let outcome = service
            .fill_entity(
                "feedback",
                Entity::Message(MessageService::new_message()),
                &submission_fields(),
            )
            .await
            .unwrap();

        let FillOutcome::Filled(message) = outcome else {
            panic!("expected a filled message");
        };
        assert_eq!(message.subject, "bar");
        assert_eq!(message.body, "baz");
        assert_eq!(message.from_name, "Qux");
        assert_eq!(message.from_email, "qux@example.com");
        assert_eq!(message.from_phone, "32 234 4567");
        assert_eq!(
            message.form.as_ref().map(|f| f.identifier.as_str()),
            Some("feedback")
        );
    }

    #[tokio::test]
    async fn send_passes_through_the_senders_count() {
        let (service, _, sender) = service_with(
            MemoryFormRepo::new(),
            RecordingSender::with_count(13),
        );

        let message = MessageService::new_message();
        assert_eq!(service.send(&message).await.unwrap(), 13);
        assert_eq!(sender.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_recipients_passes_through_the_senders_map() {
        let failed = BTreeMap::from([("foo".to_string(), "bar".to_string())]);
        let (service, _, _) = service_with(
            MemoryFormRepo::new(),
            RecordingSender::with_failed(0, failed.clone()),
        );

        assert_eq!(service.failed_recipients().await, failed);
    }
}
