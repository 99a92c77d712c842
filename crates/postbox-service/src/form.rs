// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form execute service: entity fill with slug derivation, and CRUD over
//! the form repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use postbox_core::{Entity, Form, FormRepo, PostboxError};

use crate::slug::slugify;
use crate::validation::validate_form_fields;

/// Execute service for form definitions.
pub struct FormService {
    repo: Arc<dyn FormRepo>,
}

impl FormService {
    pub fn new(repo: Arc<dyn FormRepo>) -> Self {
        Self { repo }
    }

    /// Create an empty form entity stamped with the current time.
    pub fn new_form() -> Form {
        let now = chrono::Utc::now().to_rfc3339();
        Form {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            identifier: String::new(),
            to_name: String::new(),
            to_email: String::new(),
            success_url: String::new(),
            failure_url: String::new(),
            max_body_length: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Validate raw form-definition fields.
    ///
    /// Returns field -> error message; an empty map means valid.
    pub fn validate(&self, fields: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        validate_form_fields(fields)
    }

    /// Populate a form entity from raw fields.
    ///
    /// A blank identifier is derived by slugifying the name. The entity must
    /// be a form; anything else is a hard failure.
    pub fn fill_entity(
        &self,
        entity: Entity,
        fields: &BTreeMap<String, String>,
    ) -> Result<Form, PostboxError> {
        let mut form = match entity {
            Entity::Form(form) => form,
            other => {
                return Err(PostboxError::InvalidInput(format!(
                    "form entity expected, got {}",
                    other.kind()
                )));
            }
        };

        let get = |field: &str| fields.get(field).map(|v| v.trim().to_string()).unwrap_or_default();

        form.name = get("name");
        form.identifier = get("identifier");
        form.to_name = get("to_name");
        form.to_email = get("to_email");
        form.success_url = get("success_url");
        form.failure_url = get("failure_url");
        form.max_body_length = fields
            .get("max_body_length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);

        if form.identifier.is_empty() {
            form.identifier = slugify(&form.name);
        }

        Ok(form)
    }

    /// Create and persist a new form from raw fields.
    pub async fn create(&self, fields: &BTreeMap<String, String>) -> Result<Form, PostboxError> {
        let form = self.fill_entity(Entity::Form(Self::new_form()), fields)?;
        self.repo.insert(&form).await?;
        Ok(form)
    }

    /// Update an existing form from raw fields.
    ///
    /// Returns `Ok(None)` when the id is unknown.
    pub async fn update(
        &self,
        id: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<Option<Form>, PostboxError> {
        let Some(existing) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut form = self.fill_entity(Entity::Form(existing), fields)?;
        form.updated_at = chrono::Utc::now().to_rfc3339();
        self.repo.update(&form).await?;
        Ok(Some(form))
    }

    /// Fetch a form by id.
    pub async fn get(&self, id: &str) -> Result<Option<Form>, PostboxError> {
        self.repo.find_by_id(id).await
    }

    /// List all forms.
    pub async fn list(&self) -> Result<Vec<Form>, PostboxError> {
        self.repo.list().await
    }

    /// Delete a form by id.
    pub async fn delete(&self, id: &str) -> Result<(), PostboxError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postbox_core::Message;
    use postbox_test_utils::{MemoryFormRepo, sample_form};

    fn form_fields() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("name".to_string(), "My Form!".to_string()),
            ("to_name".to_string(), "Site Owner".to_string()),
            ("to_email".to_string(), "owner@example.com".to_string()),
            ("success_url".to_string(), "/thanks".to_string()),
            ("failure_url".to_string(), "/sorry".to_string()),
            ("max_body_length".to_string(), "2000".to_string()),
        ])
    }

    fn service() -> FormService {
        FormService::new(Arc::new(MemoryFormRepo::new()))
    }

    #[test]
    fn fill_entity_copies_all_fields() {
        let mut fields = form_fields();
        fields.insert("identifier".to_string(), "custom-slug".to_string());

        let form = service()
            .fill_entity(Entity::Form(FormService::new_form()), &fields)
            .unwrap();
        assert_eq!(form.name, "My Form!");
        assert_eq!(form.identifier, "custom-slug");
        assert_eq!(form.to_name, "Site Owner");
        assert_eq!(form.to_email, "owner@example.com");
        assert_eq!(form.success_url, "/thanks");
        assert_eq!(form.failure_url, "/sorry");
        assert_eq!(form.max_body_length, 2000);
    }

    #[test]
    fn blank_identifier_is_slugified_from_name() {
        let form = service()
            .fill_entity(Entity::Form(FormService::new_form()), &form_fields())
            .unwrap();
        assert_eq!(form.identifier, "my-form");
    }

    #[test]
    fn fill_entity_rejects_wrong_entity_kind() {
        let entity = Entity::Message(Message::new("m1", "2026-01-01T00:00:00.000Z"));
        let result = service().fill_entity(entity, &form_fields());
        assert!(matches!(result, Err(PostboxError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn create_persists_the_filled_form() {
        let repo = Arc::new(MemoryFormRepo::new());
        let service = FormService::new(repo.clone());

        let form = service.create(&form_fields()).await.unwrap();
        assert_eq!(form.identifier, "my-form");

        let found = repo.find_by_identifier("my-form").await.unwrap();
        assert_eq!(found.map(|f| f.id), Some(form.id));
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let updated = service().update("ghost", &form_fields()).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn update_rewrites_fields_and_bumps_updated_at() {
        let repo = Arc::new(MemoryFormRepo::with_forms(vec![sample_form(
            "f1", "feedback",
        )]));
        let service = FormService::new(repo.clone());

        let mut fields = form_fields();
        fields.insert("identifier".to_string(), "feedback".to_string());
        fields.insert("to_email".to_string(), "new-owner@example.com".to_string());

        let updated = service.update("f1", &fields).await.unwrap().unwrap();
        assert_eq!(updated.to_email, "new-owner@example.com");
        assert_ne!(updated.updated_at, updated.created_at);

        let stored = repo.find_by_id("f1").await.unwrap().unwrap();
        assert_eq!(stored.to_email, "new-owner@example.com");
    }

    #[tokio::test]
    async fn delete_then_get_is_none() {
        let repo = Arc::new(MemoryFormRepo::with_forms(vec![sample_form(
            "f1", "feedback",
        )]));
        let service = FormService::new(repo);

        service.delete("f1").await.unwrap();
        assert!(service.get("f1").await.unwrap().is_none());
    }
}
