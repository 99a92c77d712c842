// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message archive operations.
//!
//! Messages are written once at submission time and never updated.

use rusqlite::params;

use postbox_core::{Message, PostboxError};

use crate::database::Database;

/// Archive a filled message.
///
/// The form back-reference must be set; archiving an unresolved message is
/// an input error, not a storage error.
pub async fn insert_message(db: &Database, message: &Message) -> Result<(), PostboxError> {
    let form_id = message
        .form
        .as_ref()
        .map(|form| form.id.clone())
        .ok_or_else(|| {
            PostboxError::InvalidInput("cannot archive a message with an unresolved form".into())
        })?;

    let message = message.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (id, form_id, subject, body, from_name, from_email,
                                       from_phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    message.id,
                    form_id,
                    message.subject,
                    message.body,
                    message.from_name,
                    message.from_email,
                    message.from_phone,
                    message.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count archived messages for a form (admin/reporting helper).
pub async fn count_messages_for_form(db: &Database, form_id: &str) -> Result<i64, PostboxError> {
    let form_id = form_id.to_string();
    db.connection()
        .call(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE form_id = ?1",
                params![form_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Form;
    use crate::queries::forms::insert_form;
    use tempfile::tempdir;

    async fn setup_db_with_form() -> (Database, Form, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        let form = Form {
            id: "f1".to_string(),
            name: "Feedback".to_string(),
            identifier: "feedback".to_string(),
            to_name: "Site Owner".to_string(),
            to_email: "owner@example.com".to_string(),
            success_url: String::new(),
            failure_url: String::new(),
            max_body_length: 0,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        insert_form(&db, &form).await.unwrap();
        (db, form, dir)
    }

    fn make_message(id: &str, form: &Form) -> Message {
        let mut msg = Message::new(id, "2026-01-02T00:00:00.000Z");
        msg.subject = "Hello".to_string();
        msg.body = "A question about your site.".to_string();
        msg.from_name = "Visitor".to_string();
        msg.from_email = "visitor@example.com".to_string();
        msg.form = Some(form.clone());
        msg
    }

    #[tokio::test]
    async fn archive_and_count() {
        let (db, form, _dir) = setup_db_with_form().await;

        insert_message(&db, &make_message("m1", &form)).await.unwrap();
        insert_message(&db, &make_message("m2", &form)).await.unwrap();

        let count = count_messages_for_form(&db, "f1").await.unwrap();
        assert_eq!(count, 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn archive_without_form_is_rejected() {
        let (db, _form, _dir) = setup_db_with_form().await;

        let unresolved = Message::new("m1", "2026-01-02T00:00:00.000Z");
        let result = insert_message(&db, &unresolved).await;
        assert!(matches!(result, Err(PostboxError::InvalidInput(_))));

        let count = count_messages_for_form(&db, "f1").await.unwrap();
        assert_eq!(count, 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn deleting_form_cascades_to_messages() {
        let (db, form, _dir) = setup_db_with_form().await;

        insert_message(&db, &make_message("m1", &form)).await.unwrap();
        crate::queries::forms::delete_form(&db, "f1").await.unwrap();

        let count = count_messages_for_form(&db, "f1").await.unwrap();
        assert_eq!(count, 0);

        db.close().await.unwrap();
    }
}
