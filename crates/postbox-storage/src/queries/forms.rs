// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form definition CRUD operations.

use rusqlite::{Row, params};

use postbox_core::PostboxError;

use crate::database::Database;
use crate::models::Form;

const FORM_COLUMNS: &str = "id, name, identifier, to_name, to_email, success_url, failure_url,
     max_body_length, created_at, updated_at";

fn row_to_form(row: &Row<'_>) -> Result<Form, rusqlite::Error> {
    Ok(Form {
        id: row.get(0)?,
        name: row.get(1)?,
        identifier: row.get(2)?,
        to_name: row.get(3)?,
        to_email: row.get(4)?,
        success_url: row.get(5)?,
        failure_url: row.get(6)?,
        max_body_length: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Insert a new form definition.
pub async fn insert_form(db: &Database, form: &Form) -> Result<(), PostboxError> {
    let form = form.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO forms (id, name, identifier, to_name, to_email, success_url,
                                    failure_url, max_body_length, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    form.id,
                    form.name,
                    form.identifier,
                    form.to_name,
                    form.to_email,
                    form.success_url,
                    form.failure_url,
                    form.max_body_length,
                    form.created_at,
                    form.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a form by its identifier slug.
pub async fn get_form_by_identifier(
    db: &Database,
    identifier: &str,
) -> Result<Option<Form>, PostboxError> {
    let identifier = identifier.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {FORM_COLUMNS} FROM forms WHERE identifier = ?1"
            ))?;
            let result = stmt.query_row(params![identifier], |row| row_to_form(row));
            match result {
                Ok(form) => Ok(Some(form)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a form by its opaque id.
pub async fn get_form_by_id(db: &Database, id: &str) -> Result<Option<Form>, PostboxError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {FORM_COLUMNS} FROM forms WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], |row| row_to_form(row));
            match result {
                Ok(form) => Ok(Some(form)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all forms ordered by display name.
pub async fn list_forms(db: &Database) -> Result<Vec<Form>, PostboxError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {FORM_COLUMNS} FROM forms ORDER BY name ASC"))?;
            let rows = stmt.query_map([], |row| row_to_form(row))?;
            let mut forms = Vec::new();
            for row in rows {
                forms.push(row?);
            }
            Ok(forms)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Update an existing form by id.
pub async fn update_form(db: &Database, form: &Form) -> Result<(), PostboxError> {
    let form = form.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE forms
                 SET name = ?2, identifier = ?3, to_name = ?4, to_email = ?5,
                     success_url = ?6, failure_url = ?7, max_body_length = ?8,
                     updated_at = ?9
                 WHERE id = ?1",
                params![
                    form.id,
                    form.name,
                    form.identifier,
                    form.to_name,
                    form.to_email,
                    form.success_url,
                    form.failure_url,
                    form.max_body_length,
                    form.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a form by id. Unknown ids are a no-op.
pub async fn delete_form(db: &Database, id: &str) -> Result<(), PostboxError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM forms WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
