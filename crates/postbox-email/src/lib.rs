// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP delivery for contact-form submissions.
//!
//! Implements the `MailSender` trait on top of lettre's async SMTP
//! transport. Delivery is a single best-effort attempt: per-recipient
//! failures land in the failed-recipients map instead of being raised.

use std::collections::BTreeMap;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use postbox_config::model::SmtpConfig;
use postbox_core::{MailSender, Message, PostboxError};

/// Lettre-backed SMTP sender.
///
/// The transport is lazy: no connection is made until the first send, so
/// constructing the sender with an unreachable relay succeeds.
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    failed: Mutex<BTreeMap<String, String>>,
}

impl SmtpSender {
    /// Build a sender from SMTP configuration.
    ///
    /// Fails when the relay hostname or the configured from address cannot
    /// be parsed; network errors only surface at send time.
    pub fn new(config: &SmtpConfig) -> Result<Self, PostboxError> {
        let address: Address =
            config
                .from_address
                .parse()
                .map_err(|e| PostboxError::Mail {
                    message: format!("invalid smtp.from_address `{}`", config.from_address),
                    source: Some(Box::new(e)),
                })?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| PostboxError::Mail {
                    message: format!("invalid smtp relay `{}`", config.host),
                    source: Some(Box::new(e)),
                })?
                .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            failed: Mutex::new(BTreeMap::new()),
        })
    }
}

#[async_trait]
impl MailSender for SmtpSender {
    async fn send(&self, message: &Message) -> Result<usize, PostboxError> {
        let form = message.form.as_ref().ok_or_else(|| {
            PostboxError::InvalidInput("cannot send a message with an unresolved form".into())
        })?;

        // Each attempt starts with a clean failure report.
        let mut failed = self.failed.lock().await;
        failed.clear();

        let to_address: Address = match form.to_email.parse() {
            Ok(address) => address,
            Err(e) => {
                failed.insert(
                    form.to_email.clone(),
                    format!("invalid recipient address: {e}"),
                );
                return Ok(0);
            }
        };
        let to = Mailbox::new(Some(form.to_name.clone()), to_address);

        let mut builder = lettre::Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN);

        // Replies go to the submitter when their address parses.
        if let Ok(reply_address) = message.from_email.parse::<Address>() {
            builder = builder.reply_to(Mailbox::new(
                Some(message.from_name.clone()),
                reply_address,
            ));
        }

        let email = builder
            .body(render_body(message))
            .map_err(|e| PostboxError::Mail {
                message: "failed to build email".into(),
                source: Some(Box::new(e)),
            })?;

        match self.transport.send(email).await {
            Ok(_) => {
                debug!(recipient = %form.to_email, "contact message delivered");
                Ok(1)
            }
            Err(e) => {
                warn!(recipient = %form.to_email, error = %e, "contact message delivery failed");
                failed.insert(form.to_email.clone(), e.to_string());
                Ok(0)
            }
        }
    }

    async fn failed_recipients(&self) -> BTreeMap<String, String> {
        self.failed.lock().await.clone()
    }
}

/// Render the plain-text email body: the submission followed by a contact
/// block for the sender.
fn render_body(message: &Message) -> String {
    let mut body = String::with_capacity(message.body.len() + 128);
    body.push_str(&message.body);
    body.push_str("\n\n-- \n");
    body.push_str(&format!("Name: {}\n", message.from_name));
    body.push_str(&format!("Email: {}\n", message.from_email));
    if !message.from_phone.is_empty() {
        body.push_str(&format!("Phone: {}\n", message.from_phone));
    }
    body
}
