//! Contact-form notifications over SMTP.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::database::models::ContactMessage;

/// Mails each new contact message to the site owner (`EMAIL_FROM`).
pub struct ContactNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: String,
}

impl ContactNotifier {
    /// Build a notifier when every SMTP setting is present.
    pub fn from_config(config: &EmailConfig) -> Result<Option<Self>> {
        match (&config.smtp_host, &config.smtp_user, &config.smtp_password, &config.email_from) {
            (Some(host), Some(user), Some(pass), Some(from)) => {
                let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .context("failed to create SMTP STARTTLS transport")?
                    .port(config.smtp_port)
                    .credentials(Credentials::new(user.clone(), pass.clone()))
                    .build();

                Ok(Some(Self {
                    transport,
                    mailbox: from.clone(),
                }))
            }
            _ => Ok(None),
        }
    }

    pub async fn notify(&self, contact: &ContactMessage) -> Result<()> {
        let mailbox: Mailbox = self.mailbox.parse().context("invalid EMAIL_FROM address")?;

        let email = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(subject_line(&contact.subject))
            .header(ContentType::TEXT_PLAIN)
            .body(body_text(contact))
            .context("failed to build email message")?;

        self.transport
            .send(email)
            .await
            .context("failed to send email")?;

        Ok(())
    }
}

fn subject_line(subject: &str) -> String {
    format!("[Portfolio Contact] {}", subject)
}

fn body_text(contact: &ContactMessage) -> String {
    format!(
        "A new contact message was received.\n\n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\n\
         Message:\n{}\n",
        contact.name, contact.email, contact.subject, contact.message
    )
}
