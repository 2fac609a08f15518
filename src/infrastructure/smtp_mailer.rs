use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{error, info};

use crate::config::SmtpConfig;
use crate::domain::errors::DomainError;
use crate::domain::ports::Mailer;

pub struct SmtpMailer {
    transport: SmtpTransport,
    sender: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, DomainError> {
        let creds = Credentials::new(config.sender.clone(), config.password.clone());
        let transport = SmtpTransport::relay(&config.server)
            .map_err(|e| DomainError::internal(format!("Failed to create SMTP transport: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            sender: config.sender.clone(),
        })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        let email = Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|e| DomainError::internal(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|_| DomainError::bad_request(format!("invalid email address '{to}'")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to build email: {e}")))?;

        self.transport.send(&email).map_err(|e| {
            error!("smtp delivery to {} failed: {}", to, e);
            DomainError::internal(format!("Failed to send email via SMTP: {e}"))
        })?;

        info!("sent '{}' mail to {}", subject, to);
        Ok(())
    }
}
