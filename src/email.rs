//! Outbound email seam.
//!
//! The transport is an external collaborator: `send` reports `Ok(false)` for
//! a non-fatal delivery failure, which registration treats as a reason to
//! roll the new account back. `LogEmailSender` is the development transport
//! (it writes the message to the log); `MockEmailSender` records messages for
//! tests and can be flipped into a failing mode.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Builds the account-verification email for a freshly registered user.
pub fn verification_email(name: &str, to: &str, verification_link: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Task Management System - Account verification".to_string(),
        html: format!(
            "<p>Dear {name},</p>\
             <p>Thank you for registering. To complete your registration and \
             activate your account, please click the following link:</p>\
             <p><a href=\"{link}\">Verify my account</a></p>\
             <p>If you did not request this registration, please ignore this message.</p>",
            name = name,
            link = verification_link,
        ),
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Attempts delivery. `Ok(false)` signals a non-fatal delivery failure;
    /// `Err` is reserved for faults in the sender itself.
    async fn send(&self, message: &EmailMessage) -> Result<bool, AppError>;
}

/// Development transport: logs the message instead of delivering it.
pub struct LogEmailSender {
    from_name: String,
}

impl LogEmailSender {
    pub fn new(from_name: String) -> Self {
        Self { from_name }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<bool, AppError> {
        log::info!(
            "email from {:?} to <{}> subject {:?}: {}",
            self.from_name,
            message.to,
            message.subject,
            message.html
        );
        Ok(true)
    }
}

/// Recording sender for tests: keeps every message and can simulate delivery
/// failure.
#[derive(Default)]
pub struct MockEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    fail: AtomicBool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// All subsequent sends report delivery failure.
    pub fn fail_deliveries(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent message sent to `to`, if any.
    pub fn last_message_to(&self, to: &str) -> Option<EmailMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<bool, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(true)
    }
}
