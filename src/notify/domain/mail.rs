//! Outbound mail value types.

use camino::{Utf8Path, Utf8PathBuf};

/// Content type attached to execution-log artifacts.
pub const LOG_CONTENT_TYPE: &str = "application/json";

/// Content type attached to rendered report artifacts.
pub const REPORT_CONTENT_TYPE: &str = "text/html";

/// One file attached to an outbound mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    filename: String,
    path: Utf8PathBuf,
    content_type: String,
}

impl MailAttachment {
    /// Creates an attachment.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        path: impl Into<Utf8PathBuf>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            content_type: content_type.into(),
        }
    }

    /// Returns the filename presented to the recipient.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the local path of the attached file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the MIME content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// One outbound notification mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    to: String,
    subject: String,
    html_body: String,
    attachments: Vec<MailAttachment>,
}

impl OutgoingMail {
    /// Creates a mail without attachments.
    #[must_use]
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
            attachments: Vec::new(),
        }
    }

    /// Sets the attachment list.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = MailAttachment>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Returns the recipient address.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the HTML body.
    #[must_use]
    pub fn html_body(&self) -> &str {
        &self.html_body
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[MailAttachment] {
        &self.attachments
    }
}

/// Provider confirmation of one delivered mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    message_id: String,
}

impl MailReceipt {
    /// Creates a receipt from the provider-assigned identifier.
    #[must_use]
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }

    /// Returns the provider-assigned message identifier.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}
