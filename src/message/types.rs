//! Transport-level message representation.

use serde::{Deserialize, Serialize};

use crate::domain::User;

/// A fully rendered message: constructed, sent once, discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Component (module) the message originates from
    pub component: String,
    /// Message name as registered with the host messaging system
    pub name: String,
    pub sender: User,
    pub recipient: User,
    pub subject: String,
    /// Primary body, plain text
    pub full_message: String,
    /// HTML alternative of the body
    pub full_message_html: String,
    /// Notification rather than a personal message
    pub notification: bool,
    /// Id of the course the message relates to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<u64>,
    /// URL of the context the message points back to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_url: Option<String>,
    /// Link label for the context URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_url_name: Option<String>,
}

impl Message {
    /// Start building a message between two users.
    pub fn builder(
        component: impl Into<String>,
        name: impl Into<String>,
        sender: User,
        recipient: User,
    ) -> MessageBuilder {
        MessageBuilder::new(component, name, sender, recipient)
    }
}

/// Builder for [`Message`].
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    component: String,
    name: String,
    sender: User,
    recipient: User,
    subject: String,
    full_message: String,
    full_message_html: String,
    notification: bool,
    course_id: Option<u64>,
    context_url: Option<String>,
    context_url_name: Option<String>,
}

impl MessageBuilder {
    pub fn new(
        component: impl Into<String>,
        name: impl Into<String>,
        sender: User,
        recipient: User,
    ) -> Self {
        Self {
            component: component.into(),
            name: name.into(),
            sender,
            recipient,
            subject: String::new(),
            full_message: String::new(),
            full_message_html: String::new(),
            notification: true,
            course_id: None,
            context_url: None,
            context_url_name: None,
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the plain-text body
    pub fn plain(mut self, body: impl Into<String>) -> Self {
        self.full_message = body.into();
        self
    }

    /// Set the HTML body alternative
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.full_message_html = body.into();
        self
    }

    pub fn notification(mut self, notification: bool) -> Self {
        self.notification = notification;
        self
    }

    /// Attach the course context the message links back to.
    pub fn course_context(
        mut self,
        course_id: u64,
        url: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.course_id = Some(course_id);
        self.context_url = Some(url.into());
        self.context_url_name = Some(label.into());
        self
    }

    pub fn build(self) -> Message {
        Message {
            component: self.component,
            name: self.name,
            sender: self.sender,
            recipient: self.recipient,
            subject: self.subject,
            full_message: self.full_message,
            full_message_html: self.full_message_html,
            notification: self.notification,
            course_id: self.course_id,
            context_url: self.context_url,
            context_url_name: self.context_url_name,
        }
    }
}
