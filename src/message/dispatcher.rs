//! Message dispatch: template compilation, assembly, hand-off to transport.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{FormatConfig, Settings, SiteConfig};
use crate::domain::{Course, Scheduler, Slot, User};
use crate::locale::LocaleResolver;
use crate::template::{
    StandardVar, StringResolver, TemplateCompiler, TemplateError, TemplateVars,
};
use crate::text::clean_display;
use crate::transport::{MessageId, Transport, TransportError};

use super::types::Message;
use super::variables::VariableBuilder;

/// Component slot notifications are registered under.
pub const SCHEDULER_COMPONENT: &str = "scheduler";

/// Errors from assembling or handing off a message.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("transport refused the message: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for dispatch operations
pub type SendResult<T> = Result<T, SendError>;

/// Additional recipients to copy on confirmations, keyed by course.
///
/// The host declares the watcher lists it wants; the dispatcher walks the
/// matching rules. Copies go through the same template pipeline as every
/// other message.
#[derive(Debug, Clone, Default)]
pub struct CopyPolicy {
    rules: Vec<CopyRule>,
}

/// One watcher list of a [`CopyPolicy`].
#[derive(Debug, Clone)]
pub struct CopyRule {
    /// Course the rule applies to; `None` matches every course
    pub course_id: Option<u64>,
    /// Users receiving a copy
    pub watchers: Vec<User>,
}

impl CopyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a watcher list for a course (`None` for all courses).
    pub fn watch(mut self, course_id: Option<u64>, watchers: Vec<User>) -> Self {
        self.rules.push(CopyRule {
            course_id,
            watchers,
        });
        self
    }

    /// Watchers to copy for a message in `course_id`.
    pub fn watchers_for(&self, course_id: u64) -> Vec<&User> {
        self.rules
            .iter()
            .filter(|rule| rule.course_id.map_or(true, |id| id == course_id))
            .flat_map(|rule| rule.watchers.iter())
            .collect()
    }
}

/// Renders and dispatches templated notifications.
///
/// Stateless apart from configuration and shared collaborators; one instance
/// per host process is enough, and calls never interfere with each other.
pub struct Messenger {
    site: SiteConfig,
    formats: FormatConfig,
    locales: LocaleResolver,
    compiler: TemplateCompiler,
    resolver: Arc<dyn StringResolver>,
    transport: Arc<dyn Transport>,
    copy_policy: CopyPolicy,
}

impl Messenger {
    pub fn new(
        settings: &Settings,
        resolver: Arc<dyn StringResolver>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            locales: LocaleResolver::new(settings.site.lang.clone(), settings.site.course_id),
            compiler: TemplateCompiler::new(resolver.clone()),
            site: settings.site.clone(),
            formats: settings.formats.clone(),
            resolver,
            transport,
            copy_policy: CopyPolicy::default(),
        }
    }

    /// Replace the additional-recipients policy for confirmations.
    pub fn with_copy_policy(mut self, policy: CopyPolicy) -> Self {
        self.copy_policy = policy;
        self
    }

    /// Compile a template in all three formats and send the result.
    ///
    /// Exactly one outbound message per invocation. `extra` wins over the
    /// default dictionary on key collision.
    #[tracing::instrument(
        name = "messenger.send_from_template",
        skip(self, sender, recipient, course, extra),
        fields(template = %template, message_name = %message_name, recipient_id = recipient.id)
    )]
    pub fn send_from_template(
        &self,
        component: &str,
        message_name: &str,
        notification: bool,
        sender: &User,
        recipient: &User,
        course: Option<&Course>,
        template: &str,
        extra: &TemplateVars,
    ) -> SendResult<MessageId> {
        if component.is_empty() {
            return Err(SendError::InvalidInput(
                "component must not be empty".to_string(),
            ));
        }
        if message_name.is_empty() {
            return Err(SendError::InvalidInput(
                "message name must not be empty".to_string(),
            ));
        }

        let locale = self.locales.resolve(recipient, course);
        let vars = self.default_vars(sender, recipient, course).merge(extra);
        let compiled = self
            .compiler
            .compile_all(template, &vars, component, &locale)?;

        let mut builder =
            Message::builder(component, message_name, sender.clone(), recipient.clone())
                .subject(compiled.subject)
                .plain(compiled.plain)
                .html(compiled.html)
                .notification(notification);
        if let Some(course) = course {
            builder = builder.course_context(
                course.id,
                self.course_url(course.id),
                clean_display(&course.fullname),
            );
        }
        let message = builder.build();

        let id = self.transport.send(&message)?;
        tracing::debug!(message_id = %id, locale = %locale, "message handed to transport");
        Ok(id)
    }

    /// The standard substitution dictionary for a slot-related message.
    ///
    /// Every source is optional; only keys whose source is present are
    /// emitted. Dates render in the recipient's timezone, in the locale
    /// resolved for `(recipient, course)`.
    pub fn standard_variables(
        &self,
        scheduler: Option<&Scheduler>,
        slot: Option<&Slot>,
        teacher: Option<&User>,
        student: Option<&User>,
        course: Option<&Course>,
        recipient: &User,
    ) -> TemplateVars {
        let locale = self.locales.resolve(recipient, course);
        VariableBuilder::new(
            &self.site.wwwroot,
            self.resolver.as_ref(),
            &self.formats,
            locale,
            recipient.timezone(),
        )
        .build(scheduler, slot, teacher, student)
    }

    /// Notify `recipient` about a slot.
    #[allow(clippy::too_many_arguments)]
    pub fn send_slot_notification(
        &self,
        slot: &Slot,
        scheduler: &Scheduler,
        message_name: &str,
        template: &str,
        sender: &User,
        recipient: &User,
        teacher: &User,
        student: &User,
        course: &Course,
    ) -> SendResult<MessageId> {
        let vars = self.standard_variables(
            Some(scheduler),
            Some(slot),
            Some(teacher),
            Some(student),
            Some(course),
            recipient,
        );
        self.send_from_template(
            SCHEDULER_COMPONENT,
            message_name,
            true,
            sender,
            recipient,
            Some(course),
            template,
            &vars,
        )
    }

    /// Notify `recipient` that a slot was cancelled, with a courtesy copy to
    /// the sender. Both messages carry the same reason text.
    #[allow(clippy::too_many_arguments)]
    pub fn send_slot_notification_cancelled(
        &self,
        slot: &Slot,
        scheduler: &Scheduler,
        message_name: &str,
        template: &str,
        sender: &User,
        recipient: &User,
        teacher: &User,
        student: &User,
        course: &Course,
        cancel_reason: &str,
    ) -> SendResult<(MessageId, MessageId)> {
        let mut vars = self.standard_variables(
            Some(scheduler),
            Some(slot),
            Some(teacher),
            Some(student),
            Some(course),
            recipient,
        );
        vars.set(StandardVar::CancelReason, cancel_reason);

        let to_recipient = self.send_from_template(
            SCHEDULER_COMPONENT,
            message_name,
            true,
            sender,
            recipient,
            Some(course),
            template,
            &vars,
        )?;
        let to_sender = self
            .send_from_template(
                SCHEDULER_COMPONENT,
                message_name,
                true,
                sender,
                sender,
                Some(course),
                template,
                &vars,
            )
            .map_err(|e| {
                tracing::warn!(
                    recipient_message_id = %to_recipient,
                    error = %e,
                    "courtesy copy failed after recipient send"
                );
                e
            })?;

        Ok((to_recipient, to_sender))
    }

    /// Notify `recipient` that a slot was confirmed. The sender receives a
    /// courtesy copy, and watchers configured for the course receive copies
    /// as well. Returns the message ids in send order.
    #[allow(clippy::too_many_arguments)]
    pub fn send_slot_notification_confirmed(
        &self,
        slot: &Slot,
        scheduler: &Scheduler,
        message_name: &str,
        template: &str,
        sender: &User,
        recipient: &User,
        teacher: &User,
        student: &User,
        course: &Course,
    ) -> SendResult<Vec<MessageId>> {
        let vars = self.standard_variables(
            Some(scheduler),
            Some(slot),
            Some(teacher),
            Some(student),
            Some(course),
            recipient,
        );

        let mut ids = Vec::new();
        ids.push(self.send_from_template(
            SCHEDULER_COMPONENT,
            message_name,
            true,
            sender,
            recipient,
            Some(course),
            template,
            &vars,
        )?);
        ids.push(self.send_from_template(
            SCHEDULER_COMPONENT,
            message_name,
            true,
            sender,
            sender,
            Some(course),
            template,
            &vars,
        )?);
        for watcher in self.copy_policy.watchers_for(course.id) {
            ids.push(self.send_from_template(
                SCHEDULER_COMPONENT,
                message_name,
                true,
                sender,
                watcher,
                Some(course),
                template,
                &vars,
            )?);
        }

        tracing::debug!(count = ids.len(), course_id = course.id, "confirmation fan-out sent");
        Ok(ids)
    }

    /// Unconditional defaults, plus the course trio when a course is given.
    fn default_vars(
        &self,
        sender: &User,
        recipient: &User,
        course: Option<&Course>,
    ) -> TemplateVars {
        let mut vars = TemplateVars::new();
        vars.set(StandardVar::Site, self.site.fullname.clone());
        vars.set(StandardVar::SiteShort, self.site.shortname.clone());
        vars.set(StandardVar::SiteUrl, self.site.wwwroot.clone());
        vars.set(StandardVar::Sender, sender.full_name());
        vars.set(StandardVar::Recipient, recipient.full_name());
        if let Some(course) = course {
            vars.set(StandardVar::CourseShort, clean_display(&course.shortname));
            vars.set(StandardVar::Course, clean_display(&course.fullname));
            vars.set(StandardVar::CourseUrl, self.course_url(course.id));
        }
        vars
    }

    fn course_url(&self, course_id: u64) -> String {
        format!("{}/course/view.php?id={}", self.site.wwwroot, course_id)
    }
}
