//! Template types and error definitions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("no localized string for key `{key}` (component `{component}`, locale `{locale}`)")]
    MissingString {
        key: String,
        component: String,
        locale: String,
    },

    #[error("invalid template id: {0}")]
    InvalidId(String),

    #[error("malformed language pack: {0}")]
    MalformedPack(String),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// The three renderings every mail template provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// Subject line
    Subject,
    /// Plain-text body, the primary format
    Plain,
    /// HTML body alternative
    Html,
}

impl MessageFormat {
    /// Key suffix of the localized resource carrying this format.
    pub fn suffix(&self) -> &'static str {
        match self {
            MessageFormat::Subject => "subject",
            MessageFormat::Plain => "plain",
            MessageFormat::Html => "html",
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// The standard substitution roles a mail template may reference.
///
/// Naming a role here rather than passing a free-form string catches typos in
/// the builder at compile time; caller-supplied extras stay free-form since
/// they are template-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardVar {
    Site,
    SiteShort,
    SiteUrl,
    Sender,
    Recipient,
    Course,
    CourseShort,
    CourseUrl,
    Module,
    StaffRole,
    SchedulerUrl,
    Date,
    Time,
    EndTime,
    Location,
    Attendant,
    AttendantUrl,
    Attendee,
    AttendeeUrl,
    CancelReason,
}

impl StandardVar {
    /// Placeholder name as it appears in templates.
    pub fn key(&self) -> &'static str {
        match self {
            StandardVar::Site => "SITE",
            StandardVar::SiteShort => "SITE_SHORT",
            StandardVar::SiteUrl => "SITE_URL",
            StandardVar::Sender => "SENDER",
            StandardVar::Recipient => "RECIPIENT",
            StandardVar::Course => "COURSE",
            StandardVar::CourseShort => "COURSE_SHORT",
            StandardVar::CourseUrl => "COURSE_URL",
            StandardVar::Module => "MODULE",
            StandardVar::StaffRole => "STAFFROLE",
            StandardVar::SchedulerUrl => "SCHEDULER_URL",
            StandardVar::Date => "DATE",
            StandardVar::Time => "TIME",
            StandardVar::EndTime => "ENDTIME",
            StandardVar::Location => "LOCATION",
            StandardVar::Attendant => "ATTENDANT",
            StandardVar::AttendantUrl => "ATTENDANT_URL",
            StandardVar::Attendee => "ATTENDEE",
            StandardVar::AttendeeUrl => "ATTENDEE_URL",
            StandardVar::CancelReason => "CANCEL_REASON",
        }
    }
}

/// Substitution dictionary for one message.
///
/// Keys are normalized to uppercase on insertion, which makes every later
/// placeholder lookup case-insensitive. Built fresh per message, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVars {
    entries: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a standard substitution role.
    pub fn set(&mut self, var: StandardVar, value: impl Into<String>) {
        self.entries.insert(var.key().to_string(), value.into());
    }

    /// Insert a caller-supplied parameter; the key is uppercased.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(key.as_ref().to_uppercase(), value.into());
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_uppercase()).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_uppercase())
    }

    /// Merge `overrides` into this dictionary; overrides win on collision.
    pub fn merge(mut self, overrides: &TemplateVars) -> TemplateVars {
        for (key, value) in &overrides.entries {
            self.entries.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
