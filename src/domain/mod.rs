//! Domain objects that feed template substitution.
//!
//! These are thin data carriers handed in by the host platform: the crate
//! never loads or stores them itself. Any of them may be absent for a given
//! message; the variable builder only emits the keys whose source is present.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// A platform user taking part in a message exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Platform-wide user id
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// Preferred language, if the user declared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Offset from UTC in minutes, governs date/time rendering
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl User {
    pub fn new(
        id: u64,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            email: email.into(),
            lang: None,
            utc_offset_minutes: 0,
        }
    }

    /// Set the user's declared language
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set the user's offset from UTC in minutes
    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Display name used in message bodies.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    /// Timezone used when rendering dates for this user.
    ///
    /// Offsets outside the valid range fall back to UTC rather than failing
    /// a send over a corrupt profile field.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// A course providing the context for a message. The site-level course
/// (front page) carries a reserved id and never overrides locale selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub shortname: String,
    pub fullname: String,
    /// Forced course language, if the course declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Course {
    pub fn new(id: u64, shortname: impl Into<String>, fullname: impl Into<String>) -> Self {
        Self {
            id,
            shortname: shortname.into(),
            fullname: fullname.into(),
            lang: None,
        }
    }

    /// Set the course's forced language
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// A scheduler activity instance inside a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler {
    /// Course-module id, used to build the activity URL
    pub cmid: u64,
    /// Id of the course the activity belongs to
    pub course_id: u64,
    /// Display name of the activity
    pub name: String,
    /// Label for the attendant role, e.g. "Teacher"
    pub staff_role: String,
}

impl Scheduler {
    pub fn new(
        cmid: u64,
        course_id: u64,
        name: impl Into<String>,
        staff_role: impl Into<String>,
    ) -> Self {
        Self {
            cmid,
            course_id,
            name: name.into(),
            staff_role: staff_role.into(),
        }
    }
}

/// A bookable appointment slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
}

impl Slot {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, location: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            location: location.into(),
        }
    }
}
