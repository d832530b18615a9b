//! Standard variable assembly for slot-related messages.

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::FormatConfig;
use crate::domain::{Scheduler, Slot, User};
use crate::template::{StandardVar, StringResolver, TemplateVars};
use crate::text::clean_display;

/// Component holding per-locale date/time patterns.
const LANGCONFIG_COMPONENT: &str = "langconfig";
const DATE_PATTERN_KEY: &str = "strftimedate";
const TIME_PATTERN_KEY: &str = "strftimetime";

/// Builds the standard substitution dictionary for one message.
///
/// Locale and timezone are fixed at construction and used only through this
/// value, so date rendering for one message cannot bleed into a concurrently
/// built one.
pub(crate) struct VariableBuilder<'a> {
    wwwroot: &'a str,
    resolver: &'a dyn StringResolver,
    formats: &'a FormatConfig,
    locale: String,
    timezone: FixedOffset,
}

impl<'a> VariableBuilder<'a> {
    pub fn new(
        wwwroot: &'a str,
        resolver: &'a dyn StringResolver,
        formats: &'a FormatConfig,
        locale: String,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            wwwroot,
            resolver,
            formats,
            locale,
            timezone,
        }
    }

    /// Assemble the dictionary, emitting only the keys whose source is present.
    pub fn build(
        &self,
        scheduler: Option<&Scheduler>,
        slot: Option<&Slot>,
        teacher: Option<&User>,
        student: Option<&User>,
    ) -> TemplateVars {
        let mut vars = TemplateVars::new();

        if let Some(scheduler) = scheduler {
            vars.set(StandardVar::Module, clean_display(&scheduler.name));
            vars.set(StandardVar::StaffRole, scheduler.staff_role.clone());
            vars.set(
                StandardVar::SchedulerUrl,
                format!("{}/mod/scheduler/view.php?id={}", self.wwwroot, scheduler.cmid),
            );
        }

        if let Some(slot) = slot {
            let date_pattern = self.pattern(DATE_PATTERN_KEY, &self.formats.date_pattern);
            let time_pattern = self.pattern(TIME_PATTERN_KEY, &self.formats.time_pattern);
            vars.set(
                StandardVar::Date,
                self.format_instant(slot.start_time, &date_pattern),
            );
            vars.set(
                StandardVar::Time,
                self.format_instant(slot.start_time, &time_pattern),
            );
            vars.set(
                StandardVar::EndTime,
                self.format_instant(slot.end_time, &time_pattern),
            );
            vars.set(StandardVar::Location, clean_display(&slot.location));
        }

        if let Some(teacher) = teacher {
            vars.set(StandardVar::Attendant, teacher.full_name());
            if let Some(url) = self.profile_url(teacher, scheduler) {
                vars.set(StandardVar::AttendantUrl, url);
            }
        }

        if let Some(student) = student {
            vars.set(StandardVar::Attendee, student.full_name());
            if let Some(url) = self.profile_url(student, scheduler) {
                vars.set(StandardVar::AttendeeUrl, url);
            }
        }

        vars
    }

    /// Per-locale pattern from the language pack, configured fallback otherwise.
    fn pattern(&self, key: &str, fallback: &str) -> String {
        self.resolver
            .get_string(key, LANGCONFIG_COMPONENT, &TemplateVars::new(), &self.locale)
            .unwrap_or_else(|_| fallback.to_string())
    }

    fn format_instant(&self, instant: DateTime<Utc>, pattern: &str) -> String {
        instant.with_timezone(&self.timezone).format(pattern).to_string()
    }

    /// Profile links carry the course they are viewed from; without a
    /// scheduler there is no course reference to build one.
    fn profile_url(&self, user: &User, scheduler: Option<&Scheduler>) -> Option<String> {
        scheduler.map(|s| {
            format!(
                "{}/user/view.php?id={}&course={}",
                self.wwwroot, user.id, s.course_id
            )
        })
    }
}
