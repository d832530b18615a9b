//! Message locale selection.
//!
//! A message is rendered in exactly one locale, picked once per send and
//! passed explicitly to everything that formats text. Policy, in order:
//! course language (real courses only), recipient language, configured site
//! default, hard fallback.

use crate::domain::{Course, User};

/// Last-resort locale when neither user, course nor configuration declare one.
pub const FALLBACK_LOCALE: &str = "en";

/// Picks the effective language for a message.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default_locale: String,
    site_course_id: u64,
}

impl LocaleResolver {
    pub fn new(default_locale: impl Into<String>, site_course_id: u64) -> Self {
        Self {
            default_locale: default_locale.into(),
            site_course_id,
        }
    }

    /// Effective locale for a message to `recipient` in the context of `course`.
    ///
    /// Course language overrides user language, but the site-level course
    /// never forces one. Pure function of its inputs.
    pub fn resolve(&self, recipient: &User, course: Option<&Course>) -> String {
        if let Some(course) = course {
            if course.id != 0 && course.id != self.site_course_id {
                if let Some(lang) = non_empty(course.lang.as_deref()) {
                    return lang.to_string();
                }
            }
        }
        if let Some(lang) = non_empty(recipient.lang.as_deref()) {
            return lang.to_string();
        }
        if let Some(lang) = non_empty(Some(self.default_locale.as_str())) {
            return lang.to_string();
        }
        FALLBACK_LOCALE.to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
