//! Mail template compilation.

use std::sync::Arc;

use super::store::StringResolver;
use super::types::{MessageFormat, TemplateError, TemplateResult, TemplateVars};

/// A template compiled in all three formats, ready for message assembly.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub subject: String,
    pub plain: String,
    pub html: String,
}

/// Compiles mail templates against a localized string source.
///
/// A template id `slot_booked` with format `subject` resolves the resource
/// `slot_booked_subject` within the given component and locale; each of the
/// three formats has its own localized source text.
pub struct TemplateCompiler {
    resolver: Arc<dyn StringResolver>,
}

impl TemplateCompiler {
    pub fn new(resolver: Arc<dyn StringResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve and fill one format of a mail template.
    pub fn compile(
        &self,
        template: &str,
        format: MessageFormat,
        vars: &TemplateVars,
        component: &str,
        locale: &str,
    ) -> TemplateResult<String> {
        validate_template_id(template)?;
        let key = format!("{}_{}", template, format.suffix());
        self.resolver.get_string(&key, component, vars, locale)
    }

    /// Compile all three formats of a template.
    pub fn compile_all(
        &self,
        template: &str,
        vars: &TemplateVars,
        component: &str,
        locale: &str,
    ) -> TemplateResult<CompiledTemplate> {
        Ok(CompiledTemplate {
            subject: self.compile(template, MessageFormat::Subject, vars, component, locale)?,
            plain: self.compile(template, MessageFormat::Plain, vars, component, locale)?,
            html: self.compile(template, MessageFormat::Html, vars, component, locale)?,
        })
    }
}

fn validate_template_id(id: &str) -> TemplateResult<()> {
    if id.is_empty() || id.len() > 64 {
        return Err(TemplateError::InvalidId(
            "id must be 1-64 characters".to_string(),
        ));
    }
    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TemplateError::InvalidId(
            "id must contain only alphanumeric, dash, or underscore".to_string(),
        ));
    }
    Ok(())
}
