//! Variable substitution engine for templates

use super::types::TemplateVars;

/// Substitute `{{name}}` placeholders in `template` from `vars`.
///
/// Placeholder names are matched case-insensitively. A placeholder without a
/// dictionary entry stays in the output literally and is logged at `warn`: a
/// cosmetic defect in one string must not abort a send.
pub fn substitute(template: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        tracing::warn!(placeholder = name, "no substitution value for placeholder");
                        out.push_str(&rest[start..start + 2 + end + 2]);
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated marker, keep the tail verbatim
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
