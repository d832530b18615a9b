//! Mail template system.
//!
//! This module provides:
//! - Localized string resolution behind the [`StringResolver`] seam, with an
//!   in-memory [`StringCatalog`] implementation
//! - Case-insensitive `{{variable}}` placeholder substitution
//! - Template compilation: one localized resource per template id and format
//!   (subject, plain, html)
//!
//! # Example
//!
//! ```ignore
//! let catalog = StringCatalog::new();
//! catalog.register("scheduler", "en", "slot_booked_subject", "Booked: {{COURSE}}");
//!
//! let compiler = TemplateCompiler::new(Arc::new(catalog));
//!
//! let mut vars = TemplateVars::new();
//! vars.insert("course", "Algebra I");
//!
//! let subject = compiler.compile("slot_booked", MessageFormat::Subject, &vars, "scheduler", "en")?;
//! ```

mod compiler;
mod store;
mod substitution;
mod types;

pub use compiler::{CompiledTemplate, TemplateCompiler};
pub use store::{create_string_catalog, StringCatalog, StringResolver};
pub use substitution::substitute;
pub use types::{MessageFormat, StandardVar, TemplateError, TemplateResult, TemplateVars};
