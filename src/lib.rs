//! Templated notification messages for the appointment scheduler.
//!
//! The crate resolves a mail template by name and locale, substitutes named
//! variables (course, appointment, participant data) into its subject,
//! plain-text and HTML renderings, and hands the assembled message to an
//! external delivery transport. Localized strings and the transport are
//! pluggable seams the host platform implements; in-memory implementations
//! of both ship with the crate.
//!
//! # Example
//!
//! ```ignore
//! let settings = Settings::new()?;
//! let catalog = create_string_catalog();
//! catalog.load_pack("scheduler", "en", include_str!("../lang/en.json"))?;
//!
//! let messenger = Messenger::new(&settings, catalog, transport);
//! messenger.send_slot_notification(
//!     &slot, &scheduler, "bookingnotification", "slot_booked",
//!     &sender, &recipient, &teacher, &student, &course,
//! )?;
//! ```

// Supporting infrastructure
pub mod config;
pub mod text;

// Domain layer
pub mod domain;
pub mod locale;
pub mod message;
pub mod template;
pub mod transport;

pub use config::Settings;
pub use message::{CopyPolicy, CopyRule, Message, Messenger, SendError, SendResult};
pub use template::{
    create_string_catalog, MessageFormat, StandardVar, StringCatalog, StringResolver,
    TemplateError, TemplateVars,
};
pub use transport::{MessageId, RecordingTransport, Transport, TransportError};
