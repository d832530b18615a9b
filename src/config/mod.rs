mod settings;

pub use settings::{FormatConfig, Settings, SiteConfig};
