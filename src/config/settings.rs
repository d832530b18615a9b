use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub formats: FormatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Full display name of the site
    #[serde(default = "default_site_fullname")]
    pub fullname: String,
    /// Short display name of the site
    #[serde(default = "default_site_shortname")]
    pub shortname: String,
    /// Root URL of the site, without a trailing slash
    #[serde(default = "default_wwwroot")]
    pub wwwroot: String,
    /// Default language for users that declare none
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Id of the site-level (front page) course
    #[serde(default = "default_site_course_id")]
    pub course_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    /// strftime pattern for dates, used when a language pack provides none
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
    /// strftime pattern for times, used when a language pack provides none
    #[serde(default = "default_time_pattern")]
    pub time_pattern: String,
}

fn default_site_fullname() -> String {
    "Example Site".to_string()
}

fn default_site_shortname() -> String {
    "Example".to_string()
}

fn default_wwwroot() -> String {
    "http://localhost".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_site_course_id() -> u64 {
    1
}

fn default_date_pattern() -> String {
    "%d %B %Y".to_string()
}

fn default_time_pattern() -> String {
    "%H:%M".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("site.fullname", default_site_fullname())?
            .set_default("site.shortname", default_site_shortname())?
            .set_default("site.wwwroot", default_wwwroot())?
            .set_default("site.lang", default_lang())?
            .set_default("site.course_id", default_site_course_id())?
            .set_default("formats.date_pattern", default_date_pattern())?
            .set_default("formats.time_pattern", default_time_pattern())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SITE_FULLNAME, SITE_WWWROOT, FORMATS_DATE_PATTERN, etc.
            .add_source(
                Environment::default()
                    .separator("_")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            fullname: default_site_fullname(),
            shortname: default_site_shortname(),
            wwwroot: default_wwwroot(),
            lang: default_lang(),
            course_id: default_site_course_id(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date_pattern: default_date_pattern(),
            time_pattern: default_time_pattern(),
        }
    }
}
