//! Layered client settings.
//!
//! Sources, lowest precedence first:
//! 1. the defaults set below,
//! 2. `lms.toml`, embedded at compile time,
//! 3. `LMS_*` environment variables (`LMS_API__BASE_URL`, ...),
//! 4. the compile-time `LMS_API_URL`, for wasm builds that have no environment.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const EMBEDDED: &str = include_str!("../lms.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotificationSettings {
    /// Seconds between unread-count polls. 0 disables polling.
    pub poll_interval_secs: u64,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizSettings {
    /// The countdown turns red below this many seconds.
    pub warning_threshold_secs: u32,
    /// Used when a quiz has no passing score of its own.
    pub default_passing_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttendanceSettings {
    pub good_percentage: f64,
    pub warning_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub notifications: NotificationSettings,
    pub quiz: QuizSettings,
    pub attendance: AttendanceSettings,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("notifications.poll_interval_secs", 60)?
            .set_default("notifications.page_size", 10)?
            .set_default("quiz.warning_threshold_secs", 300)?
            .set_default("quiz.default_passing_percentage", 60.0)?
            .set_default("attendance.good_percentage", 75.0)?
            .set_default("attendance.warning_percentage", 60.0)?
            .add_source(File::from_str(EMBEDDED, FileFormat::Toml))
            .add_source(
                Environment::with_prefix("LMS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", option_env!("LMS_API_URL"))?
            .build()?
            .try_deserialize()
    }

    /// Load settings, falling back to the embedded defaults on error.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Invalid settings, using defaults: {}", e);
                Self::default()
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "http://localhost:8000".into(),
            },
            notifications: NotificationSettings {
                poll_interval_secs: 60,
                page_size: 10,
            },
            quiz: QuizSettings {
                warning_threshold_secs: 300,
                default_passing_percentage: 60.0,
            },
            attendance: AttendanceSettings {
                good_percentage: 75.0,
                warning_percentage: 60.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::set_var;

    #[test]
    fn test_settings() {
        set_var("LMS_QUIZ__WARNING_THRESHOLD_SECS", "120");
        let settings = Settings::load().unwrap_or_default();
        println!("Settings = {:?}", settings);
        assert_eq!(settings.quiz.warning_threshold_secs, 120);
        assert_eq!(settings.notifications.page_size, 10);
        assert_eq!(settings.attendance.good_percentage, 75.0);
    }

    #[test]
    fn test_embedded_file_parses() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(EMBEDDED, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("embedded lms.toml");
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings, Settings::default());
    }
}
