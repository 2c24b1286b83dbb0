//! # API crate: typed client for the LMS backend
//!
//! Everything the frontends need to talk to the REST backend, plus the bits of
//! client-side logic that do not depend on a UI and can be unit tested on
//! their own.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer token, request plumbing and logging |
//! | [`endpoints`] | One `ApiClient` method per backend endpoint, grouped by router |
//! | [`error`] | [`ApiError`] and extraction of the backend's `detail` message |
//! | [`models`] | Serde records mirroring the backend JSON, and their display helpers |
//! | [`quiz_clock`] | Countdown for timed quizzes and the one-shot submit latch |
//! | [`settings`] | Layered [`Settings`] (defaults, embedded `lms.toml`, `LMS_*` env) |
//! | [`validation`] | Form checks run before a request is sent |
//!
//! No value here is cached between calls; every page asks the backend again.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod quiz_clock;
pub mod settings;
pub mod validation;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::*;
pub use quiz_clock::{format_clock, QuizClock, SubmitGate, Tick};
pub use settings::Settings;
pub use validation::{
    parse_grade, password_strength, validate_announcement, validate_assignment, validate_batch, validate_course,
    validate_login, validate_new_user, validate_reset, validate_signup, validate_submission,
    validate_user_update, PasswordStrength, ValidationError,
};

impl ApiClient {
    /// Client pointed at the configured backend.
    pub fn from_settings(settings: &Settings) -> Self {
        ApiClient::new(settings.api.base_url.clone())
    }
}
