//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod repo;

pub mod platform;

pub const LMS_CSS: Asset = asset!("/assets/lms.css");

mod auth;
pub use auth::{
    report_error, sign_in, sign_out, use_api, use_auth, use_settings, AuthProvider, AuthState,
    LogoutButton,
};

pub mod nav;
pub use nav::{home_for, menu_for, RoleNav};

mod navbar;
pub use navbar::Navbar;

mod notification_bell;
pub use notification_bell::NotificationBell;

pub mod rich_text_editor;
pub use rich_text_editor::{render_markdown, RichTextEditor};

mod modals;
pub use modals::{CourseFormModal, CourseTarget, ModalOverlay, UserFormModal};

mod countdown;
pub use countdown::{use_quiz_countdown, Countdown};
