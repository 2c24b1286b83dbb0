//! Small building blocks shared by every page.

mod button;
mod feedback;
mod form;

pub use button::{Button, ButtonVariant};
pub use feedback::{Badge, ErrorBanner, PageHeader, Spinner, StatCard, SuccessBanner};
pub use form::{FormField, Input, Label};
