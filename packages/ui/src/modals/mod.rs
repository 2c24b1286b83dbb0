//! Create/edit dialogs used by the admin screens.

mod course_form;
mod overlay;
mod user_form;

pub use course_form::{CourseFormModal, CourseTarget};
pub use overlay::ModalOverlay;
pub use user_form::UserFormModal;
