//! Admin-only screens.

use std::future::Future;

use api::ApiError;
use dioxus::prelude::*;
use ui::{report_error, AuthState};

mod academic;
mod allocations;
mod batches;
mod courses;
mod dashboard;
mod users;

pub use academic::AdminAcademic;
pub use allocations::AdminAllocations;
pub use batches::AdminBatches;
pub use courses::AdminCourses;
pub use dashboard::AdminDashboard;
pub use users::AdminUsers;

/// Run a row action, then reload the list or show why it failed.
fn run_action<T, F>(
    auth: Signal<AuthState>,
    mut error: Signal<Option<String>>,
    mut reload: Resource<T>,
    action: F,
) where
    T: 'static,
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    spawn(async move {
        match action.await {
            Ok(()) => {
                error.set(None);
                reload.restart();
            }
            Err(e) => {
                tracing::error!("Admin action failed: {}", e);
                error.set(Some(report_error(auth, &e)));
            }
        }
    });
}
