//! Unread-count badge with a dropdown of recent notifications.
//!
//! The count is polled every `notifications.poll_interval_secs`; a zero
//! interval loads it once and never polls. The poll task lives in the
//! component scope and stops when the bell unmounts (i.e. on sign-out).

use std::time::Duration;

use api::{notification_icon, relative_time, unread_badge, ApiError, Notification};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaBell;
use dioxus_free_icons::Icon;

use crate::auth::{report_error, use_api, use_auth, use_settings};
use crate::platform;

#[component]
pub fn NotificationBell(
    /// Called with a notification's link after it is opened.
    #[props(default)]
    on_navigate: EventHandler<String>,
) -> Element {
    let api = use_api();
    let auth = use_auth();
    let settings = use_settings();
    let mut unread = use_signal(|| 0u32);
    let mut open = use_signal(|| false);
    let mut items = use_signal(Vec::<Notification>::new);
    let mut loading = use_signal(|| false);

    let poll_api = api.clone();
    let poll_secs = settings.notifications.poll_interval_secs;
    use_hook(move || {
        spawn(async move {
            loop {
                let result = poll_api.unread_count().await;
                let failure = result.as_ref().err();
                match &result {
                    Ok(count) => unread.set(*count),
                    Err(e) => {
                        tracing::warn!("Failed to fetch unread count: {}", e);
                        report_error(auth, e);
                    }
                }
                if !keep_polling(poll_secs, failure) {
                    break;
                }
                platform::sleep(Duration::from_secs(poll_secs)).await;
            }
        })
    });

    let page_size = settings.notifications.page_size;
    let toggle = {
        let api = api.clone();
        move |_| {
            let now_open = !open();
            open.set(now_open);
            if !now_open {
                return;
            }
            let api = api.clone();
            loading.set(true);
            spawn(async move {
                match api.notifications(page_size).await {
                    Ok(list) => items.set(list),
                    Err(e) => {
                        tracing::warn!("Failed to load notifications: {}", e);
                        report_error(auth, &e);
                    }
                }
                loading.set(false);
            });
        }
    };

    let open_notification = {
        let api = api.clone();
        move |notification: Notification| {
            let api = api.clone();
            spawn(async move {
                if !notification.is_read {
                    match api.mark_read(notification.id).await {
                        Ok(()) => {
                            for item in items.write().iter_mut() {
                                if item.id == notification.id {
                                    item.is_read = true;
                                }
                            }
                            let current = unread();
                            unread.set(current.saturating_sub(1));
                        }
                        Err(e) => {
                            tracing::warn!("Failed to mark notification read: {}", e);
                            report_error(auth, &e);
                        }
                    }
                }
                if let Some(link) = notification.link {
                    open.set(false);
                    on_navigate.call(link);
                }
            });
        }
    };

    let mark_all = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn(async move {
                match api.mark_all_read().await {
                    Ok(()) => {
                        for item in items.write().iter_mut() {
                            item.is_read = true;
                        }
                        unread.set(0);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to mark all read: {}", e);
                        report_error(auth, &e);
                    }
                }
            });
        }
    };

    let badge = unread_badge(unread());
    let now = chrono::Utc::now();

    rsx! {
        div {
            class: "bell",
            button {
                class: "btn btn-ghost btn-icon bell-button",
                title: "Notifications",
                onclick: toggle,
                Icon { icon: FaBell, width: 18, height: 18 }
                if let Some(label) = badge {
                    span { class: "bell-badge", "{label}" }
                }
            }
            if open() {
                div {
                    class: "bell-backdrop",
                    onclick: move |_| open.set(false),
                }
                div {
                    class: "bell-dropdown",
                    div {
                        class: "bell-header",
                        h3 { "Notifications" }
                        if unread() > 0 {
                            button { class: "link-button", onclick: mark_all, "Mark all as read" }
                        }
                    }
                    if loading() {
                        div { class: "bell-empty", "Loading..." }
                    } else if items.read().is_empty() {
                        div { class: "bell-empty", "No notifications yet" }
                    } else {
                        ul {
                            class: "bell-list",
                            for notification in items.read().iter().cloned() {
                                li {
                                    key: "{notification.id}",
                                    class: if notification.is_read { "bell-item" } else { "bell-item unread" },
                                    onclick: {
                                        let open_notification = open_notification.clone();
                                        let notification = notification.clone();
                                        move |_| open_notification(notification.clone())
                                    },
                                    span { class: "bell-icon", "{notification_icon(&notification.notification_type)}" }
                                    div {
                                        class: "bell-text",
                                        p { class: "bell-title", "{notification.title}" }
                                        if !notification.content.is_empty() {
                                            p { class: "bell-content", "{notification.content}" }
                                        }
                                        p { class: "bell-time", "{relative_time(&notification.created_at, now)}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Whether the unread-count loop should go round again after a fetch.
/// A rejected token ends it; other failures are retried on the next tick.
fn keep_polling(poll_secs: u64, failure: Option<&ApiError>) -> bool {
    poll_secs > 0 && !failure.is_some_and(ApiError::is_unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_polling() {
        assert!(keep_polling(60, None));
        assert!(keep_polling(60, Some(&ApiError::Network("offline".into()))));
        assert!(!keep_polling(0, None));
    }

    #[test]
    fn test_rejected_token_stops_polling() {
        let err = ApiError::from_status(401, r#"{"detail":"Could not validate credentials"}"#);
        assert!(!keep_polling(60, Some(&err)));
    }
}
