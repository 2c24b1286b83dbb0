use api::{format_local, sort_announcements, Announcement, ApiClient, ApiError};
use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner};
use ui::{render_markdown, report_error, use_api, use_auth};

#[derive(Debug, Clone, PartialEq)]
struct CourseAnnouncements {
    course_id: i64,
    course_title: String,
    posts: Vec<Announcement>,
}

async fn load_feed(api: &ApiClient, user_id: i64) -> Result<Vec<CourseAnnouncements>, ApiError> {
    let mut feed = Vec::new();
    for enrollment in api.user_enrollments(user_id).await? {
        let mut posts = match api.course_announcements(enrollment.course_id).await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Failed to load announcements for {}: {}", enrollment.course_title, e);
                continue;
            }
        };
        sort_announcements(&mut posts);
        feed.push(CourseAnnouncements {
            course_id: enrollment.course_id,
            course_title: enrollment.course_title,
            posts,
        });
    }
    Ok(feed)
}

/// Courses with posts come first, in enrolment order; the rest keep a
/// placeholder.
fn order_feed(feed: &mut [CourseAnnouncements]) {
    feed.sort_by_key(|course| course.posts.is_empty());
}

#[component]
pub fn StudentAnnouncements() -> Element {
    let auth = use_auth();
    let api = use_api();
    let user_id = auth().user.map(|u| u.id).unwrap_or_default();

    let feed = use_resource(move || {
        let api = api.clone();
        async move {
            let mut feed = load_feed(&api, user_id)
                .await
                .map_err(|e| report_error(auth, &e))?;
            order_feed(&mut feed);
            Ok::<_, String>(feed)
        }
    });

    let body = match &*feed.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(courses)) if courses.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Courses" } p { "Enroll in a course to see its announcements." } }
        },
        Some(Ok(courses)) => rsx! {
            div {
                class: "stack",
                for course in courses.iter().cloned() {
                    section {
                        key: "{course.course_id}",
                        class: "announcement-course",
                        h2 { "{course.course_title}" }
                        if course.posts.is_empty() {
                            p { class: "text-muted", "No announcements yet." }
                        }
                        for post in course.posts.iter().cloned() {
                            AnnouncementPost { key: "{post.id}", post }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "Announcements", subtitle: "News from your courses" }
            {body}
        }
    }
}

#[component]
fn AnnouncementPost(post: Announcement) -> Element {
    let html = render_markdown(&post.content);
    let byline = match &post.creator_name {
        Some(name) => format!("{} - {}", name, format_local(&post.created_at)),
        None => format_local(&post.created_at),
    };

    rsx! {
        div {
            class: if post.is_pinned { "card announcement pinned" } else { "card announcement" },
            div {
                class: "spread",
                h3 { class: "card-title", "{post.title}" }
                if post.is_pinned {
                    span { class: "badge badge-primary", "Pinned" }
                }
            }
            p { class: "text-muted", "{byline}" }
            div { class: "markdown-body", dangerous_inner_html: "{html}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, posts: usize) -> CourseAnnouncements {
        CourseAnnouncements {
            course_id: id,
            course_title: format!("C{}", id),
            posts: (0..posts)
                .map(|i| Announcement {
                    id: i as i64,
                    course_id: id,
                    title: "Hi".into(),
                    content: String::new(),
                    created_by: None,
                    is_pinned: false,
                    created_at: String::new(),
                    creator_name: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_quiet_courses_sink() {
        let mut feed = vec![course(1, 0), course(2, 2), course(3, 0), course(4, 1)];
        order_feed(&mut feed);
        let ids: Vec<i64> = feed.iter().map(|c| c.course_id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }
}
