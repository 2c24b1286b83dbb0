use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub creator_name: Option<String>,
}

impl Announcement {
    /// Body that re-posts this announcement with the pin flipped.
    pub fn toggled_pin(&self) -> NewAnnouncement {
        NewAnnouncement {
            course_id: self.course_id,
            title: self.title.clone(),
            content: self.content.clone(),
            is_pinned: !self.is_pinned,
        }
    }

    pub fn to_draft(&self) -> NewAnnouncement {
        NewAnnouncement {
            course_id: self.course_id,
            title: self.title.clone(),
            content: self.content.clone(),
            is_pinned: self.is_pinned,
        }
    }
}

/// Body for `POST /announcements/` and `PUT /announcements/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewAnnouncement {
    pub course_id: i64,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
}

/// Pinned first, then newest first.
pub fn sort_announcements(list: &mut [Announcement]) {
    list.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, pinned: bool, at: &str) -> Announcement {
        Announcement {
            id,
            course_id: 1,
            title: format!("Post {}", id),
            content: String::new(),
            created_by: Some(2),
            is_pinned: pinned,
            created_at: at.to_string(),
            creator_name: None,
        }
    }

    #[test]
    fn test_pinned_then_newest() {
        let mut list = vec![
            post(1, false, "2024-01-01T09:00:00"),
            post(2, true, "2023-12-01T09:00:00"),
            post(3, false, "2024-02-01T09:00:00"),
            post(4, true, "2024-01-15T09:00:00"),
        ];
        sort_announcements(&mut list);
        let ids: Vec<i64> = list.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_toggled_pin_keeps_text() {
        let body = post(5, false, "2024-01-01T00:00:00").toggled_pin();
        assert!(body.is_pinned);
        assert_eq!(body.title, "Post 5");
        assert_eq!(body.course_id, 1);
    }
}
