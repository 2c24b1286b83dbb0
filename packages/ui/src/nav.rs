//! Role-based navigation.
//!
//! [`menu_for`] is the single source of which pages a role may reach from the
//! menu; [`RoleNav`] renders it and leaves routing to the caller.

use api::Role;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{
    FaAward, FaBook, FaBuilding, FaBullhorn, FaCalendarCheck, FaChalkboardUser, FaClipboardList,
    FaFileLines, FaGauge, FaLayerGroup, FaUser, FaUserGraduate, FaUsers,
};
use dioxus_free_icons::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Dashboard,
    Courses,
    Assignments,
    Quizzes,
    Grades,
    Announcements,
    Attendance,
    Sections,
    Users,
    Academic,
    Allocations,
    Batches,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: MenuIcon,
}

const fn item(label: &'static str, path: &'static str, icon: MenuIcon) -> MenuItem {
    MenuItem { label, path, icon }
}

const STUDENT_MENU: &[MenuItem] = &[
    item("Dashboard", "/dashboard", MenuIcon::Dashboard),
    item("Courses", "/courses", MenuIcon::Courses),
    item("My Assignments", "/my-assignments", MenuIcon::Assignments),
    item("My Quizzes", "/my-quizzes", MenuIcon::Quizzes),
    item("My Grades", "/my-grades", MenuIcon::Grades),
    item("Announcements", "/announcements", MenuIcon::Announcements),
    item("My Attendance", "/my-attendance", MenuIcon::Attendance),
    item("Profile", "/profile", MenuIcon::Profile),
];

const TEACHER_MENU: &[MenuItem] = &[
    item("Dashboard", "/dashboard", MenuIcon::Dashboard),
    item("My Sections", "/teacher/sections", MenuIcon::Sections),
    item("Assignments", "/teacher/assignments", MenuIcon::Assignments),
    item("Quizzes", "/teacher/quizzes", MenuIcon::Quizzes),
    item("Announcements", "/teacher/announcements", MenuIcon::Announcements),
    item("Take Attendance", "/take-attendance", MenuIcon::Attendance),
    item("Courses", "/courses", MenuIcon::Courses),
    item("Profile", "/profile", MenuIcon::Profile),
];

const ADMIN_MENU: &[MenuItem] = &[
    item("Dashboard", "/admin", MenuIcon::Dashboard),
    item("User Management", "/admin/users", MenuIcon::Users),
    item("Course Management", "/admin/courses", MenuIcon::Courses),
    item("Academic Structure", "/admin/academic", MenuIcon::Academic),
    item("Course Allocations", "/admin/allocations", MenuIcon::Allocations),
    item("Batches", "/admin/batches", MenuIcon::Batches),
    item("Profile", "/profile", MenuIcon::Profile),
];

pub fn menu_for(role: Role) -> &'static [MenuItem] {
    match role {
        Role::Student => STUDENT_MENU,
        Role::Teacher => TEACHER_MENU,
        Role::Admin => ADMIN_MENU,
    }
}

/// Where a role lands after signing in.
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Student | Role::Teacher => "/dashboard",
    }
}

/// Whether the entry is highlighted for `current`: an exact match, or a child
/// page such as `/courses/12` under `/courses`.
pub fn is_active(item: &MenuItem, current: &str) -> bool {
    if item.path == current {
        return true;
    }
    // "/admin" must not light up for every admin page
    item.path != "/admin"
        && current
            .strip_prefix(item.path)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn icon_for(icon: MenuIcon) -> Element {
    match icon {
        MenuIcon::Dashboard => rsx! { Icon { icon: FaGauge, width: 16, height: 16 } },
        MenuIcon::Courses => rsx! { Icon { icon: FaBook, width: 16, height: 16 } },
        MenuIcon::Assignments => rsx! { Icon { icon: FaFileLines, width: 16, height: 16 } },
        MenuIcon::Quizzes => rsx! { Icon { icon: FaClipboardList, width: 16, height: 16 } },
        MenuIcon::Grades => rsx! { Icon { icon: FaAward, width: 16, height: 16 } },
        MenuIcon::Announcements => rsx! { Icon { icon: FaBullhorn, width: 16, height: 16 } },
        MenuIcon::Attendance => rsx! { Icon { icon: FaCalendarCheck, width: 16, height: 16 } },
        MenuIcon::Sections => rsx! { Icon { icon: FaChalkboardUser, width: 16, height: 16 } },
        MenuIcon::Users => rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
        MenuIcon::Academic => rsx! { Icon { icon: FaBuilding, width: 16, height: 16 } },
        MenuIcon::Allocations => rsx! { Icon { icon: FaLayerGroup, width: 16, height: 16 } },
        MenuIcon::Batches => rsx! { Icon { icon: FaUserGraduate, width: 16, height: 16 } },
        MenuIcon::Profile => rsx! { Icon { icon: FaUser, width: 16, height: 16 } },
    }
}

/// Side menu for the signed-in role.
#[component]
pub fn RoleNav(role: Role, current_path: String, on_navigate: EventHandler<String>) -> Element {
    rsx! {
        nav {
            class: "role-nav",
            for entry in menu_for(role).iter().copied() {
                button {
                    key: "{entry.path}",
                    class: if is_active(&entry, &current_path) { "role-nav-item active" } else { "role-nav-item" },
                    onclick: move |_| on_navigate.call(entry.path.to_string()),
                    {icon_for(entry.icon)}
                    span { "{entry.label}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menus_are_role_scoped() {
        let student: Vec<_> = menu_for(Role::Student).iter().map(|i| i.path).collect();
        assert!(student.contains(&"/my-quizzes"));
        assert!(student.contains(&"/my-assignments"));
        assert!(student.contains(&"/my-grades"));
        assert!(student.iter().all(|p| !p.starts_with("/admin")));
        assert!(student.iter().all(|p| !p.starts_with("/teacher")));
        assert!(!student.contains(&"/take-attendance"));

        let teacher: Vec<_> = menu_for(Role::Teacher).iter().map(|i| i.path).collect();
        assert!(teacher.contains(&"/take-attendance"));
        assert!(teacher.contains(&"/teacher/assignments"));
        assert!(teacher.contains(&"/teacher/quizzes"));
        assert!(teacher.contains(&"/teacher/announcements"));
        assert!(!teacher.contains(&"/my-assignments"));
        assert!(teacher.iter().all(|p| !p.starts_with("/admin")));
        assert!(!teacher.contains(&"/my-quizzes"));

        let admin: Vec<_> = menu_for(Role::Admin).iter().map(|i| i.path).collect();
        assert!(admin.contains(&"/admin/users"));
        assert!(admin.contains(&"/admin/batches"));
        assert!(!admin.contains(&"/my-attendance"));
    }

    #[test]
    fn test_home_for() {
        assert_eq!(home_for(Role::Admin), "/admin");
        assert_eq!(home_for(Role::Teacher), "/dashboard");
        assert_eq!(home_for(Role::Student), "/dashboard");
    }

    #[test]
    fn test_active_matching() {
        let admin_home = menu_for(Role::Admin)[0];
        let users = menu_for(Role::Admin)[1];
        assert!(is_active(&admin_home, "/admin"));
        assert!(!is_active(&admin_home, "/admin/users"));
        assert!(is_active(&users, "/admin/users"));

        let courses = menu_for(Role::Student)[1];
        assert!(is_active(&courses, "/courses/12"));
        assert!(!is_active(&courses, "/coursesx"));
    }
}
