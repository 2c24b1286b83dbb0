//! One method per backend endpoint, grouped by router.

use reqwest::Method;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::*;

// --- auth ---

impl ApiClient {
    /// OAuth2 password flow: form-encoded `username` + `password`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let form = [("username", email), ("password", password)];
        self.send(
            self.request(Method::POST, "/auth/token").form(&form),
            "POST /auth/token",
        )
        .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<User, ApiError> {
        self.post_json("/auth/signup", request).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Message, ApiError> {
        self.post_json("/auth/forgot-password", &json!({ "email": email }))
            .await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Message, ApiError> {
        self.post_json(
            "/auth/reset-password",
            &json!({ "token": token, "new_password": new_password }),
        )
        .await
    }
}

// --- courses ---

impl ApiClient {
    pub async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get("/courses/").await
    }

    pub async fn get_course(&self, id: i64) -> Result<Course, ApiError> {
        self.get(&format!("/courses/{}", id)).await
    }

    pub async fn create_course(&self, course: &NewCourse) -> Result<Course, ApiError> {
        self.post_json("/courses/", course).await
    }

    pub async fn enroll(&self, course_id: i64) -> Result<(), ApiError> {
        let path = format!("/courses/{}/enroll", course_id);
        self.send_empty(self.request(Method::POST, &path), &format!("POST {}", path))
            .await
    }

    pub async fn unenroll(&self, course_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/courses/{}/enroll", course_id)).await
    }

    pub async fn user_enrollments(&self, user_id: i64) -> Result<Vec<Enrollment>, ApiError> {
        self.get(&format!("/users/{}/enrollments", user_id)).await
    }
}

// --- admin ---

impl ApiClient {
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get("/admin/stats").await
    }

    pub async fn admin_users(&self, role: Option<Role>) -> Result<Vec<User>, ApiError> {
        match role {
            Some(role) => self.get(&format!("/admin/users?role={}", role)).await,
            None => self.get("/admin/users").await,
        }
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post_json("/admin/users", user).await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        self.patch_json(&format!("/admin/users/{}", id), update).await
    }

    pub async fn toggle_user_active(&self, id: i64) -> Result<User, ApiError> {
        self.patch_json(&format!("/admin/users/{}/toggle-active", id), &json!({}))
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/users/{}", id)).await
    }

    pub async fn admin_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.get("/admin/courses").await
    }

    pub async fn admin_create_course(&self, course: &NewCourse) -> Result<Course, ApiError> {
        self.post_json("/admin/courses", course).await
    }

    pub async fn admin_update_course(&self, id: i64, course: &NewCourse) -> Result<Course, ApiError> {
        self.patch_json(&format!("/admin/courses/{}", id), course)
            .await
    }

    pub async fn approve_course(&self, id: i64) -> Result<Course, ApiError> {
        self.patch_json(&format!("/admin/courses/{}/approve", id), &json!({}))
            .await
    }

    pub async fn toggle_publish(&self, id: i64) -> Result<Course, ApiError> {
        self.patch_json(&format!("/admin/courses/{}/toggle-publish", id), &json!({}))
            .await
    }

    pub async fn delete_course(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/courses/{}", id)).await
    }

    pub async fn create_department(&self, body: &NewDepartment) -> Result<Department, ApiError> {
        self.post_json("/admin/departments", body).await
    }

    pub async fn create_program(&self, body: &NewProgram) -> Result<Program, ApiError> {
        self.post_json("/admin/programs", body).await
    }

    pub async fn create_semester(&self, body: &NewSemester) -> Result<Semester, ApiError> {
        self.post_json("/admin/semesters", body).await
    }

    pub async fn create_section(&self, body: &NewSection) -> Result<Section, ApiError> {
        self.post_json("/admin/sections", body).await
    }

    pub async fn delete_academic(&self, kind: AcademicKind, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/{}/{}", kind.path(), id)).await
    }

    pub async fn admin_batches(&self, program_id: Option<i64>) -> Result<Vec<Batch>, ApiError> {
        match program_id {
            Some(id) => self.get(&format!("/admin/batches?program_id={}", id)).await,
            None => self.get("/admin/batches").await,
        }
    }

    pub async fn create_batch(&self, body: &NewBatch) -> Result<Batch, ApiError> {
        self.post_json("/admin/batches", body).await
    }

    pub async fn update_batch(&self, id: i64, body: &NewBatch) -> Result<Batch, ApiError> {
        self.patch_json(&format!("/admin/batches/{}", id), body).await
    }

    /// The backend answers with a message, not the batch.
    pub async fn toggle_batch_active(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/admin/batches/{}/toggle-active", id);
        self.send_empty(self.request(Method::PATCH, &path), &format!("PATCH {}", path))
            .await
    }

    /// Refused by the backend while students belong to the batch.
    pub async fn delete_batch(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/batches/{}", id)).await
    }

    pub async fn assign_teacher(&self, section_id: i64, teacher_id: i64) -> Result<(), ApiError> {
        let path = format!("/admin/sections/{}/assign-teacher/{}", section_id, teacher_id);
        self.send_empty(self.request(Method::POST, &path), &format!("POST {}", path))
            .await
    }
}

// --- academic ---

impl ApiClient {
    pub async fn departments(&self) -> Result<Vec<Department>, ApiError> {
        self.get("/academic/departments").await
    }

    pub async fn programs(&self) -> Result<Vec<Program>, ApiError> {
        self.get("/academic/programs").await
    }

    pub async fn semesters(&self) -> Result<Vec<Semester>, ApiError> {
        self.get("/academic/semesters").await
    }

    pub async fn sections(&self) -> Result<Vec<Section>, ApiError> {
        self.get("/academic/sections").await
    }
}

// --- quizzes ---

impl ApiClient {
    pub async fn get_quiz(&self, id: i64) -> Result<Quiz, ApiError> {
        self.get(&format!("/quizzes/{}", id)).await
    }

    pub async fn start_quiz(&self, id: i64) -> Result<QuizAttempt, ApiError> {
        let path = format!("/quizzes/{}/start", id);
        self.send(self.request(Method::POST, &path), &format!("POST {}", path))
            .await
    }

    pub async fn submit_quiz(
        &self,
        quiz_id: i64,
        attempt_id: i64,
        answers: &Answers,
    ) -> Result<QuizAttempt, ApiError> {
        let body = SubmitAnswers {
            answers: answers.clone(),
        };
        self.post_json(&format!("/quizzes/{}/submit/{}", quiz_id, attempt_id), &body)
            .await
    }

    pub async fn attempt_results(&self, attempt_id: i64) -> Result<AttemptResults, ApiError> {
        self.get(&format!("/quizzes/attempt/{}/results", attempt_id))
            .await
    }

    pub async fn course_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>, ApiError> {
        self.get(&format!("/quizzes/course/{}", course_id)).await
    }

    pub async fn my_attempts(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>, ApiError> {
        self.get(&format!("/quizzes/{}/my-attempts", quiz_id)).await
    }

    pub async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, ApiError> {
        self.post_json("/quizzes/", quiz).await
    }

    pub async fn delete_quiz(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/quizzes/{}", id)).await
    }

    /// Every student's attempts; teachers and admins only.
    pub async fn quiz_attempts(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>, ApiError> {
        self.get(&format!("/quizzes/{}/attempts", quiz_id)).await
    }
}

// --- assignments ---

impl ApiClient {
    pub async fn course_assignments(&self, course_id: i64) -> Result<Vec<Assignment>, ApiError> {
        self.get(&format!("/assignments/course/{}", course_id)).await
    }

    pub async fn create_assignment(&self, body: &NewAssignment) -> Result<Assignment, ApiError> {
        self.post_json("/assignments/", body).await
    }

    /// The signed-in student's submission; the backend answers 404 for none.
    pub async fn my_submission(&self, assignment_id: i64) -> Result<Option<Submission>, ApiError> {
        match self
            .get(&format!("/assignments/{}/my-submission", assignment_id))
            .await
        {
            Ok(submission) => Ok(Some(submission)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Written submissions only; `content` travels as a query parameter.
    pub async fn submit_assignment(
        &self,
        assignment_id: i64,
        content: &str,
    ) -> Result<Submission, ApiError> {
        let path = format!("/assignments/{}/submit", assignment_id);
        self.send(
            self.request(Method::POST, &path).query(&[("content", content)]),
            &format!("POST {}", path),
        )
        .await
    }

    pub async fn assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>, ApiError> {
        self.get(&format!("/assignments/{}/submissions", assignment_id))
            .await
    }

    pub async fn grade_submission(
        &self,
        submission_id: i64,
        body: &GradeSubmission,
    ) -> Result<Submission, ApiError> {
        self.post_json(
            &format!("/assignments/submissions/{}/grade", submission_id),
            body,
        )
        .await
    }
}

// --- announcements ---

impl ApiClient {
    pub async fn course_announcements(&self, course_id: i64) -> Result<Vec<Announcement>, ApiError> {
        self.get(&format!("/announcements/course/{}", course_id)).await
    }

    pub async fn create_announcement(
        &self,
        body: &NewAnnouncement,
    ) -> Result<Announcement, ApiError> {
        self.post_json("/announcements/", body).await
    }

    pub async fn update_announcement(
        &self,
        id: i64,
        body: &NewAnnouncement,
    ) -> Result<Announcement, ApiError> {
        self.put_json(&format!("/announcements/{}", id), body).await
    }

    pub async fn delete_announcement(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/announcements/{}", id)).await
    }
}

// --- gradebook ---

impl ApiClient {
    pub async fn course_gradebook(&self, course_id: i64) -> Result<Gradebook, ApiError> {
        self.get(&format!("/gradebook/course/{}", course_id)).await
    }
}

// --- attendance ---

impl ApiClient {
    pub async fn my_attendance_records(
        &self,
        section_id: Option<i64>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        match section_id {
            Some(id) => self.get(&format!("/attendance/my-records?section_id={}", id)).await,
            None => self.get("/attendance/my-records").await,
        }
    }

    pub async fn my_enrollments(&self) -> Result<Vec<EnrolledSection>, ApiError> {
        self.get("/attendance/my-enrollments").await
    }

    pub async fn attendance_summary(
        &self,
        student_id: i64,
        section_id: Option<i64>,
    ) -> Result<AttendanceSummary, ApiError> {
        let mut path = format!("/attendance/students/{}/summary", student_id);
        if let Some(id) = section_id {
            path.push_str(&format!("?section_id={}", id));
        }
        self.get(&path).await
    }

    /// Sections the signed-in teacher takes attendance for.
    pub async fn attendance_sections(&self) -> Result<Vec<EnrolledSection>, ApiError> {
        self.get("/attendance/my-sections").await
    }

    pub async fn section_students(&self, section_id: i64) -> Result<Vec<SectionStudent>, ApiError> {
        self.get(&format!("/attendance/sections/{}/students", section_id))
            .await
    }

    /// Records for one `YYYY-MM-DD` day.
    pub async fn section_records(
        &self,
        section_id: i64,
        day: &str,
    ) -> Result<Vec<SectionAttendanceEntry>, ApiError> {
        self.get(&format!(
            "/attendance/sections/{}/records?date={}",
            section_id,
            midnight(day)
        ))
        .await
    }

    pub async fn mark_attendance(
        &self,
        section_id: i64,
        request: &MarkAttendance,
    ) -> Result<(), ApiError> {
        let path = format!("/attendance/sections/{}/mark", section_id);
        self.send_empty(
            self.request(Method::POST, &path).json(request),
            &format!("POST {}", path),
        )
        .await
    }
}

// --- notifications ---

impl ApiClient {
    pub async fn notifications(&self, limit: u32) -> Result<Vec<Notification>, ApiError> {
        self.get(&format!("/notifications/?limit={}", limit)).await
    }

    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        let count: UnreadCount = self.get("/notifications/unread-count").await?;
        Ok(count.count)
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/notifications/{}/mark-read", id);
        self.send_empty(self.request(Method::POST, &path), &format!("POST {}", path))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.send_empty(
            self.request(Method::POST, "/notifications/mark-all-read"),
            "POST /notifications/mark-all-read",
        )
        .await
    }
}

// --- teacher ---

impl ApiClient {
    pub async fn teacher_dashboard(&self) -> Result<TeacherDashboard, ApiError> {
        self.get("/teacher/dashboard").await
    }

    pub async fn teacher_sections(&self) -> Result<Vec<TeacherSection>, ApiError> {
        self.get("/teacher/sections").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_is_form_encoded() {
        let client = ApiClient::new("http://api.test");
        let form = [("username", "a@b.c"), ("password", "p&ss word")];
        let req = client
            .request(Method::POST, "/auth/token")
            .form(&form)
            .build()
            .unwrap();
        assert_eq!(
            req.headers()["content-type"],
            "application/x-www-form-urlencoded"
        );
        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "username=a%40b.c&password=p%26ss+word"
        );
    }

    #[test]
    fn test_submit_body_shape() {
        let mut answers = Answers::new();
        answers.insert("12".into(), "1".into());
        answers.insert("13".into(), "false".into());
        let body = serde_json::to_value(SubmitAnswers { answers }).unwrap();
        assert_eq!(body["answers"]["12"], "1");
        assert_eq!(body["answers"]["13"], "false");
    }

    #[test]
    fn test_written_submission_goes_in_query() {
        let client = ApiClient::new("http://api.test");
        let req = client
            .request(Method::POST, "/assignments/3/submit")
            .query(&[("content", "x = 1 & y")])
            .build()
            .unwrap();
        assert_eq!(req.url().query(), Some("content=x+%3D+1+%26+y"));
        assert!(req.body().is_none());
    }

    #[test]
    fn test_admin_users_role_filter_path() {
        let client = ApiClient::new("http://api.test");
        let req = client
            .request(Method::GET, &format!("/admin/users?role={}", Role::Teacher))
            .build()
            .unwrap();
        assert_eq!(req.url().query(), Some("role=teacher"));
    }
}
