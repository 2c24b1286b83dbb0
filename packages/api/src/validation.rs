//! Per-form input checks run before any request is sent.

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Credit hours must be between 1 and 6")]
    CreditHours,
    #[error("Please select a department")]
    NoDepartment,
    #[error("Max points must be between 1 and 1000")]
    MaxPoints,
    #[error("Grade must be between 0 and {0}")]
    GradeRange(u32),
    #[error("Please write a response before submitting")]
    EmptySubmission,
    #[error("Points must be greater than zero")]
    Points,
    #[error("Please provide at least 2 options")]
    TooFewOptions,
    #[error("Please select the correct answer")]
    NoCorrectAnswer,
    #[error("Please add at least one question")]
    NoQuestions,
    #[error("Allow at least one attempt")]
    Attempts,
    #[error("Time limit must be a whole number of minutes")]
    TimeLimit,
    #[error("Passing score must be a percentage between 0 and 100")]
    PassingScore,
    #[error("Please select a program")]
    NoProgram,
    #[error("End date must be after the start date")]
    BatchDates,
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn email(value: &str) -> Result<(), ValidationError> {
    required(value, "Email")?;
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

fn password(value: &str) -> Result<(), ValidationError> {
    required(value, "Password")?;
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    required(email, "Email")?;
    required(password, "Password")
}

pub fn validate_signup(full_name: &str, email_addr: &str, pw: &str) -> Result<(), ValidationError> {
    required(full_name, "Full name")?;
    email(email_addr)?;
    password(pw)
}

pub fn validate_reset(pw: &str, confirm: &str) -> Result<(), ValidationError> {
    if pw != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    password(pw)
}

pub fn validate_new_user(full_name: &str, email_addr: &str, pw: &str) -> Result<(), ValidationError> {
    validate_signup(full_name, email_addr, pw)
}

/// An empty password keeps the current one.
pub fn validate_user_update(
    full_name: &str,
    email_addr: &str,
    pw: &str,
) -> Result<(), ValidationError> {
    required(full_name, "Full name")?;
    email(email_addr)?;
    if pw.is_empty() {
        Ok(())
    } else {
        password(pw)
    }
}

pub fn validate_course(
    title: &str,
    code: &str,
    credit_hours: i32,
    department_id: Option<i64>,
) -> Result<(), ValidationError> {
    required(title, "Title")?;
    required(code, "Course code")?;
    if !(1..=6).contains(&credit_hours) {
        return Err(ValidationError::CreditHours);
    }
    if department_id.is_none() {
        return Err(ValidationError::NoDepartment);
    }
    Ok(())
}

pub const MAX_ASSIGNMENT_POINTS: u32 = 1000;

/// `due_local` is the raw `datetime-local` value.
pub fn validate_assignment(
    title: &str,
    description: &str,
    due_local: &str,
    max_points: u32,
) -> Result<(), ValidationError> {
    required(title, "Title")?;
    required(description, "Description")?;
    required(due_local, "Due date")?;
    if !(1..=MAX_ASSIGNMENT_POINTS).contains(&max_points) {
        return Err(ValidationError::MaxPoints);
    }
    Ok(())
}

/// Parse a grade typed by the teacher; it must fall within `0..=max_points`.
pub fn parse_grade(input: &str, max_points: u32) -> Result<f64, ValidationError> {
    let grade: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::GradeRange(max_points))?;
    if !grade.is_finite() || grade < 0.0 || grade > f64::from(max_points) {
        return Err(ValidationError::GradeRange(max_points));
    }
    Ok(grade)
}

pub fn validate_submission(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        Err(ValidationError::EmptySubmission)
    } else {
        Ok(())
    }
}

/// Dates are `YYYY-MM-DD` from a date input; the end date is optional.
pub fn validate_batch(
    name: &str,
    program_id: Option<i64>,
    start_day: &str,
    end_day: &str,
) -> Result<(), ValidationError> {
    required(name, "Batch name")?;
    if program_id.is_none() {
        return Err(ValidationError::NoProgram);
    }
    required(start_day, "Start date")?;
    let end_day = end_day.trim();
    if !end_day.is_empty() && end_day <= start_day.trim() {
        return Err(ValidationError::BatchDates);
    }
    Ok(())
}

pub fn validate_announcement(title: &str, content: &str) -> Result<(), ValidationError> {
    required(title, "Title")?;
    required(content, "Content")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Medium => "Medium",
            PasswordStrength::Strong => "Strong",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "strength strength-weak",
            PasswordStrength::Medium => "strength strength-medium",
            PasswordStrength::Strong => "strength strength-strong",
        }
    }
}

pub fn password_strength(password: &str) -> PasswordStrength {
    match password.chars().count() {
        0..=7 => PasswordStrength::Weak,
        8..=11 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both() {
        assert_eq!(
            validate_login("", "secret"),
            Err(ValidationError::Required("Email"))
        );
        assert_eq!(
            validate_login("a@b.c", "  "),
            Err(ValidationError::Required("Password"))
        );
        assert!(validate_login("a@b.c", "x").is_ok());
    }

    #[test]
    fn test_signup() {
        assert_eq!(
            validate_signup(" ", "a@b.c", "secret1"),
            Err(ValidationError::Required("Full name"))
        );
        assert_eq!(
            validate_signup("Ann", "ann.example.com", "secret1"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_signup("Ann", "ann@", "secret1"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_signup("Ann", "ann@example.com", "12345"),
            Err(ValidationError::PasswordTooShort)
        );
        assert!(validate_signup("Ann", "ann@example.com", "123456").is_ok());
    }

    #[test]
    fn test_reset() {
        assert_eq!(
            validate_reset("abcdef", "abcdeg"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_reset("abc", "abc"),
            Err(ValidationError::PasswordTooShort)
        );
        assert!(validate_reset("abcdef", "abcdef").is_ok());
    }

    #[test]
    fn test_update_password_optional() {
        assert!(validate_user_update("Ann", "ann@x.io", "").is_ok());
        assert_eq!(
            validate_user_update("Ann", "ann@x.io", "abc"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_new_user("Ann", "ann@x.io", ""),
            Err(ValidationError::Required("Password"))
        );
    }

    #[test]
    fn test_course() {
        assert!(validate_course("Intro", "CS101", 3, Some(1)).is_ok());
        assert_eq!(
            validate_course("", "CS101", 3, Some(1)),
            Err(ValidationError::Required("Title"))
        );
        assert_eq!(
            validate_course("Intro", "CS101", 0, Some(1)),
            Err(ValidationError::CreditHours)
        );
        assert_eq!(
            validate_course("Intro", "CS101", 7, Some(1)),
            Err(ValidationError::CreditHours)
        );
        assert_eq!(
            validate_course("Intro", "CS101", 6, None),
            Err(ValidationError::NoDepartment)
        );
    }

    #[test]
    fn test_strength_tiers() {
        assert_eq!(password_strength("1234567"), PasswordStrength::Weak);
        assert_eq!(password_strength("12345678"), PasswordStrength::Medium);
        assert_eq!(password_strength("12345678901"), PasswordStrength::Medium);
        assert_eq!(password_strength("123456789012"), PasswordStrength::Strong);
        assert_eq!(
            ValidationError::Required("Email").to_string(),
            "Email is required"
        );
    }

    #[test]
    fn test_assignment() {
        assert!(validate_assignment("Essay", "Write it", "2024-05-01T09:00", 100).is_ok());
        assert_eq!(
            validate_assignment("Essay", "Write it", "", 100),
            Err(ValidationError::Required("Due date"))
        );
        assert_eq!(
            validate_assignment("Essay", "Write it", "2024-05-01T09:00", 0),
            Err(ValidationError::MaxPoints)
        );
        assert_eq!(
            validate_assignment("Essay", "Write it", "2024-05-01T09:00", 1001),
            Err(ValidationError::MaxPoints)
        );
    }

    #[test]
    fn test_grade_bounds() {
        assert_eq!(parse_grade("17.5", 20), Ok(17.5));
        assert_eq!(parse_grade(" 0 ", 20), Ok(0.0));
        assert_eq!(parse_grade("20", 20), Ok(20.0));
        assert_eq!(parse_grade("20.5", 20), Err(ValidationError::GradeRange(20)));
        assert_eq!(parse_grade("-1", 20), Err(ValidationError::GradeRange(20)));
        assert_eq!(parse_grade("abc", 20), Err(ValidationError::GradeRange(20)));
        assert_eq!(parse_grade("NaN", 20), Err(ValidationError::GradeRange(20)));
        assert_eq!(
            ValidationError::GradeRange(20).to_string(),
            "Grade must be between 0 and 20"
        );
    }

    #[test]
    fn test_submission_and_announcement() {
        assert_eq!(validate_submission("  \n"), Err(ValidationError::EmptySubmission));
        assert!(validate_submission("my answer").is_ok());
        assert_eq!(
            validate_announcement("Exam moved", " "),
            Err(ValidationError::Required("Content"))
        );
    }

    #[test]
    fn test_batch() {
        assert_eq!(
            validate_batch("Fall", None, "2024-09-01", ""),
            Err(ValidationError::NoProgram)
        );
        assert_eq!(
            validate_batch("Fall", Some(1), "", ""),
            Err(ValidationError::Required("Start date"))
        );
        assert_eq!(
            validate_batch("Fall", Some(1), "2024-09-01", "2024-09-01"),
            Err(ValidationError::BatchDates)
        );
        assert!(validate_batch("Fall", Some(1), "2024-09-01", "").is_ok());
        assert!(validate_batch("Fall", Some(1), "2024-09-01", "2028-06-30").is_ok());
    }
}
