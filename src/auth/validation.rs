use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::SignupRequest;
use crate::auth::record::Role;
use crate::error::AppError;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 24;
pub const PASSWORD_MIN: usize = 5;
pub const PASSWORD_MAX: usize = 24;

/// Signup fields after validation: trimmed, role parsed. The plaintext
/// password lives only until it is hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

// Outside letters, digits and underscore; the word-character complement.
fn is_special(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_')
}

fn fail(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// Checks signup fields in order and returns the first violated rule.
pub fn validate_signup(req: SignupRequest) -> Result<NewUser, AppError> {
    let username = req.username.as_deref().unwrap_or("").trim().to_string();
    if username.is_empty() {
        return Err(fail("username is required"));
    }
    let length = username.chars().count();
    if length < USERNAME_MIN || length > USERNAME_MAX {
        return Err(fail("username must be 3 to 24 characters"));
    }

    let email = req.email.as_deref().unwrap_or("").trim().to_string();
    if email.is_empty() {
        return Err(fail("email is required"));
    }
    if !is_valid_email(&email) {
        return Err(fail("email must be a valid email address"));
    }

    let role = match req.role.as_deref() {
        None | Some("") => return Err(fail("type is required")),
        Some(raw) => {
            Role::parse(raw).ok_or_else(|| fail("type must be either 'user' or 'admin'"))?
        }
    };

    let password = req.password.as_deref().unwrap_or("").trim().to_string();
    if password.is_empty() {
        return Err(fail("password is required"));
    }
    let length = password.chars().count();
    if length < PASSWORD_MIN || length > PASSWORD_MAX {
        return Err(fail("password must be 5 to 24 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(fail("password must contain a lowercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(fail("password must contain an uppercase letter"));
    }
    if !password.chars().any(is_special) {
        return Err(fail("password must contain a special character"));
    }

    Ok(NewUser {
        username,
        email,
        role,
        password,
    })
}
