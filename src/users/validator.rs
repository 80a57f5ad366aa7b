use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldError;

use super::store::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks a candidate record's fields. Every rule is evaluated, so all
/// failures come back together; an empty list means the record is valid.
/// Uniqueness is not checked here, the store enforces it at write time.
pub fn validate(user: &User) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if user.id.is_nil() {
        errors.push(FieldError {
            field: "id",
            message: "User ID cannot be empty.",
        });
    }

    if user.email.is_empty() {
        errors.push(FieldError {
            field: "email",
            message: "Email is required.",
        });
    } else if !is_valid_email(&user.email) {
        errors.push(FieldError {
            field: "email",
            message: "Incorrect Email format.",
        });
    }

    errors
}
