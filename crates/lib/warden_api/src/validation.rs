//! Request field validation.

use regex::Regex;

use crate::error::{AppError, AppResult};

/// Collects field errors and reports them together.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field must contain a non-whitespace character.
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{field} is required"));
        }
        self
    }

    /// The field must be present and look like an email address.
    pub fn email(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{field} is required"));
        } else if !valid_email(value) {
            self.errors.push(format!("{field} must be a valid email address"));
        }
        self
    }

    pub fn finish(self) -> AppResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors.join("; ")))
        }
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(valid_email("a@x.com"));
        assert!(valid_email("first.last+tag@sub.example.org"));
        assert!(!valid_email("a@x"));
        assert!(!valid_email("ax.com"));
        assert!(!valid_email("a b@x.com"));
        assert!(!valid_email("a@@x.com"));
    }

    #[test]
    fn errors_are_aggregated() {
        let err = Validator::new()
            .required("first_name", "")
            .required("last_name", "Lovelace")
            .email("email", "nope")
            .finish()
            .unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(
                    msg,
                    "first_name is required; email must be a valid email address"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn clean_input_passes() {
        assert!(
            Validator::new()
                .required("password", "p1")
                .email("email", "a@x.com")
                .finish()
                .is_ok()
        );
    }
}
