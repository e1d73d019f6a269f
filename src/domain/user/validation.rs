//! Declarative validation schemas for user fields.
//!
//! Each schema is consumed by the `validator` derive and produces an
//! aggregate `DomainError::Validation` that lists every violated field,
//! never just the first one.

use validator::{Validate, ValidationErrors};

use crate::domain::error::{DomainError, FieldViolation};

pub const MAX_NAME_LENGTH: u64 = 255;
pub const MAX_EMAIL_LENGTH: u64 = 255;
pub const MAX_PASSWORD_LENGTH: u64 = 100;

/// Schema for the full property set, checked at construction.
#[derive(Debug, Validate)]
pub struct UserRules<'a> {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: &'a str,

    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub email: &'a str,

    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub password: &'a str,
}

#[derive(Debug, Validate)]
struct NameRules<'a> {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    name: &'a str,
}

#[derive(Debug, Validate)]
struct PasswordRules<'a> {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    password: &'a str,
}

/// Validate every user field, collecting all violations.
pub fn validate_user(name: &str, email: &str, password: &str) -> Result<(), DomainError> {
    check(
        UserRules {
            name,
            email,
            password,
        }
        .validate(),
    )
}

/// Re-validate only the name (used by the rename transition).
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    check(NameRules { name }.validate())
}

/// Re-validate only the password (used by the change-password transition).
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    check(PasswordRules { password }.validate())
}

fn check(result: Result<(), ValidationErrors>) -> Result<(), DomainError> {
    match result {
        Ok(()) => Ok(()),
        Err(errors) => Err(DomainError::validation(collect_violations(errors))),
    }
}

fn collect_violations(errors: ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                FieldViolation::new(field.to_string(), message)
            })
        })
        .collect();

    // field_errors is a map; order violations by schema field order
    violations.sort_by_key(|v| field_rank(&v.field));
    violations
}

fn field_rank(field: &str) -> usize {
    ["name", "email", "password"]
        .iter()
        .position(|f| *f == field)
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user() {
        assert!(validate_user("John Doe", "john@example.com", "secret").is_ok());
    }

    #[test]
    fn test_empty_name_is_listed() {
        let err = validate_user("", "john@example.com", "secret").unwrap_err();
        let violations = err.violations();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
    }

    #[test]
    fn test_name_over_255_chars() {
        let long = "a".repeat(256);
        assert!(validate_name(&long).is_err());
        assert!(validate_name(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_password_over_100_chars() {
        let long = "a".repeat(101);
        assert!(validate_password(&long).is_err());
        assert!(validate_password(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_all_violations_collected() {
        let err = validate_user("", "", "").unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();

        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[test]
    fn test_empty_password() {
        let err = validate_password("").unwrap_err();
        assert_eq!(err.violations()[0].field, "password");
    }
}
