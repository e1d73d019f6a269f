//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_name, validate_password, validate_user};
use crate::domain::DomainError;

/// Properties supplied when constructing a user. The `password` field holds
/// the one-way hash; plaintext never reaches the entity.
#[derive(Debug, Clone)]
pub struct UserProps {
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// User entity.
///
/// Immutable value type: state changes go through transition functions
/// (`rename`, `change_password`) that validate the changed field and return
/// a new value, so no two references ever observe different states of the
/// same entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Construct a new user, generating a fresh id. Validates every field
    /// and reports all violations at once.
    pub fn new(props: UserProps) -> Result<Self, DomainError> {
        Self::with_id(Uuid::new_v4(), props)
    }

    /// Construct a user with a caller-supplied id (reconstitution from
    /// storage). Validation rules are the same as for `new`.
    pub fn with_id(id: Uuid, props: UserProps) -> Result<Self, DomainError> {
        validate_user(&props.name, &props.email, &props.password)?;

        Ok(Self {
            id,
            name: props.name,
            email: props.email,
            password: props.password,
            created_at: props.created_at.unwrap_or_else(Utc::now),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored password hash. Redaction is a presentation-layer concern.
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Transitions

    /// Return a copy of this user with a new name. Only the name is
    /// re-validated.
    pub fn rename(self, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self { name, ..self })
    }

    /// Return a copy of this user with a new password hash. Only the
    /// password is re-validated.
    pub fn change_password(self, password: impl Into<String>) -> Result<Self, DomainError> {
        let password = password.into();
        validate_password(&password)?;

        Ok(Self { password, ..self })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::user_props;
    use super::*;

    #[test]
    fn test_new_assigns_id_and_created_at() {
        let user = User::new(user_props()).unwrap();

        assert_eq!(user.name(), "Test User");
        assert_eq!(user.email(), "test@example.com");
        assert_eq!(user.password(), "hashed_password");
        assert!(user.created_at() <= Utc::now());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = User::new(user_props()).unwrap();
        let b = User::new(user_props()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_with_id_keeps_supplied_identity() {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let user = User::with_id(
            id,
            UserProps {
                created_at: Some(created_at),
                ..user_props()
            },
        )
        .unwrap();

        assert_eq!(user.id(), id);
        assert_eq!(user.created_at(), created_at);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = User::new(UserProps {
            name: String::new(),
            ..user_props()
        })
        .unwrap_err();

        assert_eq!(err.violations()[0].field, "name");
    }

    #[test]
    fn test_name_of_256_chars_rejected() {
        let err = User::new(UserProps {
            name: "a".repeat(256),
            ..user_props()
        })
        .unwrap_err();

        assert_eq!(err.violations()[0].field, "name");
    }

    #[test]
    fn test_all_violations_reported_together() {
        let err = User::new(UserProps {
            name: String::new(),
            email: "a".repeat(256),
            password: String::new(),
            created_at: None,
        })
        .unwrap_err();

        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn test_rename() {
        let user = User::new(user_props()).unwrap();
        let id = user.id();

        let renamed = user.rename("New Name").unwrap();

        assert_eq!(renamed.name(), "New Name");
        assert_eq!(renamed.id(), id);
        assert_eq!(renamed.email(), "test@example.com");
    }

    #[test]
    fn test_rename_revalidates_name() {
        let user = User::new(user_props()).unwrap();
        assert!(user.rename("").is_err());
    }

    #[test]
    fn test_change_password() {
        let user = User::new(user_props()).unwrap();

        let updated = user.change_password("new_hash").unwrap();

        assert_eq!(updated.password(), "new_hash");
        assert_eq!(updated.name(), "Test User");
    }

    #[test]
    fn test_change_password_revalidates() {
        let user = User::new(user_props()).unwrap();
        assert!(user.change_password("").is_err());

        let user = User::new(user_props()).unwrap();
        assert!(user.change_password("a".repeat(101)).is_err());
    }

    #[test]
    fn test_json_projection() {
        let user = User::new(user_props()).unwrap();
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], user.id().to_string());
        assert_eq!(json["name"], "Test User");
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["password"], "hashed_password");
        assert!(json.get("created_at").is_some());
    }
}
