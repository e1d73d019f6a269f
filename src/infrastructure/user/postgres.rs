//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::repository::{
    Repository, SearchParams, SearchResult, SearchableRepository, SortDirection,
};
use crate::domain::user::{User, UserProps, UserRepository, UserSortField};
use crate::domain::DomainError;

/// PostgreSQL implementation of the user repository contracts.
///
/// Atomicity is per statement; the signup check-then-insert sequence is two
/// round trips and stays race-prone at this layer (the unique index on
/// `email` is the backstop).
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, password, created_at";

#[async_trait]
impl Repository<User> for PostgresUserRepository {
    async fn insert(&self, entity: User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entity.id())
        .bind(entity.name())
        .bind(entity.email())
        .bind(entity.password())
        .bind(entity.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to insert user"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!(
                "User with id {} not found",
                id
            ))),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn update(&self, entity: User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password = $4, created_at = $5
            WHERE id = $1
            "#,
        )
        .bind(entity.id())
        .bind(entity.name())
        .bind(entity.email())
        .bind(entity.password())
        .bind(entity.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to update user"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User with id {} not found",
                entity.id()
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User with id {} not found",
                id
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<User> for PostgresUserRepository {
    /// Same fixed pipeline as the in-memory oracle, pushed into SQL:
    /// filtered count first, then a filtered + ordered + windowed select.
    async fn search(&self, params: SearchParams) -> Result<SearchResult<User>, DomainError> {
        let pattern = params.filter().map(|f| format!("%{}%", f));

        let total: i64 = match &pattern {
            Some(pattern) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE name ILIKE $1")
                    .bind(pattern)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        let order = order_clause(params.sort(), params.sort_dir());

        let rows = match &pattern {
            Some(pattern) => {
                sqlx::query(&format!(
                    "SELECT {} FROM users WHERE name ILIKE $1 ORDER BY {} LIMIT $2 OFFSET $3",
                    USER_COLUMNS, order
                ))
                .bind(pattern)
                .bind(sql_window(params.per_page()))
                .bind(sql_window(params.offset()))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM users ORDER BY {} LIMIT $1 OFFSET $2",
                    USER_COLUMNS, order
                ))
                .bind(sql_window(params.per_page()))
                .bind(sql_window(params.offset()))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to search users: {}", e)))?;

        let items = rows
            .iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResult::new(items, total as u64, &params))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!(
                "User with email {} not found",
                email
            ))),
        }
    }

    async fn email_exists(&self, email: &str) -> Result<(), DomainError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check email: {}", e)))?;

        if exists {
            return Err(DomainError::conflict("Email address already used"));
        }

        Ok(())
    }
}

/// ORDER BY clause from the allow-list. Requested fields outside the list
/// fall back to newest-first, mirroring the in-memory implementation.
fn order_clause(sort: Option<&str>, sort_dir: Option<SortDirection>) -> String {
    let (field, dir) = match sort.and_then(UserSortField::from_name) {
        Some(field) => (field, sort_dir.unwrap_or(SortDirection::Desc)),
        None => (UserSortField::CreatedAt, SortDirection::Desc),
    };

    let direction = match dir {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };

    format!("{} {}", field.column(), direction)
}

/// LIMIT/OFFSET bind value. Saturated offsets clamp to `i64::MAX` so the
/// cast can never go negative.
fn sql_window(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn map_unique_violation(error: sqlx::Error, context: &str) -> DomainError {
    let message = error.to_string();

    if message.contains("duplicate key") || message.contains("unique constraint") {
        DomainError::conflict("Email address already used")
    } else {
        DomainError::storage(format!("{}: {}", context, error))
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: Uuid = row.get("id");
    let name: String = row.get("name");
    let email: String = row.get("email");
    let password: String = row.get("password");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    User::with_id(
        id,
        UserProps {
            name,
            email,
            password,
            created_at: Some(created_at),
        },
    )
    .map_err(|e| DomainError::storage(format!("Invalid user row in database: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_from_allow_list() {
        assert_eq!(
            order_clause(Some("name"), Some(SortDirection::Asc)),
            "name ASC"
        );
        assert_eq!(
            order_clause(Some("email"), Some(SortDirection::Desc)),
            "email DESC"
        );
        assert_eq!(
            order_clause(Some("created_at"), Some(SortDirection::Asc)),
            "created_at ASC"
        );
    }

    #[test]
    fn test_sql_window_never_negative() {
        assert_eq!(sql_window(0), 0);
        assert_eq!(sql_window(10), 10);
        assert_eq!(sql_window(u64::MAX), i64::MAX);
    }

    #[test]
    fn test_order_clause_defaults() {
        assert_eq!(order_clause(None, None), "created_at DESC");
        // outside the allow-list: never spliced into SQL
        assert_eq!(
            order_clause(Some("password"), Some(SortDirection::Asc)),
            "created_at DESC"
        );
        assert_eq!(
            order_clause(Some("1; DROP TABLE users"), Some(SortDirection::Asc)),
            "created_at DESC"
        );
    }
}
