use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{NewUser, User};

/// Persistence for users. Only lookups needed by the session layer plus
/// creation for seeding.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn create(&self, user: NewUser) -> Result<User>;
}

/// Postgres-backed user store
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, is_admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user by id: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, is_admin, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // Unique violation on email
                if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
                    return AppError::BadRequest(format!(
                        "A user with email {} already exists",
                        user.email
                    ));
                }
            }
            AppError::Database(e)
        })
    }
}

/// In-memory user store, used when no database is configured and in tests
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::BadRequest(format!(
                "A user with email {} already exists",
                user.email
            )));
        }

        let created = User {
            id: Uuid::now_v7(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, is_admin: bool) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            is_admin,
        }
    }

    #[tokio::test]
    async fn test_in_memory_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("admin@example.com", true)).await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "admin@example.com");
        assert!(found.is_admin);
        assert!(repo.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("dup@example.com", false)).await.unwrap();

        let result = repo.create(new_user("dup@example.com", false)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
