use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, NewUser, User};
use crate::features::auth::repositories::UserRepository;
use crate::features::auth::services::SessionService;

/// Resolves session tokens to users
pub struct AuthService {
    sessions: Arc<SessionService>,
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(sessions: Arc<SessionService>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// Verify the token and load its user. Tokens of deleted users are rejected.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        let user_id = self.sessions.verify(token)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session user no longer exists".to_string()))?;

        Ok(user.into())
    }

    /// Create a user and issue a session token for it
    pub async fn create_user_with_session(&self, user: NewUser) -> Result<(User, String)> {
        let user = self.users.create(user).await?;
        let token = self.sessions.issue(user.id)?;
        tracing::info!(user_id = %user.id, is_admin = user.is_admin, "User created");
        Ok((user, token))
    }
}
