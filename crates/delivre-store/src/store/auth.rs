//! Users, bearer sessions, and the administrator registry.

use super::Store;
use crate::password::{hash_password, verify_password, verify_unknown_account};
use async_trait::async_trait;
use delivre_core::{
    admin::Session,
    error::DelivreError,
    traits::{AdminRegistry, SessionStore},
};
use tracing::{info, warn};
use uuid::Uuid;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Store {
    /// Create a user with a password. Returns the user id.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<String, DelivreError> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(DelivreError::Validation(format!("invalid email {email:?}")));
        }
        if password.len() < 8 {
            return Err(DelivreError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        let hash = hash_password(password)?;
        sqlx::query("INSERT INTO users (id, email, password_hash) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&email)
            .bind(&hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false);
                if duplicate {
                    DelivreError::Validation(format!("user {email} already exists"))
                } else {
                    DelivreError::Store(format!("create user failed: {e}"))
                }
            })?;

        info!("user created: {email}");
        Ok(id)
    }

    pub async fn user_id_by_email(&self, email: &str) -> Result<Option<String>, DelivreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DelivreError::Store(format!("user lookup failed: {e}")))?;
        Ok(row.map(|(id,)| id))
    }

    /// Add a user to the administrator registry. Idempotent.
    pub async fn grant_admin(&self, user_id: &str) -> Result<(), DelivreError> {
        sqlx::query("INSERT OR IGNORE INTO admin_users (user_id) VALUES (?)")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DelivreError::Store(format!("grant admin failed: {e}")))?;
        info!("admin granted: {user_id}");
        Ok(())
    }

    /// Drop expired sessions. Returns how many were removed.
    pub async fn purge_expired_sessions(&self) -> Result<u64, DelivreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE datetime(expires_at) <= datetime('now')")
            .execute(&self.pool)
            .await
            .map_err(|e| DelivreError::Store(format!("purge sessions failed: {e}")))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AdminRegistry for Store {
    async fn is_admin(&self, user_id: &str) -> Result<bool, DelivreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM admin_users WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DelivreError::Store(format!("admin lookup failed: {e}")))?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl SessionStore for Store {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, DelivreError> {
        let email = normalize_email(email);
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT id, password_hash FROM users WHERE email = ?")
                .bind(&email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DelivreError::Store(format!("sign-in lookup failed: {e}")))?;

        let Some((user_id, hash)) = row else {
            verify_unknown_account(password);
            warn!("sign-in for unknown user {email}");
            return Ok(None);
        };
        if !verify_password(password, &hash)? {
            warn!("sign-in with wrong password for {email}");
            return Ok(None);
        }

        let token = Uuid::new_v4().simple().to_string();
        sqlx::query(
            "INSERT INTO sessions (token, user_id, expires_at) \
             VALUES (?, ?, datetime('now', ? || ' hours'))",
        )
        .bind(&token)
        .bind(&user_id)
        .bind(self.session_ttl_hours)
        .execute(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("create session failed: {e}")))?;

        info!("session opened for {email}");
        Ok(Some(Session {
            token,
            user_id,
            email,
        }))
    }

    async fn session(&self, token: &str) -> Result<Option<Session>, DelivreError> {
        let row: Option<(String, String)> = sqlx::query_as(
            "SELECT s.user_id, u.email FROM sessions s JOIN users u ON u.id = s.user_id \
             WHERE s.token = ? AND datetime(s.expires_at) > datetime('now')",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("session lookup failed: {e}")))?;

        Ok(row.map(|(user_id, email)| Session {
            token: token.to_string(),
            user_id,
            email,
        }))
    }

    async fn sign_out(&self, token: &str) -> Result<(), DelivreError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| DelivreError::Store(format!("sign out failed: {e}")))?;
        Ok(())
    }
}
