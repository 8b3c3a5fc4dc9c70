//! Admin gate — decides whether a session may write the catalog.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::traits::AdminRegistry;

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

/// Why access was refused. Diagnostic only; every variant means denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NoSession,
    NotAdministrator,
    RegistryUnavailable,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSession => "no session",
            Self::NotAdministrator => "not an administrator",
            Self::RegistryUnavailable => "administrator registry unavailable",
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Carries the authorized user id.
    Allowed(String),
    Denied(DenyReason),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Check `session` against the administrator registry.
///
/// Fails closed: a registry error is a denial, never an allow.
pub async fn authorize(session: Option<&Session>, registry: &dyn AdminRegistry) -> Access {
    let Some(session) = session else {
        return Access::Denied(DenyReason::NoSession);
    };

    match registry.is_admin(&session.user_id).await {
        Ok(true) => Access::Allowed(session.user_id.clone()),
        Ok(false) => Access::Denied(DenyReason::NotAdministrator),
        Err(e) => {
            warn!("admin registry lookup failed for {}: {e}", session.user_id);
            Access::Denied(DenyReason::RegistryUnavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DelivreError;
    use async_trait::async_trait;

    struct MockRegistry {
        admins: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl AdminRegistry for MockRegistry {
        async fn is_admin(&self, user_id: &str) -> Result<bool, DelivreError> {
            if self.fail {
                return Err(DelivreError::Store("connection reset".to_string()));
            }
            Ok(self.admins.contains(&user_id))
        }
    }

    fn session(user_id: &str) -> Session {
        Session {
            token: "tok".to_string(),
            user_id: user_id.to_string(),
            email: format!("{user_id}@example.com"),
        }
    }

    #[tokio::test]
    async fn test_no_session_denied() {
        let registry = MockRegistry { admins: vec!["u1"], fail: false };
        assert_eq!(
            authorize(None, &registry).await,
            Access::Denied(DenyReason::NoSession)
        );
    }

    #[tokio::test]
    async fn test_session_without_record_denied() {
        let registry = MockRegistry { admins: vec!["u1"], fail: false };
        let s = session("u2");
        assert_eq!(
            authorize(Some(&s), &registry).await,
            Access::Denied(DenyReason::NotAdministrator)
        );
    }

    #[tokio::test]
    async fn test_admin_allowed() {
        let registry = MockRegistry { admins: vec!["u1"], fail: false };
        let s = session("u1");
        let access = authorize(Some(&s), &registry).await;
        assert!(access.is_allowed());
        assert_eq!(access, Access::Allowed("u1".to_string()));
    }

    #[tokio::test]
    async fn test_registry_failure_fails_closed() {
        let registry = MockRegistry { admins: vec!["u1"], fail: true };
        let s = session("u1");
        assert_eq!(
            authorize(Some(&s), &registry).await,
            Access::Denied(DenyReason::RegistryUnavailable)
        );
    }
}
