//! Authentication boundary.
//!
//! The console consumes a current signed-in identity and an explicit
//! sign-out action from the hosted auth provider; it never issues
//! credentials itself.

use crate::entities::Role;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

/// The signed-in account as the auth provider reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account uid, matching the key of the account's record in `users`
    pub uid: String,
    /// Dashboard role of the account
    pub role: Role,
}

/// Boundary to the hosted authentication provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The currently signed-in identity, if any.
    async fn current_identity(&self) -> Option<Identity>;

    /// Signs the current identity out.
    async fn sign_out(&self);
}

/// Auth provider holding a fixed identity, used by tests and the demo
/// binary.
#[derive(Debug, Default)]
pub struct StaticAuth {
    identity: RwLock<Option<Identity>>,
}

impl StaticAuth {
    /// Provider signed in as the given identity.
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    async fn sign_out(&self) {
        let mut identity = self.identity.write().await;
        if let Some(signed_out) = identity.take() {
            info!("signed out {}", signed_out.uid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_out_clears_identity() {
        let auth = StaticAuth::signed_in(Identity {
            uid: "company".to_string(),
            role: Role::Company,
        });
        assert!(auth.current_identity().await.is_some());
        auth.sign_out().await;
        assert!(auth.current_identity().await.is_none());
        // Signing out twice is harmless.
        auth.sign_out().await;
    }
}
