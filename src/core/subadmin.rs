//! Sub-admin permission management and gating.
//!
//! Only the company account may grant or revoke sub-admin permissions. Every
//! other mutating screen calls [`require_permission`] with the acting
//! account before touching the mutator.

use crate::core::mutate::Mutator;
use crate::entities::{DataSource, FieldPatch, Permission, Record, RecordKey, Role, User};
use crate::errors::{Error, Result};
use crate::store::RemoteStore;
use serde_json::json;
use tracing::info;

/// Checks that the acting account holds a permission.
///
/// # Errors
/// Returns [`Error::PermissionDenied`] naming the refused action.
pub fn require_permission(actor: &User, permission: Permission) -> Result<()> {
    if actor.has_permission(permission) {
        Ok(())
    } else {
        Err(Error::PermissionDenied {
            action: permission.to_string(),
        })
    }
}

/// Grants or revokes one permission on a sub-admin account.
///
/// Gated to the company role. The patch touches only the one permission
/// entry, so concurrently granted permissions on the same account are not
/// clobbered.
pub async fn toggle_permission<S: RemoteStore>(
    mutator: &Mutator<S>,
    actor: &User,
    target_uid: &str,
    permission: Permission,
    grant: bool,
) -> Result<Record> {
    if actor.role != Role::Company {
        return Err(Error::PermissionDenied {
            action: format!("toggle {permission}"),
        });
    }

    let key = RecordKey::new(DataSource::Users, target_uid);
    let Some(Record::User(target)) = mutator.current(&key).await else {
        return Err(Error::NotFound {
            collection: key.source,
            key: key.id,
        });
    };
    if target.role != Role::Subadmin {
        return Err(Error::Validation {
            message: format!("{} is not a sub-admin account", target_uid),
        });
    }

    let patch = FieldPatch::new().set(
        "permissions",
        json!({ (permission.as_str()): grant }),
    );
    info!(
        "{} permission {} on {}",
        if grant { "granting" } else { "revoking" },
        permission,
        target_uid
    );
    mutator.apply(&key, patch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{company_user, seeded_user_mutator};

    #[tokio::test]
    async fn test_grant_preserves_other_permissions() {
        let (mutator, store) = seeded_user_mutator().await;
        let actor = company_user();

        let updated = toggle_permission(&mutator, &actor, "sub1", Permission::ManageOrders, true)
            .await
            .unwrap();
        let Record::User(user) = updated else {
            panic!("expected user");
        };
        assert!(user.has_permission(Permission::ManageOrders));
        // The pre-existing grant survives the single-entry patch.
        assert!(user.has_permission(Permission::ExportReports));

        let stored = store.stored(DataSource::Users, "sub1").await.unwrap();
        assert_eq!(stored["permissions"]["manageOrders"], json!(true));
        assert_eq!(stored["permissions"]["exportReports"], json!(true));
    }

    #[tokio::test]
    async fn test_non_company_actor_is_refused() {
        let (mutator, _store) = seeded_user_mutator().await;
        let actor = User {
            role: Role::Subadmin,
            ..User::default()
        };
        let err = toggle_permission(&mutator, &actor, "sub1", Permission::ManageOrders, true)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn test_target_must_be_subadmin() {
        let (mutator, _store) = seeded_user_mutator().await;
        let err = toggle_permission(
            &mutator,
            &company_user(),
            "seller1",
            Permission::ManageOrders,
            true,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_require_permission_names_the_action() {
        let seller = User {
            role: Role::Seller,
            ..User::default()
        };
        let err = require_permission(&seller, Permission::ExportReports).unwrap_err();
        assert_eq!(
            err.to_string(),
            "permission denied: exportReports"
        );
    }
}
