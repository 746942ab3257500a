//! Console user accounts.
//!
//! One collection holds every dashboard account; the `role` field decides
//! which dashboard the account sees, and sub-admin accounts additionally
//! carry a permission map gating what they may mutate.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Dashboard role of a console account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Company owner dashboard, unrestricted
    Company,
    /// Chartered-accountant dashboard
    Ca,
    /// Sub-admin dashboard, gated per [`Permission`]
    Subadmin,
    /// Seller dashboard
    #[default]
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Role::Company => "company",
            Role::Ca => "ca",
            Role::Subadmin => "subadmin",
            Role::Seller => "seller",
        };
        f.write_str(text)
    }
}

/// A single grantable capability on a sub-admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    /// Advance and cancel orders
    ManageOrders,
    /// Activate, deactivate and suspend trainers
    ManageTrainers,
    /// Enable and disable products
    ManageProducts,
    /// Create and edit training sessions
    ManageTrainings,
    /// Export CSV reports
    ExportReports,
}

impl Permission {
    /// Wire name of the permission, as stored in the permission map.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::ManageOrders => "manageOrders",
            Permission::ManageTrainers => "manageTrainers",
            Permission::ManageProducts => "manageProducts",
            Permission::ManageTrainings => "manageTrainings",
            Permission::ExportReports => "exportReports",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A console user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// Account uid (the collection key)
    pub uid: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Dashboard role
    pub role: Role,
    /// MLM level of a seller account (e.g. "silver", "gold")
    pub current_level: Option<String>,
    /// Sub-admin permission map; absent entries mean "not granted"
    pub permissions: HashMap<Permission, bool>,
    /// When the account was created
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl User {
    /// Whether this account holds a permission. Company and CA accounts hold
    /// every permission implicitly; sellers hold none.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self.role {
            Role::Company | Role::Ca => true,
            Role::Subadmin => self.permissions.get(&permission).copied().unwrap_or(false),
            Role::Seller => false,
        }
    }
}
