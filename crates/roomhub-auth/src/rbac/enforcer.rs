//! RBAC enforcement logic — checks whether a role has a required permission.

use roomhub_core::error::AppError;
use roomhub_entity::user::UserRole;

use super::policies::{Permission, RbacPolicies};

/// Enforces role-based access control for system-level operations.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the given role has the required permission.
    ///
    /// Returns `Ok(())` if allowed, or an authorization error if denied.
    pub fn require_permission(
        &self,
        role: UserRole,
        permission: &Permission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the required permission (returns bool).
    pub fn has_permission(&self, role: UserRole, permission: &Permission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Checks whether the given role is at least the specified minimum role.
    ///
    /// Role hierarchy: Admin > Manager > Receptionist > Guest
    pub fn require_minimum_role(
        &self,
        actual_role: UserRole,
        minimum_role: UserRole,
    ) -> Result<(), AppError> {
        if actual_role.has_at_least(&minimum_role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{actual_role}' is insufficient; minimum required: '{minimum_role}'"
            )))
        }
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receptionist_can_operate_front_desk() {
        let enforcer = RbacEnforcer::new();
        assert!(
            enforcer
                .require_permission(UserRole::Receptionist, &Permission::CheckoutProcess)
                .is_ok()
        );
        assert!(
            enforcer
                .require_permission(UserRole::Receptionist, &Permission::ReservationOperate)
                .is_ok()
        );
    }

    #[test]
    fn receptionist_cannot_manage_rooms() {
        let enforcer = RbacEnforcer::new();
        assert!(
            enforcer
                .require_permission(UserRole::Receptionist, &Permission::RoomManage)
                .is_err()
        );
    }

    #[test]
    fn block_management_requires_manager() {
        let enforcer = RbacEnforcer::new();
        assert!(!enforcer.has_permission(UserRole::Guest, &Permission::BlockManage));
        assert!(!enforcer.has_permission(UserRole::Receptionist, &Permission::BlockManage));
        assert!(enforcer.has_permission(UserRole::Manager, &Permission::BlockManage));
        assert!(enforcer.has_permission(UserRole::Admin, &Permission::BlockManage));
    }

    #[test]
    fn only_admin_manages_users() {
        let enforcer = RbacEnforcer::new();
        assert!(!enforcer.has_permission(UserRole::Manager, &Permission::UserCreate));
        assert!(enforcer.has_permission(UserRole::Admin, &Permission::UserChangeRole));
    }

    #[test]
    fn role_hierarchy_enforced() {
        let enforcer = RbacEnforcer::new();
        assert!(
            enforcer
                .require_minimum_role(UserRole::Admin, UserRole::Manager)
                .is_ok()
        );
        assert!(
            enforcer
                .require_minimum_role(UserRole::Guest, UserRole::Receptionist)
                .is_err()
        );
    }
}
