//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use roomhub_entity::user::UserRole;

/// A system-level permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // User management
    /// Create new staff users.
    UserCreate,
    /// Read user profiles.
    UserRead,
    /// Update user details.
    UserUpdate,
    /// Change user roles.
    UserChangeRole,
    /// Activate, deactivate, or unlock accounts.
    UserChangeStatus,

    // Room inventory
    /// View rooms and availability.
    RoomRead,
    /// Create rooms and edit rates, capacity, and status.
    RoomManage,

    // Guests
    /// View guest profiles.
    GuestRead,
    /// Create and edit guest profiles.
    GuestManage,

    // Reservations
    /// View reservations.
    ReservationRead,
    /// Create reservations.
    ReservationCreate,
    /// Modify dates and guest counts on reservations.
    ReservationUpdate,
    /// Confirm, check in, check out, and cancel reservations.
    ReservationOperate,
    /// Add additional charges to a stay.
    ChargeAdd,

    // Block bookings
    /// View block bookings.
    BlockRead,
    /// Create, confirm, and cancel block bookings.
    BlockManage,

    // Billing
    /// View invoices.
    InvoiceRead,
    /// Settle invoices at check-out.
    CheckoutProcess,

    // Background jobs
    /// View background jobs.
    JobView,

    // System
    /// Access health/status endpoints.
    SystemHealth,
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of permissions.
    policies: HashMap<UserRole, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Guest: self-service booking only
        let mut guest = HashSet::new();
        guest.insert(Permission::RoomRead);
        guest.insert(Permission::ReservationRead);
        guest.insert(Permission::ReservationCreate);
        guest.insert(Permission::ReservationUpdate);
        guest.insert(Permission::SystemHealth);
        policies.insert(UserRole::Guest, guest);

        // Receptionist: front-desk operations
        let mut receptionist = HashSet::new();
        receptionist.insert(Permission::RoomRead);
        receptionist.insert(Permission::GuestRead);
        receptionist.insert(Permission::GuestManage);
        receptionist.insert(Permission::ReservationRead);
        receptionist.insert(Permission::ReservationCreate);
        receptionist.insert(Permission::ReservationUpdate);
        receptionist.insert(Permission::ReservationOperate);
        receptionist.insert(Permission::ChargeAdd);
        receptionist.insert(Permission::BlockRead);
        receptionist.insert(Permission::InvoiceRead);
        receptionist.insert(Permission::CheckoutProcess);
        receptionist.insert(Permission::SystemHealth);
        policies.insert(UserRole::Receptionist, receptionist);

        // Manager: receptionist + inventory and block-booking control
        let mut manager = HashSet::new();
        manager.insert(Permission::UserRead);
        manager.insert(Permission::RoomRead);
        manager.insert(Permission::RoomManage);
        manager.insert(Permission::GuestRead);
        manager.insert(Permission::GuestManage);
        manager.insert(Permission::ReservationRead);
        manager.insert(Permission::ReservationCreate);
        manager.insert(Permission::ReservationUpdate);
        manager.insert(Permission::ReservationOperate);
        manager.insert(Permission::ChargeAdd);
        manager.insert(Permission::BlockRead);
        manager.insert(Permission::BlockManage);
        manager.insert(Permission::InvoiceRead);
        manager.insert(Permission::CheckoutProcess);
        manager.insert(Permission::JobView);
        manager.insert(Permission::SystemHealth);
        policies.insert(UserRole::Manager, manager);

        // Admin: everything
        let admin: HashSet<Permission> = vec![
            Permission::UserCreate,
            Permission::UserRead,
            Permission::UserUpdate,
            Permission::UserChangeRole,
            Permission::UserChangeStatus,
            Permission::RoomRead,
            Permission::RoomManage,
            Permission::GuestRead,
            Permission::GuestManage,
            Permission::ReservationRead,
            Permission::ReservationCreate,
            Permission::ReservationUpdate,
            Permission::ReservationOperate,
            Permission::ChargeAdd,
            Permission::BlockRead,
            Permission::BlockManage,
            Permission::InvoiceRead,
            Permission::CheckoutProcess,
            Permission::JobView,
            Permission::SystemHealth,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: UserRole) -> HashSet<Permission> {
        self.policies.get(&role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: UserRole, permission: &Permission) -> bool {
        self.policies
            .get(&role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
